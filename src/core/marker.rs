//! Karten-Marker und Marker-Dateien.

use std::path::PathBuf;

use super::color::{marker_color, Rgba};
use super::icons::{icon_key, IconRegistry};

/// Mindest-Zoomstufe für Marker ohne Angabe.
pub const DEFAULT_MARKER_ZOOM: usize = 3;
/// Mindest-Zoomstufe für Marker aus dem Marker-Manager.
pub const USER_MARKER_ZOOM: usize = 4;
/// Standard-Farbe für "Marker auf Spieler".
pub const DEFAULT_USER_MARKER_COLOR: &str = "blue";

/// Ein Point-of-Interest auf der Karte.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Anzeigename
    pub name: String,
    /// Weltposition X
    pub x: i32,
    /// Weltposition Y
    pub y: i32,
    /// Facet-Index
    pub facet: i32,
    /// Icon-Name wie in der Datei (kleingeschrieben)
    pub icon_name: String,
    /// Registry-Schlüssel, falls das Icon geladen ist
    pub icon: Option<String>,
    /// Farbe, transparent bei "none"
    pub color: Rgba,
    /// Farbname wie in der Datei
    pub color_name: String,
    /// Ab dieser Zoomstufe wird das Icon gezeichnet
    pub zoom_index: usize,
}

impl Marker {
    /// Erstellt einen Marker mit Farbe Weiß und Standard-Zoom.
    pub fn new(name: impl Into<String>, x: i32, y: i32, facet: i32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            facet,
            icon_name: String::new(),
            icon: None,
            color: super::color::WHITE,
            color_name: "white".to_string(),
            zoom_index: DEFAULT_MARKER_ZOOM,
        }
    }

    pub fn with_icon(mut self, icon_name: &str) -> Self {
        self.icon_name = icon_key(icon_name);
        self
    }

    pub fn with_color(mut self, color_name: &str) -> Self {
        self.color = marker_color(color_name);
        self.color_name = color_name.to_string();
        self
    }

    pub fn with_zoom(mut self, zoom_index: usize) -> Self {
        self.zoom_index = zoom_index;
        self
    }

    /// Löst den Icon-Namen gegen die Registry auf.
    pub fn resolve_icon(&mut self, icons: &IconRegistry) {
        self.icon = if self.icon_name.is_empty() {
            None
        } else {
            icons.resolve(&self.icon_name)
        };
    }

    /// "none"-Marker: ohne Icon unsichtbar.
    pub fn is_transparent(&self) -> bool {
        self.color[3] == 0
    }
}

/// Herkunftsformat einer Marker-Datei.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerFileKind {
    /// Benutzerdatei `.usr` (CSV, editierbar)
    User,
    /// `.csv`
    Csv,
    /// UOAM `.map`
    Uoam,
    /// UltimaMapper `.xml`
    UltimaMapper,
}

impl MarkerFileKind {
    /// Leitet das Format aus der Dateiendung ab.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "usr" => Some(Self::User),
            "csv" => Some(Self::Csv),
            "map" => Some(Self::Uoam),
            "xml" => Some(Self::UltimaMapper),
            _ => None,
        }
    }
}

/// Eine geladene Marker-Datei.
#[derive(Debug, Clone)]
pub struct MarkerFile {
    /// Dateiname inkl. Endung
    pub name: String,
    pub path: PathBuf,
    pub kind: MarkerFileKind,
    pub markers: Vec<Marker>,
    /// Ausgeblendet über die Einstellungen
    pub hidden: bool,
    /// Nur die Benutzerdatei ist editierbar
    pub editable: bool,
}

impl MarkerFile {
    /// Löst alle Icons der Datei auf.
    pub fn resolve_icons(&mut self, icons: &IconRegistry) {
        for marker in &mut self.markers {
            marker.resolve_icon(icons);
        }
    }
}
