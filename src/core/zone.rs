//! Zonen: beschriftete Polygone als Overlay.

use glam::IVec2;
use indexmap::IndexMap;
use std::path::PathBuf;

use super::bounds::WorldRect;
use super::color::Rgba;

/// Ein Polygon mit Beschriftung und Farbe.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub label: String,
    pub color: Rgba,
    pub vertices: Vec<IVec2>,
    /// Min/Max-Ausdehnung der Eckpunkte
    pub bounds: WorldRect,
}

impl Zone {
    /// Erstellt eine Zone und berechnet das umschließende Rechteck.
    pub fn new(label: impl Into<String>, color: Rgba, vertices: Vec<IVec2>) -> Self {
        let bounds = WorldRect::from_points(&vertices).unwrap_or_default();
        Self {
            label: label.into(),
            color,
            vertices,
            bounds,
        }
    }

    /// Kanten des geschlossenen Polygons (letzter Punkt → erster Punkt).
    pub fn edges(&self) -> impl Iterator<Item = (IVec2, IVec2)> + '_ {
        let n = self.vertices.len();
        let count = if n < 2 { 0 } else { n };
        (0..count).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

/// Alle Zonen einer Datei.
#[derive(Debug, Clone)]
pub struct ZoneSet {
    /// Dateiname ohne `.zones.json`
    pub name: String,
    /// Dateiname inkl. Endung
    pub file_name: String,
    pub path: PathBuf,
    pub facet: i32,
    pub hidden: bool,
    pub zones: Vec<Zone>,
}

/// Geladene Zonen-Dateien, nach Dateiname.
#[derive(Debug, Clone, Default)]
pub struct ZoneSets {
    sets: IndexMap<String, ZoneSet>,
}

impl ZoneSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, set: ZoneSet) {
        self.sets.insert(set.file_name.clone(), set);
    }

    pub fn get(&self, file_name: &str) -> Option<&ZoneSet> {
        self.sets.get(file_name)
    }

    /// Schaltet die Sichtbarkeit einer Datei um. Gibt den neuen Zustand zurück.
    pub fn toggle_hidden(&mut self, file_name: &str) -> Option<bool> {
        let set = self.sets.get_mut(file_name)?;
        set.hidden = !set.hidden;
        Some(set.hidden)
    }

    /// Dateinamen aller ausgeblendeten Dateien.
    pub fn hidden_files(&self) -> Vec<String> {
        self.sets
            .values()
            .filter(|s| s.hidden)
            .map(|s| s.file_name.clone())
            .collect()
    }

    pub fn sets(&self) -> impl Iterator<Item = &ZoneSet> {
        self.sets.values()
    }

    /// Sichtbare Zonen einer Facet.
    pub fn visible_zones(&self, facet: i32) -> impl Iterator<Item = &Zone> {
        self.sets
            .values()
            .filter(move |s| !s.hidden && s.facet == facet)
            .flat_map(|s| s.zones.iter())
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
