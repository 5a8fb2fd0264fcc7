//! Einstellungen des Weltkarten-Viewers.
//!
//! `WorldMapSettings` enthält alle persistierten Ansichts- und Sichtbarkeits-
//! werte. Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::DEFAULT_ZOOM_INDEX;

// ── Fenster ─────────────────────────────────────────────────────────

/// Standard-Fensterbreite in Pixeln.
pub const WINDOW_WIDTH: f32 = 400.0;
/// Standard-Fensterhöhe in Pixeln.
pub const WINDOW_HEIGHT: f32 = 400.0;
/// Kleinste Fenstergröße.
pub const WINDOW_MIN_SIZE: f32 = 100.0;

// ── Schrift ─────────────────────────────────────────────────────────

/// Kleinste Schriftstufe.
pub const FONT_INDEX_MIN: u8 = 1;
/// Größte Schriftstufe.
pub const FONT_INDEX_MAX: u8 = 6;
/// Standard-Schriftstufe.
pub const FONT_INDEX_DEFAULT: u8 = 1;

// ── Overlays ───────────────────────────────────────────────────────

/// Kantenlänge eines Marker-Punkts in Pixeln.
pub const MARKER_DOT_SIZE: f32 = 4.0;
/// Kantenlänge eines Mobile-Punkts in Pixeln.
pub const MOBILE_DOT_SIZE: f32 = 4.0;
/// Ab dieser Zoomstufe (exklusiv) werden Markernamen gezeichnet.
pub const MARKER_NAME_MIN_ZOOM_INDEX: usize = 5;
/// Gitterabstand in Tiles.
pub const GRID_SPACING: i32 = 8;
/// Mindest-Zoomfaktor für das Gitter.
pub const GRID_MIN_ZOOM: f32 = 4.0;
/// Größe des Lebensbalkens in Pixeln.
pub const HP_BAR_SIZE: [f32; 2] = [25.0, 3.0];

// ── Pfade ──────────────────────────────────────────────────────────

/// Datenverzeichnisse des Viewers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataPaths {
    /// Client-Verzeichnis mit `map#.mul`, `staidx#.mul`, `statics#.mul`, `radarcol.mul`
    pub client_dir: PathBuf,
    /// Verzeichnis mit `.map`/`.csv`/`.xml`-Markerdateien
    pub markers_dir: PathBuf,
    /// Verzeichnis mit Marker-Icons
    pub icons_dir: PathBuf,
    /// Verzeichnis mit `*.zones.json`
    pub zones_dir: PathBuf,
    /// Benutzer-Markerdatei (`.usr`)
    pub user_markers_file: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        let client = PathBuf::from("client");
        Self {
            markers_dir: client.join("Data").join("Client"),
            icons_dir: client.join("Data").join("Client").join("MapIcons"),
            zones_dir: client.join("Data").join("Client"),
            user_markers_file: client.join("Data").join("Client").join("userMarkers.usr"),
            client_dir: client,
        }
    }
}

impl DataPaths {
    /// Leitet alle Pfade aus einem Client-Verzeichnis ab.
    pub fn from_client_dir(client_dir: impl Into<PathBuf>) -> Self {
        let client_dir = client_dir.into();
        let data = client_dir.join("Data").join("Client");
        Self {
            markers_dir: data.clone(),
            icons_dir: data.join("MapIcons"),
            zones_dir: data.clone(),
            user_markers_file: data.join("userMarkers.usr"),
            client_dir,
        }
    }
}

// ── Laufzeit-Einstellungen (serialisierbar) ────────────────────────

/// Alle persistierten Einstellungen der Weltkarte.
/// Wird als `uo_world_map.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldMapSettings {
    // ── Fenster ─────────────────────────────────────────────────
    pub width: f32,
    pub height: f32,
    /// Immer im Vordergrund
    pub top_most: bool,
    /// Schriftstufe 1–6
    pub font_index: u8,

    // ── Ansicht ─────────────────────────────────────────────────
    /// Aktive Facet beim Start
    pub facet: u8,
    pub zoom_index: usize,
    /// 45°-Drehung
    pub flip_map: bool,
    pub free_view: bool,
    /// Gitter ab Zoom 4×
    pub show_grid_if_zoomed: bool,

    // ── Overlays ────────────────────────────────────────────────
    pub show_party_members: bool,
    pub show_mobiles: bool,
    pub show_multis: bool,
    pub show_player_name: bool,
    pub show_player_bar: bool,
    pub show_group_name: bool,
    pub show_group_bar: bool,
    pub show_coordinates: bool,
    pub show_mouse_coordinates: bool,

    // ── Marker & Zonen ─────────────────────────────────────────
    pub show_markers: bool,
    pub show_marker_names: bool,
    pub show_marker_icons: bool,
    /// Ausgeblendete Marker-Dateien (Dateinamen)
    pub hidden_marker_files: Vec<String>,
    /// Ausgeblendete Zonen-Dateien (Dateinamen)
    pub hidden_zone_files: Vec<String>,

    // ── Targeting ──────────────────────────────────────────────
    /// Linksklick auf die Karte beantwortet Positions-Targets
    pub allow_positional_target: bool,

    pub paths: DataPaths,
}

impl Default for WorldMapSettings {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            top_most: false,
            font_index: FONT_INDEX_DEFAULT,
            facet: 0,
            zoom_index: DEFAULT_ZOOM_INDEX,
            flip_map: true,
            free_view: false,
            show_grid_if_zoomed: false,
            show_party_members: true,
            show_mobiles: true,
            show_multis: true,
            show_player_name: false,
            show_player_bar: false,
            show_group_name: true,
            show_group_bar: true,
            show_coordinates: true,
            show_mouse_coordinates: true,
            show_markers: true,
            show_marker_names: true,
            show_marker_icons: true,
            hidden_marker_files: Vec::new(),
            hidden_zone_files: Vec::new(),
            allow_positional_target: false,
            paths: DataPaths::default(),
        }
    }
}

impl WorldMapSettings {
    /// Lädt Einstellungen aus einer TOML-Datei; bei Fehler Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(settings) => {
                    log::info!("Einstellungen geladen aus: {}", path.display());
                    settings.normalized()
                }
                Err(e) => {
                    log::warn!("Einstellungs-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Einstellungs-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert die Einstellungen als TOML.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Einstellungen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Standardpfad der Einstellungs-Datei neben der Binary.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| PathBuf::from("uo_world_map"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("uo_world_map.toml")
    }

    /// Begrenzt Werte auf gültige Bereiche.
    pub fn normalized(mut self) -> Self {
        self.font_index = self.font_index.clamp(FONT_INDEX_MIN, FONT_INDEX_MAX);
        self.zoom_index = self.zoom_index.min(crate::core::ZOOMS.len() - 1);
        self.width = self.width.max(WINDOW_MIN_SIZE);
        self.height = self.height.max(WINDOW_MIN_SIZE);
        self
    }

    /// Trägt eine Marker-Datei in die Ausblendliste ein oder entfernt sie.
    pub fn set_marker_file_hidden(&mut self, name: &str, hidden: bool) {
        set_entry(&mut self.hidden_marker_files, name, hidden);
    }

    /// Trägt eine Zonen-Datei in die Ausblendliste ein oder entfernt sie.
    pub fn set_zone_file_hidden(&mut self, file_name: &str, hidden: bool) {
        set_entry(&mut self.hidden_zone_files, file_name, hidden);
    }
}

/// Exakter Namensvergleich, keine Duplikate.
fn set_entry(list: &mut Vec<String>, name: &str, present: bool) {
    let pos = list.iter().position(|n| n == name);
    match (present, pos) {
        (true, None) => list.push(name.to_string()),
        (false, Some(pos)) => {
            list.remove(pos);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_toml_roundtrip() {
        let mut settings = WorldMapSettings::default();
        settings.zoom_index = 7;
        settings.flip_map = false;
        settings.hidden_marker_files = vec!["a.csv".into(), "b.map".into()];
        settings.paths = DataPaths::from_client_dir("/games/uo");

        let text = toml::to_string_pretty(&settings).unwrap();
        let back: WorldMapSettings = toml::from_str(&text).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let back: WorldMapSettings = toml::from_str("zoom_index = 2\n").unwrap();
        assert_eq!(back.zoom_index, 2);
        assert!(back.flip_map);
        assert_eq!(back.font_index, FONT_INDEX_DEFAULT);
    }

    #[test]
    fn test_normalized_clamps_ranges() {
        let mut settings = WorldMapSettings::default();
        settings.font_index = 9;
        settings.zoom_index = 30;
        settings.width = 10.0;
        let s = settings.normalized();
        assert_eq!(s.font_index, FONT_INDEX_MAX);
        assert_eq!(s.zoom_index, 9);
        assert_eq!(s.width, WINDOW_MIN_SIZE);
    }

    #[test]
    fn test_hidden_file_lists_match_exact_names() {
        let mut settings = WorldMapSettings::default();
        settings.set_marker_file_hidden("x.csv", true);
        settings.set_marker_file_hidden("x.csv", true);
        assert_eq!(settings.hidden_marker_files, vec!["x.csv".to_string()]);
        settings.set_marker_file_hidden("X.csv", false);
        assert_eq!(settings.hidden_marker_files.len(), 1);
        settings.set_marker_file_hidden("x.csv", false);
        assert!(settings.hidden_marker_files.is_empty());
        settings.set_zone_file_hidden("z.zones.json", true);
        assert_eq!(settings.hidden_zone_files, vec!["z.zones.json".to_string()]);
    }

    #[test]
    fn test_paths_from_client_dir() {
        let paths = DataPaths::from_client_dir("/uo");
        assert_eq!(paths.icons_dir, PathBuf::from("/uo/Data/Client/MapIcons"));
        assert_eq!(
            paths.user_markers_file,
            PathBuf::from("/uo/Data/Client/userMarkers.usr")
        );
    }
}
