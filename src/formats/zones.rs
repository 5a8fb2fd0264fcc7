//! Zonen-Dateien (`*.zones.json`).
//!
//! ```json
//! { "MapIndex": 0, "Zones": [ { "Label": "Britain", "Color": "red", "Polygon": [[1,2],[3,4]] } ] }
//! ```
//! Unbekannte Farbnamen lassen die ganze Datei scheitern.

use anyhow::{Context, Result};
use glam::IVec2;
use serde::Deserialize;
use std::path::Path;

use crate::core::color::{color_by_name, Rgba};
use crate::core::{Zone, ZoneSet, ZoneSets};

/// Dateiendung der Zonen-Dateien.
pub const ZONES_SUFFIX: &str = ".zones.json";

/// Farbe aus der festen Namenstabelle.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
struct ZoneColor(Rgba);

impl TryFrom<String> for ZoneColor {
    type Error = String;

    fn try_from(name: String) -> std::result::Result<Self, Self::Error> {
        color_by_name(&name)
            .map(ZoneColor)
            .ok_or_else(|| format!("Unbekannte Zonenfarbe '{name}'"))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ZoneEntry {
    #[serde(default)]
    label: String,
    color: ZoneColor,
    polygon: Vec<[i32; 2]>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ZonesDocument {
    map_index: i32,
    #[serde(default)]
    zones: Vec<ZoneEntry>,
}

/// Ergebnis des Parsens: Facet und Zonen.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedZones {
    pub facet: i32,
    pub zones: Vec<Zone>,
}

/// Parst ein Zonen-Dokument.
pub fn parse_zones(json: &str) -> Result<ParsedZones> {
    let doc: ZonesDocument = serde_json::from_str(json).context("Zonen-JSON ungültig")?;
    let zones = doc
        .zones
        .into_iter()
        .map(|z| {
            let vertices = z.polygon.iter().map(|&[x, y]| IVec2::new(x, y)).collect();
            Zone::new(z.label, z.color.0, vertices)
        })
        .collect();
    Ok(ParsedZones {
        facet: doc.map_index,
        zones,
    })
}

/// Anzeigename einer Zonen-Datei (ohne `.zones.json`).
pub fn zone_set_name(file_name: &str) -> &str {
    file_name.strip_suffix(ZONES_SUFFIX).unwrap_or(file_name)
}

/// Lädt eine einzelne Zonen-Datei.
pub fn load_zone_file(path: &Path) -> Result<ZoneSet> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Ungültiger Dateiname: {}", path.display()))?
        .to_string();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Zonen-Datei nicht lesbar: {}", path.display()))?;
    let parsed =
        parse_zones(&json).with_context(|| format!("Zonen-Datei fehlerhaft: {}", path.display()))?;

    Ok(ZoneSet {
        name: zone_set_name(&file_name).to_string(),
        file_name,
        path: path.to_path_buf(),
        facet: parsed.facet,
        hidden: false,
        zones: parsed.zones,
    })
}

/// Lädt alle `*.zones.json` eines Verzeichnisses.
///
/// Jede Datei wird für sich geladen: eine fehlerhafte Datei wird geloggt und
/// übersprungen, die übrigen werden trotzdem geladen.
pub fn load_zone_sets(dir: &Path, hidden_files: &[String]) -> ZoneSets {
    let mut sets = ZoneSets::new();
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Zonen-Verzeichnis {} nicht lesbar: {}", dir.display(), e);
            return sets;
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.to_ascii_lowercase().ends_with(ZONES_SUFFIX))
        })
        .collect();
    paths.sort();

    for path in paths {
        match load_zone_file(&path) {
            Ok(mut set) => {
                set.hidden = hidden_files.contains(&set.file_name);
                log::info!(
                    "Zonen geladen: {} ({} Zonen, Facet {})",
                    set.file_name,
                    set.zones.len(),
                    set.facet
                );
                sets.insert(set);
            }
            Err(e) => log::warn!("Zonen-Datei übersprungen: {:#}", e),
        }
    }
    sets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::{RED, TRANSPARENT};

    #[test]
    fn test_parse_zones_with_bounds() {
        let json = r#"{ "MapIndex": 1, "Zones": [
            { "Label": "Britain", "Color": "red", "Polygon": [[10, 20], [30, 5], [15, 40]] },
            { "Label": "Ghost", "Color": "None", "Polygon": [] }
        ] }"#;
        let parsed = parse_zones(json).unwrap();
        assert_eq!(parsed.facet, 1);
        assert_eq!(parsed.zones.len(), 2);
        let z = &parsed.zones[0];
        assert_eq!(z.color, RED);
        assert_eq!(z.bounds.min, IVec2::new(10, 5));
        assert_eq!(z.bounds.max, IVec2::new(30, 40));
        assert_eq!(parsed.zones[1].color, TRANSPARENT);
    }

    #[test]
    fn test_unknown_color_fails_document() {
        let json = r#"{ "MapIndex": 0, "Zones": [ { "Label": "x", "Color": "orange", "Polygon": [[1,1]] } ] }"#;
        let err = parse_zones(json).unwrap_err();
        assert!(format!("{err:#}").contains("orange"));
    }

    #[test]
    fn test_zone_set_name_strips_suffix() {
        assert_eq!(zone_set_name("felucca.zones.json"), "felucca");
        assert_eq!(zone_set_name("other.json"), "other.json");
    }
}
