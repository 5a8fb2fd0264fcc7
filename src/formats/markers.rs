//! Laden aller Marker-Dateien eines Verzeichnisses.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::{csv, uoam, ultima_mapper};
use crate::core::{IconRegistry, MarkerFile, MarkerFileKind};

/// Reihenfolge der Fremdformate nach der Benutzerdatei.
const FOREIGN_EXTENSIONS: [&str; 3] = ["map", "csv", "xml"];

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Lädt eine Marker-Datei; das Format folgt aus der Endung.
pub fn load_marker_file(path: &Path) -> Result<MarkerFile> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let kind = MarkerFileKind::from_extension(ext)
        .with_context(|| format!("Unbekanntes Marker-Format: {}", path.display()))?;

    let markers = match kind {
        MarkerFileKind::User => csv::load_user_markers(path)?,
        MarkerFileKind::Csv | MarkerFileKind::Uoam | MarkerFileKind::UltimaMapper => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Marker-Datei nicht lesbar: {}", path.display()))?;
            match kind {
                MarkerFileKind::Csv => csv::parse_csv(&content),
                MarkerFileKind::Uoam => uoam::parse_uoam(&content),
                _ => ultima_mapper::parse_ultima_mapper(&content)
                    .with_context(|| format!("UltimaMapper-Datei fehlerhaft: {}", path.display()))?,
            }
        }
    };

    Ok(MarkerFile {
        name: file_name(path),
        path: path.to_path_buf(),
        kind,
        markers,
        hidden: false,
        editable: kind == MarkerFileKind::User,
    })
}

/// Listet die Fremd-Markerdateien eines Verzeichnisses in Ladereihenfolge.
pub fn list_marker_files(dir: &Path) -> Vec<PathBuf> {
    let mut all: Vec<PathBuf> = match std::fs::read_dir(dir) {
        Ok(entries) => entries.filter_map(|e| e.ok().map(|e| e.path())).collect(),
        Err(e) => {
            log::warn!("Marker-Verzeichnis {} nicht lesbar: {}", dir.display(), e);
            return Vec::new();
        }
    };
    all.sort();

    let mut ordered = Vec::new();
    for wanted in FOREIGN_EXTENSIONS {
        ordered.extend(all.iter().filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(wanted))
        }).cloned());
    }
    ordered
}

/// Lädt die Benutzerdatei und alle Fremddateien.
///
/// Die Benutzerdatei steht immer an erster Stelle und wird bei Bedarf
/// angelegt. Fehlerhafte Dateien werden geloggt und übersprungen.
pub fn load_marker_files(
    user_file: &Path,
    markers_dir: &Path,
    hidden_files: &[String],
    icons: &IconRegistry,
) -> Vec<MarkerFile> {
    let mut paths = vec![user_file.to_path_buf()];
    paths.extend(
        list_marker_files(markers_dir)
            .into_iter()
            .filter(|p| p != user_file),
    );

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        match load_marker_file(&path) {
            Ok(mut file) => {
                file.hidden = hidden_files.contains(&file.name);
                file.resolve_icons(icons);
                log::info!("Marker geladen: {} ({})", file.name, file.markers.len());
                files.push(file);
            }
            Err(e) => log::warn!("Marker-Datei übersprungen: {:#}", e),
        }
    }

    let total: usize = files.iter().map(|f| f.markers.len()).sum();
    log::info!("{} Marker aus {} Dateien geladen", total, files.len());
    files
}
