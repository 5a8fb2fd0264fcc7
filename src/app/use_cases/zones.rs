//! Use-Cases für Zonen-Dateien.

use crate::app::WorldMapState;
use crate::formats::load_zone_sets;

/// Lädt alle Zonen-Dateien neu.
pub fn reload(state: &mut WorldMapState) {
    state.zones = load_zone_sets(
        &state.settings.paths.zones_dir,
        &state.settings.hidden_zone_files,
    );
    log::info!("{} Zonen-Dateien geladen", state.zones.len());
}

/// Blendet eine Zonen-Datei ein oder aus.
pub fn toggle_file(state: &mut WorldMapState, file_name: &str) {
    match state.zones.toggle_hidden(file_name) {
        Some(hidden) => state.settings.set_zone_file_hidden(file_name, hidden),
        None => log::warn!("Zonen-Datei nicht geladen: {}", file_name),
    }
}
