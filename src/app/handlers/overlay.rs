//! Handler für Marker- und Zonen-Overlays.

use crate::app::events::UserMarkerDraft;
use crate::app::use_cases;
use crate::app::WorldMapState;

/// Lädt Icons und Marker-Dateien neu.
pub fn reload_markers(state: &mut WorldMapState) {
    use_cases::markers::reload(state);
}

/// Blendet eine Marker-Datei ein oder aus.
pub fn toggle_marker_file(state: &mut WorldMapState, name: &str) {
    use_cases::markers::toggle_file(state, name);
}

/// Blendet alle Marker-Dateien ein oder aus.
pub fn set_all_marker_files_hidden(state: &mut WorldMapState, hidden: bool) {
    use_cases::markers::set_all_hidden(state, hidden);
}

/// Legt einen Marker an der Spielerposition an und propagiert Schreibfehler.
pub fn add_marker_on_player(state: &mut WorldMapState, name: &str) -> anyhow::Result<()> {
    use_cases::markers::add_on_player(state, name)
}

pub fn add_user_marker(state: &mut WorldMapState, draft: &UserMarkerDraft) -> anyhow::Result<()> {
    use_cases::markers::add_user_marker(state, draft)
}

pub fn edit_user_marker(
    state: &mut WorldMapState,
    index: usize,
    draft: &UserMarkerDraft,
) -> anyhow::Result<()> {
    use_cases::markers::edit_user_marker(state, index, draft)
}

pub fn remove_user_marker(state: &mut WorldMapState, index: usize) -> anyhow::Result<()> {
    use_cases::markers::remove_user_marker(state, index)
}

/// Lädt alle Zonen-Dateien neu.
pub fn reload_zones(state: &mut WorldMapState) {
    use_cases::zones::reload(state);
}

pub fn toggle_zone_file(state: &mut WorldMapState, file_name: &str) {
    use_cases::zones::toggle_file(state, file_name);
}
