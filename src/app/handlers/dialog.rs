//! Handler für Dialog-State, Sitzung und ausgehende Aktionen.

use std::path::PathBuf;

use glam::IVec2;

use crate::app::events::DialogKind;
use crate::app::use_cases;
use crate::app::WorldMapState;

pub fn open_dialog(state: &mut WorldMapState, dialog: DialogKind) {
    use_cases::session::open_dialog(state, dialog);
}

pub fn close_dialog(state: &mut WorldMapState, dialog: DialogKind) {
    use_cases::session::close_dialog(state, dialog);
}

/// Beantwortet ein Positions-Target.
pub fn target_position(state: &mut WorldMapState, world: IVec2) {
    use_cases::session::target_position(state, world);
}

/// Öffnet den Benutzer-Marker-Dialog an einer Weltposition.
pub fn open_user_marker_dialog(state: &mut WorldMapState, x: i32, y: i32, facet: i32) {
    use_cases::session::open_user_marker_dialog(state, x, y, facet);
}

pub fn notify(state: &mut WorldMapState, message: String) {
    use_cases::session::notify(state, message);
}

/// Setzt das Client-Verzeichnis (Pfade werden abgeleitet).
pub fn set_client_dir(state: &mut WorldMapState, path: PathBuf) {
    use_cases::session::set_client_dir(state, path);
}

pub fn request_client_dir_dialog(state: &mut WorldMapState) {
    use_cases::session::request_client_dir_dialog(state);
}

/// Speichert die Einstellungen in die Konfigurationsdatei.
pub fn save_settings(state: &mut WorldMapState) -> anyhow::Result<()> {
    use_cases::session::save_settings(state)
}

/// Markiert den Viewer zum Schließen im nächsten Frame.
pub fn request_close(state: &mut WorldMapState) {
    use_cases::session::request_close(state);
}
