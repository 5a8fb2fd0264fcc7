//! Use-Cases für Dialoge, Persistenz und externe Aktionen.

use std::path::PathBuf;

use anyhow::Result;
use glam::IVec2;

use crate::app::events::DialogKind;
use crate::app::{MapAction, WorldMapState};
use crate::shared::DataPaths;

use super::{markers, zones};

/// Meldet einen Hinweis an Spieler und Statuszeile.
pub fn notify(state: &mut WorldMapState, message: String) {
    log::info!("{}", message);
    state.status_message = Some(message.clone());
    state.outbox.push(MapAction::Notice(message));
}

/// Öffnet einen Dialog.
pub fn open_dialog(state: &mut WorldMapState, dialog: DialogKind) {
    let dialogs = &mut state.dialogs;
    match dialog {
        DialogKind::Goto => {
            dialogs.goto.visible = true;
            dialogs.goto.input.clear();
        }
        DialogKind::PlayerMarker => {
            dialogs.player_marker.visible = true;
            dialogs.player_marker.input.clear();
        }
        DialogKind::UserMarker => {
            let facet = state.world.facet;
            let (x, y) = state
                .world
                .player
                .as_ref()
                .map(|p| (p.position.x, p.position.y))
                .unwrap_or((0, 0));
            dialogs.user_marker.open_at(x, y, facet);
        }
        DialogKind::MarkerManager => {
            dialogs.marker_manager.visible = true;
            dialogs.marker_manager.editing = None;
        }
    }
}

/// Schließt einen Dialog.
pub fn close_dialog(state: &mut WorldMapState, dialog: DialogKind) {
    let dialogs = &mut state.dialogs;
    match dialog {
        DialogKind::Goto => dialogs.goto.visible = false,
        DialogKind::PlayerMarker => dialogs.player_marker.visible = false,
        DialogKind::UserMarker => dialogs.user_marker.visible = false,
        DialogKind::MarkerManager => {
            dialogs.marker_manager.visible = false;
            dialogs.marker_manager.editing = None;
        }
    }
}

/// Übernimmt die Ansicht in die Einstellungen und speichert sie.
pub fn save_settings(state: &mut WorldMapState) -> Result<()> {
    state.sync_view_into_settings();
    match state.settings_path.as_ref() {
        Some(path) => state.settings.save_to_file(path),
        None => Ok(()),
    }
}

/// Markiert den Viewer zum Schließen.
pub fn request_close(state: &mut WorldMapState) {
    state.should_close = true;
}

/// Setzt das Client-Verzeichnis und leitet alle Datenpfade davon ab.
pub fn set_client_dir(state: &mut WorldMapState, path: PathBuf) {
    log::info!("Client-Verzeichnis: {}", path.display());
    state.settings.paths = DataPaths::from_client_dir(path);
}

/// Fordert den Ordner-Dialog für das Client-Verzeichnis an.
pub fn request_client_dir_dialog(state: &mut WorldMapState) {
    state.dialogs.show_client_dir_dialog = true;
}

/// Beantwortet ein Positions-Target mit der Weltposition.
///
/// Die Höhe kommt vom Spieler, da die Karte keine Höhen pro Tile kennt.
pub fn target_position(state: &mut WorldMapState, world: IVec2) {
    let z = state.world.player.as_ref().map_or(0, |p| p.z);
    log::debug!("Positions-Target: {}, {}, {}", world.x, world.y, z);
    state.outbox.push(MapAction::TargetPosition {
        x: world.x,
        y: world.y,
        z,
    });
}

/// Öffnet den Benutzer-Marker-Dialog an einer Weltposition.
pub fn open_user_marker_dialog(state: &mut WorldMapState, x: i32, y: i32, facet: i32) {
    state.dialogs.user_marker.open_at(x, y, facet);
    state
        .outbox
        .push(MapAction::OpenUserMarkerDialog { x, y, facet });
}

/// Lädt Marker, Icons und Zonen.
pub fn load_assets(state: &mut WorldMapState) {
    markers::reload(state);
    zones::reload(state);
}
