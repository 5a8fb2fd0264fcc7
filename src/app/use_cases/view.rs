//! Use-Case-Funktionen für Ansicht, Pan, Zoom und Einstellungs-Schalter.

use glam::Vec2;

use crate::app::{SettingToggle, WorldMapState};
use crate::core::{Canvas, WorldSnapshot};
use crate::shared::options::{FONT_INDEX_MAX, FONT_INDEX_MIN};

/// Setzt die Zeichenfläche.
pub fn set_canvas(state: &mut WorldMapState, canvas: Canvas) {
    state.canvas = canvas;
}

/// Übernimmt eine neue Welt-Momentaufnahme.
pub fn update_world(state: &mut WorldMapState, world: WorldSnapshot) {
    if world.facet != state.world.facet {
        log::info!("Facet gewechselt: {} -> {}", state.world.facet, world.facet);
        state.goto_marker = None;
    }
    let facet_size = world.facet_size;
    state.world = world;
    state.view.clamp_center(facet_size);
}

/// Mittelpunkt folgt dem Spieler, solange Free-View aus ist.
pub fn follow_player(state: &mut WorldMapState) {
    if let Some(player) = state.world.player.as_ref() {
        state.view.follow(player.position.as_vec2());
    }
}

/// Beginnt einen Pan; die mittlere Maustaste schaltet Free-View ein.
pub fn begin_pan(state: &mut WorldMapState, pos: Vec2, enable_free_view: bool) {
    if enable_free_view {
        state.view.free_view = true;
    }
    state.view.begin_scroll(pos);
}

/// Verschiebt die Ansicht während eines Pans.
pub fn pan_to(state: &mut WorldMapState, pos: Vec2) {
    let facet_size = state.world.facet_size;
    state.view.scroll_to(pos, facet_size);
}

/// Beendet den Pan.
pub fn end_pan(state: &mut WorldMapState) {
    state.view.end_scroll();
}

/// Merkt sich die Mausposition (für Hover und Mauskoordinaten).
pub fn set_mouse(state: &mut WorldMapState, pos: Option<Vec2>) {
    state.mouse = pos;
}

/// Verschiebt die Zoomstufe um `steps` Tabellenschritte.
pub fn zoom(state: &mut WorldMapState, steps: i32) {
    state.view.apply_wheel(steps);
    log::debug!("Zoomstufe: {}", state.view.zoom_index);
}

/// Schaltet eine Einstellung um.
pub fn toggle_setting(state: &mut WorldMapState, toggle: SettingToggle) {
    let s = &mut state.settings;
    match toggle {
        SettingToggle::Flip => {
            state.view.flip = !state.view.flip;
            s.flip_map = state.view.flip;
        }
        SettingToggle::FreeView => {
            state.view.free_view = !state.view.free_view;
            s.free_view = state.view.free_view;
        }
        SettingToggle::TopMost => s.top_most = !s.top_most,
        SettingToggle::ShowPartyMembers => s.show_party_members = !s.show_party_members,
        SettingToggle::ShowMobiles => s.show_mobiles = !s.show_mobiles,
        SettingToggle::ShowMultis => s.show_multis = !s.show_multis,
        SettingToggle::ShowPlayerName => s.show_player_name = !s.show_player_name,
        SettingToggle::ShowPlayerBar => s.show_player_bar = !s.show_player_bar,
        SettingToggle::ShowGroupName => s.show_group_name = !s.show_group_name,
        SettingToggle::ShowGroupBar => s.show_group_bar = !s.show_group_bar,
        SettingToggle::ShowCoordinates => s.show_coordinates = !s.show_coordinates,
        SettingToggle::ShowMouseCoordinates => {
            s.show_mouse_coordinates = !s.show_mouse_coordinates
        }
        SettingToggle::ShowMarkers => s.show_markers = !s.show_markers,
        SettingToggle::ShowMarkerNames => s.show_marker_names = !s.show_marker_names,
        SettingToggle::ShowMarkerIcons => s.show_marker_icons = !s.show_marker_icons,
        SettingToggle::ShowGridIfZoomed => s.show_grid_if_zoomed = !s.show_grid_if_zoomed,
        SettingToggle::AllowPositionalTarget => {
            s.allow_positional_target = !s.allow_positional_target
        }
    }
}

/// Setzt die Schriftstufe (1–6).
pub fn set_font(state: &mut WorldMapState, index: u8) {
    state.settings.font_index = index.clamp(FONT_INDEX_MIN, FONT_INDEX_MAX);
}
