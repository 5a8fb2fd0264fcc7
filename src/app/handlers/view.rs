//! Handler für Ansicht, Pan, Zoom und Einstellungs-Schalter.

use glam::{IVec2, Vec2};

use crate::app::use_cases;
use crate::app::{SettingToggle, WorldMapState};
use crate::core::{Canvas, WorldSnapshot};

/// Übernimmt die neue Zeichenfläche.
pub fn set_canvas(state: &mut WorldMapState, canvas: Canvas) {
    use_cases::view::set_canvas(state, canvas);
}

/// Übernimmt die Welt-Momentaufnahme des Frames.
pub fn update_world(state: &mut WorldMapState, world: WorldSnapshot) {
    use_cases::view::update_world(state, world);
}

pub fn follow_player(state: &mut WorldMapState) {
    use_cases::view::follow_player(state);
}

pub fn begin_pan(state: &mut WorldMapState, pos: Vec2, enable_free_view: bool) {
    use_cases::view::begin_pan(state, pos, enable_free_view);
}

pub fn pan_to(state: &mut WorldMapState, pos: Vec2) {
    use_cases::view::pan_to(state, pos);
}

pub fn end_pan(state: &mut WorldMapState) {
    use_cases::view::end_pan(state);
}

/// Merkt sich die Mausposition über der Karte.
pub fn set_mouse(state: &mut WorldMapState, pos: Option<Vec2>) {
    use_cases::view::set_mouse(state, pos);
}

/// Verschiebt die Zoomstufe um Mausrad-Schritte.
pub fn zoom(state: &mut WorldMapState, steps: i32) {
    use_cases::view::zoom(state, steps);
}

/// Schaltet eine Einstellung um.
pub fn toggle_setting(state: &mut WorldMapState, toggle: SettingToggle) {
    use_cases::view::toggle_setting(state, toggle);
}

pub fn set_font(state: &mut WorldMapState, index: u8) {
    use_cases::view::set_font(state, index);
}

/// Springt zu einer Weltposition (Free-View an, Goto-Marker gesetzt).
pub fn goto_location(state: &mut WorldMapState, position: IVec2) {
    use_cases::goto::goto_location(state, position);
}

pub fn clear_goto(state: &mut WorldMapState) {
    use_cases::goto::clear_goto(state);
}
