//! Goto: Ansicht auf eine eingegebene Position setzen.

use glam::IVec2;

use crate::app::WorldMapState;
use crate::core::color::AQUAMARINE;
use crate::core::Marker;

/// Zoomstufe, ab der der Goto-Marker sichtbar ist.
const GOTO_MARKER_ZOOM: usize = 1;

/// Schaltet Free-View ein, setzt den Goto-Marker und zentriert darauf.
pub fn goto_location(state: &mut WorldMapState, position: IVec2) {
    state.view.free_view = true;
    state.settings.free_view = true;

    let mut marker = Marker::new(
        format!("Go to: {}, {}", position.x, position.y),
        position.x,
        position.y,
        state.world.facet,
    )
    .with_zoom(GOTO_MARKER_ZOOM);
    marker.color = AQUAMARINE;
    marker.color_name = "aquamarine".to_string();
    state.goto_marker = Some(marker);

    state.view.center = position.as_vec2();
    state.view.clamp_center(state.world.facet_size);
    state.view.scroll_anchor = state.view.center;
    log::info!("Goto: {}, {}", position.x, position.y);
}

/// Entfernt den Goto-Marker.
pub fn clear_goto(state: &mut WorldMapState) {
    state.goto_marker = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::WorldMapSettings;
    use glam::Vec2;

    #[test]
    fn goto_sets_free_view_marker_and_center() {
        let mut state = WorldMapState::new(WorldMapSettings::default());
        goto_location(&mut state, IVec2::new(1323, 1624));

        assert!(state.view.free_view);
        assert_eq!(state.view.center, Vec2::new(1323.0, 1624.0));
        let marker = state.goto_marker.as_ref().unwrap();
        assert_eq!(marker.name, "Go to: 1323, 1624");
        assert_eq!(marker.color, AQUAMARINE);
        assert_eq!(marker.zoom_index, 1);

        clear_goto(&mut state);
        assert!(state.goto_marker.is_none());
    }
}
