//! Builder für Render-Szenen aus dem WorldMapState.
//!
//! Erzeugt eine reine Zeichenliste in fester Reihenfolge: Karte, Zonen,
//! Häuser, Marker, Goto-Marker, Mobiles, Gilde, Party, Spieler, Gitter,
//! Koordinaten. Alles läuft über `MapView::world_to_screen`.

use glam::{IVec2, Vec2};

use crate::app::WorldMapState;
use crate::core::color::{
    BLACK, CORNFLOWER_BLUE, DARK_GRAY, GRID, LIME, LIME_GREEN, RED, WHITE, YELLOW,
};
use crate::core::{Canvas, Marker, MobileInfo, Notoriety, Rgba, TrackedEntity, WorldRect};
use crate::shared::options::{
    GRID_MIN_ZOOM, GRID_SPACING, HP_BAR_SIZE, MARKER_DOT_SIZE, MARKER_NAME_MIN_ZOOM_INDEX,
    MOBILE_DOT_SIZE,
};
use crate::shared::{DrawCommand, MapLayer, RenderScene, TextAnchor};

/// Hintergrund für Marker-Namen (Schwarz, halbtransparent).
const MARKER_NAME_BACKGROUND: Rgba = [0, 0, 0, 128];
/// Abstand Marker-Name über dem Marker.
const MARKER_NAME_OFFSET: f32 = 5.0;
/// Abstand der Koordinatenanzeige vom Canvas-Rand.
const READOUT_MARGIN: f32 = 5.0;
/// Abstand der Mauskoordinaten vom unteren Rand.
const MOUSE_READOUT_BOTTOM: f32 = 15.0;

/// Baut eine RenderScene aus dem aktuellen WorldMapState.
pub fn build(state: &WorldMapState) -> RenderScene {
    let source = state.view.source_rect(&state.canvas);
    let mut builder = SceneBuilder {
        state,
        canvas: state.canvas,
        commands: Vec::new(),
    };

    builder.zones(&source);
    if state.settings.show_multis {
        builder.houses(&source);
    }
    if state.settings.show_markers {
        builder.markers();
    }
    if let Some(goto) = state.goto_marker.as_ref() {
        builder.marker(goto);
    }
    if state.settings.show_mobiles {
        builder.mobiles();
    }
    builder.guild();
    if state.settings.show_party_members {
        builder.party();
    }
    builder.player();
    if state.settings.show_grid_if_zoomed && state.view.zoom() >= GRID_MIN_ZOOM {
        builder.grid(&source);
    }
    if state.settings.show_coordinates {
        builder.coordinates();
    }
    if state.settings.show_mouse_coordinates {
        builder.mouse_coordinates();
    }

    RenderScene {
        canvas: state.canvas,
        background: BLACK,
        map: map_layer(state, &source),
        commands: builder.commands,
        font_index: state.settings.font_index,
    }
}

/// Texturiertes Viereck für den sichtbaren Ausschnitt der Facet.
///
/// Pixel (x+1, y+1) der Textur gehört zur Weltzelle (x, y).
fn map_layer(state: &WorldMapState, source: &WorldRect) -> Option<MapLayer> {
    let texture = state.texture.current.as_ref()?;
    if i32::from(texture.facet) != state.world.facet {
        return None;
    }

    let size = Vec2::new(texture.width() as f32, texture.height() as f32);
    let min = source.min.as_vec2().max(Vec2::splat(-1.0));
    let max = source.max.as_vec2().min(size - 1.0);
    if min.x >= max.x || min.y >= max.y {
        return None;
    }

    let world = [
        min,
        Vec2::new(max.x, min.y),
        max,
        Vec2::new(min.x, max.y),
    ];
    let corners = world.map(|w| state.view.world_to_screen(w, &state.canvas));
    let uv = world.map(|w| (w + 1.0) / size);

    Some(MapLayer {
        texture: texture.clone(),
        revision: state.texture.revision,
        corners,
        uv,
    })
}

struct SceneBuilder<'a> {
    state: &'a WorldMapState,
    canvas: Canvas,
    commands: Vec<DrawCommand>,
}

impl SceneBuilder<'_> {
    fn project(&self, world: IVec2) -> Vec2 {
        self.state.view.world_to_screen(world.as_vec2(), &self.canvas)
    }

    fn text(&mut self, pos: Vec2, text: String, color: Rgba, anchor: TextAnchor) {
        self.commands.push(DrawCommand::Text {
            pos,
            text,
            color,
            anchor,
            clamp_to_canvas: true,
            shadow: true,
            background: None,
        });
    }

    fn zones(&mut self, source: &WorldRect) {
        for zone in self.state.zones.visible_zones(self.state.world.facet) {
            if !zone.bounds.intersects(source) {
                continue;
            }
            let points = zone.vertices.iter().map(|v| self.project(*v)).collect();
            self.commands.push(DrawCommand::Polyline {
                points,
                color: zone.color,
                closed: true,
            });
        }
    }

    fn houses(&mut self, source: &WorldRect) {
        for house in &self.state.world.houses {
            let rect = house.footprint;
            if !rect.intersects(source) {
                continue;
            }
            let corners = [
                rect.min,
                IVec2::new(rect.max.x, rect.min.y),
                rect.max,
                IVec2::new(rect.min.x, rect.max.y),
            ]
            .map(|c| self.project(c));
            self.commands.push(DrawCommand::Quad {
                corners,
                color: DARK_GRAY,
            });
        }
    }

    fn markers(&mut self) {
        let state = self.state;
        let mut hovered = None;
        for file in state.marker_files.iter().filter(|f| !f.hidden) {
            for marker in &file.markers {
                if self.marker(marker) {
                    hovered = Some(marker);
                }
            }
        }
        if let Some(marker) = hovered {
            self.marker_name(marker);
        }
    }

    /// Zeichnet einen Marker. Rückgabe: Maus liegt darauf und der Name
    /// wurde nicht schon gezeichnet.
    fn marker(&mut self, marker: &Marker) -> bool {
        let state = self.state;
        let zoom_index = state.view.zoom_index;
        if marker.facet != state.world.facet {
            return false;
        }
        if zoom_index < marker.zoom_index && marker.is_transparent() {
            return false;
        }

        let p = self.project(IVec2::new(marker.x, marker.y));
        if !self.canvas.contains(p) {
            return false;
        }

        let show_name = state.settings.show_marker_names
            && !marker.name.is_empty()
            && zoom_index > MARKER_NAME_MIN_ZOOM_INDEX;
        let icon = marker
            .icon
            .as_ref()
            .filter(|_| zoom_index >= marker.zoom_index && state.settings.show_marker_icons)
            .and_then(|key| state.icons.size(key).map(|size| (key, size)));

        let mut hovered = false;
        match icon {
            None => {
                let size = Vec2::splat(MARKER_DOT_SIZE);
                self.commands.push(DrawCommand::Rect {
                    min: p - size * 0.5,
                    size,
                    color: marker.color,
                });
                if let Some(mouse) = state.mouse {
                    hovered = mouse.cmpge(p - size).all() && mouse.cmple(p + size * 0.5).all();
                }
            }
            Some((key, (w, h))) => {
                self.commands.push(DrawCommand::Icon {
                    key: key.clone(),
                    center: p,
                });
                if let (Some(mouse), false) = (state.mouse, show_name) {
                    let half = Vec2::new(w as f32, h as f32) * 0.5;
                    hovered = mouse.cmpge(p - half).all() && mouse.cmple(p + half).all();
                }
            }
        }

        if show_name {
            self.marker_name(marker);
            return false;
        }
        hovered
    }

    fn marker_name(&mut self, marker: &Marker) {
        let p = self.project(IVec2::new(marker.x, marker.y));
        self.commands.push(DrawCommand::Text {
            pos: p - Vec2::new(0.0, MARKER_NAME_OFFSET),
            text: marker.name.clone(),
            color: WHITE,
            anchor: TextAnchor::BottomCenter,
            clamp_to_canvas: true,
            shadow: true,
            background: Some(MARKER_NAME_BACKGROUND),
        });
    }

    /// Punkt für Mobiles und Entities; außerhalb liegende werden an den Rand gezogen.
    fn dot(&mut self, world: IVec2, color: Rgba) -> Vec2 {
        let (p, _) = self.canvas.edge_point(self.project(world));
        let size = Vec2::splat(MOBILE_DOT_SIZE);
        let min = self.canvas.clamp_box(p - size * 0.5, size);
        self.commands.push(DrawCommand::Rect { min, size, color });
        min + size * 0.5
    }

    fn hp_bar(&mut self, dot: Vec2, ratio: f32) {
        let size = Vec2::from(HP_BAR_SIZE);
        let half = (size * 0.5).floor();
        let min = dot + Vec2::new(-half.x, MOBILE_DOT_SIZE + 1.0 - half.y);
        self.commands.push(DrawCommand::Rect {
            min: min - 1.0,
            size: size + 2.0,
            color: BLACK,
        });
        self.commands.push(DrawCommand::Rect {
            min,
            size,
            color: RED,
        });
        let fill = (size.x * ratio.clamp(0.0, 1.0)).round();
        if fill > 0.0 {
            self.commands.push(DrawCommand::Rect {
                min,
                size: Vec2::new(fill, size.y),
                color: CORNFLOWER_BLUE,
            });
        }
    }

    fn mobile(&mut self, mobile: &MobileInfo, color: Rgba, name_color: Option<Rgba>, bar: bool) {
        let p = self.dot(mobile.position, color);
        if let Some(name_color) = name_color.filter(|_| !mobile.name.is_empty()) {
            self.text(p, mobile.name.clone(), name_color, TextAnchor::BottomCenter);
        }
        if bar {
            self.hp_bar(p, mobile.hp_ratio);
        }
    }

    fn mobiles(&mut self) {
        let state = self.state;
        let world = &state.world;
        let player_serial = world.player.as_ref().map(|p| p.serial);
        for mobile in &world.mobiles {
            if Some(mobile.serial) == player_serial {
                continue;
            }
            if mobile.notoriety != Notoriety::Ally {
                self.mobile(mobile, RED, None, false);
            } else if mobile.in_range && world.entity(mobile.serial).is_none() {
                self.mobile(mobile, LIME, Some(YELLOW), state.settings.show_group_bar);
            }
        }
    }

    fn entity(&mut self, entity: &TrackedEntity) {
        let color = if entity.facet != self.state.world.facet {
            DARK_GRAY
        } else if entity.is_guild {
            LIME_GREEN
        } else {
            YELLOW
        };
        let p = self.dot(entity.position, color);
        if self.state.settings.show_group_name {
            let name = if entity.name.is_empty() {
                "Außer Reichweite".to_string()
            } else {
                entity.name.clone()
            };
            self.text(p, name, color, TextAnchor::BottomCenter);
        }
        if self.state.settings.show_group_bar {
            self.hp_bar(p, entity.hp_ratio.unwrap_or(0.0));
        }
    }

    fn guild(&mut self) {
        let world = &self.state.world;
        for entity in &world.entities {
            if entity.is_guild && !world.is_in_party(entity.serial) {
                self.entity(entity);
            }
        }
    }

    fn party(&mut self) {
        let state = self.state;
        let world = &state.world;
        for &serial in &world.party {
            let mobile = world
                .mobiles
                .iter()
                .find(|m| m.serial == serial && m.in_range);
            match mobile {
                Some(mobile) => {
                    let name_color = state.settings.show_group_name.then_some(YELLOW);
                    self.mobile(mobile, YELLOW, name_color, state.settings.show_group_bar);
                }
                None => {
                    if let Some(entity) = world.entity(serial).filter(|e| !e.is_guild) {
                        self.entity(entity);
                    }
                }
            }
        }
    }

    fn player(&mut self) {
        let state = self.state;
        let Some(player) = state.world.player.as_ref() else {
            return;
        };
        let p = self.dot(player.position, WHITE);
        if state.settings.show_player_name && !player.name.is_empty() {
            self.text(p, player.name.clone(), WHITE, TextAnchor::BottomCenter);
        }
        if state.settings.show_player_bar {
            self.hp_bar(p, player.hp_ratio);
        }
    }

    fn grid(&mut self, source: &WorldRect) {
        let step = GRID_SPACING;
        let mut y = source.min.y.div_euclid(step) * step;
        while y < source.max.y {
            let from = self.project(IVec2::new(source.min.x, y));
            let to = self.project(IVec2::new(source.max.x, y));
            self.commands.push(DrawCommand::Line {
                from,
                to,
                color: GRID,
            });
            y += step;
        }
        let mut x = source.min.x.div_euclid(step) * step;
        while x < source.max.x {
            let from = self.project(IVec2::new(x, source.min.y));
            let to = self.project(IVec2::new(x, source.max.y));
            self.commands.push(DrawCommand::Line {
                from,
                to,
                color: GRID,
            });
            x += step;
        }
    }

    fn coordinates(&mut self) {
        let state = self.state;
        let Some(player) = state.world.player.as_ref() else {
            return;
        };
        let text = format!(
            "{}, {} ({}) [{}]",
            player.position.x, player.position.y, player.z, state.view.zoom_index
        );
        let pos = self.canvas.min + Vec2::splat(READOUT_MARGIN);
        self.text(pos, text, WHITE, TextAnchor::TopLeft);
    }

    fn mouse_coordinates(&mut self) {
        let state = self.state;
        let Some(mouse) = state.mouse else {
            return;
        };
        let world = state.view.screen_to_world(mouse, &self.canvas).round().as_ivec2();
        let pos = Vec2::new(
            self.canvas.min.x + READOUT_MARGIN,
            self.canvas.max.y - MOUSE_READOUT_BOTTOM,
        );
        self.text(pos, format!("{} {}", world.x, world.y), WHITE, TextAnchor::BottomLeft);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::{self, AQUAMARINE};
    use crate::core::{MarkerFile, MarkerFileKind, PlayerInfo, Zone, ZoneSet};
    use crate::shared::WorldMapSettings;

    fn state() -> WorldMapState {
        let mut state = WorldMapState::new(WorldMapSettings::default());
        state.view.flip = false;
        state.view.center = Vec2::new(1000.0, 1000.0);
        state.settings.show_group_bar = false;
        state
    }

    fn rect_color(command: &DrawCommand) -> Option<Rgba> {
        match command {
            DrawCommand::Rect { color, .. } => Some(*color),
            _ => None,
        }
    }

    fn marker_file(markers: Vec<Marker>, hidden: bool) -> MarkerFile {
        MarkerFile {
            name: "test.csv".into(),
            path: "test.csv".into(),
            kind: MarkerFileKind::Csv,
            markers,
            hidden,
            editable: false,
        }
    }

    fn player(x: i32, y: i32) -> PlayerInfo {
        PlayerInfo {
            serial: 1,
            name: "Avatar".into(),
            position: IVec2::new(x, y),
            z: 5,
            hp_ratio: 0.5,
        }
    }

    fn mobile(serial: u32, notoriety: Notoriety, in_range: bool) -> MobileInfo {
        MobileInfo {
            serial,
            name: format!("Mobile {serial}"),
            position: IVec2::new(1010, 1010),
            notoriety,
            hp_ratio: 1.0,
            in_range,
        }
    }

    fn rects(scene: &RenderScene, color: Rgba) -> usize {
        scene
            .commands
            .iter()
            .filter(|c| rect_color(c) == Some(color))
            .count()
    }

    fn polylines(scene: &RenderScene) -> usize {
        scene
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polyline { .. }))
            .count()
    }

    fn bank() -> Marker {
        Marker::new("Bank", 100, 100, 0)
            .with_icon("bank")
            .with_color("blue")
            .with_zoom(3)
    }

    #[test]
    fn zones_outside_source_rect_are_rejected() {
        let mut state = state();
        let mut sets = crate::core::ZoneSets::new();
        sets.insert(ZoneSet {
            name: "Test".into(),
            file_name: "test.zones.json".into(),
            path: "test.zones.json".into(),
            facet: 0,
            hidden: false,
            zones: vec![
                Zone::new(
                    "nah",
                    RED,
                    vec![IVec2::new(990, 990), IVec2::new(1010, 990), IVec2::new(1000, 1010)],
                ),
                Zone::new(
                    "fern",
                    RED,
                    vec![IVec2::new(5000, 3000), IVec2::new(5010, 3000), IVec2::new(5000, 3010)],
                ),
            ],
        });
        state.zones = sets;

        let scene = build(&state);
        assert_eq!(polylines(&scene), 1);
    }

    #[test]
    fn marker_participates_only_on_its_facet() {
        let mut state = state();
        state.view.center = Vec2::new(100.0, 100.0);
        state.marker_files.push(marker_file(vec![bank()], false));

        for zoom in 3..=9 {
            state.view.zoom_index = zoom;
            assert_eq!(rects(&build(&state), color::BLUE), 1, "zoom {zoom}");
        }

        state.world = crate::core::WorldSnapshot::offline(1);
        state.view.zoom_index = 5;
        assert_eq!(rects(&build(&state), color::BLUE), 0);
    }

    #[test]
    fn hidden_files_and_disabled_markers_are_skipped() {
        let mut state = state();
        state.view.center = Vec2::new(100.0, 100.0);
        state.marker_files.push(marker_file(vec![bank()], true));
        assert_eq!(rects(&build(&state), color::BLUE), 0);

        state.marker_files[0].hidden = false;
        state.settings.show_markers = false;
        assert_eq!(rects(&build(&state), color::BLUE), 0);
    }

    #[test]
    fn transparent_marker_below_its_zoom_is_skipped() {
        let mut state = state();
        state.view.center = Vec2::new(100.0, 100.0);
        state.view.zoom_index = 1;
        let marker = Marker::new("Unsichtbar", 100, 100, 0)
            .with_color("none")
            .with_zoom(3);
        state.marker_files.push(marker_file(vec![marker], false));
        assert_eq!(rects(&build(&state), color::TRANSPARENT), 0);
    }

    #[test]
    fn marker_outside_canvas_is_culled() {
        let mut state = state();
        state.marker_files.push(marker_file(vec![bank()], false));
        assert_eq!(rects(&build(&state), color::BLUE), 0);
    }

    #[test]
    fn marker_names_only_when_zoomed_in() {
        let mut state = state();
        state.view.center = Vec2::new(100.0, 100.0);
        state.marker_files.push(marker_file(vec![bank()], false));

        state.view.zoom_index = 5;
        assert_eq!(build(&state).texts().filter(|t| *t == "Bank").count(), 0);
        state.view.zoom_index = 6;
        assert_eq!(build(&state).texts().filter(|t| *t == "Bank").count(), 1);
    }

    #[test]
    fn hovered_marker_name_is_drawn_last() {
        let mut state = state();
        state.view.center = Vec2::new(100.0, 100.0);
        state.marker_files.push(marker_file(vec![bank()], false));
        state.mouse = Some(state.canvas.center());

        let scene = build(&state);
        let last_marker_cmd = scene
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Text { text, .. } if text == "Bank"));
        let dot = scene
            .commands
            .iter()
            .position(|c| rect_color(c) == Some(color::BLUE));
        assert!(last_marker_cmd > dot);
    }

    #[test]
    fn goto_marker_is_drawn_without_marker_layer() {
        let mut state = state();
        state.settings.show_markers = false;
        crate::app::use_cases::goto::goto_location(&mut state, IVec2::new(1200, 1200));
        assert_eq!(rects(&build(&state), AQUAMARINE), 1);
    }

    #[test]
    fn mobile_colors_follow_notoriety_and_tracking() {
        let mut state = state();
        state.world.mobiles = vec![
            mobile(10, Notoriety::Murderer, true),
            mobile(11, Notoriety::Ally, true),
            mobile(12, Notoriety::Ally, false),
        ];
        let scene = build(&state);
        assert_eq!(rects(&scene, RED), 1);
        assert_eq!(rects(&scene, LIME), 1);
        assert_eq!(scene.texts().filter(|t| *t == "Mobile 11").count(), 1);

        state.world.entities.push(TrackedEntity {
            serial: 11,
            name: "Gildenfreund".into(),
            position: IVec2::new(1020, 1020),
            facet: 0,
            hp_ratio: None,
            is_guild: true,
        });
        let scene = build(&state);
        assert_eq!(rects(&scene, LIME), 0);
        assert_eq!(rects(&scene, LIME_GREEN), 1);
    }

    #[test]
    fn party_members_are_yellow_and_off_facet_entities_gray() {
        let mut state = state();
        state.world.mobiles = vec![mobile(20, Notoriety::Innocent, true)];
        state.world.party = vec![20, 21];
        state.world.entities.push(TrackedEntity {
            serial: 21,
            name: String::new(),
            position: IVec2::new(50, 50),
            facet: 3,
            hp_ratio: Some(0.5),
            is_guild: false,
        });

        let scene = build(&state);
        assert_eq!(rects(&scene, YELLOW), 1);
        assert_eq!(rects(&scene, DARK_GRAY), 1);
        assert_eq!(scene.texts().filter(|t| *t == "Außer Reichweite").count(), 1);
    }

    #[test]
    fn far_mobile_dot_is_moved_to_canvas_edge() {
        let mut state = state();
        let mut far = mobile(30, Notoriety::Enemy, true);
        far.position = IVec2::new(6000, 1000);
        state.world.mobiles = vec![far];

        let scene = build(&state);
        let canvas = scene.canvas;
        let min = scene
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Rect { min, size, color } if *color == RED => Some((*min, *size)),
                _ => None,
            })
            .unwrap();
        assert!(canvas.contains(min.0));
        assert!(canvas.contains(min.0 + min.1));
        assert!((min.0.x + min.1.x - canvas.max.x).abs() < 0.01);
    }

    #[test]
    fn render_order_puts_player_after_overlays_and_grid_last() {
        let mut state = state();
        state.world.player = Some(player(1000, 1000));
        state.world.mobiles = vec![mobile(10, Notoriety::Criminal, true)];
        state.view.zoom_index = 7;
        state.settings.show_grid_if_zoomed = true;

        let scene = build(&state);
        let pos = |f: &dyn Fn(&DrawCommand) -> bool| scene.commands.iter().position(f).unwrap();
        let mobile_at = pos(&|c| rect_color(c) == Some(RED));
        let player_at = pos(&|c| rect_color(c) == Some(WHITE));
        let grid_at = pos(&|c| matches!(c, DrawCommand::Line { .. }));
        let coords_at = pos(&|c| matches!(c, DrawCommand::Text { text, .. } if text.contains('[')));
        assert!(mobile_at < player_at);
        assert!(player_at < grid_at);
        assert!(grid_at < coords_at);
    }

    #[test]
    fn grid_needs_zoom_four() {
        let mut state = state();
        state.settings.show_grid_if_zoomed = true;
        state.view.zoom_index = 6;
        let scene = build(&state);
        assert!(!scene
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Line { .. })));
    }

    #[test]
    fn coordinate_readout_format() {
        let mut state = state();
        state.world.player = Some(player(1000, 1000));
        state.view.zoom_index = 4;
        let scene = build(&state);
        assert!(scene.texts().any(|t| t == "1000, 1000 (5) [4]"));
    }

    #[test]
    fn mouse_readout_shows_world_position() {
        let mut state = state();
        state.settings.show_mouse_coordinates = true;
        state.mouse = Some(state.canvas.center() + Vec2::new(10.0, -20.0));
        let scene = build(&state);
        assert!(scene.texts().any(|t| t == "1010 980"));
    }

    #[test]
    fn map_layer_requires_texture_of_current_facet() {
        let mut state = state();
        assert!(build(&state).map.is_none());

        state
            .texture
            .install(uo_map_texture::FacetTexture::blank(1, 64, 64));
        assert!(build(&state).map.is_none());

        state
            .texture
            .install(uo_map_texture::FacetTexture::blank(0, 7168, 4096));
        let layer = build(&state).map.unwrap();
        assert_eq!(layer.revision, 2);
        let center = (layer.corners[0] + layer.corners[2]) * 0.5;
        assert!((center - state.canvas.center()).length() < 1.0);
    }
}
