//! Kartenansicht: Mittelpunkt, Zoomstufe, 45°-Drehung und Projektion.
//!
//! Textur und alle Overlays laufen über dieselbe Projektion
//! `world_to_screen`, damit sie bei gedrehter Karte deckungsgleich bleiben.

use glam::{IVec2, UVec2, Vec2};
use std::f32::consts::FRAC_PI_4;

use super::bounds::WorldRect;

/// Feste Zoomstufen (aufsteigend).
pub const ZOOMS: [f32; 10] = [0.125, 0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 4.0, 6.0, 8.0];
/// Standard-Zoomstufe (1×).
pub const DEFAULT_ZOOM_INDEX: usize = 4;
/// Rand zwischen Fensterkante und Zeichenfläche in Pixeln.
pub const CANVAS_INSET: f32 = 4.0;
/// Kantenlänge des Quellrechtecks relativ zur größeren Canvas-Seite.
pub const SOURCE_RECT_FACTOR: f32 = 1.75;

/// Zeichenfläche in Screen-Koordinaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub min: Vec2,
    pub max: Vec2,
}

impl Canvas {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Zeichenfläche eines Fensters (mit `CANVAS_INSET` Rand).
    pub fn from_window(pos: Vec2, size: Vec2) -> Self {
        let inset = Vec2::splat(CANVAS_INSET);
        Self {
            min: pos + inset,
            max: (pos + size - inset).max(pos + inset),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Verschiebt eine Box (`pos` = linke obere Ecke) vollständig in die Fläche.
    pub fn clamp_box(&self, pos: Vec2, size: Vec2) -> Vec2 {
        let max = (self.max - size).max(self.min);
        pos.clamp(self.min, max)
    }

    /// Punkt außerhalb der Fläche wird entlang des Strahls vom Mittelpunkt
    /// auf den Rand gezogen. Zweiter Wert: ob verschoben wurde.
    pub fn edge_point(&self, p: Vec2) -> (Vec2, bool) {
        if self.contains(p) {
            return (p, false);
        }
        let c = self.center();
        let d = p - c;
        let half = self.size() * 0.5;
        let tx = if d.x != 0.0 { half.x / d.x.abs() } else { f32::INFINITY };
        let ty = if d.y != 0.0 { half.y / d.y.abs() } else { f32::INFINITY };
        let t = tx.min(ty).min(1.0);
        (c + d * t, true)
    }
}

/// Zustand der Kartenansicht.
#[derive(Debug, Clone)]
pub struct MapView {
    /// Mittelpunkt in Weltkoordinaten
    pub center: Vec2,
    /// Index in `ZOOMS`
    pub zoom_index: usize,
    /// 45°-Drehung
    pub flip: bool,
    /// Mittelpunkt folgt nicht dem Spieler
    pub free_view: bool,
    /// Pan läuft gerade
    pub scrolling: bool,
    /// Mittelpunkt beim Start des Pans
    pub scroll_anchor: Vec2,
    /// Mausposition beim Start des Pans
    pub drag_origin: Vec2,
}

impl MapView {
    pub fn new() -> Self {
        Self {
            center: Vec2::ZERO,
            zoom_index: DEFAULT_ZOOM_INDEX,
            flip: true,
            free_view: false,
            scrolling: false,
            scroll_anchor: Vec2::ZERO,
            drag_origin: Vec2::ZERO,
        }
    }

    /// Aktueller Zoomfaktor.
    pub fn zoom(&self) -> f32 {
        ZOOMS[self.zoom_index.min(ZOOMS.len() - 1)]
    }

    /// Setzt die Zoomstufe, begrenzt auf die Tabelle.
    pub fn set_zoom_index(&mut self, index: usize) {
        self.zoom_index = index.min(ZOOMS.len() - 1);
    }

    /// Mausrad: positive Schritte zoomen hinein, negative heraus.
    pub fn apply_wheel(&mut self, steps: i32) {
        let target = self.zoom_index as i64 + steps as i64;
        self.zoom_index = target.clamp(0, ZOOMS.len() as i64 - 1) as usize;
    }

    pub fn zoom_in(&mut self) {
        self.apply_wheel(1);
    }

    pub fn zoom_out(&mut self) {
        self.apply_wheel(-1);
    }

    /// Drehwinkel der Karte in Radiant.
    pub fn angle(&self) -> f32 {
        if self.flip {
            FRAC_PI_4
        } else {
            0.0
        }
    }

    /// Welt → Screen.
    pub fn world_to_screen(&self, world: Vec2, canvas: &Canvas) -> Vec2 {
        let rotation = Vec2::from_angle(self.angle());
        canvas.center() + rotation.rotate((world - self.center) * self.zoom())
    }

    /// Screen → Welt (exakte Umkehrung von `world_to_screen`).
    pub fn screen_to_world(&self, screen: Vec2, canvas: &Canvas) -> Vec2 {
        self.center + self.unrotate(screen - canvas.center()) / self.zoom()
    }

    fn unrotate(&self, v: Vec2) -> Vec2 {
        Vec2::from_angle(-self.angle()).rotate(v)
    }

    /// Mittelpunkt als Tile-Koordinate.
    pub fn center_tile(&self) -> IVec2 {
        self.center.round().as_ivec2()
    }

    /// Sichtbarer Quellbereich der Textur (quadratisch, deckt auch die Drehung ab).
    pub fn source_rect(&self, canvas: &Canvas) -> WorldRect {
        let size = canvas.size().max_element() * SOURCE_RECT_FACTOR / self.zoom();
        WorldRect::centered(self.center_tile(), size.ceil() as i32)
    }

    /// Begrenzt den Mittelpunkt auf die Facet.
    pub fn clamp_center(&mut self, facet_size: UVec2) {
        self.center = self.center.clamp(Vec2::ZERO, facet_size.as_vec2());
    }

    /// Beginnt einen Pan an der Mausposition.
    pub fn begin_scroll(&mut self, mouse: Vec2) {
        self.scrolling = true;
        self.drag_origin = mouse;
        self.scroll_anchor = self.center;
    }

    /// Verschiebt den Mittelpunkt während eines Pans.
    pub fn scroll_to(&mut self, mouse: Vec2, facet_size: UVec2) {
        if !self.scrolling {
            return;
        }
        let offset = self.unrotate(mouse - self.drag_origin) / self.zoom();
        self.center = self.scroll_anchor - offset;
        self.clamp_center(facet_size);
    }

    /// Beendet den Pan.
    pub fn end_scroll(&mut self) {
        self.scrolling = false;
        self.scroll_anchor = self.center;
    }

    /// Folgt dem Spieler, solange weder Free-View noch Pan aktiv sind.
    pub fn follow(&mut self, player: Vec2) {
        if !self.free_view && !self.scrolling {
            self.center = player;
            self.scroll_anchor = player;
        }
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn canvas() -> Canvas {
        Canvas::from_window(Vec2::ZERO, Vec2::new(408.0, 308.0))
    }

    #[test]
    fn test_canvas_inset() {
        let c = canvas();
        assert_eq!(c.min, Vec2::splat(4.0));
        assert_eq!(c.max, Vec2::new(404.0, 304.0));
        assert_eq!(c.center(), Vec2::new(204.0, 154.0));
    }

    #[test]
    fn test_zoom_index_always_clamped() {
        let mut view = MapView::new();
        for _ in 0..50 {
            view.zoom_in();
        }
        assert_eq!(view.zoom_index, 9);
        assert_relative_eq!(view.zoom(), 8.0);

        for _ in 0..50 {
            view.zoom_out();
        }
        assert_eq!(view.zoom_index, 0);
        assert_relative_eq!(view.zoom(), 0.125);

        view.apply_wheel(i32::MAX);
        assert_eq!(view.zoom_index, 9);
        view.apply_wheel(i32::MIN);
        assert_eq!(view.zoom_index, 0);

        view.set_zoom_index(42);
        assert_eq!(view.zoom_index, 9);
    }

    #[test]
    fn test_projection_center_maps_to_canvas_center() {
        let mut view = MapView::new();
        view.center = Vec2::new(1000.0, 800.0);
        let c = canvas();
        let screen = view.world_to_screen(view.center, &c);
        assert_relative_eq!(screen.x, c.center().x);
        assert_relative_eq!(screen.y, c.center().y);
    }

    #[test]
    fn test_unflipped_projection_scales_by_zoom() {
        let mut view = MapView::new();
        view.flip = false;
        view.set_zoom_index(6); // 2×
        view.center = Vec2::new(100.0, 100.0);
        let c = canvas();
        let screen = view.world_to_screen(Vec2::new(110.0, 95.0), &c);
        assert_relative_eq!(screen.x, c.center().x + 20.0);
        assert_relative_eq!(screen.y, c.center().y - 10.0);
    }

    #[test]
    fn test_flipped_projection_rotates_45_degrees() {
        let mut view = MapView::new();
        view.center = Vec2::ZERO;
        let c = canvas();
        // +X in der Welt zeigt gedreht nach rechts unten
        let screen = view.world_to_screen(Vec2::new(10.0, 0.0), &c) - c.center();
        assert_relative_eq!(screen.x, 7.0710678, epsilon = 1e-4);
        assert_relative_eq!(screen.y, 7.0710678, epsilon = 1e-4);
    }

    #[test]
    fn test_screen_to_world_inverts_projection() {
        let c = canvas();
        for flip in [false, true] {
            for zoom_index in [0, 4, 9] {
                let mut view = MapView::new();
                view.flip = flip;
                view.set_zoom_index(zoom_index);
                view.center = Vec2::new(1323.0, 1624.0);
                let world = Vec2::new(1400.0, 1500.0);
                let back = view.screen_to_world(view.world_to_screen(world, &c), &c);
                assert_relative_eq!(back.x, world.x, epsilon = 1e-2);
                assert_relative_eq!(back.y, world.y, epsilon = 1e-2);
            }
        }
    }

    #[test]
    fn test_scroll_moves_center_against_mouse_and_clamps() {
        let mut view = MapView::new();
        view.flip = false;
        view.set_zoom_index(6); // 2×
        view.center = Vec2::new(100.0, 100.0);
        let facet = UVec2::new(1000, 1000);

        view.begin_scroll(Vec2::new(50.0, 50.0));
        view.scroll_to(Vec2::new(70.0, 30.0), facet);
        assert_relative_eq!(view.center.x, 90.0);
        assert_relative_eq!(view.center.y, 110.0);

        view.scroll_to(Vec2::new(5000.0, 50.0), facet);
        assert_relative_eq!(view.center.x, 0.0);

        view.end_scroll();
        assert!(!view.scrolling);
        assert_eq!(view.scroll_anchor, view.center);

        // Ohne aktiven Pan keine Bewegung
        view.scroll_to(Vec2::new(0.0, 0.0), facet);
        assert_relative_eq!(view.center.x, 0.0);
        assert_relative_eq!(view.center.y, 100.0);
    }

    #[test]
    fn test_follow_respects_free_view() {
        let mut view = MapView::new();
        view.follow(Vec2::new(5.0, 6.0));
        assert_eq!(view.center, Vec2::new(5.0, 6.0));

        view.free_view = true;
        view.follow(Vec2::new(9.0, 9.0));
        assert_eq!(view.center, Vec2::new(5.0, 6.0));
    }

    #[test]
    fn test_source_rect_shrinks_with_zoom() {
        let c = canvas();
        let mut view = MapView::new();
        view.center = Vec2::new(500.0, 500.0);
        let at_1x = view.source_rect(&c);
        assert_eq!(at_1x.width(), 700);

        view.set_zoom_index(6);
        assert_eq!(view.source_rect(&c).width(), 350);
        assert!(at_1x.contains(IVec2::new(500, 500)));
    }

    #[test]
    fn test_edge_point_and_clamp_box() {
        let c = canvas();
        let (inside, moved) = c.edge_point(Vec2::new(100.0, 100.0));
        assert!(!moved);
        assert_eq!(inside, Vec2::new(100.0, 100.0));

        let (edge, moved) = c.edge_point(Vec2::new(1204.0, 154.0));
        assert!(moved);
        assert_relative_eq!(edge.x, 404.0);
        assert_relative_eq!(edge.y, 154.0);

        let clamped = c.clamp_box(Vec2::new(390.0, -20.0), Vec2::new(30.0, 10.0));
        assert_eq!(clamped, Vec2::new(374.0, 4.0));
    }
}
