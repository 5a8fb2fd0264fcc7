//! Beschriftungen: Anker, Begrenzung auf die Zeichenfläche, Schatten.

use glam::Vec2;

use super::shapes::{to_color, to_pos, to_rect};
use crate::core::color::BLACK;
use crate::core::Canvas;
use crate::shared::options::{FONT_INDEX_MAX, FONT_INDEX_MIN};
use crate::shared::{DrawCommand, TextAnchor};

/// Schriftgrößen der Stufen 1–6.
const FONT_SIZES: [f32; 6] = [11.0, 12.0, 13.0, 14.0, 16.0, 18.0];
/// Rand des hinterlegten Kastens.
const BACKGROUND_PADDING: f32 = 2.0;

/// Schriftgröße für eine Schriftstufe (außerhalb 1–6 wird begrenzt).
pub fn font_size(index: u8) -> f32 {
    let index = index.clamp(FONT_INDEX_MIN, FONT_INDEX_MAX);
    FONT_SIZES[usize::from(index - FONT_INDEX_MIN)]
}

/// Linke obere Ecke eines Textes der Größe `size` am Bezugspunkt `pos`.
pub fn anchored_min(pos: Vec2, size: Vec2, anchor: TextAnchor) -> Vec2 {
    match anchor {
        TextAnchor::TopLeft => pos,
        TextAnchor::BottomLeft => pos - Vec2::new(0.0, size.y),
        TextAnchor::Center => pos - size * 0.5,
        TextAnchor::BottomCenter => pos - Vec2::new(size.x * 0.5, size.y),
    }
}

pub(super) fn paint(
    painter: &egui::Painter,
    canvas: &Canvas,
    font: &egui::FontId,
    command: &DrawCommand,
) {
    let DrawCommand::Text {
        pos,
        text,
        color,
        anchor,
        clamp_to_canvas,
        shadow,
        background,
    } = command
    else {
        return;
    };

    let galley = painter.layout_no_wrap(text.clone(), font.clone(), to_color(*color));
    let size = Vec2::new(galley.size().x, galley.size().y);
    let mut min = anchored_min(*pos, size, *anchor);
    if *clamp_to_canvas {
        min = canvas.clamp_box(min, size);
    }

    if let Some(background) = background {
        let pad = Vec2::splat(BACKGROUND_PADDING);
        painter.rect_filled(to_rect(min - pad, size + pad * 2.0), 0.0, to_color(*background));
    }
    if *shadow {
        let shadow = painter.layout_no_wrap(text.clone(), font.clone(), to_color(BLACK));
        painter.galley(to_pos(min + Vec2::ONE), shadow, to_color(BLACK));
    }
    painter.galley(to_pos(min), galley, to_color(*color));
}
