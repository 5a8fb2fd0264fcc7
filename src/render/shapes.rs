//! Umsetzung der Zeichenbefehle in egui-Shapes.

use glam::Vec2;

use crate::core::Rgba;
use crate::shared::{DrawCommand, MapLayer};

pub(super) fn to_pos(v: Vec2) -> egui::Pos2 {
    egui::pos2(v.x, v.y)
}

pub(super) fn to_rect(min: Vec2, size: Vec2) -> egui::Rect {
    egui::Rect::from_min_size(to_pos(min), egui::vec2(size.x, size.y))
}

pub(super) fn to_color(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3])
}

fn stroke(color: Rgba) -> egui::Stroke {
    egui::Stroke::new(1.0, to_color(color))
}

/// Texturiertes Viereck der Facet-Karte (zwei Dreiecke).
pub(super) fn map_mesh(texture: &egui::TextureHandle, layer: &MapLayer) -> egui::Shape {
    let mut mesh = egui::Mesh::with_texture(texture.id());
    for (corner, uv) in layer.corners.iter().zip(layer.uv.iter()) {
        mesh.vertices.push(egui::epaint::Vertex {
            pos: to_pos(*corner),
            uv: to_pos(*uv),
            color: egui::Color32::WHITE,
        });
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    egui::Shape::mesh(mesh)
}

/// Icon in Originalgröße, mittig auf `center`.
pub(super) fn icon(painter: &egui::Painter, texture: &egui::TextureHandle, center: Vec2) {
    let rect = egui::Rect::from_center_size(to_pos(center), texture.size_vec2());
    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    painter.image(texture.id(), rect, uv, egui::Color32::WHITE);
}

/// Zeichnet geometrische Befehle. Text und Icons laufen separat.
pub(super) fn paint(painter: &egui::Painter, command: &DrawCommand) {
    match command {
        DrawCommand::Polyline {
            points,
            color,
            closed,
        } => {
            let points: Vec<egui::Pos2> = points.iter().map(|p| to_pos(*p)).collect();
            if *closed {
                painter.add(egui::Shape::closed_line(points, stroke(*color)));
            } else {
                painter.add(egui::Shape::line(points, stroke(*color)));
            }
        }
        DrawCommand::Quad { corners, color } => {
            painter.add(egui::Shape::convex_polygon(
                corners.iter().map(|c| to_pos(*c)).collect(),
                to_color(*color),
                egui::Stroke::NONE,
            ));
        }
        DrawCommand::Rect { min, size, color } => {
            painter.rect_filled(to_rect(*min, *size), 0.0, to_color(*color));
        }
        DrawCommand::RectOutline { min, size, color } => {
            painter.rect_stroke(
                to_rect(*min, *size),
                0.0,
                stroke(*color),
                egui::StrokeKind::Inside,
            );
        }
        DrawCommand::Line { from, to, color } => {
            painter.line_segment([to_pos(*from), to_pos(*to)], stroke(*color));
        }
        DrawCommand::Icon { .. } | DrawCommand::Text { .. } => {}
    }
}
