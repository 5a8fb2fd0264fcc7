//! Zeichnen der RenderScene mit dem egui-Painter.
//!
//! Die Facet-Karte wird als texturiertes Mesh gezeichnet, Overlays als
//! egui-Shapes. Texturen werden nur bei neuer Revision hochgeladen.

mod shapes;
mod text;
mod texture;

pub use crate::shared::RenderScene;
pub use text::{anchored_min, font_size};

use crate::core::IconRegistry;
use crate::shared::DrawCommand;
use texture::{IconTextures, MapTexture};

/// Haupt-Renderer der Weltkarte.
///
/// Hält die hochgeladenen Texturen zwischen den Frames; pro Frame wird
/// `paint()` mit der frisch gebauten Szene aufgerufen.
#[derive(Default)]
pub struct MapPainter {
    map: MapTexture,
    icons: IconTextures,
}

impl MapPainter {
    /// Erstellt einen Renderer ohne Texturen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeichnet die komplette Szene, beschnitten auf die Zeichenfläche.
    pub fn paint(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        scene: &RenderScene,
        icons: &IconRegistry,
    ) {
        let clip = shapes::to_rect(scene.canvas.min, scene.canvas.max - scene.canvas.min);
        let painter = painter.with_clip_rect(clip);
        painter.rect_filled(clip, 0.0, shapes::to_color(scene.background));

        if let Some(layer) = scene.map.as_ref() {
            let texture = self.map.sync(ctx, layer);
            painter.add(shapes::map_mesh(texture, layer));
        }

        let font = egui::FontId::proportional(font_size(scene.font_index));
        for command in &scene.commands {
            match command {
                DrawCommand::Icon { key, center } => {
                    if let Some(texture) = self.icons.get(ctx, icons, key) {
                        shapes::icon(&painter, texture, *center);
                    }
                }
                DrawCommand::Text { .. } => text::paint(&painter, &scene.canvas, &font, command),
                other => shapes::paint(&painter, other),
            }
        }
    }
}
