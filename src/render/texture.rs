//! Texture-Utilities: Facet-Karte und Marker-Icons als egui-Texturen.

use std::collections::HashMap;
use std::sync::Arc;

use image::RgbaImage;

use crate::core::IconRegistry;
use crate::shared::MapLayer;

/// Erstellt eine egui-Texture aus einem RGBA-Bild.
fn upload(ctx: &egui::Context, name: &str, image: &RgbaImage) -> egui::TextureHandle {
    let size = [image.width() as usize, image.height() as usize];
    log::debug!(
        "Erstelle Texture '{}': {}x{} Pixel, {} Bytes",
        name,
        size[0],
        size[1],
        image.len()
    );
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
    ctx.load_texture(name, color_image, egui::TextureOptions::NEAREST)
}

/// Hochgeladene Facet-Textur mit ihrer Revision.
#[derive(Default)]
pub(super) struct MapTexture {
    uploaded: Option<(u64, egui::TextureHandle)>,
}

impl MapTexture {
    /// Lädt die Textur neu hoch, falls sich die Revision geändert hat.
    pub(super) fn sync(&mut self, ctx: &egui::Context, layer: &MapLayer) -> &egui::TextureHandle {
        let stale = self
            .uploaded
            .as_ref()
            .is_none_or(|(revision, _)| *revision != layer.revision);
        if stale {
            self.uploaded = None;
        }
        let (_, handle) = self.uploaded.get_or_insert_with(|| {
            log::info!(
                "Facet-Textur hochgeladen: Facet {} (Revision {})",
                layer.texture.facet,
                layer.revision
            );
            let name = format!("facet-{}", layer.texture.facet);
            (layer.revision, upload(ctx, &name, &layer.texture.pixels))
        });
        handle
    }
}

/// Icon-Texturen, Schlüssel wie in der Icon-Registry.
///
/// Ein Eintrag gilt, solange er auf dasselbe Bild zeigt; nach einem
/// Neuladen der Registry wird er ersetzt.
#[derive(Default)]
pub(super) struct IconTextures {
    cache: HashMap<String, (Arc<RgbaImage>, egui::TextureHandle)>,
}

impl IconTextures {
    pub(super) fn get(
        &mut self,
        ctx: &egui::Context,
        icons: &IconRegistry,
        key: &str,
    ) -> Option<&egui::TextureHandle> {
        let image = icons.get(key)?;
        let fresh = self
            .cache
            .get(key)
            .is_some_and(|(cached, _)| Arc::ptr_eq(cached, image));
        if !fresh {
            let handle = upload(ctx, &format!("icon-{key}"), image);
            self.cache.insert(key.to_string(), (Arc::clone(image), handle));
        }
        self.cache.get(key).map(|(_, handle)| handle)
    }
}
