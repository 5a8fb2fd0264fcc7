use std::sync::Arc;

use uo_map_texture::{FacetTexture, TextureRebuilder};

/// Facet-Textur und Hintergrund-Worker.
#[derive(Default)]
pub struct TextureState {
    /// Zuletzt fertig gebaute Textur
    pub current: Option<Arc<FacetTexture>>,
    /// Worker für Neuaufbauten (None in Tests oder wenn der Start scheiterte)
    pub rebuilder: Option<TextureRebuilder>,
    /// Facet des laufenden Auftrags
    pub pending_facet: Option<u8>,
    /// Zählt übernommene Texturen, der Renderer lädt bei Änderung neu hoch
    pub revision: u64,
}

impl TextureState {
    /// Zustand mit gestartetem Worker.
    pub fn with_rebuilder(rebuilder: TextureRebuilder) -> Self {
        Self {
            rebuilder: Some(rebuilder),
            ..Self::default()
        }
    }

    /// Facet der aktuell angezeigten Textur.
    pub fn facet(&self) -> Option<u8> {
        self.current.as_ref().map(|t| t.facet)
    }

    /// Übernimmt eine fertige Textur.
    pub fn install(&mut self, texture: FacetTexture) {
        if self.pending_facet == Some(texture.facet) {
            self.pending_facet = None;
        }
        self.current = Some(Arc::new(texture));
        self.revision += 1;
    }
}
