//! Handler für die Facet-Textur.

use crate::app::use_cases;
use crate::app::WorldMapState;

/// Übernimmt fertige Texturen aus dem Worker.
pub fn poll(state: &mut WorldMapState) -> anyhow::Result<()> {
    use_cases::texture::poll(state)
}

/// Fordert den Neuaufbau für die aktuelle Facet an.
pub fn request_rebuild(state: &mut WorldMapState) -> anyhow::Result<()> {
    use_cases::texture::request_rebuild(state)
}
