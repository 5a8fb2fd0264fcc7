//! `uo_map_texture`: Facet-Texturen und Marker-Icons für Ultima-Online-Karten.
//!
//! - Compositing der Facet aus Land- und Static-Farben (`radarcol.mul`)
//! - Relief-Schattierung über den Höhenpuffer
//! - MUL-Reader für `map#.mul`, `staidx#.mul`, `statics#.mul`
//! - ICO/CUR-Decoder für Marker-Icons
//! - Hintergrund-Neuaufbau mit Generationszähler
//!
//! # Beispiel
//! ```no_run
//! use std::path::Path;
//! use uo_map_texture::{build_facet_texture, MulFacet, RadarColors};
//!
//! let dir = Path::new("C:/UO");
//! let facet = MulFacet::open(dir, 0)?;
//! let colors = RadarColors::load(&dir.join("radarcol.mul"))?;
//! let texture = build_facet_texture(0, &facet, &colors, &|| false)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod composite;
pub mod facet;
pub mod ico;
pub mod mul;
pub mod radar;
pub mod rebuild;
pub mod relief;

use anyhow::Result;

pub use composite::{composite_facet, FacetTexture};
pub use facet::{
    facet_size, FacetSource, LandCell, MapBlock, MemoryFacet, StaticCell, TileColors,
    BLOCK_SIZE, FACET_DEFAULT_SIZES,
};
pub use ico::{decode_ico, load_icon};
pub use mul::MulFacet;
pub use radar::{color16_to_rgba, RadarColors};
pub use rebuild::{RebuildEvent, TextureRebuilder};
pub use relief::apply_relief;

/// Baut die vollständige Facet-Textur: Compositing, danach Relief.
///
/// Gibt `Ok(None)` zurück, wenn `should_abort` während des Aufbaus `true` liefert.
pub fn build_facet_texture(
    facet: u8,
    source: &dyn FacetSource,
    colors: &dyn TileColors,
    should_abort: &dyn Fn() -> bool,
) -> Result<Option<FacetTexture>> {
    let Some(mut texture) = composite::composite_facet(facet, source, colors, should_abort)? else {
        return Ok(None);
    };
    if should_abort() {
        return Ok(None);
    }
    relief::apply_relief(&mut texture);
    Ok(Some(texture))
}
