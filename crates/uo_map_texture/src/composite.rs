//! Compositing der Facet-Textur aus Land- und Static-Farben.
//!
//! Die Textur ist um einen Pixel Rand pro Seite größer als die Facet,
//! Facet-Zelle `(x, y)` liegt bei Puffer-Position `(x + 1, y + 1)`.

use anyhow::Result;
use image::RgbaImage;

use crate::facet::{FacetSource, TileColors, BLOCK_SIZE};
use crate::radar::{color16_to_rgba, is_static_drawable};

/// Randbreite gesamt (ein Pixel je Seite).
pub const TEXTURE_PADDING: u32 = 2;

/// Fertig zusammengesetzte Facet-Textur mit parallelem Höhenpuffer.
#[derive(Debug, Clone)]
pub struct FacetTexture {
    /// Facet-Index, aus dem die Textur stammt
    pub facet: u8,
    /// RGBA-Pixel, Alpha 0 = leere Zelle
    pub pixels: RgbaImage,
    /// Höhen, gleiche Indizierung wie `pixels`
    pub heights: Vec<i8>,
}

impl FacetTexture {
    /// Erstellt eine leere (vollständig transparente) Textur für eine Facet-Größe.
    pub fn blank(facet: u8, facet_width: u32, facet_height: u32) -> Self {
        let width = facet_width + TEXTURE_PADDING;
        let height = facet_height + TEXTURE_PADDING;
        Self {
            facet,
            pixels: RgbaImage::new(width, height),
            heights: vec![0; (width * height) as usize],
        }
    }

    /// Breite inkl. Rand.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Höhe inkl. Rand.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Pufferindex einer Facet-Zelle.
    pub fn index(&self, x: u32, y: u32) -> usize {
        ((y + 1) * self.width() + x + 1) as usize
    }

    /// RGBA-Wert einer Facet-Zelle.
    pub fn cell(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels.get_pixel(x + 1, y + 1).0
    }

    /// Höhe einer Facet-Zelle.
    pub fn cell_height(&self, x: u32, y: u32) -> i8 {
        self.heights[self.index(x, y)]
    }

    fn write(&mut self, x: u32, y: u32, color: [u8; 4], z: i8) {
        let idx = self.index(x, y);
        self.pixels.put_pixel(x + 1, y + 1, image::Rgba(color));
        self.heights[idx] = z;
    }
}

/// Setzt die Facet-Textur Block für Block zusammen.
///
/// `should_abort` wird pro Block-Spalte geprüft; liefert es `true`, wird
/// `Ok(None)` zurückgegeben. Lesefehler brechen ab und werden propagiert.
pub fn composite_facet(
    facet: u8,
    source: &dyn FacetSource,
    colors: &dyn TileColors,
    should_abort: &dyn Fn() -> bool,
) -> Result<Option<FacetTexture>> {
    let (width, height) = source.size();
    let (blocks_w, blocks_h) = source.blocks();
    let mut texture = FacetTexture::blank(facet, width, height);

    for bx in 0..blocks_w {
        if should_abort() {
            log::debug!("Compositing Facet {} abgebrochen bei Spalte {}", facet, bx);
            return Ok(None);
        }

        for by in 0..blocks_h {
            let Some(block) = source.read_block(bx, by)? else {
                continue;
            };
            let base_x = bx * BLOCK_SIZE;
            let base_y = by * BLOCK_SIZE;

            for (i, cell) in block.land.iter().enumerate() {
                let x = base_x + i as u32 % BLOCK_SIZE;
                let y = base_y + i as u32 / BLOCK_SIZE;
                let color = color16_to_rgba(0x8000 | colors.land_color(cell.tile_id));
                texture.write(x, y, color, cell.z);
            }

            // Statics nach Land; gleiche Höhe überschreibt
            for st in &block.statics {
                if !is_static_drawable(st.graphic) {
                    continue;
                }
                let x = base_x + u32::from(st.x % BLOCK_SIZE as u8);
                let y = base_y + u32::from(st.y % BLOCK_SIZE as u8);
                if st.z >= texture.cell_height(x, y) {
                    let color = color16_to_rgba(0x8000 | colors.static_color(st.graphic, st.hue));
                    texture.write(x, y, color, st.z);
                }
            }
        }
    }

    Ok(Some(texture))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facet::MemoryFacet;
    use crate::radar::{RadarColors, LAND_ENTRIES};

    fn palette() -> RadarColors {
        let mut colors = vec![0u16; LAND_ENTRIES + 0x200];
        colors[1] = 0x7C00; // Land 1: rot
        colors[LAND_ENTRIES + 0x100] = 0x001F; // Static 0x100: blau
        colors[LAND_ENTRIES + 0x101] = 0x03E0; // Static 0x101: grün
        RadarColors::from_colors(colors)
    }

    fn never() -> bool {
        false
    }

    #[test]
    fn test_blank_texture_has_padding_and_matching_buffers() {
        let tex = FacetTexture::blank(2, 16, 8);
        assert_eq!((tex.width(), tex.height()), (18, 10));
        assert_eq!(tex.heights.len(), tex.pixels.as_raw().len() / 4);
        assert_eq!(tex.cell(0, 0)[3], 0);
    }

    #[test]
    fn test_land_then_static_overlay_by_height() {
        let mut facet = MemoryFacet::new(8, 8);
        for y in 0..8 {
            for x in 0..8 {
                facet.set_land(x, y, 1, 10);
            }
        }
        facet.add_static(1, 1, 0x100, 10, 0); // gleiche Höhe → Static gewinnt
        facet.add_static(2, 2, 0x100, 9, 0); // tiefer → Land bleibt
        facet.add_static(3, 3, 0x100, 12, 0);
        facet.add_static(3, 3, 0x101, 11, 0); // tiefer als vorheriges Static
        facet.add_static(4, 4, 0x0001, 50, 0); // Nodraw

        let tex = composite_facet(0, &facet, &palette(), &never).unwrap().unwrap();

        assert_eq!(tex.cell(0, 0), [255, 0, 0, 255]);
        assert_eq!(tex.cell(1, 1), [0, 0, 255, 255]);
        assert_eq!(tex.cell(2, 2), [255, 0, 0, 255]);
        assert_eq!(tex.cell(3, 3), [0, 0, 255, 255]);
        assert_eq!(tex.cell_height(3, 3), 12);
        assert_eq!(tex.cell(4, 4), [255, 0, 0, 255]);
        assert_eq!(tex.cell_height(4, 4), 10);
        // Rand bleibt leer
        assert_eq!(tex.pixels.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn test_missing_blocks_stay_transparent() {
        let mut facet = MemoryFacet::new(16, 8);
        facet.set_land(0, 0, 1, 0);
        let tex = composite_facet(0, &facet, &palette(), &never).unwrap().unwrap();
        assert_eq!(tex.cell(0, 0)[3], 255);
        assert_eq!(tex.cell(9, 0)[3], 0);
    }

    #[test]
    fn test_abort_returns_none() {
        let facet = MemoryFacet::new(16, 16);
        let result = composite_facet(0, &facet, &palette(), &|| true).unwrap();
        assert!(result.is_none());
    }
}
