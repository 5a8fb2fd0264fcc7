//! Relief-Schattierung über den Höhenpuffer.
//!
//! Jede Zelle wird mit ihrem unteren Nachbarn verglichen: liegt der
//! Nachbar höher, wird die Zelle abgedunkelt, liegt er tiefer, aufgehellt.

use crate::composite::FacetTexture;

/// Faktor für Zellen, deren Nachbar höher liegt.
pub const RELIEF_DARKEN: f32 = 0.8;
/// Faktor für Zellen, deren Nachbar tiefer liegt.
pub const RELIEF_BRIGHTEN: f32 = 1.25;

/// Wendet die Relief-Schattierung in-place an.
///
/// Liest ausschließlich den Höhenpuffer, die Reihenfolge der Zellen spielt
/// daher keine Rolle. Zellen mit Alpha 0 bleiben unverändert.
/// Verglichen werden nur Facet-Zellen mit Facet-Nachbarn; die letzte
/// Facet-Zeile und der Rand bleiben unverändert.
pub fn apply_relief(texture: &mut FacetTexture) {
    let width = texture.width() as usize;
    let height = texture.height() as usize;
    // Puffer-Zeilen 1..height-1 sind Facet-Zeilen, die letzte hat keinen Facet-Nachbarn
    if height < 4 || width < 3 {
        return;
    }

    let heights = &texture.heights;
    let rgba: &mut [u8] = &mut texture.pixels;

    for y in 1..height - 2 {
        for x in 1..width - 1 {
            let idx = y * width + x;
            let z0 = heights[idx];
            let z1 = heights[idx + width];
            if z0 == z1 {
                continue;
            }

            let px = &mut rgba[idx * 4..idx * 4 + 4];
            if px[3] == 0 {
                continue;
            }

            let factor = if z0 < z1 { RELIEF_DARKEN } else { RELIEF_BRIGHTEN };
            for channel in &mut px[..3] {
                *channel = (*channel as f32 * factor).min(255.0) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(z_top: i8, z_bottom: i8) -> FacetTexture {
        let mut tex = FacetTexture::blank(0, 1, 2);
        for (y, z) in [(0, z_top), (1, z_bottom)] {
            let idx = tex.index(0, y);
            tex.heights[idx] = z;
            tex.pixels.put_pixel(1, y + 1, image::Rgba([100, 100, 100, 255]));
        }
        tex
    }

    #[test]
    fn test_higher_neighbor_darkens() {
        let mut tex = column(0, 10);
        apply_relief(&mut tex);
        assert_eq!(tex.cell(0, 0), [80, 80, 80, 255]);
    }

    #[test]
    fn test_lower_neighbor_brightens_and_is_symmetric() {
        let mut tex = column(10, 0);
        apply_relief(&mut tex);
        assert_eq!(tex.cell(0, 0), [125, 125, 125, 255]);
    }

    #[test]
    fn test_equal_heights_untouched() {
        let mut tex = column(7, 7);
        apply_relief(&mut tex);
        assert_eq!(tex.cell(0, 0), [100, 100, 100, 255]);
        assert_eq!(tex.cell(0, 1), [100, 100, 100, 255]);
    }

    #[test]
    fn test_brighten_clamps_to_255() {
        let mut tex = column(10, 0);
        tex.pixels.put_pixel(1, 1, image::Rgba([250, 10, 0, 255]));
        apply_relief(&mut tex);
        assert_eq!(tex.cell(0, 0), [255, 12, 0, 255]);
    }

    #[test]
    fn test_last_facet_row_is_not_shaded_against_padding() {
        let mut tex = column(0, 10);
        apply_relief(&mut tex);
        assert_eq!(tex.cell(0, 1), [100, 100, 100, 255]);

        let mut tex = column(10, -10);
        apply_relief(&mut tex);
        assert_eq!(tex.cell(0, 1), [100, 100, 100, 255]);
    }

    #[test]
    fn test_transparent_cells_untouched() {
        let mut tex = column(0, 10);
        tex.pixels.put_pixel(1, 1, image::Rgba([100, 100, 100, 0]));
        apply_relief(&mut tex);
        assert_eq!(tex.cell(0, 0), [100, 100, 100, 0]);
    }
}
