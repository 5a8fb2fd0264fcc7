//! Facet-Geometrie und Datenquellen.
//!
//! Eine Facet besteht aus 8×8-Blöcken. Jeder Block liefert 64 Land-Zellen
//! und eine beliebige Anzahl Statics. Woher die Daten kommen, abstrahiert
//! der `FacetSource`-Trait (MUL-Dateien oder In-Memory für Tests).

use anyhow::{bail, Result};

/// Kantenlänge eines Blocks in Tiles.
pub const BLOCK_SIZE: u32 = 8;

/// Zellen pro Block.
pub const BLOCK_CELLS: usize = (BLOCK_SIZE * BLOCK_SIZE) as usize;

/// Standard-Größen der Facets 0–5 in Tiles (Breite, Höhe).
pub const FACET_DEFAULT_SIZES: [(u32, u32); 6] = [
    (7168, 4096),
    (7168, 4096),
    (2304, 1600),
    (2560, 2048),
    (1448, 1448),
    (1280, 4096),
];

/// Liefert die Standard-Größe einer Facet oder einen Fehler bei unbekanntem Index.
pub fn facet_size(facet: u8) -> Result<(u32, u32)> {
    match FACET_DEFAULT_SIZES.get(facet as usize) {
        Some(&size) => Ok(size),
        None => bail!("Unbekannte Facet: {}", facet),
    }
}

/// Eine Land-Zelle: Tile-ID und Höhe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LandCell {
    pub tile_id: u16,
    pub z: i8,
}

/// Ein Static-Eintrag innerhalb eines Blocks (x/y relativ zum Block).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticCell {
    pub graphic: u16,
    pub x: u8,
    pub y: u8,
    pub z: i8,
    pub hue: u16,
}

/// Inhalt eines 8×8-Blocks. Land-Zellen sind zeilenweise abgelegt (`y * 8 + x`).
#[derive(Debug, Clone)]
pub struct MapBlock {
    pub land: [LandCell; BLOCK_CELLS],
    pub statics: Vec<StaticCell>,
}

impl Default for MapBlock {
    fn default() -> Self {
        Self {
            land: [LandCell::default(); BLOCK_CELLS],
            statics: Vec::new(),
        }
    }
}

/// Lesezugriff auf die Blöcke einer Facet.
pub trait FacetSource: Send + Sync {
    /// Größe der Facet in Tiles (Breite, Höhe).
    fn size(&self) -> (u32, u32);

    /// Liest einen Block. `None` = Block existiert nicht (bleibt leer).
    fn read_block(&self, block_x: u32, block_y: u32) -> Result<Option<MapBlock>>;

    /// Anzahl Blöcke (Breite, Höhe).
    fn blocks(&self) -> (u32, u32) {
        let (w, h) = self.size();
        (w / BLOCK_SIZE, h / BLOCK_SIZE)
    }
}

/// Farbtabelle für Land-Tiles und Statics (16-Bit 1-5-5-5).
pub trait TileColors: Send + Sync {
    fn land_color(&self, tile_id: u16) -> u16;
    fn static_color(&self, graphic: u16, hue: u16) -> u16;
}

/// In-Memory-Facet, vor allem für Tests und Benchmarks.
#[derive(Debug, Clone)]
pub struct MemoryFacet {
    width: u32,
    height: u32,
    blocks: Vec<Option<MapBlock>>,
}

impl MemoryFacet {
    /// Erstellt eine leere Facet; die Größe wird auf ganze Blöcke abgerundet.
    pub fn new(width: u32, height: u32) -> Self {
        let bw = width / BLOCK_SIZE;
        let bh = height / BLOCK_SIZE;
        Self {
            width: bw * BLOCK_SIZE,
            height: bh * BLOCK_SIZE,
            blocks: vec![None; (bw * bh) as usize],
        }
    }

    fn block_index(&self, block_x: u32, block_y: u32) -> Option<usize> {
        let (bw, bh) = (self.width / BLOCK_SIZE, self.height / BLOCK_SIZE);
        (block_x < bw && block_y < bh).then(|| (block_x * bh + block_y) as usize)
    }

    fn block_mut(&mut self, x: u32, y: u32) -> Option<&mut MapBlock> {
        let idx = self.block_index(x / BLOCK_SIZE, y / BLOCK_SIZE)?;
        Some(self.blocks[idx].get_or_insert_with(MapBlock::default))
    }

    /// Setzt eine Land-Zelle in Weltkoordinaten. Außerhalb der Facet wird ignoriert.
    pub fn set_land(&mut self, x: u32, y: u32, tile_id: u16, z: i8) {
        if let Some(block) = self.block_mut(x, y) {
            let cell = ((y % BLOCK_SIZE) * BLOCK_SIZE + x % BLOCK_SIZE) as usize;
            block.land[cell] = LandCell { tile_id, z };
        }
    }

    /// Fügt ein Static in Weltkoordinaten hinzu.
    pub fn add_static(&mut self, x: u32, y: u32, graphic: u16, z: i8, hue: u16) {
        if let Some(block) = self.block_mut(x, y) {
            block.statics.push(StaticCell {
                graphic,
                x: (x % BLOCK_SIZE) as u8,
                y: (y % BLOCK_SIZE) as u8,
                z,
                hue,
            });
        }
    }
}

impl FacetSource for MemoryFacet {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn read_block(&self, block_x: u32, block_y: u32) -> Result<Option<MapBlock>> {
        Ok(self
            .block_index(block_x, block_y)
            .and_then(|idx| self.blocks[idx].clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facet_size_known_and_unknown() {
        assert_eq!(facet_size(0).unwrap(), (7168, 4096));
        assert_eq!(facet_size(4).unwrap(), (1448, 1448));
        assert!(facet_size(6).is_err());
    }

    #[test]
    fn test_memory_facet_rounds_to_blocks() {
        let facet = MemoryFacet::new(20, 17);
        assert_eq!(facet.size(), (16, 16));
        assert_eq!(facet.blocks(), (2, 2));
    }

    #[test]
    fn test_memory_facet_land_and_statics_land_in_right_block() {
        let mut facet = MemoryFacet::new(16, 16);
        facet.set_land(9, 3, 0x0003, 5);
        facet.add_static(9, 3, 0x0100, 10, 0);

        let block = facet.read_block(1, 0).unwrap().unwrap();
        assert_eq!(block.land[3 * 8 + 1], LandCell { tile_id: 3, z: 5 });
        assert_eq!(block.statics.len(), 1);
        assert_eq!((block.statics[0].x, block.statics[0].y), (1, 3));

        assert!(facet.read_block(0, 1).unwrap().is_none());
        assert!(facet.read_block(5, 5).unwrap().is_none());
    }
}
