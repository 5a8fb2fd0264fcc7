//! MUL-Reader für Facet-Daten.
//!
//! Formate:
//! - `map#.mul`: 196 Bytes pro Block (4 Byte Header + 64 × (u16 Tile, i8 Z)),
//!   Blockindex = `bx * blocks_height + by`
//! - `staidx#.mul`: 12 Bytes pro Block (i32 Offset, i32 Länge, i32 Extra)
//! - `statics#.mul`: 7 Bytes pro Static (u16 Graphic, u8 X, u8 Y, i8 Z, u16 Hue)
//!
//! Die Dateien werden vollständig in den Speicher gelesen.

use anyhow::{ensure, Context, Result};
use std::path::Path;

use crate::facet::{facet_size, FacetSource, LandCell, MapBlock, StaticCell, BLOCK_CELLS, BLOCK_SIZE};

/// Größe eines Land-Blocks in `map#.mul`.
pub const MAP_BLOCK_BYTES: usize = 4 + BLOCK_CELLS * 3;
/// Größe eines Index-Eintrags in `staidx#.mul`.
pub const STAIDX_ENTRY_BYTES: usize = 12;
/// Größe eines Static-Records in `statics#.mul`.
pub const STATIC_RECORD_BYTES: usize = 7;

/// Facet aus MUL-Dateien.
pub struct MulFacet {
    width: u32,
    height: u32,
    map: Vec<u8>,
    staidx: Vec<u8>,
    statics: Vec<u8>,
}

impl MulFacet {
    /// Öffnet die MUL-Dateien einer Facet im Client-Verzeichnis.
    ///
    /// Fehlen `staidx#.mul`/`statics#.mul`, wird die Facet ohne Statics geladen.
    pub fn open(client_dir: &Path, facet: u8) -> Result<Self> {
        let map_path = client_dir.join(format!("map{facet}.mul"));
        let map = std::fs::read(&map_path)
            .with_context(|| format!("Map-Datei nicht lesbar: {}", map_path.display()))?;

        let staidx = read_optional(&client_dir.join(format!("staidx{facet}.mul")));
        let statics = read_optional(&client_dir.join(format!("statics{facet}.mul")));

        let facet_mul = Self::from_bytes(facet, map, staidx, statics)?;
        log::info!(
            "Facet {} geladen: {}x{} Tiles aus {}",
            facet,
            facet_mul.width,
            facet_mul.height,
            map_path.display()
        );
        Ok(facet_mul)
    }

    /// Erstellt die Facet aus Rohdaten.
    ///
    /// Ist `map` kürzer als die Standard-Größe erwartet (ältere Clients),
    /// wird die Breite aus der Dateigröße abgeleitet.
    pub fn from_bytes(facet: u8, map: Vec<u8>, staidx: Vec<u8>, statics: Vec<u8>) -> Result<Self> {
        let (default_w, height) = facet_size(facet)?;
        let blocks_h = height / BLOCK_SIZE;
        let available_blocks = (map.len() / MAP_BLOCK_BYTES) as u32;
        let expected_blocks = (default_w / BLOCK_SIZE) * blocks_h;

        let width = if available_blocks >= expected_blocks {
            default_w
        } else {
            let blocks_w = available_blocks / blocks_h;
            ensure!(
                blocks_w > 0,
                "map{}.mul zu klein: {} Bytes",
                facet,
                map.len()
            );
            log::warn!(
                "map{}.mul kürzer als erwartet, nutze Breite {} statt {}",
                facet,
                blocks_w * BLOCK_SIZE,
                default_w
            );
            blocks_w * BLOCK_SIZE
        };

        Ok(Self {
            width,
            height,
            map,
            staidx,
            statics,
        })
    }

    fn read_land(&self, index: usize) -> Result<[LandCell; BLOCK_CELLS]> {
        let start = index * MAP_BLOCK_BYTES;
        let block = self
            .map
            .get(start..start + MAP_BLOCK_BYTES)
            .with_context(|| format!("Land-Block {index} außerhalb von map.mul"))?;

        let mut land = [LandCell::default(); BLOCK_CELLS];
        for (cell, raw) in land.iter_mut().zip(block[4..].chunks_exact(3)) {
            cell.tile_id = u16::from_le_bytes([raw[0], raw[1]]);
            cell.z = raw[2] as i8;
        }
        Ok(land)
    }

    fn read_statics(&self, index: usize) -> Result<Vec<StaticCell>> {
        let start = index * STAIDX_ENTRY_BYTES;
        let Some(entry) = self.staidx.get(start..start + STAIDX_ENTRY_BYTES) else {
            return Ok(Vec::new());
        };

        let lookup = i32::from_le_bytes([entry[0], entry[1], entry[2], entry[3]]);
        let length = i32::from_le_bytes([entry[4], entry[5], entry[6], entry[7]]);
        if lookup < 0 || length <= 0 {
            return Ok(Vec::new());
        }

        let (lookup, length) = (lookup as usize, length as usize);
        let data = self
            .statics
            .get(lookup..lookup + length)
            .with_context(|| format!("Statics für Block {index} außerhalb von statics.mul"))?;

        Ok(data
            .chunks_exact(STATIC_RECORD_BYTES)
            .map(|r| StaticCell {
                graphic: u16::from_le_bytes([r[0], r[1]]),
                x: r[2],
                y: r[3],
                z: r[4] as i8,
                hue: u16::from_le_bytes([r[5], r[6]]),
            })
            .collect())
    }
}

fn read_optional(path: &Path) -> Vec<u8> {
    match std::fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("{} nicht lesbar ({}), Facet ohne Statics", path.display(), e);
            Vec::new()
        }
    }
}

impl FacetSource for MulFacet {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn read_block(&self, block_x: u32, block_y: u32) -> Result<Option<MapBlock>> {
        let (blocks_w, blocks_h) = self.blocks();
        if block_x >= blocks_w || block_y >= blocks_h {
            return Ok(None);
        }
        let index = (block_x * blocks_h + block_y) as usize;

        Ok(Some(MapBlock {
            land: self.read_land(index)?,
            statics: self.read_statics(index)?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Baut map/staidx/statics für Facet 4 (1448×1448) mit einem Static in Block 0.
    fn facet4_bytes() -> (Vec<u8>, Vec<u8>, Vec<u8>) {
        let blocks = (1448 / 8) * (1448 / 8);
        let mut map = vec![0u8; blocks * MAP_BLOCK_BYTES];
        // Block 1 (bx=0, by=1), Zelle 0: Tile 0x0044, Z = -5
        let cell = MAP_BLOCK_BYTES + 4;
        map[cell..cell + 3].copy_from_slice(&[0x44, 0x00, (-5i8) as u8]);

        let mut staidx = vec![0xFFu8; blocks * STAIDX_ENTRY_BYTES];
        staidx[0..4].copy_from_slice(&0i32.to_le_bytes());
        staidx[4..8].copy_from_slice(&7i32.to_le_bytes());

        let statics = vec![0x10, 0x00, 3, 4, 20, 0x05, 0x00];
        (map, staidx, statics)
    }

    #[test]
    fn test_read_block_land_and_statics() {
        let (map, staidx, statics) = facet4_bytes();
        let facet = MulFacet::from_bytes(4, map, staidx, statics).unwrap();
        assert_eq!(facet.size(), (1448, 1448));

        let block0 = facet.read_block(0, 0).unwrap().unwrap();
        assert_eq!(
            block0.statics,
            vec![StaticCell {
                graphic: 0x10,
                x: 3,
                y: 4,
                z: 20,
                hue: 5
            }]
        );

        let block1 = facet.read_block(0, 1).unwrap().unwrap();
        assert_eq!(block1.land[0], LandCell { tile_id: 0x44, z: -5 });
        // staidx mit -1 → keine Statics
        assert!(block1.statics.is_empty());

        assert!(facet.read_block(500, 0).unwrap().is_none());
    }

    #[test]
    fn test_short_map_file_derives_width() {
        // Facet 4 mit nur 10 Block-Spalten
        let blocks = 10 * (1448 / 8);
        let map = vec![0u8; blocks * MAP_BLOCK_BYTES];
        let facet = MulFacet::from_bytes(4, map, Vec::new(), Vec::new()).unwrap();
        assert_eq!(facet.size(), (80, 1448));
    }

    #[test]
    fn test_empty_map_file_fails() {
        assert!(MulFacet::from_bytes(4, Vec::new(), Vec::new(), Vec::new()).is_err());
    }
}
