//! Radar-Farben: 16-Bit-Farbwerte (1-5-5-5) und Umrechnung nach RGBA.

use anyhow::{ensure, Context, Result};
use std::path::Path;

use crate::facet::TileColors;

/// Anzahl Land-Einträge in `radarcol.mul`; Statics folgen dahinter.
pub const LAND_ENTRIES: usize = 0x4000;

/// Graphics, die auf der Karte nie gezeichnet werden (Nodraw-Tiles).
const NO_DRAW_GRAPHICS: [u16; 2] = [0x0001, 0x21BC];
const NO_DRAW_RANGE: std::ops::RangeInclusive<u16> = 0xA1FE..=0xA201;

/// Wandelt eine 1-5-5-5-Farbe in RGBA mit voller Deckkraft.
pub fn color16_to_rgba(color: u16) -> [u8; 4] {
    let scale = |c: u16| ((c & 0x1F) as u32 * 255 / 31) as u8;
    [scale(color >> 10), scale(color >> 5), scale(color), 0xFF]
}

/// Prüft, ob ein Static auf der Karte erscheinen soll.
pub fn is_static_drawable(graphic: u16) -> bool {
    graphic != 0
        && graphic != 0xFFFF
        && !NO_DRAW_GRAPHICS.contains(&graphic)
        && !NO_DRAW_RANGE.contains(&graphic)
}

/// Farbtabelle aus `radarcol.mul`.
#[derive(Debug, Clone)]
pub struct RadarColors {
    colors: Vec<u16>,
}

impl RadarColors {
    /// Erstellt die Tabelle aus bereits gelesenen Farbwerten.
    pub fn from_colors(colors: Vec<u16>) -> Self {
        Self { colors }
    }

    /// Dekodiert `radarcol.mul` (Little-Endian u16-Array).
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        ensure!(
            data.len() % 2 == 0,
            "radarcol.mul hat ungerade Länge: {} Bytes",
            data.len()
        );
        let colors = data
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();
        Ok(Self { colors })
    }

    /// Lädt `radarcol.mul` von der Platte.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("radarcol.mul nicht lesbar: {}", path.display()))?;
        let colors = Self::from_bytes(&data)?;
        log::info!("Radar-Farben geladen: {} Einträge", colors.len());
        Ok(colors)
    }

    /// Anzahl Einträge.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Gibt `true` zurück, wenn keine Farben vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    fn get(&self, index: usize) -> u16 {
        self.colors.get(index).copied().unwrap_or(0)
    }
}

impl TileColors for RadarColors {
    fn land_color(&self, tile_id: u16) -> u16 {
        self.get((tile_id & 0x3FFF) as usize)
    }

    // Hue-Tabellen werden nicht geladen, Statics nutzen immer die Radar-Farbe.
    fn static_color(&self, graphic: u16, _hue: u16) -> u16 {
        self.get(graphic as usize + LAND_ENTRIES)
    }
}
