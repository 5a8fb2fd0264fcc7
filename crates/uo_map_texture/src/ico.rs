//! ICO/CUR-Decoder für Marker-Icons.
//!
//! Unterstützt nur BITMAPINFOHEADER (40 Byte) mit `BI_RGB` und 1/4/8/32 Bit
//! pro Pixel. PNG-komprimierte Einträge und andere Header werden abgelehnt.

use anyhow::{bail, ensure, Context, Result};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Größe des ICONDIR-Headers.
const DIR_HEADER_SIZE: usize = 6;
/// Größe eines ICONDIRENTRY.
const DIR_ENTRY_SIZE: usize = 16;
/// Einzige unterstützte DIB-Header-Größe (BITMAPINFOHEADER).
const BITMAPINFOHEADER_SIZE: u32 = 40;
/// Unkomprimierte Pixeldaten.
const BI_RGB: u32 = 0;
/// Größte Kantenlänge, die ein ICONDIRENTRY ausdrücken kann.
const MAX_ICON_SIZE: usize = 256;

/// Ein Eintrag des Icon-Verzeichnisses.
#[derive(Debug, Clone, Copy)]
struct DirEntry {
    color_count: u32,
    offset: u32,
}

/// Byte-Cursor mit Little-Endian-Lesern.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .with_context(|| format!("Icon-Offset läuft über bei {}", self.pos))?;
        let bytes = self
            .data
            .get(self.pos..end)
            .with_context(|| format!("Icon-Daten zu kurz bei Offset {}", self.pos))?;
        self.pos += n;
        Ok(bytes)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn i32(&mut self) -> Result<i32> {
        Ok(self.u32()? as i32)
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }
}

/// Zeilenlänge inkl. Padding auf 4 Byte.
fn row_stride(width: usize, bit_count: u16) -> usize {
    (width * bit_count as usize).div_ceil(32) * 4
}

fn read_directory(data: &[u8]) -> Result<Vec<DirEntry>> {
    ensure!(
        data.len() >= DIR_HEADER_SIZE,
        "ICO/CUR-Datei zu klein: {} Bytes",
        data.len()
    );
    let mut cur = Cursor::new(data, 0);
    let _reserved = cur.u16()?;
    let kind = cur.u16()?;
    ensure!(kind == 1 || kind == 2, "Kein ICO/CUR-Typ: {}", kind);
    let count = cur.u16()? as usize;
    ensure!(count > 0, "ICO/CUR-Verzeichnis ist leer");

    let mut entries = Vec::with_capacity(count);
    for i in 0..count {
        let mut e = Cursor::new(data, DIR_HEADER_SIZE + i * DIR_ENTRY_SIZE);
        let _width = e.u8()?;
        let _height = e.u8()?;
        let color_count = match e.u8()? {
            0 => 256,
            n => n as u32,
        };
        let _reserved = e.u8()?;
        let _planes = e.u16()?;
        let _bit_count = e.u16()?;
        let _bytes = e.u32()?;
        let offset = e.u32()?;
        entries.push(DirEntry {
            color_count,
            offset,
        });
    }
    Ok(entries)
}

/// Dekodiert eine ICO/CUR-Datei zu einem RGBA-Bild.
///
/// Gewählt wird der Eintrag mit der höchsten Farbanzahl.
///
/// # Fehler
/// - ungültiges Verzeichnis oder abgeschnittene Daten
/// - DIB-Header ≠ 40 Byte oder Kompression ≠ `BI_RGB`
/// - Farbtiefe außer 1/4/8/32 Bit
pub fn decode_ico(data: &[u8]) -> Result<RgbaImage> {
    let entries = read_directory(data)?;
    let mut best = entries[0];
    for entry in &entries[1..] {
        if entry.color_count > best.color_count {
            best = *entry;
        }
    }

    let mut cur = Cursor::new(data, best.offset as usize);
    let header_size = cur.u32()?;
    ensure!(
        header_size == BITMAPINFOHEADER_SIZE,
        "Nicht unterstützter DIB-Header: {} Bytes",
        header_size
    );
    let width = cur.i32()?;
    let height = cur.i32()?;
    let _planes = cur.u16()?;
    let bit_count = cur.u16()?;
    let compression = cur.u32()?;
    ensure!(
        compression == BI_RGB,
        "Nicht unterstützte Kompression: {}",
        compression
    );
    let _size_image = cur.u32()?;
    let _x_ppm = cur.i32()?;
    let _y_ppm = cur.i32()?;
    let clr_used = cur.u32()?;
    let _clr_important = cur.u32()?;

    if !matches!(bit_count, 1 | 4 | 8 | 32) {
        bail!("Nicht unterstützte Farbtiefe: {} Bit", bit_count);
    }
    ensure!(
        width > 0 && height > 1,
        "Ungültige Icon-Größe: {}x{}",
        width,
        height
    );

    // Höhe umfasst XOR- und AND-Bitmap
    let width = width as usize;
    let height = (height / 2) as usize;
    ensure!(
        width <= MAX_ICON_SIZE && height <= MAX_ICON_SIZE,
        "Icon zu groß: {}x{} (maximal {})",
        width,
        height,
        MAX_ICON_SIZE
    );

    let mut palette = [[0u8; 4]; 256];
    if bit_count <= 8 {
        let used = match clr_used {
            0 => 1usize << bit_count,
            n => (n as usize).min(256),
        };
        for color in palette.iter_mut().take(used) {
            let b = cur.take(4)?;
            // BGRx → RGBA, Alpha folgt aus der AND-Maske
            *color = [b[2], b[1], b[0], 0];
        }
    }

    // Pixeldaten vor der Allokation gegen die Dateigröße prüfen
    let stride = row_stride(width, bit_count);
    let mask_stride = row_stride(width, 1);
    let needed = stride
        .checked_add(mask_stride)
        .and_then(|row| row.checked_mul(height))
        .context("Icon-Größe läuft über")?;
    ensure!(
        needed <= cur.remaining(),
        "Icon-Daten zu kurz: {}x{} braucht {} Bytes, vorhanden {}",
        width,
        height,
        needed,
        cur.remaining()
    );

    let mut image = RgbaImage::new(width as u32, height as u32);

    // XOR-Bitmap, bottom-up
    for row in 0..height {
        let y = (height - 1 - row) as u32;
        let line = cur.take(stride)?;
        for x in 0..width {
            let px = match bit_count {
                32 => {
                    let p = &line[x * 4..x * 4 + 4];
                    [p[2], p[1], p[0], p[3]]
                }
                bits => {
                    let bits = bits as usize;
                    let bit_pos = x * bits;
                    let byte = line[bit_pos / 8];
                    let shift = 8 - bits - (bit_pos % 8);
                    let index = (byte >> shift) & ((1u16 << bits) - 1) as u8;
                    palette[index as usize]
                }
            };
            image.put_pixel(x as u32, y, Rgba(px));
        }
    }

    // AND-Maske: Bit 0 = deckend, Bit 1 = transparent
    for row in 0..height {
        let y = (height - 1 - row) as u32;
        let line = cur
            .take(mask_stride)
            .context("AND-Maske fehlt oder ist abgeschnitten")?;
        for x in 0..width {
            let transparent = (line[x / 8] >> (7 - x % 8)) & 1 == 1;
            let px = image.get_pixel_mut(x as u32, y);
            if !transparent {
                px.0[3] = 0xFF;
            }
            if px.0[3] == 0 {
                px.0 = [0, 0, 0, 0];
            }
        }
    }

    Ok(image)
}

/// Lädt ein Icon von der Platte: `.ico`/`.cur` über den eigenen Decoder,
/// alles andere über `image`.
pub fn load_icon(path: &Path) -> Result<RgbaImage> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "ico" | "cur" => {
            let data = std::fs::read(path)
                .with_context(|| format!("Icon nicht lesbar: {}", path.display()))?;
            decode_ico(&data).with_context(|| format!("Icon ungültig: {}", path.display()))
        }
        _ => {
            let img = image::open(path)
                .with_context(|| format!("Bild nicht lesbar: {}", path.display()))?;
            Ok(img.to_rgba8())
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Baut eine minimale ICO-Datei mit einem Eintrag.
    pub(crate) fn build_ico(
        width: u32,
        height: u32,
        bit_count: u16,
        header_size: u32,
        compression: u32,
        palette: &[[u8; 4]],
        xor_rows: &[Vec<u8>],
        and_rows: &[Vec<u8>],
    ) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        // Eintrag
        out.push(width as u8);
        out.push(height as u8);
        out.push(palette.len() as u8);
        out.push(0);
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&bit_count.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&22u32.to_le_bytes());
        // BITMAPINFOHEADER
        out.extend_from_slice(&header_size.to_le_bytes());
        out.extend_from_slice(&(width as i32).to_le_bytes());
        out.extend_from_slice(&((height * 2) as i32).to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&bit_count.to_le_bytes());
        out.extend_from_slice(&compression.to_le_bytes());
        out.extend_from_slice(&[0u8; 12]);
        out.extend_from_slice(&(palette.len() as u32).to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        for c in palette {
            out.extend_from_slice(c);
        }
        for row in xor_rows {
            out.extend_from_slice(row);
        }
        for row in and_rows {
            out.extend_from_slice(row);
        }
        out
    }

    #[test]
    fn test_row_stride_padding() {
        assert_eq!(row_stride(1, 1), 4);
        assert_eq!(row_stride(33, 1), 8);
        assert_eq!(row_stride(3, 8), 4);
        assert_eq!(row_stride(5, 8), 8);
        assert_eq!(row_stride(2, 32), 8);
    }

    #[test]
    fn test_decode_8bit_bottom_up_with_mask() {
        // 2x2, Palette: 0 = rot, 1 = blau (BGRx)
        let palette = [[0, 0, 255, 0], [255, 0, 0, 0]];
        // Untere Zeile zuerst: [0, 1], obere: [1, 1]
        let xor = vec![vec![0, 1, 0, 0], vec![1, 1, 0, 0]];
        // Untere Zeile: rechtes Pixel transparent
        let and = vec![vec![0b0100_0000, 0, 0, 0], vec![0, 0, 0, 0]];
        let data = build_ico(2, 2, 8, 40, 0, &palette, &xor, &and);

        let img = decode_ico(&data).unwrap();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(0, 1).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(1, 1).0, [0, 0, 0, 0]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_decode_1bit() {
        // 3x1, Palette: schwarz/weiß, Pixel 1,0,1
        let palette = [[0, 0, 0, 0], [255, 255, 255, 0]];
        let xor = vec![vec![0b1010_0000, 0, 0, 0]];
        let and = vec![vec![0, 0, 0, 0]];
        let data = build_ico(3, 1, 1, 40, 0, &palette, &xor, &and);

        let img = decode_ico(&data).unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(2, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_decode_4bit_nibbles() {
        let mut palette = vec![[0u8; 4]; 16];
        palette[3] = [0, 255, 0, 0];
        palette[0xA] = [0, 0, 255, 0];
        let xor = vec![vec![0x3A, 0, 0, 0]];
        let and = vec![vec![0, 0, 0, 0]];
        let data = build_ico(2, 1, 4, 40, 0, &palette, &xor, &and);

        let img = decode_ico(&data).unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [0, 255, 0, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_32bit_keeps_alpha_and_zeroes_transparent_rgb() {
        // BGRA: erstes Pixel halbtransparent, zweites vollständig transparent
        let xor = vec![vec![10, 20, 30, 128, 40, 50, 60, 0]];
        let and = vec![vec![0b0100_0000, 0, 0, 0]];
        let data = build_ico(2, 1, 32, 40, 0, &[], &xor, &and);

        let img = decode_ico(&data).unwrap();
        // Maskenbit 0 → deckend
        assert_eq!(img.get_pixel(0, 0).0, [30, 20, 10, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_rejects_wrong_header_size() {
        let data = build_ico(1, 1, 8, 108, 0, &[[0; 4]], &[vec![0; 4]], &[vec![0; 4]]);
        assert!(decode_ico(&data).is_err());
    }

    #[test]
    fn test_rejects_compressed_bitmap() {
        let data = build_ico(1, 1, 8, 40, 1, &[[0; 4]], &[vec![0; 4]], &[vec![0; 4]]);
        assert!(decode_ico(&data).is_err());
    }

    #[test]
    fn test_rejects_24bit_and_truncated_data() {
        let data = build_ico(1, 1, 24, 40, 0, &[], &[vec![0; 4]], &[vec![0; 4]]);
        assert!(decode_ico(&data).is_err());

        let data = build_ico(2, 2, 8, 40, 0, &[[0; 4]; 2], &[vec![0; 4]], &[]);
        assert!(decode_ico(&data).is_err());
        assert!(decode_ico(&[0, 0, 1]).is_err());
    }

    #[test]
    fn test_rejects_header_larger_than_file() {
        // Header behauptet i32::MAX x i32::MAX, dahinter folgen keine Pixel
        let mut data = build_ico(1, 1, 32, 40, 0, &[], &[], &[]);
        data[26..30].copy_from_slice(&i32::MAX.to_le_bytes());
        data[30..34].copy_from_slice(&i32::MAX.to_le_bytes());
        let err = decode_ico(&data).unwrap_err();
        assert!(format!("{err:#}").contains("zu groß"));

        // Innerhalb der Grenze, aber Pixeldaten fehlen
        let data = build_ico(64, 64, 32, 40, 0, &[], &[vec![0; 256]], &[]);
        let err = decode_ico(&data).unwrap_err();
        assert!(format!("{err:#}").contains("zu kurz"));
    }

    #[test]
    fn test_picks_entry_with_most_colors() {
        let palette2 = [[0, 0, 255, 0], [0, 0, 255, 0]];
        let single = build_ico(1, 1, 8, 40, 0, &palette2, &[vec![0; 4]], &[vec![0; 4]]);
        let dib = &single[22..];

        // Zwei Einträge: erster mit 2 Farben (ungültiger Header), zweiter mit 16 Farben
        let mut out = Vec::new();
        out.extend_from_slice(&[0, 0, 1, 0, 2, 0]);
        let first_offset = 6 + 32;
        let second_offset = first_offset + 4;
        for (colors, offset) in [(2u8, first_offset as u32), (16u8, second_offset as u32)] {
            out.extend_from_slice(&[1, 1, colors, 0, 1, 0, 8, 0]);
            out.extend_from_slice(&0u32.to_le_bytes());
            out.extend_from_slice(&offset.to_le_bytes());
        }
        out.extend_from_slice(&12u32.to_le_bytes());
        out.extend_from_slice(dib);

        let img = decode_ico(&out).unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }
}
