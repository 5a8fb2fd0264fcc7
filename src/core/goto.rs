//! Eingabe für "Gehe zu Position": `x y` oder Sextant-Koordinaten.
//!
//! Sextant-Nullpunkt ist Lord Britishs Thron bei (1323, 1624);
//! eine volle Drehung entspricht 5120 × 4096 Tiles.

use anyhow::{bail, Context, Result};
use glam::IVec2;
use regex::Regex;

const THRONE: (f64, f64) = (1323.0, 1624.0);
const SEXTANT_WIDTH: f64 = 5120.0;
const SEXTANT_HEIGHT: f64 = 4096.0;

/// `deg°min'N,deg°min'E`, Grad-Zeichen auch als `o`.
const SEXTANT_PATTERN: &str =
    r"(?i)^\s*(\d+)\s*[°o]\s*(\d+)\s*'\s*([NS])\s*,\s*(\d+)\s*[°o]\s*(\d+)\s*'\s*([EW])\s*$";

/// Parst eine Goto-Eingabe in Weltkoordinaten.
pub fn parse_goto(input: &str) -> Result<IVec2> {
    let input = input.trim();
    if input.is_empty() {
        bail!("Leere Positionsangabe");
    }

    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() == 2 && parts.iter().all(|p| p.parse::<i32>().is_ok()) {
        let x = parts[0].parse::<i32>().context("X ungültig")?;
        let y = parts[1].parse::<i32>().context("Y ungültig")?;
        return Ok(IVec2::new(x, y));
    }

    parse_sextant(input)
}

/// Wandelt `deg°min'N,deg°min'E` in Weltkoordinaten.
pub fn parse_sextant(input: &str) -> Result<IVec2> {
    let re = Regex::new(SEXTANT_PATTERN).context("Sextant-Pattern ungültig")?;
    let caps = re
        .captures(input)
        .with_context(|| format!("Ungültige Position: '{input}'"))?;

    let num = |i: usize| -> Result<f64> {
        caps[i]
            .parse::<f64>()
            .with_context(|| format!("Zahl ungültig: '{}'", &caps[i]))
    };
    let (lat_deg, lat_min) = (num(1)?, num(2)?);
    let (lon_deg, lon_min) = (num(4)?, num(5)?);

    let dy = (lat_deg + lat_min / 60.0) * (SEXTANT_HEIGHT / 360.0);
    let dx = (lon_deg + lon_min / 60.0) * (SEXTANT_WIDTH / 360.0);

    let y = if caps[3].eq_ignore_ascii_case("N") {
        THRONE.1 - dy
    } else {
        THRONE.1 + dy
    };
    let x = if caps[6].eq_ignore_ascii_case("W") {
        THRONE.0 - dx
    } else {
        THRONE.0 + dx
    };

    Ok(IVec2::new(
        wrap(x as i32, SEXTANT_WIDTH as i32),
        wrap(y as i32, SEXTANT_HEIGHT as i32),
    ))
}

fn wrap(v: i32, size: i32) -> i32 {
    if v < 0 {
        v + size
    } else if v > size {
        v - size
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_coordinates() {
        assert_eq!(parse_goto("1323 1624").unwrap(), IVec2::new(1323, 1624));
        assert_eq!(parse_goto("  10   20 ").unwrap(), IVec2::new(10, 20));
    }

    #[test]
    fn test_sextant_origin_is_throne() {
        assert_eq!(parse_goto("0°0'N,0°0'E").unwrap(), IVec2::new(1323, 1624));
    }

    #[test]
    fn test_sextant_offsets() {
        // 36° = 1/10 Umdrehung: 409.6 Tiles Y, 512 Tiles X
        assert_eq!(parse_sextant("36°0'S,36°0'E").unwrap(), IVec2::new(1835, 2033));
        assert_eq!(parse_sextant("36o0'N, 36o0'W").unwrap(), IVec2::new(811, 1214));
    }

    #[test]
    fn test_sextant_wraps_around() {
        // 180° West → 1323 - 2560 = -1237 → +5120
        assert_eq!(parse_sextant("0°0'N,180°0'W").unwrap().x, 3883);
    }

    #[test]
    fn test_invalid_input() {
        assert!(parse_goto("").is_err());
        assert!(parse_goto("abc").is_err());
        assert!(parse_goto("12").is_err());
        assert!(parse_goto("12°N,3°E").is_err());
    }
}
