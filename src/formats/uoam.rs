//! UOAM-Markerdateien (`.map`).
//!
//! Aufbau einer Zeile: `+icon name: x y map Name mit Leerzeichen`.
//! Die erste Zeile enthält meist nur `3` und wird ignoriert.

use anyhow::{ensure, Context, Result};

use crate::core::Marker;

/// Parst eine Marker-Zeile (mit `+`/`-`-Präfix).
pub fn parse_uoam_line(line: &str) -> Result<Marker> {
    let body = line
        .strip_prefix(['+', '-'])
        .context("Zeile beginnt nicht mit '+' oder '-'")?;
    let (icon_part, rest) = body.split_once(':').context("Kein ':' in der Zeile")?;

    let mut parts = rest.split_whitespace();
    let x = parts.next().context("X fehlt")?;
    let y = parts.next().context("Y fehlt")?;
    let facet = parts.next().context("Map fehlt")?;
    let name = parts.collect::<Vec<_>>().join(" ");

    let x = x.parse::<i32>().with_context(|| format!("X ungültig: '{x}'"))?;
    let y = y.parse::<i32>().with_context(|| format!("Y ungültig: '{y}'"))?;
    let facet = facet
        .parse::<i32>()
        .with_context(|| format!("Map ungültig: '{facet}'"))?;

    let icon = icon_part.split_whitespace().next().unwrap_or_default();
    ensure!(!icon.is_empty() || !name.is_empty(), "Leerer Marker");

    Ok(Marker::new(name, x, y, facet).with_icon(icon))
}

/// Parst eine UOAM-Datei; andere Zeilen und fehlerhafte Marker werden übersprungen.
pub fn parse_uoam(content: &str) -> Vec<Marker> {
    let mut markers = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() || line == "3" {
            continue;
        }
        if !line.starts_with(['+', '-']) {
            continue;
        }
        match parse_uoam_line(line) {
            Ok(marker) => markers.push(marker),
            Err(e) => log::debug!("UOAM-Zeile {} übersprungen: {:#}", i + 1, e),
        }
    }
    markers
}
