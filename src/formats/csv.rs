//! CSV-Marker (`x,y,map,name,icon,color[,zoom]`) und die Benutzerdatei `.usr`.
//!
//! Die Benutzerdatei hat dasselbe Format, beim Lesen werden die Felder
//! jedoch gekürzt (Koordinaten 4 Zeichen, Name 25, Farbname 10).

use anyhow::{ensure, Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::core::{Marker, DEFAULT_MARKER_ZOOM};

/// Maximale Länge der Koordinaten-Strings in der Benutzerdatei.
pub const USER_COORD_MAX_LEN: usize = 4;
/// Maximale Namenslänge in der Benutzerdatei.
pub const USER_NAME_MAX_LEN: usize = 25;
/// Maximale Farbnamenlänge in der Benutzerdatei.
pub const USER_COLOR_MAX_LEN: usize = 10;

/// Mindestanzahl Felder einer Marker-Zeile.
const MIN_FIELDS: usize = 6;

fn truncate(s: &str, max_len: usize) -> &str {
    match s.char_indices().nth(max_len) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Feldgrenzen, optional gekürzt (Benutzerdatei).
#[derive(Clone, Copy)]
struct FieldLimits {
    coord: usize,
    name: usize,
    color: usize,
}

const UNLIMITED: FieldLimits = FieldLimits {
    coord: usize::MAX,
    name: usize::MAX,
    color: usize::MAX,
};

const USER_LIMITS: FieldLimits = FieldLimits {
    coord: USER_COORD_MAX_LEN,
    name: USER_NAME_MAX_LEN,
    color: USER_COLOR_MAX_LEN,
};

fn parse_line(line: &str, limits: FieldLimits) -> Result<Marker> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    ensure!(
        fields.len() >= MIN_FIELDS,
        "Zu wenige Felder ({} statt {})",
        fields.len(),
        MIN_FIELDS
    );

    let x = truncate(fields[0], limits.coord)
        .parse::<i32>()
        .with_context(|| format!("X ungültig: '{}'", fields[0]))?;
    let y = truncate(fields[1], limits.coord)
        .parse::<i32>()
        .with_context(|| format!("Y ungültig: '{}'", fields[1]))?;
    let facet = fields[2]
        .parse::<i32>()
        .with_context(|| format!("Map ungültig: '{}'", fields[2]))?;
    let zoom = match fields.get(6).filter(|z| !z.is_empty()) {
        Some(z) => z
            .parse::<usize>()
            .with_context(|| format!("Zoom ungültig: '{z}'"))?,
        None => DEFAULT_MARKER_ZOOM,
    };

    Ok(Marker::new(truncate(fields[3], limits.name), x, y, facet)
        .with_icon(fields[4])
        .with_color(truncate(fields[5], limits.color))
        .with_zoom(zoom))
}

fn parse_lines(content: &str, limits: FieldLimits) -> Vec<Marker> {
    let mut markers = Vec::new();
    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line, limits) {
            Ok(marker) => markers.push(marker),
            Err(e) => log::debug!("Marker-Zeile {} übersprungen: {:#}", i + 1, e),
        }
    }
    markers
}

/// Parst eine einzelne CSV-Marker-Zeile.
pub fn parse_csv_line(line: &str) -> Result<Marker> {
    parse_line(line, UNLIMITED)
}

/// Parst eine CSV-Datei; fehlerhafte Zeilen werden übersprungen.
pub fn parse_csv(content: &str) -> Vec<Marker> {
    parse_lines(content, UNLIMITED)
}

/// Parst eine Zeile der Benutzerdatei (mit Feldkürzung).
pub fn parse_user_line(line: &str) -> Result<Marker> {
    parse_line(line, USER_LIMITS)
}

/// Parst den Inhalt der Benutzerdatei.
pub fn parse_user(content: &str) -> Vec<Marker> {
    parse_lines(content, USER_LIMITS)
}

/// Entfernt Feldtrenner aus einem Freitext-Feld.
pub fn sanitize_field(value: &str) -> String {
    value.replace([',', '\n', '\r'], "").trim().to_string()
}

/// Formatiert einen Marker als Zeile der Benutzerdatei (ohne Zeilenende).
pub fn format_user_line(marker: &Marker) -> String {
    format!(
        "{},{},{},{},{},{},{}",
        marker.x,
        marker.y,
        marker.facet,
        sanitize_field(&marker.name),
        sanitize_field(&marker.icon_name),
        sanitize_field(&marker.color_name),
        marker.zoom_index
    )
}

/// Legt die Benutzerdatei leer an, falls sie fehlt.
pub fn ensure_user_file(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Verzeichnis nicht anlegbar: {}", parent.display()))?;
    }
    std::fs::File::create(path)
        .with_context(|| format!("Benutzerdatei nicht anlegbar: {}", path.display()))?;
    log::info!("Benutzer-Markerdatei angelegt: {}", path.display());
    Ok(())
}

/// Liest die Benutzerdatei; legt sie vorher an, falls sie fehlt.
pub fn load_user_markers(path: &Path) -> Result<Vec<Marker>> {
    ensure_user_file(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Benutzerdatei nicht lesbar: {}", path.display()))?;
    Ok(parse_user(&content))
}

/// Hängt einen Marker an die Benutzerdatei an und schreibt sofort.
pub fn append_user_marker(path: &Path, marker: &Marker) -> Result<()> {
    ensure_user_file(path)?;

    // Fehlendes Zeilenende der letzten Zeile ergänzen
    let needs_newline = std::fs::read(path)
        .map(|data| data.last().is_some_and(|&b| b != b'\n'))
        .unwrap_or(false);

    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .with_context(|| format!("Benutzerdatei nicht schreibbar: {}", path.display()))?;
    if needs_newline {
        writeln!(file)?;
    }
    writeln!(file, "{}", format_user_line(marker))
        .with_context(|| format!("Marker nicht geschrieben: {}", path.display()))?;
    file.flush()?;
    Ok(())
}

/// Schreibt die Benutzerdatei komplett neu.
pub fn write_user_markers(path: &Path, markers: &[Marker]) -> Result<()> {
    let mut content = String::new();
    for marker in markers {
        content.push_str(&format_user_line(marker));
        content.push('\n');
    }
    std::fs::write(path, content)
        .with_context(|| format!("Benutzerdatei nicht schreibbar: {}", path.display()))?;
    log::info!("{} Benutzer-Marker gespeichert: {}", markers.len(), path.display());
    Ok(())
}
