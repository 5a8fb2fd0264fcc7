//! Benannte Farben für Marker, Zonen und Overlays (RGBA).

/// RGBA-Farbe mit 8 Bit pro Kanal.
pub type Rgba = [u8; 4];

pub const TRANSPARENT: Rgba = [0, 0, 0, 0];
pub const BLACK: Rgba = [0, 0, 0, 255];
pub const WHITE: Rgba = [255, 255, 255, 255];
pub const RED: Rgba = [255, 0, 0, 255];
pub const GREEN: Rgba = [0, 128, 0, 255];
pub const BLUE: Rgba = [0, 0, 255, 255];
pub const PURPLE: Rgba = [128, 0, 128, 255];
pub const YELLOW: Rgba = [255, 255, 0, 255];
pub const LIME: Rgba = [0, 255, 0, 255];
pub const LIME_GREEN: Rgba = [50, 205, 50, 255];
pub const DARK_GRAY: Rgba = [169, 169, 169, 255];
pub const ORANGE: Rgba = [255, 165, 0, 255];
pub const AQUAMARINE: Rgba = [127, 255, 212, 255];
pub const CORNFLOWER_BLUE: Rgba = [100, 149, 237, 255];
/// Gitterlinien (Weiß mit Alpha 56).
pub const GRID: Rgba = [255, 255, 255, 56];

/// Feste Namenstabelle für Marker- und Zonendateien.
const NAMED_COLORS: [(&str, Rgba); 8] = [
    ("red", RED),
    ("green", GREEN),
    ("blue", BLUE),
    ("purple", PURPLE),
    ("black", BLACK),
    ("yellow", YELLOW),
    ("white", WHITE),
    ("none", TRANSPARENT),
];

/// Sucht eine Farbe in der Namenstabelle (Groß-/Kleinschreibung egal).
pub fn color_by_name(name: &str) -> Option<Rgba> {
    let name = name.trim();
    NAMED_COLORS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, c)| c)
}

/// Marker-Farbe: unbekannte Namen werden weiß.
pub fn marker_color(name: &str) -> Rgba {
    color_by_name(name).unwrap_or(WHITE)
}

/// Alle bekannten Farbnamen (für Dialog-Auswahl).
pub fn color_names() -> impl Iterator<Item = &'static str> {
    NAMED_COLORS.iter().map(|(n, _)| *n)
}
