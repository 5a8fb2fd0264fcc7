//! Render-Szene als expliziter Übergabevertrag zwischen App und Renderer.
//!
//! Lebt im shared-Modul, da `app` sie baut und `render` sie konsumiert.
//! Alle Positionen sind bereits projizierte Screen-Koordinaten; der Renderer
//! zeichnet die Befehle nur noch in Reihenfolge.

use std::sync::Arc;

use glam::Vec2;
use uo_map_texture::FacetTexture;

use crate::core::{Canvas, Rgba};

/// Texturiertes Viereck der Facet-Karte.
#[derive(Clone)]
pub struct MapLayer {
    /// Aktuelle Facet-Textur
    pub texture: Arc<FacetTexture>,
    /// Revision der Textur, der Renderer lädt bei Änderung neu hoch
    pub revision: u64,
    /// Screen-Ecken (links oben, rechts oben, rechts unten, links unten)
    pub corners: [Vec2; 4],
    /// Texturkoordinaten 0.0–1.0 passend zu `corners`
    pub uv: [Vec2; 4],
}

/// Bezugspunkt eines Textes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    /// Unterkante links (Mauskoordinaten)
    BottomLeft,
    Center,
    /// Unterkante mittig (Namen über Punkten)
    BottomCenter,
}

/// Ein einzelner Zeichenbefehl.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Linienzug, optional geschlossen
    Polyline {
        points: Vec<Vec2>,
        color: Rgba,
        closed: bool,
    },
    /// Gefülltes Viereck mit beliebigen Ecken (gedrehte Häuser)
    Quad { corners: [Vec2; 4], color: Rgba },
    /// Achsenparalleles, gefülltes Rechteck
    Rect { min: Vec2, size: Vec2, color: Rgba },
    /// Achsenparalleler Rahmen
    RectOutline { min: Vec2, size: Vec2, color: Rgba },
    /// Marker-Icon aus der Icon-Registry, mittig auf `center`
    Icon { key: String, center: Vec2 },
    /// Text; mit `clamp_to_canvas` schiebt der Renderer ihn nach dem Messen
    /// vollständig in die Zeichenfläche
    Text {
        pos: Vec2,
        text: String,
        color: Rgba,
        anchor: TextAnchor,
        clamp_to_canvas: bool,
        /// Schwarzer Schatten um 1 px versetzt
        shadow: bool,
        /// Hinterlegter Kasten (2 px Rand)
        background: Option<Rgba>,
    },
    Line { from: Vec2, to: Vec2, color: Rgba },
}

/// Read-only Daten für einen Render-Frame.
#[derive(Clone)]
pub struct RenderScene {
    /// Zeichenfläche dieses Frames
    pub canvas: Canvas,
    /// Füllfarbe der Zeichenfläche unter der Karte
    pub background: Rgba,
    /// Facet-Karte (None, solange keine Textur fertig ist)
    pub map: Option<MapLayer>,
    /// Overlays in Zeichenreihenfolge
    pub commands: Vec<DrawCommand>,
    /// Schriftstufe 1–6
    pub font_index: u8,
}

impl RenderScene {
    /// Gibt zurück, ob eine Karte für Rendering vorhanden ist.
    pub fn has_map(&self) -> bool {
        self.map.is_some()
    }

    /// Alle Texte der Szene (für Tests und Hit-Tests der UI).
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
