/// Ausgehende Aktionen an externe Mitspieler (Target-System, Dialoge, Chat).
///
/// Der Controller legt sie im Postausgang des States ab, der Host leert ihn
/// einmal pro Frame.
#[derive(Debug, Clone, PartialEq)]
pub enum MapAction {
    /// Positions-Target an der Weltposition beantworten
    TargetPosition { x: i32, y: i32, z: i8 },
    /// Dialog für einen neuen Benutzer-Marker an der Weltposition öffnen
    OpenUserMarkerDialog { x: i32, y: i32, facet: i32 },
    /// Hinweistext für den Spieler
    Notice(String),
}
