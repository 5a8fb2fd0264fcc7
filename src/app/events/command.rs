use std::path::PathBuf;

use glam::{IVec2, Vec2};

use super::intent::SettingToggle;
use crate::core::{Canvas, WorldSnapshot};

/// Eingabe aus dem Marker-Dialog bzw. Marker-Manager.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserMarkerDraft {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub facet: i32,
    pub icon: String,
    pub color: String,
}

/// Dialoge der Weltkarte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    /// Goto-Eingabe
    Goto,
    /// Name für "Marker auf Spieler"
    PlayerMarker,
    /// Neuer Benutzer-Marker
    UserMarker,
    /// Marker-Manager (Benutzerdatei)
    MarkerManager,
}

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum MapCommand {
    // === Ansicht ===
    /// Zeichenfläche setzen
    SetCanvas { canvas: Canvas },
    /// Welt-Momentaufnahme übernehmen
    UpdateWorld { world: WorldSnapshot },
    /// Mittelpunkt auf den Spieler setzen (ohne Free-View)
    FollowPlayer,
    /// Fertige Texturen aus dem Worker übernehmen
    PollTexture,
    /// Pan beginnen
    BeginPan { pos: Vec2, enable_free_view: bool },
    /// Pan fortsetzen
    PanTo { pos: Vec2 },
    /// Pan beenden
    EndPan,
    /// Mausposition merken (None = außerhalb)
    SetMouse { pos: Option<Vec2> },
    /// Zoomstufe verschieben
    Zoom { steps: i32 },
    /// Einstellung umschalten
    ToggleSetting { toggle: SettingToggle },
    /// Schriftstufe setzen
    SetFont { index: u8 },

    // === Ausgehende Aktionen ===
    /// Positions-Target beantworten
    TargetPosition { world: IVec2 },
    /// Dialog für neuen Benutzer-Marker an der Weltposition öffnen
    OpenUserMarkerDialog { x: i32, y: i32, facet: i32 },
    /// Hinweis an den Spieler
    Notify { message: String },

    // === Goto ===
    GotoLocation { position: IVec2 },
    ClearGoto,

    // === Marker ===
    AddMarkerOnPlayer { name: String },
    AddUserMarker { draft: UserMarkerDraft },
    EditUserMarker { index: usize, draft: UserMarkerDraft },
    RemoveUserMarker { index: usize },
    ReloadMarkers,
    ToggleMarkerFile { name: String },
    SetAllMarkerFilesHidden { hidden: bool },

    // === Zonen ===
    ReloadZones,
    ToggleZoneFile { file_name: String },

    // === Textur & Pfade ===
    SetClientDir { path: PathBuf },
    RequestClientDirDialog,
    RequestTextureRebuild,

    // === Dialoge & Sitzung ===
    OpenDialog { dialog: DialogKind },
    CloseDialog { dialog: DialogKind },
    SaveSettings,
    RequestClose,
}
