use std::path::PathBuf;

use glam::Vec2;

use super::command::{DialogKind, UserMarkerDraft};
use crate::core::WorldSnapshot;

/// Maustaste, unabhängig vom UI-Toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// Gedrückte Modifier-Tasten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        alt: false,
        ctrl: false,
        shift: false,
    };
}

/// Umschaltbare Einstellungen aus dem Kontextmenü.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingToggle {
    Flip,
    TopMost,
    FreeView,
    ShowPartyMembers,
    ShowMobiles,
    ShowMultis,
    ShowPlayerName,
    ShowPlayerBar,
    ShowGroupName,
    ShowGroupBar,
    ShowCoordinates,
    ShowMouseCoordinates,
    ShowMarkers,
    ShowMarkerNames,
    ShowMarkerIcons,
    ShowGridIfZoomed,
    AllowPositionalTarget,
}

/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum MapIntent {
    /// Zeichenfläche hat sich geändert (Screen-Koordinaten)
    CanvasChanged { min: Vec2, max: Vec2 },
    /// Neuer Frame mit aktueller Welt-Momentaufnahme
    FrameStarted { world: WorldSnapshot },
    /// Maustaste gedrückt
    PointerPressed {
        button: PointerButton,
        pos: Vec2,
        modifiers: Modifiers,
    },
    /// Maustaste losgelassen
    PointerReleased { button: PointerButton, pos: Vec2 },
    /// Maus bewegt
    PointerMoved { pos: Vec2 },
    /// Maus hat die Zeichenfläche verlassen
    PointerLeft,
    /// Doppelklick
    DoubleClicked {
        button: PointerButton,
        modifiers: Modifiers,
    },
    /// Mausrad in Rasterschritten (positiv = hinein)
    WheelScrolled { steps: i32 },

    /// Einstellung umschalten
    SettingToggled { toggle: SettingToggle },
    /// Schriftstufe gewählt
    FontSelected { index: u8 },

    /// Goto-Eingabe bestätigt (`x y` oder Sextant)
    GotoSubmitted { input: String },
    /// Goto-Marker entfernen
    GotoCleared,

    /// Marker auf Spielerposition anlegen
    AddMarkerOnPlayerRequested { name: String },
    /// Neuer Benutzer-Marker aus dem Dialog
    UserMarkerSubmitted { draft: UserMarkerDraft },
    /// Benutzer-Marker im Manager geändert
    UserMarkerEdited { index: usize, draft: UserMarkerDraft },
    /// Benutzer-Marker im Manager entfernt
    UserMarkerRemoved { index: usize },

    /// Alle Marker-Dateien neu laden
    MarkersReloadRequested,
    /// Marker-Datei ein-/ausblenden
    MarkerFileToggled { name: String },
    /// Alle Marker-Dateien ein- bzw. ausblenden
    AllMarkerFilesToggled { hidden: bool },
    /// Alle Zonen neu laden
    ZonesReloadRequested,
    /// Zonen-Datei ein-/ausblenden
    ZoneFileToggled { file_name: String },

    /// Client-Verzeichnis gewählt
    ClientDirSelected { path: PathBuf },
    /// Client-Ordner-Auswahl anfordern
    ClientDirSelectionRequested,
    /// Facet-Karte neu aufbauen
    TextureRebuildRequested,

    /// Dialog öffnen
    DialogOpened { dialog: DialogKind },
    /// Dialog schließen
    DialogClosed { dialog: DialogKind },

    /// Einstellungen speichern und Viewer schließen
    SaveAndCloseRequested,
}
