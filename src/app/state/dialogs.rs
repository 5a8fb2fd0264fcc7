use crate::app::events::UserMarkerDraft;
use crate::core::marker::DEFAULT_USER_MARKER_COLOR;

/// Zustand eines einzeiligen Eingabedialogs (Goto, Markername)
#[derive(Debug, Default)]
pub struct TextEntryDialogState {
    /// Ob der Dialog sichtbar ist
    pub visible: bool,
    /// Eingabetext
    pub input: String,
}

/// Zustand des Dialogs "Neuer Benutzer-Marker"
#[derive(Debug, Default)]
pub struct UserMarkerDialogState {
    /// Ob der Dialog sichtbar ist
    pub visible: bool,
    /// Arbeitskopie der Eingaben
    pub draft: UserMarkerDraft,
}

impl UserMarkerDialogState {
    /// Öffnet den Dialog mit vorbelegter Position.
    pub fn open_at(&mut self, x: i32, y: i32, facet: i32) {
        self.visible = true;
        self.draft = UserMarkerDraft {
            name: String::new(),
            x,
            y,
            facet,
            icon: String::new(),
            color: DEFAULT_USER_MARKER_COLOR.to_string(),
        };
    }
}

/// Zustand des Marker-Managers
#[derive(Debug, Default)]
pub struct MarkerManagerState {
    /// Ob der Dialog sichtbar ist
    pub visible: bool,
    /// Zeile in Bearbeitung
    pub editing: Option<usize>,
    /// Arbeitskopie der bearbeiteten Zeile
    pub draft: UserMarkerDraft,
    /// Suchfilter (Name)
    pub filter: String,
}

/// Alle Dialoge der Weltkarte
#[derive(Debug, Default)]
pub struct DialogState {
    /// Goto-Eingabe (`x y` oder Sextant)
    pub goto: TextEntryDialogState,
    /// Name für "Marker auf Spieler"
    pub player_marker: TextEntryDialogState,
    pub user_marker: UserMarkerDialogState,
    pub marker_manager: MarkerManagerState,
    /// Client-Ordner-Auswahl soll geöffnet werden
    pub show_client_dir_dialog: bool,
}
