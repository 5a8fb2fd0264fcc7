use crate::app::{DialogState, MapIntent};

/// Öffnet den Ordner-Dialog, falls angefordert, und gibt die Auswahl zurück.
pub fn handle_client_dir_dialog(dialogs: &mut DialogState) -> Vec<MapIntent> {
    let mut events = Vec::new();

    if dialogs.show_client_dir_dialog {
        dialogs.show_client_dir_dialog = false;

        if let Some(path) = rfd::FileDialog::new()
            .set_title("Ultima-Online-Client-Verzeichnis wählen")
            .pick_folder()
        {
            events.push(MapIntent::ClientDirSelected { path });
        }
    }

    events
}
