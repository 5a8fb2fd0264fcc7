//! Statuszeile am unteren Rand der Karte.

use crate::app::WorldMapState;

/// Zeigt die letzte Statusmeldung, die Anzahl geladener Marker und den
/// zuletzt ausgeführten Befehl als Tooltip.
pub fn render_status_line(ui: &mut egui::Ui, state: &WorldMapState) {
    ui.horizontal(|ui| {
        ui.label(format!(
            "Facet {} | {} Marker | {} Zonen-Dateien",
            state.world.facet,
            state.marker_count(),
            state.zones.len()
        ));
        if state.texture.pending_facet.is_some() {
            ui.separator();
            ui.spinner();
            ui.label("Karte wird aufgebaut…");
        }
        if let Some(message) = state.status_message.as_deref() {
            ui.separator();
            ui.label(message);
        }
        if let Some(text) = last_command_text(state) {
            ui.separator();
            ui.label(format!("{} Befehle", state.command_log.len()))
                .on_hover_text(text);
        }
    });
}

/// Tooltip-Text für den zuletzt geloggten Befehl.
pub fn last_command_text(state: &WorldMapState) -> Option<String> {
    state
        .command_log
        .last()
        .map(|command| format!("Letzter Befehl: {:?}", command))
}

/// Auswahl der Facet für den Betrieb ohne Spielclient.
///
/// Gibt `true` zurück, wenn sich die Facet geändert hat.
pub fn render_facet_picker(ui: &mut egui::Ui, facet: &mut i32) -> bool {
    let before = *facet;
    egui::ComboBox::from_id_salt("facet_picker")
        .selected_text(format!("Facet {}", facet))
        .width(80.0)
        .show_ui(ui, |ui| {
            for index in 0..uo_map_texture::FACET_DEFAULT_SIZES.len() as i32 {
                ui.selectable_value(facet, index, format!("Facet {}", index));
            }
        });
    *facet != before
}
