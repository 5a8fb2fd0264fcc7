//! Dialog "Neuer Benutzer-Marker" und gemeinsame Eingabefelder.

use crate::app::{DialogKind, MapIntent, UserMarkerDraft, WorldMapState};
use crate::core::color::color_names;
use crate::core::IconRegistry;
use crate::formats::csv::{USER_COLOR_MAX_LEN, USER_NAME_MAX_LEN};

/// Eingabefelder für Name, Position, Facet, Icon und Farbe.
pub(super) fn draft_fields(ui: &mut egui::Ui, draft: &mut UserMarkerDraft, icons: &IconRegistry) {
    egui::Grid::new("user_marker_fields")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("Name:");
            ui.add(egui::TextEdit::singleline(&mut draft.name).char_limit(USER_NAME_MAX_LEN));
            ui.end_row();

            ui.label("X:");
            ui.add(egui::DragValue::new(&mut draft.x).range(0..=i32::from(u16::MAX)));
            ui.end_row();

            ui.label("Y:");
            ui.add(egui::DragValue::new(&mut draft.y).range(0..=i32::from(u16::MAX)));
            ui.end_row();

            ui.label("Facet:");
            ui.add(egui::DragValue::new(&mut draft.facet).range(0..=5));
            ui.end_row();

            ui.label("Icon:");
            egui::ComboBox::from_id_salt("user_marker_icon")
                .selected_text(if draft.icon.is_empty() {
                    "(keins)"
                } else {
                    draft.icon.as_str()
                })
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut draft.icon, String::new(), "(keins)");
                    for (key, _) in icons.iter() {
                        ui.selectable_value(&mut draft.icon, key.to_string(), key);
                    }
                });
            ui.end_row();

            ui.label("Farbe:");
            egui::ComboBox::from_id_salt("user_marker_color")
                .selected_text(draft.color.as_str())
                .show_ui(ui, |ui| {
                    for name in color_names().filter(|n| n.len() <= USER_COLOR_MAX_LEN) {
                        ui.selectable_value(&mut draft.color, name.to_string(), name);
                    }
                });
            ui.end_row();
        });
}

/// Zeigt den Dialog für einen neuen Benutzer-Marker.
pub fn show_user_marker_dialog(ctx: &egui::Context, state: &mut WorldMapState) -> Vec<MapIntent> {
    let WorldMapState { dialogs, icons, .. } = state;
    let dialog = &mut dialogs.user_marker;
    let mut events = Vec::new();

    if !dialog.visible {
        return events;
    }

    let mut confirmed = false;
    let mut cancelled = false;

    egui::Window::new("Neuer Marker")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_min_width(280.0);
            draft_fields(ui, &mut dialog.draft, icons);

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                let valid = !dialog.draft.name.trim().is_empty();
                ui.add_enabled_ui(valid, |ui| {
                    if ui.button("Speichern").clicked() {
                        confirmed = true;
                    }
                });
                if ui.button("Abbrechen").clicked() {
                    cancelled = true;
                }
            });
        });

    if confirmed {
        events.push(MapIntent::UserMarkerSubmitted {
            draft: dialog.draft.clone(),
        });
    } else if cancelled {
        events.push(MapIntent::DialogClosed {
            dialog: DialogKind::UserMarker,
        });
    }

    events
}
