//! Einzeilige Eingabedialoge: Goto und "Marker auf Spieler".

use crate::app::state::TextEntryDialogState;
use crate::app::{DialogKind, MapIntent};

/// Ergebnis eines Eingabedialogs.
enum Outcome {
    Open,
    Confirmed(String),
    Cancelled,
}

fn show_text_entry(
    ctx: &egui::Context,
    title: &str,
    hint: &str,
    dialog: &mut TextEntryDialogState,
) -> Outcome {
    let mut outcome = Outcome::Open;

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_min_width(240.0);
            let response = ui.add(egui::TextEdit::singleline(&mut dialog.input).hint_text(hint));
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let valid = !dialog.input.trim().is_empty();
                ui.add_enabled_ui(valid, |ui| {
                    if ui.button("OK").clicked() || (submitted && valid) {
                        outcome = Outcome::Confirmed(dialog.input.trim().to_string());
                    }
                });
                if ui.button("Abbrechen").clicked() {
                    outcome = Outcome::Cancelled;
                }
            });
        });

    outcome
}

/// Goto-Dialog: `x y` oder Sextant-Koordinaten.
pub fn show_goto_dialog(ctx: &egui::Context, dialog: &mut TextEntryDialogState) -> Vec<MapIntent> {
    if !dialog.visible {
        return Vec::new();
    }
    match show_text_entry(ctx, "Gehe zu", "1323 1624 oder 25°6'N,43°21'E", dialog) {
        Outcome::Open => Vec::new(),
        Outcome::Confirmed(input) => vec![MapIntent::GotoSubmitted { input }],
        Outcome::Cancelled => vec![MapIntent::DialogClosed {
            dialog: DialogKind::Goto,
        }],
    }
}

/// Namenseingabe für einen Marker an der Spielerposition.
pub fn show_player_marker_dialog(
    ctx: &egui::Context,
    dialog: &mut TextEntryDialogState,
) -> Vec<MapIntent> {
    if !dialog.visible {
        return Vec::new();
    }
    match show_text_entry(ctx, "Marker auf Spieler", "Name", dialog) {
        Outcome::Open => Vec::new(),
        Outcome::Confirmed(name) => vec![MapIntent::AddMarkerOnPlayerRequested { name }],
        Outcome::Cancelled => vec![MapIntent::DialogClosed {
            dialog: DialogKind::PlayerMarker,
        }],
    }
}
