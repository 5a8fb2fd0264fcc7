//! Marker-Manager: Benutzer-Marker suchen, bearbeiten und löschen.

use super::user_marker::draft_fields;
use crate::app::{DialogKind, MapIntent, UserMarkerDraft, WorldMapState};
use crate::core::Marker;

fn draft_of(marker: &Marker) -> UserMarkerDraft {
    UserMarkerDraft {
        name: marker.name.clone(),
        x: marker.x,
        y: marker.y,
        facet: marker.facet,
        icon: marker.icon_name.clone(),
        color: marker.color_name.clone(),
    }
}

/// Zeigt den Marker-Manager für die Benutzerdatei.
pub fn show_marker_manager(ctx: &egui::Context, state: &mut WorldMapState) -> Vec<MapIntent> {
    let WorldMapState {
        dialogs,
        marker_files,
        icons,
        ..
    } = state;
    let manager = &mut dialogs.marker_manager;
    let mut events = Vec::new();

    if !manager.visible {
        return events;
    }

    let markers: &[Marker] = marker_files
        .iter()
        .find(|f| f.editable)
        .map(|f| f.markers.as_slice())
        .unwrap_or_default();

    let mut open = true;
    egui::Window::new("Marker verwalten")
        .open(&mut open)
        .default_width(360.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Suche:");
                ui.text_edit_singleline(&mut manager.filter);
            });
            ui.separator();

            if let Some(index) = manager.editing {
                draft_fields(ui, &mut manager.draft, icons);
                ui.horizontal(|ui| {
                    if ui.button("Übernehmen").clicked() {
                        events.push(MapIntent::UserMarkerEdited {
                            index,
                            draft: manager.draft.clone(),
                        });
                    }
                    if ui.button("Abbrechen").clicked() {
                        manager.editing = None;
                    }
                });
                return;
            }

            if markers.is_empty() {
                ui.label("Keine Benutzer-Marker vorhanden");
                return;
            }

            let filter = manager.filter.trim().to_lowercase();
            egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                egui::Grid::new("marker_manager_rows")
                    .num_columns(4)
                    .striped(true)
                    .show(ui, |ui| {
                        for (index, marker) in markers.iter().enumerate() {
                            if !filter.is_empty() && !marker.name.to_lowercase().contains(&filter)
                            {
                                continue;
                            }
                            ui.label(&marker.name);
                            ui.label(format!("{}, {} ({})", marker.x, marker.y, marker.facet));
                            if ui.small_button("✏").on_hover_text("Bearbeiten").clicked() {
                                manager.editing = Some(index);
                                manager.draft = draft_of(marker);
                            }
                            if ui.small_button("🗑").on_hover_text("Löschen").clicked() {
                                events.push(MapIntent::UserMarkerRemoved { index });
                            }
                            ui.end_row();
                        }
                    });
            });
        });

    if !open {
        events.push(MapIntent::DialogClosed {
            dialog: DialogKind::MarkerManager,
        });
    }

    events
}
