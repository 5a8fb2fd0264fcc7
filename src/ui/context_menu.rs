//! Kontextmenü der Karte: Schalter, Marker, Zonen, Schrift, Sitzung.

use crate::app::{DialogKind, MapIntent, SettingToggle, WorldMapState};
use crate::shared::options::{FONT_INDEX_MAX, FONT_INDEX_MIN};
use crate::shared::WorldMapSettings;

/// Button, der bei Klick einen Intent auslöst und das Menü schließt.
fn button_intent(ui: &mut egui::Ui, label: &str, intent: MapIntent, events: &mut Vec<MapIntent>) {
    if ui.button(label).clicked() {
        events.push(intent);
        ui.close();
    }
}

/// Checkbox für einen Einstellungs-Schalter.
fn toggle(
    ui: &mut egui::Ui,
    label: &str,
    value: bool,
    toggle: SettingToggle,
    events: &mut Vec<MapIntent>,
) {
    let mut checked = value;
    if ui.checkbox(&mut checked, label).clicked() {
        events.push(MapIntent::SettingToggled { toggle });
    }
}

/// Rendert das komplette Kontextmenü.
pub fn render_map_menu(ui: &mut egui::Ui, state: &WorldMapState, events: &mut Vec<MapIntent>) {
    let s = &state.settings;

    button_intent(
        ui,
        "🧭 Gehe zu...",
        MapIntent::DialogOpened {
            dialog: DialogKind::Goto,
        },
        events,
    );
    if state.goto_marker.is_some() {
        button_intent(ui, "✕ Goto-Marker entfernen", MapIntent::GotoCleared, events);
    }

    ui.separator();
    ui.menu_button("🔍 Ansicht", |ui| render_view_menu(ui, s, events));
    ui.menu_button("👥 Anzeige", |ui| render_display_menu(ui, s, events));
    ui.menu_button("📍 Marker", |ui| render_marker_menu(ui, state, events));
    ui.menu_button("🗺 Zonen", |ui| render_zone_menu(ui, state, events));
    ui.menu_button("🔤 Schrift", |ui| {
        for index in FONT_INDEX_MIN..=FONT_INDEX_MAX {
            let selected = s.font_index == index;
            if ui
                .selectable_label(selected, format!("Stil {index}"))
                .clicked()
            {
                events.push(MapIntent::FontSelected { index });
                ui.close();
            }
        }
    });

    ui.separator();
    button_intent(
        ui,
        "📂 Client-Verzeichnis...",
        MapIntent::ClientDirSelectionRequested,
        events,
    );
    button_intent(
        ui,
        "🔄 Karte neu aufbauen",
        MapIntent::TextureRebuildRequested,
        events,
    );

    ui.separator();
    button_intent(
        ui,
        "💾 Speichern & Schließen",
        MapIntent::SaveAndCloseRequested,
        events,
    );
}

fn render_view_menu(ui: &mut egui::Ui, s: &WorldMapSettings, events: &mut Vec<MapIntent>) {
    toggle(ui, "Karte drehen (45°)", s.flip_map, SettingToggle::Flip, events);
    toggle(ui, "Freie Ansicht", s.free_view, SettingToggle::FreeView, events);
    toggle(ui, "Immer im Vordergrund", s.top_most, SettingToggle::TopMost, events);
    toggle(
        ui,
        "Gitter ab Zoom 4",
        s.show_grid_if_zoomed,
        SettingToggle::ShowGridIfZoomed,
        events,
    );
    toggle(
        ui,
        "Koordinaten",
        s.show_coordinates,
        SettingToggle::ShowCoordinates,
        events,
    );
    toggle(
        ui,
        "Mauskoordinaten",
        s.show_mouse_coordinates,
        SettingToggle::ShowMouseCoordinates,
        events,
    );
    toggle(
        ui,
        "Positions-Target per Klick",
        s.allow_positional_target,
        SettingToggle::AllowPositionalTarget,
        events,
    );
}

fn render_display_menu(ui: &mut egui::Ui, s: &WorldMapSettings, events: &mut Vec<MapIntent>) {
    toggle(ui, "Mobiles", s.show_mobiles, SettingToggle::ShowMobiles, events);
    toggle(ui, "Häuser", s.show_multis, SettingToggle::ShowMultis, events);
    toggle(
        ui,
        "Party-Mitglieder",
        s.show_party_members,
        SettingToggle::ShowPartyMembers,
        events,
    );
    ui.separator();
    toggle(
        ui,
        "Spielername",
        s.show_player_name,
        SettingToggle::ShowPlayerName,
        events,
    );
    toggle(
        ui,
        "Spieler-Lebensbalken",
        s.show_player_bar,
        SettingToggle::ShowPlayerBar,
        events,
    );
    toggle(
        ui,
        "Gruppen-Namen",
        s.show_group_name,
        SettingToggle::ShowGroupName,
        events,
    );
    toggle(
        ui,
        "Gruppen-Lebensbalken",
        s.show_group_bar,
        SettingToggle::ShowGroupBar,
        events,
    );
}

fn render_marker_menu(ui: &mut egui::Ui, state: &WorldMapState, events: &mut Vec<MapIntent>) {
    let s = &state.settings;
    toggle(ui, "Marker anzeigen", s.show_markers, SettingToggle::ShowMarkers, events);
    toggle(
        ui,
        "Markernamen",
        s.show_marker_names,
        SettingToggle::ShowMarkerNames,
        events,
    );
    toggle(
        ui,
        "Marker-Icons",
        s.show_marker_icons,
        SettingToggle::ShowMarkerIcons,
        events,
    );

    ui.separator();
    button_intent(
        ui,
        "📍 Marker auf Spieler...",
        MapIntent::DialogOpened {
            dialog: DialogKind::PlayerMarker,
        },
        events,
    );
    if state.user_file().is_some() {
        button_intent(
            ui,
            "➕ Neuer Marker...",
            MapIntent::DialogOpened {
                dialog: DialogKind::UserMarker,
            },
            events,
        );
        button_intent(
            ui,
            "📝 Marker verwalten...",
            MapIntent::DialogOpened {
                dialog: DialogKind::MarkerManager,
            },
            events,
        );
    }

    ui.separator();
    button_intent(ui, "🔄 Marker neu laden", MapIntent::MarkersReloadRequested, events);
    ui.horizontal(|ui| {
        button_intent(
            ui,
            "Alle zeigen",
            MapIntent::AllMarkerFilesToggled { hidden: false },
            events,
        );
        button_intent(
            ui,
            "Alle verbergen",
            MapIntent::AllMarkerFilesToggled { hidden: true },
            events,
        );
    });

    if !state.marker_files.is_empty() {
        ui.separator();
        egui::ScrollArea::vertical()
            .max_height(240.0)
            .show(ui, |ui| {
                for file in &state.marker_files {
                    let mut visible = !file.hidden;
                    let label = format!("{} ({})", file.name, file.markers.len());
                    if ui.checkbox(&mut visible, label).clicked() {
                        events.push(MapIntent::MarkerFileToggled {
                            name: file.name.clone(),
                        });
                    }
                }
            });
    }
}

fn render_zone_menu(ui: &mut egui::Ui, state: &WorldMapState, events: &mut Vec<MapIntent>) {
    button_intent(ui, "🔄 Zonen neu laden", MapIntent::ZonesReloadRequested, events);
    if state.zones.is_empty() {
        ui.label("Keine Zonen-Dateien geladen");
        return;
    }
    ui.separator();
    for set in state.zones.sets() {
        let mut visible = !set.hidden;
        let label = format!("{} (Facet {})", set.name, set.facet);
        if ui.checkbox(&mut visible, label).clicked() {
            events.push(MapIntent::ZoneFileToggled {
                file_name: set.file_name.clone(),
            });
        }
    }
}
