use std::path::PathBuf;

use glam::Vec2;

use super::{DialogState, TextureState};
use crate::app::{CommandLog, MapAction};
use crate::core::{Canvas, IconRegistry, Marker, MapView, MarkerFile, WorldSnapshot, ZoneSets};
use crate::shared::WorldMapSettings;

/// Hauptzustand der Weltkarte.
///
/// Besitzt alle geladenen Assets; es gibt keine prozessweiten Caches.
pub struct WorldMapState {
    /// Persistierte Einstellungen
    pub settings: WorldMapSettings,
    /// Speicherort der Einstellungen (None = nicht persistieren)
    pub settings_path: Option<PathBuf>,
    /// Ansicht: Mittelpunkt, Zoom, Drehung, Pan
    pub view: MapView,
    /// Aktuelle Zeichenfläche
    pub canvas: Canvas,
    /// Letzte Welt-Momentaufnahme
    pub world: WorldSnapshot,
    /// Marker-Dateien, Benutzerdatei an erster Stelle
    pub marker_files: Vec<MarkerFile>,
    /// Zonen-Dateien
    pub zones: ZoneSets,
    /// Marker-Icons
    pub icons: IconRegistry,
    /// Facet-Textur und Worker
    pub texture: TextureState,
    /// Ziel des letzten Goto
    pub goto_marker: Option<Marker>,
    /// Mausposition über der Karte
    pub mouse: Option<Vec2>,
    /// Dialoge
    pub dialogs: DialogState,
    /// Postausgang für externe Aktionen
    pub outbox: Vec<MapAction>,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Letzte Statusmeldung für die UI
    pub status_message: Option<String>,
    /// Signalisiert dem Host, den Viewer zu schließen
    pub should_close: bool,
}

impl WorldMapState {
    /// Erstellt einen State ohne geladene Assets.
    pub fn new(settings: WorldMapSettings) -> Self {
        let mut view = MapView::new();
        view.set_zoom_index(settings.zoom_index);
        view.flip = settings.flip_map;
        view.free_view = settings.free_view;

        let world = WorldSnapshot::offline(i32::from(settings.facet));
        view.center = world.facet_size.as_vec2() * 0.5;

        Self {
            settings,
            settings_path: None,
            view,
            canvas: Canvas::from_window(Vec2::ZERO, Vec2::new(400.0, 400.0)),
            world,
            marker_files: Vec::new(),
            zones: ZoneSets::new(),
            icons: IconRegistry::new(),
            texture: TextureState::default(),
            goto_marker: None,
            mouse: None,
            dialogs: DialogState::default(),
            outbox: Vec::new(),
            command_log: CommandLog::new(),
            status_message: None,
            should_close: false,
        }
    }

    /// Setzt den Speicherort der Einstellungen.
    pub fn with_settings_path(mut self, path: PathBuf) -> Self {
        self.settings_path = Some(path);
        self
    }

    /// Die editierbare Benutzerdatei, falls geladen.
    pub fn user_file(&self) -> Option<&MarkerFile> {
        self.marker_files.iter().find(|f| f.editable)
    }

    /// Mutable Zugriff auf die Benutzerdatei.
    pub fn user_file_mut(&mut self) -> Option<&mut MarkerFile> {
        self.marker_files.iter_mut().find(|f| f.editable)
    }

    /// Anzahl aller geladenen Marker.
    pub fn marker_count(&self) -> usize {
        self.marker_files.iter().map(|f| f.markers.len()).sum()
    }

    /// Übernimmt Ansichtswerte in die Einstellungen (vor dem Speichern).
    pub fn sync_view_into_settings(&mut self) {
        self.settings.zoom_index = self.view.zoom_index;
        self.settings.flip_map = self.view.flip;
        self.settings.free_view = self.view.free_view;
        if let Ok(facet) = u8::try_from(self.world.facet) {
            self.settings.facet = facet;
        }
    }

    /// Leert den Postausgang.
    pub fn take_actions(&mut self) -> Vec<MapAction> {
        std::mem::take(&mut self.outbox)
    }
}
