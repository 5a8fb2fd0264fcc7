//! UO WorldMap Viewer Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod formats;
pub mod render;
pub mod shared;
pub mod ui;

pub use app::{
    AppController, DialogKind, MapAction, MapCommand, MapIntent, TextureState, UserMarkerDraft,
    WorldMapState,
};
pub use core::{
    Canvas, IconRegistry, MapView, Marker, MarkerFile, MarkerFileKind, WorldRect, WorldSnapshot,
    Zone, ZoneSet, ZoneSets,
};
pub use formats::{load_marker_files, load_zone_sets};
pub use shared::{DataPaths, RenderScene, WorldMapSettings};
