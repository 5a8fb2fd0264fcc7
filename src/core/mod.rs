//! Core-Domänentypen: Marker, Zonen, Icons, Kartenansicht, Weltdaten.

pub mod bounds;
pub mod camera;
pub mod color;
pub mod goto;
pub mod icons;
pub mod marker;
pub mod world;
pub mod zone;

pub use bounds::WorldRect;
pub use camera::{Canvas, MapView, DEFAULT_ZOOM_INDEX, ZOOMS};
pub use color::Rgba;
pub use goto::parse_goto;
pub use icons::IconRegistry;
pub use marker::{Marker, MarkerFile, MarkerFileKind, DEFAULT_MARKER_ZOOM, USER_MARKER_ZOOM};
pub use world::{
    HouseInfo, MobileInfo, Notoriety, PlayerInfo, TargetingState, TrackedEntity, WorldSnapshot,
};
pub use zone::{Zone, ZoneSet, ZoneSets};
