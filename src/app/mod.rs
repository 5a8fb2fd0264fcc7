//! Application-Layer: Controller, State, Events und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
mod intent_mapping;
pub mod render_scene;
/// Application State der Weltkarte
///
/// Verwaltet geladene Assets, Ansicht, Dialoge und den Postausgang.
pub mod state;
pub mod use_cases;

pub use command_log::CommandLog;
pub use controller::AppController;
pub use events::{
    DialogKind, MapAction, MapCommand, MapIntent, Modifiers, PointerButton, SettingToggle,
    UserMarkerDraft,
};
pub use render_scene::build as build_render_scene;
pub use state::{DialogState, TextureState, WorldMapState};
