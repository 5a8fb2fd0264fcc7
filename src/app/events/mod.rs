//! MapIntent-, MapCommand- und MapAction-Enums für den Intent/Command-Datenfluss.

mod action;
mod command;
mod intent;

pub use action::MapAction;
pub use command::{DialogKind, MapCommand, UserMarkerDraft};
pub use intent::{MapIntent, Modifiers, PointerButton, SettingToggle};
