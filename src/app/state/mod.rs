//! Application State: zentrale Datenhaltung der Weltkarte.

mod dialogs;
mod map_state;
mod texture;

pub use dialogs::{DialogState, MarkerManagerState, TextEntryDialogState, UserMarkerDialogState};
pub use map_state::WorldMapState;
pub use texture::TextureState;
