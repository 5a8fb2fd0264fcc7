//! Dialoge der Weltkarte und der Ordner-Dialog für das Client-Verzeichnis.

mod client_dir;
mod marker_manager;
mod text_entry;
mod user_marker;

pub use client_dir::handle_client_dir_dialog;
pub use marker_manager::show_marker_manager;
pub use text_entry::{show_goto_dialog, show_player_marker_dialog};
pub use user_marker::show_user_marker_dialog;
