//! UI-Komponenten: Eingabe, Kontextmenü, Dialoge, Statuszeile.

mod context_menu;
pub mod dialogs;
pub mod input;
pub mod status;

pub use context_menu::render_map_menu;
pub use dialogs::{
    handle_client_dir_dialog, show_goto_dialog, show_marker_manager, show_player_marker_dialog,
    show_user_marker_dialog,
};
pub use input::InputState;
pub use status::{render_facet_picker, render_status_line};
