//! Application Controller für zentrale Event-Verarbeitung.

use super::render_scene;
use super::{MapCommand, MapIntent, WorldMapState};
use crate::shared::RenderScene;

/// Orchestriert UI-Events und Use-Cases auf den WorldMapState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(
        &mut self,
        state: &mut WorldMapState,
        intent: MapIntent,
    ) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &WorldMapState, intent: MapIntent) -> Vec<MapCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem WorldMapState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut WorldMapState,
        command: MapCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Ansicht ===
            MapCommand::SetCanvas { canvas } => handlers::view::set_canvas(state, canvas),
            MapCommand::UpdateWorld { world } => handlers::view::update_world(state, world),
            MapCommand::FollowPlayer => handlers::view::follow_player(state),
            MapCommand::PollTexture => handlers::texture::poll(state)?,
            MapCommand::BeginPan {
                pos,
                enable_free_view,
            } => handlers::view::begin_pan(state, pos, enable_free_view),
            MapCommand::PanTo { pos } => handlers::view::pan_to(state, pos),
            MapCommand::EndPan => handlers::view::end_pan(state),
            MapCommand::SetMouse { pos } => handlers::view::set_mouse(state, pos),
            MapCommand::Zoom { steps } => handlers::view::zoom(state, steps),
            MapCommand::ToggleSetting { toggle } => handlers::view::toggle_setting(state, toggle),
            MapCommand::SetFont { index } => handlers::view::set_font(state, index),

            // === Ausgehende Aktionen ===
            MapCommand::TargetPosition { world } => handlers::dialog::target_position(state, world),
            MapCommand::OpenUserMarkerDialog { x, y, facet } => {
                handlers::dialog::open_user_marker_dialog(state, x, y, facet)
            }
            MapCommand::Notify { message } => handlers::dialog::notify(state, message),

            // === Goto ===
            MapCommand::GotoLocation { position } => handlers::view::goto_location(state, position),
            MapCommand::ClearGoto => handlers::view::clear_goto(state),

            // === Marker ===
            MapCommand::AddMarkerOnPlayer { name } => {
                handlers::overlay::add_marker_on_player(state, &name)?
            }
            MapCommand::AddUserMarker { draft } => {
                handlers::overlay::add_user_marker(state, &draft)?
            }
            MapCommand::EditUserMarker { index, draft } => {
                handlers::overlay::edit_user_marker(state, index, &draft)?
            }
            MapCommand::RemoveUserMarker { index } => {
                handlers::overlay::remove_user_marker(state, index)?
            }
            MapCommand::ReloadMarkers => handlers::overlay::reload_markers(state),
            MapCommand::ToggleMarkerFile { name } => {
                handlers::overlay::toggle_marker_file(state, &name)
            }

            MapCommand::SetAllMarkerFilesHidden { hidden } => {
                handlers::overlay::set_all_marker_files_hidden(state, hidden)
            }

            // === Zonen ===
            MapCommand::ReloadZones => handlers::overlay::reload_zones(state),
            MapCommand::ToggleZoneFile { file_name } => {
                handlers::overlay::toggle_zone_file(state, &file_name)
            }

            // === Textur & Pfade ===
            MapCommand::SetClientDir { path } => handlers::dialog::set_client_dir(state, path),
            MapCommand::RequestClientDirDialog => {
                handlers::dialog::request_client_dir_dialog(state)
            }
            MapCommand::RequestTextureRebuild => handlers::texture::request_rebuild(state)?,

            // === Dialoge & Sitzung ===
            MapCommand::OpenDialog { dialog } => handlers::dialog::open_dialog(state, dialog),
            MapCommand::CloseDialog { dialog } => handlers::dialog::close_dialog(state, dialog),
            MapCommand::SaveSettings => handlers::dialog::save_settings(state)?,
            MapCommand::RequestClose => handlers::dialog::request_close(state),
        }

        Ok(())
    }

    /// Baut die RenderScene aus dem aktuellen State.
    pub fn build_render_scene(&self, state: &WorldMapState) -> RenderScene {
        render_scene::build(state)
    }
}
