//! Mapping von UI-Intents auf mutierende Map-Commands.
//!
//! Die Eingabe-Zustandsmaschine (Idle, Panning, Targeting) steckt hier:
//! der Modus ergibt sich aus `view.scrolling` und dem Target-Zustand der Welt.

use glam::{IVec2, Vec2};

use super::events::DialogKind;
use super::{MapCommand, MapIntent, PointerButton, WorldMapState};
use crate::core::{parse_goto, Canvas, TargetingState};

/// Weltposition unter einem Screen-Punkt (gerundet auf Tiles).
fn world_at(state: &WorldMapState, pos: Vec2) -> IVec2 {
    state.view.screen_to_world(pos, &state.canvas).round().as_ivec2()
}

fn starts_pan(state: &WorldMapState, button: PointerButton, alt: bool) -> bool {
    match button {
        PointerButton::Middle => true,
        PointerButton::Primary => alt || state.view.free_view,
        PointerButton::Secondary => false,
    }
}

fn positional_target_active(state: &WorldMapState) -> bool {
    state.settings.allow_positional_target && state.world.targeting == TargetingState::Position
}

/// Übersetzt einen `MapIntent` in eine Sequenz ausführbarer `MapCommand`s.
pub fn map_intent_to_commands(state: &WorldMapState, intent: MapIntent) -> Vec<MapCommand> {
    match intent {
        MapIntent::CanvasChanged { min, max } => vec![MapCommand::SetCanvas {
            canvas: Canvas::new(min, max),
        }],
        MapIntent::FrameStarted { world } => vec![
            MapCommand::UpdateWorld { world },
            MapCommand::PollTexture,
            MapCommand::FollowPlayer,
        ],

        MapIntent::PointerPressed {
            button,
            pos,
            modifiers,
        } => {
            if !state.canvas.contains(pos) {
                return vec![];
            }
            let mut commands = Vec::new();
            if starts_pan(state, button, modifiers.alt) {
                commands.push(MapCommand::BeginPan {
                    pos,
                    enable_free_view: button == PointerButton::Middle,
                });
            }
            if button == PointerButton::Primary && modifiers.ctrl && state.user_file().is_some() {
                let world = world_at(state, pos);
                commands.push(MapCommand::OpenUserMarkerDialog {
                    x: world.x,
                    y: world.y,
                    facet: state.world.facet,
                });
            }
            commands
        }
        MapIntent::PointerReleased { button, pos } => {
            let mut commands = Vec::new();
            if button == PointerButton::Primary && positional_target_active(state) {
                commands.push(MapCommand::TargetPosition {
                    world: world_at(state, pos),
                });
            }
            if button != PointerButton::Secondary && state.view.scrolling {
                commands.push(MapCommand::EndPan);
            }
            commands
        }
        MapIntent::PointerMoved { pos } => {
            let mut commands = vec![MapCommand::SetMouse { pos: Some(pos) }];
            if state.view.scrolling {
                commands.push(MapCommand::PanTo { pos });
            }
            commands
        }
        MapIntent::PointerLeft => vec![MapCommand::SetMouse { pos: None }],
        MapIntent::DoubleClicked { button, modifiers } => {
            if button != PointerButton::Primary || state.view.scrolling || modifiers.alt {
                vec![]
            } else {
                vec![MapCommand::ToggleSetting {
                    toggle: super::SettingToggle::TopMost,
                }]
            }
        }
        MapIntent::WheelScrolled { steps } => {
            if steps == 0 {
                vec![]
            } else {
                vec![MapCommand::Zoom { steps }]
            }
        }

        MapIntent::SettingToggled { toggle } => vec![
            MapCommand::ToggleSetting { toggle },
            MapCommand::SaveSettings,
        ],
        MapIntent::FontSelected { index } => {
            vec![MapCommand::SetFont { index }, MapCommand::SaveSettings]
        }

        MapIntent::GotoSubmitted { input } => match parse_goto(&input) {
            Ok(position) => vec![
                MapCommand::GotoLocation { position },
                MapCommand::CloseDialog {
                    dialog: DialogKind::Goto,
                },
            ],
            Err(e) => {
                log::debug!("Goto-Eingabe ungültig: {:#}", e);
                vec![
                    MapCommand::ClearGoto,
                    MapCommand::Notify {
                        message: format!("Ungültige Position: {}", input.trim()),
                    },
                ]
            }
        },
        MapIntent::GotoCleared => vec![MapCommand::ClearGoto],

        MapIntent::AddMarkerOnPlayerRequested { name } => vec![
            MapCommand::AddMarkerOnPlayer { name },
            MapCommand::CloseDialog {
                dialog: DialogKind::PlayerMarker,
            },
        ],
        MapIntent::UserMarkerSubmitted { draft } => vec![MapCommand::AddUserMarker { draft }],
        MapIntent::UserMarkerEdited { index, draft } => {
            vec![MapCommand::EditUserMarker { index, draft }]
        }
        MapIntent::UserMarkerRemoved { index } => vec![MapCommand::RemoveUserMarker { index }],

        MapIntent::MarkersReloadRequested => vec![MapCommand::ReloadMarkers],
        MapIntent::MarkerFileToggled { name } => vec![
            MapCommand::ToggleMarkerFile { name },
            MapCommand::SaveSettings,
        ],
        MapIntent::AllMarkerFilesToggled { hidden } => vec![
            MapCommand::SetAllMarkerFilesHidden { hidden },
            MapCommand::SaveSettings,
        ],
        MapIntent::ZonesReloadRequested => vec![MapCommand::ReloadZones],
        MapIntent::ZoneFileToggled { file_name } => vec![
            MapCommand::ToggleZoneFile { file_name },
            MapCommand::SaveSettings,
        ],

        MapIntent::ClientDirSelectionRequested => vec![MapCommand::RequestClientDirDialog],
        MapIntent::TextureRebuildRequested => vec![MapCommand::RequestTextureRebuild],
        MapIntent::ClientDirSelected { path } => vec![
            MapCommand::SetClientDir { path },
            MapCommand::ReloadMarkers,
            MapCommand::ReloadZones,
            MapCommand::RequestTextureRebuild,
            MapCommand::SaveSettings,
        ],

        MapIntent::DialogOpened { dialog } => vec![MapCommand::OpenDialog { dialog }],
        MapIntent::DialogClosed { dialog } => vec![MapCommand::CloseDialog { dialog }],

        MapIntent::SaveAndCloseRequested => {
            vec![MapCommand::SaveSettings, MapCommand::RequestClose]
        }
    }
}
