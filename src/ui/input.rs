//! Karten-Input-Handling: Maus-Events und Scroll → MapIntent.

use glam::Vec2;

use crate::app::{MapIntent, Modifiers, PointerButton};
use crate::core::Canvas;

fn to_vec2(pos: egui::Pos2) -> Vec2 {
    Vec2::new(pos.x, pos.y)
}

fn to_button(button: egui::PointerButton) -> Option<PointerButton> {
    match button {
        egui::PointerButton::Primary => Some(PointerButton::Primary),
        egui::PointerButton::Middle => Some(PointerButton::Middle),
        egui::PointerButton::Secondary => Some(PointerButton::Secondary),
        _ => None,
    }
}

fn to_modifiers(m: egui::Modifiers) -> Modifiers {
    Modifiers {
        alt: m.alt,
        ctrl: m.ctrl || m.mac_cmd,
        shift: m.shift,
    }
}

/// Verwaltet den Input-Zustand über der Karte.
#[derive(Default)]
pub struct InputState {
    /// Maus lag im letzten Frame über der Karte
    hovering: bool,
}

impl InputState {
    /// Erstellt einen neuen, leeren Input-Zustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sammelt Karten-Events aus egui-Input und gibt MapIntents zurück.
    ///
    /// Drücken zählt nur über der Karte, Loslassen immer, damit ein Pan
    /// auch außerhalb des Fensters endet.
    pub fn collect_map_events(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        canvas: &Canvas,
    ) -> Vec<MapIntent> {
        let mut events = vec![MapIntent::CanvasChanged {
            min: canvas.min,
            max: canvas.max,
        }];

        let hovered = response.hovered();
        ui.input(|i| {
            for event in &i.events {
                let egui::Event::PointerButton {
                    pos,
                    button,
                    pressed,
                    modifiers,
                } = event
                else {
                    continue;
                };
                let Some(button) = to_button(*button) else {
                    continue;
                };
                let pos = to_vec2(*pos);
                if *pressed {
                    if hovered {
                        events.push(MapIntent::PointerPressed {
                            button,
                            pos,
                            modifiers: to_modifiers(*modifiers),
                        });
                    }
                } else {
                    events.push(MapIntent::PointerReleased { button, pos });
                }
            }

            if hovered {
                let steps = i.raw_scroll_delta.y;
                if steps != 0.0 {
                    events.push(MapIntent::WheelScrolled {
                        steps: steps.signum() as i32,
                    });
                }
            }
        });

        if response.double_clicked() {
            events.push(MapIntent::DoubleClicked {
                button: PointerButton::Primary,
                modifiers: to_modifiers(ui.input(|i| i.modifiers)),
            });
        }

        let dragging = response.dragged();
        let pointer = if hovered || dragging {
            ui.input(|i| i.pointer.latest_pos())
        } else {
            None
        };
        match pointer {
            Some(pos) => {
                self.hovering = true;
                events.push(MapIntent::PointerMoved { pos: to_vec2(pos) });
            }
            None if self.hovering => {
                self.hovering = false;
                events.push(MapIntent::PointerLeft);
            }
            None => {}
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_key_counts_as_ctrl() {
        let m = egui::Modifiers {
            mac_cmd: true,
            ..Default::default()
        };
        assert!(to_modifiers(m).ctrl);
        assert!(!to_modifiers(egui::Modifiers::default()).alt);
    }

    #[test]
    fn extra_buttons_are_ignored() {
        assert_eq!(to_button(egui::PointerButton::Extra1), None);
        assert_eq!(
            to_button(egui::PointerButton::Middle),
            Some(PointerButton::Middle)
        );
    }
}
