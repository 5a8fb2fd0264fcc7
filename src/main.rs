//! UO WorldMap Viewer.
//!
//! Weltkarte für Ultima Online: Facet-Textur aus den Client-Dateien,
//! Marker, Zonen und Overlays auf einer egui-Zeichenfläche.
//!
//! Ohne Spielclient läuft der Viewer mit einer Offline-Welt; die Facet
//! wird über die Statuszeile gewählt.

use std::path::PathBuf;

use eframe::egui;
use uo_map_texture::TextureRebuilder;
use uo_world_map::app::use_cases;
use uo_world_map::shared::options::WINDOW_MIN_SIZE;
use uo_world_map::{
    render, ui, AppController, Canvas, DataPaths, MapAction, MapIntent, TextureState,
    WorldMapSettings, WorldMapState, WorldSnapshot,
};

fn main() -> Result<(), eframe::Error> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> Result<(), eframe::Error> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!(
            "UO WorldMap Viewer v{} startet...",
            env!("CARGO_PKG_VERSION")
        );

        let config_path = WorldMapSettings::config_path();
        let mut settings = WorldMapSettings::load_from_file(&config_path);
        if let Some(client_dir) = std::env::args_os().nth(1).map(PathBuf::from) {
            log::info!("Client-Verzeichnis von der Kommandozeile: {}", client_dir.display());
            settings.paths = DataPaths::from_client_dir(client_dir);
        }

        let size = [
            settings.width.max(WINDOW_MIN_SIZE),
            settings.height.max(WINDOW_MIN_SIZE),
        ];
        let mut viewport = egui::ViewportBuilder::default()
            .with_inner_size(size)
            .with_min_inner_size([WINDOW_MIN_SIZE, WINDOW_MIN_SIZE])
            .with_title("Weltkarte");
        if settings.top_most {
            viewport = viewport.with_always_on_top();
        }

        let options = eframe::NativeOptions {
            viewport,
            renderer: eframe::Renderer::Glow,
            ..Default::default()
        };

        eframe::run_native(
            "UO WorldMap Viewer",
            options,
            Box::new(move |_cc| Ok(Box::new(WorldMapApp::new(settings, config_path)))),
        )
    }
}

/// Haupt-Anwendungsstruktur
struct WorldMapApp {
    state: WorldMapState,
    controller: AppController,
    painter: render::MapPainter,
    input: ui::InputState,
    /// Facet der Offline-Welt
    facet: i32,
    /// Zuletzt an das Fenster gemeldeter Top-Most-Zustand
    top_most: bool,
}

impl WorldMapApp {
    fn new(settings: WorldMapSettings, config_path: PathBuf) -> Self {
        let facet = i32::from(settings.facet);
        let top_most = settings.top_most;
        let mut state = WorldMapState::new(settings).with_settings_path(config_path);

        match TextureRebuilder::spawn() {
            Ok(rebuilder) => state.texture = TextureState::with_rebuilder(rebuilder),
            Err(e) => log::warn!("Rebuild-Worker nicht gestartet: {:#}", e),
        }

        use_cases::session::load_assets(&mut state);
        if let Err(e) = use_cases::texture::request_rebuild(&mut state) {
            log::error!("Facet-Textur konnte nicht angefordert werden: {:#}", e);
        }

        Self {
            state,
            controller: AppController::new(),
            painter: render::MapPainter::new(),
            input: ui::InputState::new(),
            facet,
            top_most,
        }
    }
}

impl eframe::App for WorldMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.should_close {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let mut events = vec![MapIntent::FrameStarted {
            world: WorldSnapshot::offline(self.facet),
        }];
        events.extend(self.collect_ui_events(ctx));
        self.process_events(events);

        self.drain_outbox();
        self.sync_window(ctx);

        if self.state.texture.pending_facet.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(rebuilder) = self.state.texture.rebuilder.as_mut() {
            rebuilder.shutdown();
        }
        log::info!("UO WorldMap Viewer beendet");
    }
}

impl WorldMapApp {
    fn collect_ui_events(&mut self, ctx: &egui::Context) -> Vec<MapIntent> {
        let mut events = Vec::new();

        events.extend(ui::show_goto_dialog(ctx, &mut self.state.dialogs.goto));
        events.extend(ui::show_player_marker_dialog(
            ctx,
            &mut self.state.dialogs.player_marker,
        ));
        events.extend(ui::show_user_marker_dialog(ctx, &mut self.state));
        events.extend(ui::show_marker_manager(ctx, &mut self.state));
        events.extend(ui::handle_client_dir_dialog(&mut self.state.dialogs));

        egui::TopBottomPanel::bottom("status_line").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui::render_facet_picker(ui, &mut self.facet);
                ui.separator();
                ui::render_status_line(ui, &self.state);
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
                let canvas = Canvas::from_window(
                    glam::Vec2::new(rect.min.x, rect.min.y),
                    glam::Vec2::new(rect.width(), rect.height()),
                );

                events.extend(self.input.collect_map_events(ui, &response, &canvas));

                response.context_menu(|ui| {
                    ui::render_map_menu(ui, &self.state, &mut events);
                });

                let scene = self.controller.build_render_scene(&self.state);
                self.painter
                    .paint(ctx, ui.painter(), &scene, &self.state.icons);
            });

        events
    }

    fn process_events(&mut self, events: Vec<MapIntent>) {
        for event in events {
            if let Err(e) = self.controller.handle_intent(&mut self.state, event) {
                log::error!("Event handling failed: {:#}", e);
            }
        }
    }

    /// Ohne Spielclient werden Aktionen nur protokolliert.
    fn drain_outbox(&mut self) {
        for action in self.state.take_actions() {
            match action {
                MapAction::Notice(message) => log::info!("Hinweis: {}", message),
                MapAction::TargetPosition { x, y, z } => {
                    log::info!("Target an {}, {}, {} (kein Client verbunden)", x, y, z)
                }
                MapAction::OpenUserMarkerDialog { x, y, facet } => {
                    log::debug!("Marker-Dialog an {}, {} (Facet {})", x, y, facet)
                }
            }
        }
    }

    fn sync_window(&mut self, ctx: &egui::Context) {
        if self.state.settings.top_most != self.top_most {
            self.top_most = self.state.settings.top_most;
            let level = if self.top_most {
                egui::WindowLevel::AlwaysOnTop
            } else {
                egui::WindowLevel::Normal
            };
            ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(level));
        }

        let size = ctx.input(|i| i.viewport().inner_rect.map(|r| r.size()));
        if let Some(size) = size {
            self.state.settings.width = size.x.max(WINDOW_MIN_SIZE);
            self.state.settings.height = size.y.max(WINDOW_MIN_SIZE);
        }
    }
}
