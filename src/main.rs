//! Pixel Diorama viewer binary

use std::path::Path;

use macroquad::logging::{error, info, warn};
use macroquad::prelude::*;

use pixel_diorama::capture::{capture_path, save_png};
use pixel_diorama::compositor::{Compositor, MacroquadBackend};
use pixel_diorama::config::ViewerConfig;
use pixel_diorama::input::InputMapper;
use pixel_diorama::rasterizer::{HEIGHT, WIDTH};
use pixel_diorama::scene::Scene;
use pixel_diorama::viewer::Viewer;
use pixel_diorama::VERSION;

const CONFIG_PATH: &str = "assets/viewer.ron";
const CAPTURE_DIR: &str = "captures";

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Pixel Diorama v{}", VERSION),
        window_width: WIDTH as i32 * 3,
        window_height: HEIGHT as i32 * 3,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn load_config() -> ViewerConfig {
    if !Path::new(CONFIG_PATH).exists() {
        warn!("{} not found, using built-in defaults", CONFIG_PATH);
        return ViewerConfig::default();
    }
    match ViewerConfig::load(CONFIG_PATH) {
        Ok(config) => {
            info!("Loaded config from {}", CONFIG_PATH);
            config
        }
        Err(e) => {
            warn!("Failed to load {}: {}, using built-in defaults", CONFIG_PATH, e);
            ViewerConfig::default()
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = load_config();

    let scene = match Scene::diorama(config.light(), config.clear_color()) {
        Ok(scene) => scene,
        Err(e) => {
            error!("Bad ramp in demo materials: {}", e);
            std::process::exit(1);
        }
    };

    let mut backend = MacroquadBackend::new(config.raster_settings());
    let mut compositor = match Compositor::new(&mut backend, config.surface_width, config.surface_height) {
        Ok(compositor) => compositor,
        Err(e) => {
            error!("Cannot start compositor: {}", e);
            std::process::exit(1);
        }
    };

    let mut viewer = Viewer::new(&config);
    let mut mapper = InputMapper::new(config.rotation_threshold_px);
    let mut show_hud = true;

    info!(
        "=== Pixel Diorama v{} === surface {}x{}, {} faces",
        VERSION,
        config.surface_width,
        config.surface_height,
        scene.faces.len()
    );

    loop {
        let commands = mapper.poll(viewer.intents());
        if commands.quit {
            break;
        }
        if commands.toggle_hud {
            show_hud = !show_hud;
        }

        let report = viewer.tick(&scene, &mut compositor, &mut backend);

        if commands.capture {
            let path = capture_path(CAPTURE_DIR, report.tick);
            match save_png(&compositor.surface().framebuffer, &path) {
                Ok(()) => info!("Saved capture {}", path.display()),
                Err(e) => warn!("Capture failed: {}", e),
            }
        }

        if show_hud {
            draw_text(&report.status_line(), 8.0, 20.0, 20.0, Color::from_rgba(230, 230, 230, 255));
            draw_text(
                "WASD/arrows pan  Q/E height  drag rotate  wheel zoom  F12 capture  H hud",
                8.0,
                screen_height() - 10.0,
                16.0,
                Color::from_rgba(150, 150, 160, 255),
            );
        }

        next_frame().await
    }
}
