//! slice9 desktop demo.
//!
//! Opens a resizable window and shows one skin twice: stretched on the left
//! half and tiled on the right half. Any key or closing the window exits.
//!
//! Usage:
//!   cargo run -p slice9-app [config.toml]
//!   SLICE9_CONFIG=skin.toml cargo run -p slice9-app

mod input;

use std::time::Duration;

use anyhow::Result;

use slice9_backend_sdl::SdlBackend;
use slice9_core::backend::{InputBackend, SdiBackend};
use slice9_core::{AppConfig, PanelScene};

use crate::input::InputResult;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::resolve(std::env::args().nth(1))?;
    let window = &config.window;

    let mut backend = SdlBackend::new(&window.title, window.width, window.height)?;
    backend.init(window.width, window.height)?;

    let mut scene = PanelScene::from_config(&config, &mut backend)?;
    let frame_delay = Duration::from_millis(window.frame_delay_ms);

    log::info!("Entering main loop");
    let result = run(&mut backend, &mut scene, frame_delay);
    if let Err(e) = &result {
        log::error!("Render failed: {e:#}");
    }

    backend.shutdown()?;
    log::info!("slice9 shut down");
    result
}

fn run(backend: &mut SdlBackend, scene: &mut PanelScene, frame_delay: Duration) -> Result<()> {
    'running: loop {
        for event in backend.poll_events() {
            if input::handle_event(&event, scene) == InputResult::Quit {
                break 'running;
            }
        }

        scene.render(backend)?;
        std::thread::sleep(frame_delay);
    }
    Ok(())
}
