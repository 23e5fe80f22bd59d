//! Headless screenshot tool.
//!
//! Renders the demo scene into a software framebuffer and saves it as a
//! PNG, without opening a window.
//!
//! Usage:
//!   cargo run -p slice9-app --bin slice9-screenshot [output.png] [WIDTHxHEIGHT]
//!
//! The skin comes from the config named by `SLICE9_CONFIG`, or the defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use slice9_backend_soft::{MAX_SURFACE_SIZE, SoftBackend};
use slice9_core::{AppConfig, PanelScene};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let output = args.next().unwrap_or_else(|| "slice9.png".to_string());
    let size = args.next().map(|s| parse_size(&s)).transpose()?;

    let config = AppConfig::resolve(None)?;
    let (w, h) = size.unwrap_or((config.window.width, config.window.height));

    let mut backend = SoftBackend::new(w, h)?;
    let mut scene = PanelScene::from_config(&config, &mut backend)?;
    scene.resize(w, h);
    scene.render(&mut backend)?;

    let (w, h) = backend.dimensions();
    save_png(Path::new(&output), w, h, backend.buffer())?;
    log::info!("Saved {w}x{h} screenshot to {output}");
    Ok(())
}

/// Parse `WIDTHxHEIGHT`, each side in `1..=MAX_SURFACE_SIZE`.
fn parse_size(s: &str) -> Result<(u32, u32)> {
    let (w, h) = s
        .split_once('x')
        .with_context(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let w: u32 = w.parse().with_context(|| format!("bad width in {s:?}"))?;
    let h: u32 = h.parse().with_context(|| format!("bad height in {s:?}"))?;
    if w == 0 || h == 0 {
        bail!("screenshot size must be non-zero, got {s:?}");
    }
    if w > MAX_SURFACE_SIZE || h > MAX_SURFACE_SIZE {
        bail!("screenshot size {s:?} exceeds {MAX_SURFACE_SIZE}x{MAX_SURFACE_SIZE}");
    }
    Ok((w, h))
}

fn save_png(path: &Path, width: u32, height: u32, rgba: &[u8]) -> Result<()> {
    let file = fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgba)?;
    Ok(())
}
