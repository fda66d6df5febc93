use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use configurator::ViewerConfig;

mod demo;
mod engine;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let mut config_path = None;
    let mut model_paths = Vec::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config_path = Some(PathBuf::from(args.next().context("--config needs a path")?))
            }
            _ => model_paths.push(PathBuf::from(arg)),
        }
    }

    let config = match config_path {
        Some(path) => ViewerConfig::load(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ViewerConfig::default(),
    };

    let models = match <[PathBuf; 2]>::try_from(model_paths) {
        Ok([primary, side]) => Some((primary, side)),
        Err(paths) if paths.is_empty() => None,
        Err(_) => bail!("usage: configurator [--config config.json] [primary.glb side.glb]"),
    };

    let state = demo::DemoState::new(config, models).context("Failed to create demo state")?;
    engine::run(state);

    Ok(())
}
