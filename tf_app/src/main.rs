//! Headless transfer function editor
//!
//! Replays editor interactions given on the command line, renders the volume
//! through the edited transfer function and saves the frame, for example:
//! `cargo run --release --bin tf_app -- --drag 2=0.8 --recolor 0=#ffffff`

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::ArgMatches;
use log::info;

mod app;
mod args;
mod config;
mod output;

use app::AppState;
use config::{AppConfig, VolumeFormat};

const DEFAULT_CONFIG: &str = "config/default.toml";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = args::get_command().get_matches();

    let mut cfg = load_config(&matches)?;
    apply_overrides(&mut cfg, &matches)?;

    let mut state = AppState::from_config(&cfg)?;
    let steps = args::script_steps(&matches)?;
    state.run_script(&steps)?;

    let frames: usize = matches
        .value_of("frames")
        .unwrap_or("1")
        .parse()
        .context("invalid frame count")?;
    for stats in state.render(frames) {
        info!(
            "Frame {} took {:?}, {} rays hit the volume",
            stats.index, stats.duration, stats.hit_rays
        );
    }

    if let Some(path) = matches.value_of_os("output") {
        output::save_frame(
            Path::new(path),
            state.render_loop.frame_buffer(),
            state.resolution(),
        )?;
        info!("Frame saved to {path:?}");
    }
    if let Some(path) = matches.value_of_os("lookup-output") {
        output::save_lookup(Path::new(path), &state.render_loop.lookup())?;
        info!("Lookup saved to {path:?}");
    }
    Ok(())
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<AppConfig> {
    let file = match matches.value_of_os("config") {
        Some(path) => {
            let path = PathBuf::from(path);
            if !path.is_file() {
                bail!("config file {path:?} does not exist");
            }
            Some(path)
        }
        None => Some(PathBuf::from(DEFAULT_CONFIG)).filter(|p| p.is_file()),
    };

    match &file {
        Some(path) => info!("Loading config {path:?}"),
        None => info!("No config file, using defaults"),
    }
    AppConfig::load_from(file.as_deref()).context("cannot load configuration")
}

fn apply_overrides(cfg: &mut AppConfig, matches: &ArgMatches) -> anyhow::Result<()> {
    if let Some(path) = matches.value_of_os("volume") {
        cfg.volume.path = Some(PathBuf::from(path));
    }
    if let Some(values) = matches.values_of("dims") {
        let dims = values
            .map(|v| v.parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .context("invalid dims")?;
        if let [x, y, z] = dims[..] {
            cfg.volume.dims = [x, y, z];
        }
    }
    match matches.value_of("format") {
        Some("raw") => cfg.volume.format = VolumeFormat::Raw,
        Some("header") => cfg.volume.format = VolumeFormat::Header,
        Some(other) => bail!("unknown volume format {other}"),
        None => {}
    }
    if let Some(palette) = matches.value_of("palette") {
        cfg.palette = palette.to_owned();
    }
    if matches.is_present("single-thread") {
        cfg.render.multi_thread = false;
    }

    let [w, h] = cfg.render.resolution;
    info!(
        "Rendering {:?} at {w}x{h}, palette {}",
        cfg.volume.path, cfg.palette
    );
    Ok(())
}
