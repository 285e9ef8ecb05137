use anyhow::Context;
use log::info;

mod args;
mod config;
mod file;
mod generators;
mod linear_order;

use crate::{args::get_command, config::Config, generators::generate_vol};

pub fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = get_command().get_matches();
    let cfg = Config::from_args(&args).context("invalid arguments")?;

    info!("Generating volume {:?}", cfg);

    generate_vol(&cfg)
        .with_context(|| format!("cannot generate volume into {:?}", cfg.file_name))?;

    info!("Generating finished, result in {:?}", cfg.file_name);
    Ok(())
}
