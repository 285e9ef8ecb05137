use std::{ffi::OsString, str::FromStr};

use anyhow::{anyhow, bail, Context};
use clap::ArgMatches;
use nalgebra::{vector, Vector3};

/// Transform `Values` into `Vector`
fn values_to_vector3<T>(args: &ArgMatches, key: &str) -> anyhow::Result<Vector3<T>>
where
    T: FromStr + Copy,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let vals = args
        .values_of(key)
        .ok_or_else(|| anyhow!("missing {key}"))?
        .map(|v| v.parse::<T>().with_context(|| format!("cannot parse {key} value {v}")))
        .collect::<anyhow::Result<Vec<T>>>()?;

    if vals.len() != 3 {
        bail!("{key} needs 3 values, got {}", vals.len());
    }
    Ok(vector![vals[0], vals[1], vals[2]])
}

fn value_of<T>(args: &ArgMatches, key: &str) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = args
        .value_of(key)
        .ok_or_else(|| anyhow!("missing {key}"))?;
    raw.parse()
        .with_context(|| format!("cannot parse {key} value {raw}"))
}

/// App configuration
/// Config is built from args parsed by `clap`
#[derive(Debug)]
pub struct Config {
    /// Dimensions of volume
    pub dims: Vector3<u32>,
    /// Type of generator to be used
    pub generator: GeneratorConfig,
    /// Prepend TFVOL header
    pub header: bool,
    // Output file name
    pub file_name: OsString,
    /// Optional seed for RNG, to replicate results
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_args(args: &ArgMatches) -> anyhow::Result<Config> {
        let dims = values_to_vector3(args, "dims")?;
        let generator = GeneratorConfig::from_args(args)?;
        let header = args.is_present("header");
        let file_name = args
            .value_of_os("output-file")
            .ok_or_else(|| anyhow!("missing output-file"))?
            .into();
        let seed = match args.value_of("seed") {
            Some(_) => Some(value_of(args, "seed")?),
            None => None,
        };

        Ok(Config {
            dims,
            generator,
            header,
            file_name,
            seed,
        })
    }
}

/// Settings specific to generator variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeneratorConfig {
    /// Every sample the same
    Solid { sample: u8 },
    /// Ball in the middle, zero around
    Sphere { sample: u8 },
    /// Values grow along `x`
    Ramp,
    /// Smooth random values, lattice points `cell` samples apart
    Noise { cell: u32 },
}

impl GeneratorConfig {
    pub fn from_args(args: &ArgMatches) -> anyhow::Result<GeneratorConfig> {
        let name = args
            .value_of("generator")
            .ok_or_else(|| anyhow!("missing generator"))?;

        let generator = match name {
            "solid" => GeneratorConfig::Solid {
                sample: value_of(args, "sample")?,
            },
            "sphere" => GeneratorConfig::Sphere {
                sample: value_of(args, "sample")?,
            },
            "ramp" => GeneratorConfig::Ramp,
            "noise" => GeneratorConfig::Noise {
                cell: value_of(args, "cell")?,
            },
            other => bail!("unknown generator {other}"),
        };
        Ok(generator)
    }
}
