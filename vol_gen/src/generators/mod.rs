use std::io::Write;

use anyhow::Context;
use log::debug;
use nalgebra::Vector3;
use tf_raycaster::volumetric::parse::write_header;

use crate::{
    config::{Config, GeneratorConfig},
    file::open_create_file,
    linear_order::LinearCoordIterator,
};

mod noise;
mod ramp;
mod solid;
mod sphere;

// Generates one sample at a time, at any location
pub trait SampleGenerator {
    fn sample_at(&self, coords: Vector3<u32>) -> u8;
}

pub fn get_sample_generator(config: &Config) -> Box<dyn SampleGenerator> {
    match config.generator {
        GeneratorConfig::Solid { sample } => Box::new(solid::SolidGenerator::new(sample)),
        GeneratorConfig::Sphere { sample } => {
            Box::new(sphere::SphereGenerator::new(config.dims, sample))
        }
        GeneratorConfig::Ramp => Box::new(ramp::RampGenerator::new(config.dims)),
        GeneratorConfig::Noise { cell } => {
            Box::new(noise::NoiseGenerator::new(config.dims, cell, config.seed))
        }
    }
}

/// Write all samples in linear order, optionally behind a header
pub fn write_volume<W>(
    out: &mut W,
    sg: &dyn SampleGenerator,
    dims: Vector3<u32>,
    header: bool,
) -> anyhow::Result<()>
where
    W: Write,
{
    if header {
        out.write_all(&write_header(dims))
            .context("writing header")?;
    }

    let row_len = dims.x as usize;
    let mut row = Vec::with_capacity(row_len);
    for coords in LinearCoordIterator::from_dims(dims) {
        row.push(sg.sample_at(coords));
        if row.len() == row_len {
            out.write_all(&row).context("writing samples")?;
            row.clear();
        }
    }
    out.flush()?;
    Ok(())
}

pub fn generate_vol(config: &Config) -> anyhow::Result<()> {
    let gen = get_sample_generator(config);
    let mut file = open_create_file(&config.file_name)?;
    debug!("Writing {} samples", config.dims.iter().map(|&d| d as u64).product::<u64>());
    write_volume(&mut file, gen.as_ref(), config.dims, config.header)
}

#[cfg(test)]
mod test {

    use nalgebra::vector;
    use tf_raycaster::volumetric::{parse::HEADER_LEN, LinearVolume, Volume};

    use super::*;

    #[test]
    fn written_volume_loads() {
        let dims = vector![5, 4, 3];
        let mut bytes = vec![];
        write_volume(&mut bytes, &ramp::RampGenerator::new(dims), dims, true).unwrap();
        assert_eq!(bytes.len(), HEADER_LEN + 5 * 4 * 3);

        let mut path = std::env::temp_dir();
        path.push(format!("vol_gen_ramp_{}.vol", std::process::id()));
        std::fs::write(&path, &bytes).unwrap();

        let volume: LinearVolume =
            tf_raycaster::volumetric::from_file(&path, tf_raycaster::volumetric::parse::header_parser)
                .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(volume.get_size(), vector![5, 4, 3]);
        assert_eq!(volume.get_data(0, 2, 1), Some(0.0));
        assert_eq!(volume.get_data(4, 2, 1), Some(1.0));
    }

    #[test]
    fn raw_has_no_header() {
        let dims = vector![2, 2, 2];
        let mut bytes = vec![];
        write_volume(&mut bytes, &solid::SolidGenerator::new(9), dims, false).unwrap();
        assert_eq!(bytes, vec![9; 8]);
    }
}
