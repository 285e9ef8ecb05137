mod linear_volume;
pub mod parse;
mod vol_builder;
mod volume;

pub use linear_volume::LinearVolume;
pub use vol_builder::{from_file, BuildVolume, DataSource, VolumeMetadata};
pub use volume::Volume;

#[cfg(test)]
mod test {

    use std::io::Write;

    use nalgebra::{point, vector};

    use super::*;
    use crate::error::VolumeError;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("tf_raycaster_{}_{name}", std::process::id()));
        path
    }

    #[test]
    fn raw_file_roundtrip() {
        let path = temp_path("raw.raw");
        {
            let mut file = std::fs::File::create(&path).unwrap();
            file.write_all(&[0, 51, 102, 153, 204, 255, 0, 255]).unwrap();
        }

        let vol: LinearVolume = from_file(&path, parse::raw_parser(vector![2, 2, 2])).unwrap();
        assert_eq!(vol.get_size(), vector![2, 2, 2]);
        assert_eq!(vol.get_data(1, 0, 0), Some(0.2));
        assert_eq!(vol.get_data(1, 1, 1), Some(1.0));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn header_file_roundtrip() {
        let path = temp_path("header.vol");
        {
            let mut file = std::fs::File::create(&path).unwrap();
            file.write_all(&parse::write_header(vector![1, 1, 3])).unwrap();
            file.write_all(&[255, 255, 255]).unwrap();
        }

        let vol: LinearVolume = from_file(&path, parse::header_parser).unwrap();
        assert_eq!(vol.get_size(), vector![1, 1, 3]);
        assert_eq!(vol.sample_at(point![0.5, 0.5, 0.5]), 1.0);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn raw_file_wrong_dims() {
        let path = temp_path("short.raw");
        {
            let mut file = std::fs::File::create(&path).unwrap();
            file.write_all(&[1, 2, 3]).unwrap();
        }

        let res: Result<LinearVolume, _> = from_file(&path, parse::raw_parser(vector![2, 2, 2]));
        assert!(matches!(
            res,
            Err(VolumeError::SizeMismatch {
                expected: 8,
                actual: 3
            })
        ));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file() {
        let res: Result<LinearVolume, _> =
            from_file("/definitely/not/here.raw", parse::raw_parser(vector![1, 1, 1]));
        assert!(matches!(res, Err(VolumeError::NotAFile(_))));
    }
}
