use std::{fs::File, path::Path};

use memmap::{Mmap, MmapOptions};
use nalgebra::Vector3;

use crate::error::VolumeError;

use super::Volume;

/// Construct volume from parsed metadata
pub trait BuildVolume
where
    Self: Sized,
{
    fn build(metadata: VolumeMetadata) -> Result<Self, VolumeError>;
}

/// Read file and build volume.
///
/// `parser` extracts metadata from raw file contents.
/// Any error is reported before a volume exists.
pub fn from_file<P, T, PF>(path: P, parser: PF) -> Result<T, VolumeError>
where
    P: AsRef<Path>,
    T: BuildVolume + Volume,
    PF: FnOnce(DataSource) -> Result<VolumeMetadata, VolumeError>,
{
    let ds = DataSource::from_file(path)?;
    let metadata = parser(ds)?;
    BuildVolume::build(metadata)
}

/// Bytes of volume file, in memory or memory mapped
pub enum DataSource {
    Vec(Vec<u8>),
    Mmap(Mmap),
}

impl DataSource {
    pub fn get_slice(&self) -> &[u8] {
        match self {
            DataSource::Vec(v) => v.as_slice(),
            DataSource::Mmap(m) => &m[..],
        }
    }

    pub fn from_vec(vec: Vec<u8>) -> DataSource {
        DataSource::Vec(vec)
    }

    pub fn from_file<P>(path: P) -> Result<DataSource, VolumeError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(VolumeError::NotAFile(path.to_owned()));
        }

        let file = File::open(path)?;

        // Zero length files cannot be mapped
        if file.metadata()?.len() == 0 {
            return Ok(DataSource::Vec(vec![]));
        }

        // Safety: file is opened read only and is not expected to change while mapped
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        Ok(DataSource::Mmap(mmap))
    }
}

impl std::fmt::Debug for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            DataSource::Vec(_) => "Vec",
            DataSource::Mmap(_) => "Mmap",
        };
        f.debug_struct("DataSource")
            .field("kind", &kind)
            .field("len", &self.get_slice().len())
            .finish()
    }
}

/// Parsed description of volume file
#[derive(Debug, Default)]
pub struct VolumeMetadata {
    /// Number of samples along each axis
    pub size: Option<Vector3<usize>>,
    /// Raw file contents
    pub data: Option<DataSource>,
    /// Index of the first sample in `data`
    pub data_offset: usize,
}

impl VolumeMetadata {
    /// Samples of `data`, header skipped
    pub fn samples(&self) -> Result<&[u8], VolumeError> {
        let data = self.data.as_ref().ok_or(VolumeError::NoData)?;
        data.get_slice()
            .get(self.data_offset..)
            .ok_or(VolumeError::Header("data offset beyond end of file"))
    }
}
