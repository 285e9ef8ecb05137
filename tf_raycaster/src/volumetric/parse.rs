//! Volume file parsers
//!
//! Two formats are understood:
//! * raw: samples only, dimensions supplied by the caller
//! * header: magic `TFVOL`, three little endian `u32` dimensions, then samples

use nalgebra::{vector, Vector3};
use nom::{bytes::complete::tag, number::complete::le_u32, sequence::tuple, IResult};

use crate::error::VolumeError;

use super::vol_builder::{DataSource, VolumeMetadata};

pub const HEADER_MAGIC: &[u8] = b"TFVOL";

/// Header length in bytes, samples start right after it
pub const HEADER_LEN: usize = 5 + 3 * 4;

/// Parser for headerless files.
/// Returns closure usable with [`super::from_file`].
pub fn raw_parser(
    size: Vector3<usize>,
) -> impl FnOnce(DataSource) -> Result<VolumeMetadata, VolumeError> {
    move |data_source| {
        Ok(VolumeMetadata {
            size: Some(size),
            data: Some(data_source),
            data_offset: 0,
        })
    }
}

/// Parser for files with `TFVOL` header
pub fn header_parser(data_source: DataSource) -> Result<VolumeMetadata, VolumeError> {
    let size = match header_inner(data_source.get_slice()) {
        Ok((_rest, size)) => size,
        Err(_) => return Err(VolumeError::Header("missing or truncated TFVOL header")),
    };

    Ok(VolumeMetadata {
        size: Some(size),
        data: Some(data_source),
        data_offset: HEADER_LEN,
    })
}

fn header_inner(s: &[u8]) -> IResult<&[u8], Vector3<usize>> {
    let mut header = tuple((tag(HEADER_MAGIC), tuple((le_u32, le_u32, le_u32))));

    let (s, (_, size)) = header(s)?;
    let size = vector![size.0 as usize, size.1 as usize, size.2 as usize];

    Ok((s, size))
}

/// Serialize header, counterpart of [`header_parser`]
pub fn write_header(size: Vector3<u32>) -> Vec<u8> {
    let mut header = Vec::with_capacity(HEADER_LEN);
    header.extend_from_slice(HEADER_MAGIC);
    for dim in size.iter() {
        header.extend_from_slice(&dim.to_le_bytes());
    }
    header
}
