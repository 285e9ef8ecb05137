use std::{
    fs::{File, OpenOptions},
    io::BufWriter,
    path::Path,
};

/// Open file for writing, existing content is dropped
pub fn open_create_file<P>(path: P) -> Result<BufWriter<File>, std::io::Error>
where
    P: AsRef<Path>,
{
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    Ok(BufWriter::new(file))
}
