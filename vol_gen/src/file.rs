use std::{
    fs::{File, OpenOptions},
    path::Path,
};

/// Open for writing, previous content is discarded
pub fn open_create_file<P>(path: P) -> Result<File, std::io::Error>
where
    P: AsRef<Path>,
{
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
