use std::{fs::File, io, path::Path};

use log::debug;
use memmap::{Mmap, MmapOptions};

use crate::Result;

/// Raw bytes of a volume file
///
/// Files are memory mapped, buffers received from elsewhere
/// (file dialogs, network) are kept as a vector.
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

    pub fn len(&self) -> usize {
        self.get_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn from_vec(vec: Vec<u8>) -> DataSource {
        DataSource::Vec(vec)
    }

    pub fn from_file<P>(path: P) -> Result<DataSource>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not lead to a file", path.display()),
            )
            .into());
        }

        let file = File::open(path)?;

        // Empty files cannot be mapped
        if file.metadata()?.len() == 0 {
            return Ok(DataSource::Vec(Vec::new()));
        }

        // Safety: the map is read only and lives as long as the DataSource
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        debug!("Mapped {} ({} bytes)", path.display(), mmap.len());

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
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::VolumeError;

    #[test]
    fn missing_file_is_io_error() {
        let res = DataSource::from_file("this/path/does/not/exist.dat");
        assert!(matches!(res, Err(VolumeError::Io(_))));
    }

    #[test]
    fn mapped_file_matches_content() {
        let mut path = std::env::temp_dir();
        path.push(format!("volren_reader_{}.dat", std::process::id()));
        std::fs::write(&path, [1u8, 2, 3, 4]).unwrap();

        let ds = DataSource::from_file(&path).unwrap();
        assert_eq!(ds.get_slice(), &[1, 2, 3, 4]);

        drop(ds);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn vec_source() {
        let ds = DataSource::from_vec(vec![]);
        assert!(ds.is_empty());
    }
}
