use std::{path::Path, sync::OnceLock};

use log::info;
use nalgebra::{vector, Vector3, Vector4};

use super::{compute_gradient, parse::dat_words, DataSource};
use crate::{
    common::{Histogram, ValueRange},
    defaults::SAMPLE_NORMALIZATION,
    Result, VolumeError,
};

/// Normalized scalar grid with its gradient field
///
/// Samples are stored linearly, x growing fastest.
/// The field is immutable, a new file produces a new `VolumeField`.
/// The gradient is computed on first request and cached.
pub struct VolumeField {
    size: Vector3<usize>,
    samples: Vec<f32>,
    gradient: OnceLock<Vec<Vector4<f32>>>,
}

impl std::fmt::Debug for VolumeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VolumeField")
            .field("size", &self.size)
            .field("samples", &self.samples.len())
            .field("gradient computed", &self.gradient.get().is_some())
            .finish()
    }
}

impl VolumeField {
    /// Build from raw words, first three being width, height and depth
    pub fn new(raw: &[u16]) -> Result<VolumeField> {
        let (header, payload) = match raw {
            [w, h, d, payload @ ..] => ([*w, *h, *d], payload),
            _ => {
                return Err(VolumeError::InvalidHeader(format!(
                    "expected 3 dimension values, got {}",
                    raw.len()
                )))
            }
        };

        if header.contains(&0) {
            return Err(VolumeError::InvalidHeader(format!(
                "dimensions must be positive, got {}x{}x{}",
                header[0], header[1], header[2]
            )));
        }

        let size = vector![header[0] as usize, header[1] as usize, header[2] as usize];
        let expected = size.x * size.y * size.z;
        if payload.len() != expected {
            return Err(VolumeError::SizeMismatch {
                expected,
                actual: payload.len(),
            });
        }

        let samples: Vec<f32> = payload
            .iter()
            .map(|&v| v as f32 / SAMPLE_NORMALIZATION)
            .collect();

        let volume = VolumeField {
            size,
            samples,
            gradient: OnceLock::new(),
        };

        info!(
            "{} voxels loaded - [{}, {}, {}], max: {}",
            volume.voxel_count(),
            size.x,
            size.y,
            size.z,
            volume.max_dimension()
        );

        Ok(volume)
    }

    /// Build from the bytes of a `.dat` file
    pub fn from_bytes(bytes: &[u8]) -> Result<VolumeField> {
        let words = dat_words(bytes)?;
        VolumeField::new(&words)
    }

    pub fn from_data_source(ds: &DataSource) -> Result<VolumeField> {
        VolumeField::from_bytes(ds.get_slice())
    }

    pub fn from_file<P>(path: P) -> Result<VolumeField>
    where
        P: AsRef<Path>,
    {
        let ds = DataSource::from_file(path)?;
        VolumeField::from_data_source(&ds)
    }

    pub fn width(&self) -> usize {
        self.size.x
    }

    pub fn height(&self) -> usize {
        self.size.y
    }

    pub fn depth(&self) -> usize {
        self.size.z
    }

    /// Dimensions (width, height, depth)
    pub fn size(&self) -> Vector3<usize> {
        self.size
    }

    pub fn slice_size(&self) -> usize {
        self.size.x * self.size.y
    }

    pub fn voxel_count(&self) -> usize {
        self.samples.len()
    }

    pub fn max_dimension(&self) -> usize {
        self.size.x.max(self.size.y).max(self.size.z)
    }

    /// Dimensions as floats, the `volume_dims` uniform
    pub fn scale(&self) -> Vector3<f32> {
        self.size.map(|v| v as f32)
    }

    /// Dimensions divided by the largest one, the `volume_scale` uniform
    pub fn volume_scale(&self) -> Vector3<f32> {
        self.scale() / self.max_dimension() as f32
    }

    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.size.x * (y + self.size.y * z)
    }

    /// Sample at grid coordinates, `None` outside the grid
    pub fn get_data(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        if x >= self.size.x || y >= self.size.y || z >= self.size.z {
            return None;
        }
        self.samples.get(self.index(x, y, z)).copied()
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Gradient field, one `(gx, gy, gz, 1.0)` per voxel
    pub fn compute_gradient(&self) -> &[Vector4<f32>] {
        self.gradient.get_or_init(|| {
            let gradient = compute_gradient(&self.samples, self.size);
            info!("Gradient computed for {} voxels", gradient.len());
            gradient
        })
    }

    /// Gradient, if already computed
    pub fn gradient(&self) -> Option<&[Vector4<f32>]> {
        self.gradient.get().map(|g| g.as_slice())
    }

    pub fn value_range(&self) -> ValueRange {
        ValueRange::from_samples(self.samples.iter())
    }

    /// Sample histogram over <0;1>
    pub fn histogram(&self, n_bins: usize) -> Histogram {
        Histogram::from_samples(&self.samples, n_bins, (0.0..1.0).into())
    }
}
