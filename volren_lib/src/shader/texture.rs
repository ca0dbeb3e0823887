use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use nalgebra::Vector3;

use crate::VolumeField;

static NEXT_TEXTURE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// One float per voxel
    R32Float,
    /// Four floats per voxel
    Rgba32Float,
}

impl TextureFormat {
    pub fn channels(self) -> usize {
        match self {
            TextureFormat::R32Float => 1,
            TextureFormat::Rgba32Float => 4,
        }
    }
}

/// CPU side description of a 3D float texture
///
/// Data is tightly packed, no row or slice padding, and sampled with linear
/// filtering. Every texture gets a unique id, a rebuilt texture is never equal
/// to the one it replaces.
#[derive(Clone)]
pub struct Texture3D {
    id: u64,
    size: Vector3<usize>,
    format: TextureFormat,
    unpack_alignment: u32,
    data: Arc<[f32]>,
}

impl std::fmt::Debug for Texture3D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture3D")
            .field("id", &self.id)
            .field("size", &self.size)
            .field("format", &self.format)
            .field("data len", &self.data.len())
            .finish()
    }
}

impl PartialEq for Texture3D {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Texture3D {
    /// `data.len()` is `size.x * size.y * size.z * channels`
    fn packed(size: Vector3<usize>, format: TextureFormat, data: Arc<[f32]>) -> Texture3D {
        debug_assert_eq!(data.len(), size.product() * format.channels());

        let unpack_alignment = match format {
            TextureFormat::R32Float => 1,
            TextureFormat::Rgba32Float => 4,
        };
        Texture3D {
            id: NEXT_TEXTURE_ID.fetch_add(1, Ordering::Relaxed),
            size,
            format,
            unpack_alignment,
            data,
        }
    }

    /// Single channel texture of normalized samples
    pub fn from_samples(volume: &VolumeField) -> Texture3D {
        Texture3D::packed(
            volume.size(),
            TextureFormat::R32Float,
            volume.samples().into(),
        )
    }

    /// Four channel texture of the gradient field, computes it if needed
    pub fn from_gradient(volume: &VolumeField) -> Texture3D {
        let data: Arc<[f32]> = volume
            .compute_gradient()
            .iter()
            .flat_map(|g| g.iter().copied())
            .collect();

        Texture3D::packed(volume.size(), TextureFormat::Rgba32Float, data)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn size(&self) -> Vector3<usize> {
        self.size
    }

    pub fn format(&self) -> TextureFormat {
        self.format
    }

    pub fn unpack_alignment(&self) -> u32 {
        self.unpack_alignment
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }
}
