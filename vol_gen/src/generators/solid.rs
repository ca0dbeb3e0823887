use nalgebra::{vector, Vector3};

use super::SampleGenerator;

const DEFAULT_PAD: u32 = 1;

/// Generate solid volume
/// All samples except a border of `pad` voxels have the same value
pub struct SolidGenerator {
    /// The sample value
    sample: u16,
    pad: u32,
    dims: Vector3<u32>,
}

impl SolidGenerator {
    pub fn new(sample: u16, dims: Vector3<u16>) -> SolidGenerator {
        SolidGenerator {
            sample,
            pad: DEFAULT_PAD,
            dims: dims.cast(),
        }
    }
}

impl SampleGenerator for SolidGenerator {
    fn sample_at(&self, coords: Vector3<u32>) -> u16 {
        let pad = vector![self.pad, self.pad, self.pad];
        let inside = coords
            .iter()
            .zip(self.dims.iter())
            .zip(pad.iter())
            .all(|((&c, &d), &p)| c >= p && c + p < d);

        if inside {
            self.sample
        } else {
            0
        }
    }
}
