use nalgebra::Vector3;

use super::SampleGenerator;
use crate::args::MAX_SAMPLE;

/// Samples grow linearly along x, `0` on the first column and `4095` on the last
pub struct RampGenerator {
    width: u32,
}

impl RampGenerator {
    pub fn new(dims: Vector3<u16>) -> RampGenerator {
        RampGenerator {
            width: dims.x as u32,
        }
    }
}

impl SampleGenerator for RampGenerator {
    fn sample_at(&self, coords: Vector3<u32>) -> u16 {
        if self.width < 2 {
            return 0;
        }
        let t = coords.x as f32 / (self.width - 1) as f32;
        (t * MAX_SAMPLE as f32).round() as u16
    }
}
