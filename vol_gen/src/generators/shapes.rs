use std::ops::RangeBounds;

use nalgebra::{vector, Vector3};

use super::SampleGenerator;
use crate::args::MAX_SAMPLE;

const SAMPLE_VARIANCE: u16 = 100;

/// Generate volume with a number of randomly placed shapes
/// First shape containing a voxel wins, the rest is empty
pub struct ShapesGenerator {
    shapes: Vec<ShapeInfo>,
}

impl ShapesGenerator {
    pub fn new(
        dims: Vector3<u16>,
        n_of_shapes: usize,
        sample: u16,
        obj_size: u16,
        seed: Option<u64>,
    ) -> ShapesGenerator {
        let dims = dims.cast::<u32>();
        let size = vector![obj_size, obj_size, obj_size].cast::<u32>();
        let size_variance = size / 4;

        let random_shape_gen = ShapeInfoGenerator::new(
            dims,
            size,
            size_variance,
            sample,
            SAMPLE_VARIANCE,
            seed,
        );
        let shapes = random_shape_gen.get_shapes(n_of_shapes);
        ShapesGenerator { shapes }
    }
}

impl SampleGenerator for ShapesGenerator {
    fn sample_at(&self, coords: Vector3<u32>) -> u16 {
        self.shapes
            .iter()
            .find(|shape| shape.contains(coords))
            .map(|shape| shape.render_at(coords - shape.position_low))
            .unwrap_or(0)
    }
}

// # of enum ShapeType variants
const N_OF_SHAPE_KINDS: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    Cuboid,
    Sphere,
}

/// One shape in volume, bounds inclusive
#[derive(Debug)]
pub struct ShapeInfo {
    pub position_low: Vector3<u32>,
    pub position_high: Vector3<u32>,
    pub shape_type: ShapeType,
    pub sample: u16,
}

impl ShapeInfo {
    fn contains(&self, coords: Vector3<u32>) -> bool {
        (0..3).all(|i| coords[i] >= self.position_low[i] && coords[i] <= self.position_high[i])
    }

    fn render_at(&self, offset: Vector3<u32>) -> u16 {
        match self.shape_type {
            ShapeType::Cuboid => self.sample,
            ShapeType::Sphere => self.render_sphere(offset),
        }
    }

    fn render_sphere(&self, offset: Vector3<u32>) -> u16 {
        let offset_f = offset.cast::<f32>();
        let pos_low_f = self.position_low.cast::<f32>();
        let pos_hi_f = self.position_high.cast::<f32>();

        let center = (pos_hi_f - pos_low_f) / 2.0;
        let r = center.x;

        if (offset_f - center).magnitude() <= r {
            self.sample
        } else {
            0
        }
    }
}

/// Generate shapes
/// Helper type
pub struct ShapeInfoGenerator {
    rng: fastrand::Rng,
    vol_dims: Vector3<u32>,
    size: Vector3<u32>,
    size_variance: Vector3<u32>,
    sample: u16,
    sample_variance: u16,
}

impl ShapeInfoGenerator {
    #[must_use]
    pub fn new(
        vol_dims: Vector3<u32>,
        size: Vector3<u32>,
        size_variance: Vector3<u32>,
        sample: u16,
        sample_variance: u16,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };

        Self {
            rng,
            vol_dims,
            size,
            size_variance,
            sample,
            sample_variance,
        }
    }

    fn random_shape(&self) -> ShapeType {
        match self.rng.u8(0..N_OF_SHAPE_KINDS) {
            0 => ShapeType::Cuboid,
            _ => ShapeType::Sphere,
        }
    }

    fn random_vector<R>(&self, ranges: [R; 3]) -> Vector3<u32>
    where
        R: RangeBounds<u32>,
    {
        let [x, y, z] = ranges;
        vector![self.rng.u32(x), self.rng.u32(y), self.rng.u32(z)]
    }

    pub fn get_shapes(&self, n: usize) -> Vec<ShapeInfo> {
        (0..n).map(|_| self.get_shape()).collect()
    }

    pub fn get_shape(&self) -> ShapeInfo {
        let shape_type = self.random_shape();

        // Shapes never leave the volume
        let size_max = (self.size + self.size_variance).zip_map(&self.vol_dims, u32::min);
        let size_min = self
            .size
            .zip_map(&self.size_variance, |s, v| s.saturating_sub(v).max(1))
            .zip_map(&size_max, u32::min);

        let smallest = |v: Vector3<u32>| v.x.min(v.y).min(v.z);
        let side = self.rng.u32(smallest(size_min)..=smallest(size_max));
        let size = match shape_type {
            ShapeType::Sphere => vector![side, side, side],
            ShapeType::Cuboid => self.random_vector([
                size_min.x..=size_max.x,
                size_min.y..=size_max.y,
                size_min.z..=size_max.z,
            ]),
        };

        let position_low = self.random_vector([
            0..=(self.vol_dims.x - size.x),
            0..=(self.vol_dims.y - size.y),
            0..=(self.vol_dims.z - size.z),
        ]);
        let position_high = position_low + size - vector![1, 1, 1];

        ShapeInfo {
            position_low,
            position_high,
            shape_type,
            sample: self.random_sample(),
        }
    }

    fn random_sample(&self) -> u16 {
        // Uses saturating intrinsics, so there is no overflow
        let low = self.sample.saturating_sub(self.sample_variance);
        let high = self.sample.saturating_add(self.sample_variance).min(MAX_SAMPLE);
        self.rng.u16(low..=high)
    }
}
