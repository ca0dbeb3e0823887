use nalgebra::{vector, Vector3, Vector4};

use crate::defaults::GRADIENT_FACTOR;

/// Central difference gradient of a linear (x fastest) sample grid
///
/// Interior voxels get `(s[c+1] - s[c-1]) * GRADIENT_FACTOR` per axis.
/// On the first and last voxel of an axis the component stays `0.0`.
/// The fourth component is always `1.0`, shaders read it as a validity channel.
pub fn compute_gradient(samples: &[f32], size: Vector3<usize>) -> Vec<Vector4<f32>> {
    let (width, height, depth) = (size.x, size.y, size.z);
    let slice = width * height;
    assert_eq!(samples.len(), slice * depth, "sample count does not match size");

    let mut gradient = Vec::with_capacity(samples.len());

    for z in 0..depth {
        let z_inner = z > 0 && z + 1 < depth;
        for y in 0..height {
            let y_inner = y > 0 && y + 1 < height;
            let row = y * width + z * slice;
            for x in 0..width {
                let i = row + x;

                let gx = if x > 0 && x + 1 < width {
                    (samples[i + 1] - samples[i - 1]) * GRADIENT_FACTOR
                } else {
                    0.0
                };
                let gy = if y_inner {
                    (samples[i + width] - samples[i - width]) * GRADIENT_FACTOR
                } else {
                    0.0
                };
                let gz = if z_inner {
                    (samples[i + slice] - samples[i - slice]) * GRADIENT_FACTOR
                } else {
                    0.0
                };

                gradient.push(vector![gx, gy, gz, 1.0]);
            }
        }
    }

    gradient
}

#[cfg(test)]
mod test {

    use super::*;

    fn index(size: Vector3<usize>, x: usize, y: usize, z: usize) -> usize {
        x + size.x * (y + size.y * z)
    }

    #[test]
    fn ramp_along_x() {
        let size = vector![5, 3, 3];
        let mut samples = vec![0.0; 5 * 3 * 3];
        for z in 0..3 {
            for y in 0..3 {
                for x in 0..5 {
                    samples[index(size, x, y, z)] = x as f32 / 4.0;
                }
            }
        }

        let gradient = compute_gradient(&samples, size);

        for z in 0..3 {
            for y in 0..3 {
                for x in 1..4 {
                    let g = gradient[index(size, x, y, z)];
                    // slope 1/4 per voxel, two voxels apart, halved
                    assert!((g.x - 0.25).abs() < 1e-6);
                    assert_eq!(g.y, 0.0);
                    assert_eq!(g.z, 0.0);
                    assert_eq!(g.w, 1.0);
                }
                assert_eq!(gradient[index(size, 0, y, z)].x, 0.0);
                assert_eq!(gradient[index(size, 4, y, z)].x, 0.0);
            }
        }
    }

    #[test]
    fn single_peak() {
        let size = vector![3, 3, 3];
        let mut samples = vec![0.0; 27];
        // peak just above the center along z
        samples[index(size, 1, 1, 2)] = 1.0;

        let gradient = compute_gradient(&samples, size);
        let center = gradient[index(size, 1, 1, 1)];

        assert_eq!(center, vector![0.0, 0.0, 0.5, 1.0]);
        // the peak itself sits on the z boundary
        assert_eq!(gradient[index(size, 1, 1, 2)], vector![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn thin_volume_has_no_gradient() {
        let size = vector![2, 1, 2];
        let samples = vec![0.0, 1.0, 0.5, 0.25];

        let gradient = compute_gradient(&samples, size);

        assert_eq!(gradient.len(), 4);
        assert!(gradient
            .iter()
            .all(|g| *g == vector![0.0, 0.0, 0.0, 1.0]));
    }
}
