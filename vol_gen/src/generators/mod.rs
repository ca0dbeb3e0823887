use std::{error::Error, io::Write};

use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use nalgebra::{vector, Vector3};
use rayon::prelude::*;

use crate::{
    config::{Config, GeneratorConfig},
    file::open_create_file,
    header::generate_header,
};

mod noise;
mod ramp;
mod shapes;
mod solid;

pub use noise::NoiseGenerator;
pub use ramp::RampGenerator;
pub use shapes::ShapesGenerator;
pub use solid::SolidGenerator;

/// Generates one sample at a time, at any location
///
/// Called from multiple threads, result must depend only on `coords`.
pub trait SampleGenerator: Sync {
    fn sample_at(&self, coords: Vector3<u32>) -> u16;
}

pub fn get_sample_generator(config: &Config) -> Box<dyn SampleGenerator> {
    let dims = config.dims;
    match config.generator {
        GeneratorConfig::Ramp => Box::new(RampGenerator::new(dims)),
        GeneratorConfig::Shapes {
            n_of_shapes,
            sample,
            obj_size,
        } => Box::new(ShapesGenerator::new(
            dims,
            n_of_shapes,
            sample,
            obj_size,
            config.seed,
        )),
        GeneratorConfig::Noise => Box::new(NoiseGenerator::new(dims, config.seed)),
        GeneratorConfig::Solid { sample } => Box::new(SolidGenerator::new(sample, dims)),
    }
}

/// Little endian samples of the whole volume, x fastest
///
/// Slices along z are generated in parallel.
pub fn generate_samples(
    sg: &dyn SampleGenerator,
    dims: Vector3<u16>,
    progress: &ProgressBar,
) -> Vec<u8> {
    let dims = dims.cast::<u32>();

    let slices: Vec<Vec<u8>> = (0..dims.z)
        .into_par_iter()
        .map(|z| {
            let mut slice = Vec::with_capacity((dims.x * dims.y) as usize * 2);
            for y in 0..dims.y {
                for x in 0..dims.x {
                    let sample = sg.sample_at(vector![x, y, z]);
                    slice.extend_from_slice(&sample.to_le_bytes());
                }
            }
            progress.inc(1);
            slice
        })
        .collect();

    slices.concat()
}

pub fn generate_vol(config: &Config) -> Result<(), Box<dyn Error>> {
    let gen = get_sample_generator(config);

    let progress = if config.progress {
        let bar = ProgressBar::new(config.dims.z as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{elapsed_precise} [{bar:40}] {pos}/{len} slices")
                .progress_chars("=> "),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let samples = generate_samples(gen.as_ref(), config.dims, &progress);
    progress.finish();

    let mut file = open_create_file(&config.file_name)?;
    file.write_all(&generate_header(config.dims))?;
    file.write_all(&samples)?;

    info!(
        "Generating finished, {} samples written to {:?}",
        config.voxel_count(),
        config.file_name
    );
    Ok(())
}

#[cfg(test)]
mod test {

    use super::*;

    struct IndexGenerator(Vector3<u32>);

    impl SampleGenerator for IndexGenerator {
        fn sample_at(&self, c: Vector3<u32>) -> u16 {
            (c.x + self.0.x * (c.y + self.0.y * c.z)) as u16
        }
    }

    #[test]
    fn samples_are_x_fastest() {
        let dims = vector![3u16, 2, 2];
        let bytes = generate_samples(
            &IndexGenerator(dims.cast()),
            dims,
            &ProgressBar::hidden(),
        );

        let words: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|p| u16::from_le_bytes([p[0], p[1]]))
            .collect();
        assert_eq!(words, (0..12).collect::<Vec<u16>>());
    }
}
