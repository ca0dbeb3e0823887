use std::{ffi::OsString, str::FromStr};

use clap::ArgMatches;
use nalgebra::{vector, Vector3};

/// Parse value of `key`, arguments were validated by the parser
fn parse_value<T>(args: &ArgMatches, key: &str) -> Result<Option<T>, String>
where
    T: FromStr,
{
    args.value_of(key)
        .map(|v| v.parse::<T>().map_err(|_| format!("Bad value of {key}: {v}")))
        .transpose()
}

fn required_value<T>(args: &ArgMatches, key: &str) -> Result<T, String>
where
    T: FromStr,
{
    parse_value(args, key)?.ok_or_else(|| format!("Missing argument {key}"))
}

/// Transform `Values` into `Vector`
fn values_to_vector3<T>(args: &ArgMatches, key: &str) -> Result<Vector3<T>, String>
where
    T: FromStr + Copy,
{
    let vals = args
        .values_of(key)
        .ok_or_else(|| format!("Missing argument {key}"))?
        .map(|v| v.parse::<T>().map_err(|_| format!("Bad value of {key}: {v}")))
        .collect::<Result<Vec<T>, String>>()?;

    match vals[..] {
        [x, y, z] => Ok(vector![x, y, z]),
        _ => Err(format!("{key} needs 3 values, got {}", vals.len())),
    }
}

/// App configuration
/// Config is built from args parsed by `clap`
#[derive(Debug)]
pub struct Config {
    /// Dimensions of volume
    pub dims: Vector3<u16>,
    /// Type of generator to be used
    pub generator: GeneratorConfig,
    /// Output file name
    pub file_name: OsString,
    /// Optional seed for RNG, to replicate results
    pub seed: Option<u64>,
    /// Show progress bar
    pub progress: bool,
}

impl Config {
    pub fn from_args(args: &ArgMatches) -> Result<Config, String> {
        let dims = values_to_vector3(args, "dims")?;
        let generator = GeneratorConfig::from_args(args)?;
        let file_name = args
            .value_of_os("output-file")
            .ok_or("Missing output file")?
            .into();
        let seed = parse_value(args, "seed")?;
        let progress = !args.is_present("quiet");

        Ok(Config {
            dims,
            generator,
            file_name,
            seed,
            progress,
        })
    }

    pub fn voxel_count(&self) -> usize {
        self.dims.iter().map(|&d| d as usize).product()
    }
}

/// Settings specific to generator variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorConfig {
    /// Linear ramp along x, 0 to 4095
    Ramp,
    /// Randomly placed spheres and cuboids
    Shapes {
        n_of_shapes: usize,
        sample: u16,
        obj_size: u16,
    },
    /// Uniform random samples
    Noise,
    /// Solid block with empty border
    Solid { sample: u16 },
}

impl GeneratorConfig {
    pub fn from_args(args: &ArgMatches) -> Result<GeneratorConfig, String> {
        let name: String = required_value(args, "generator")?;

        let config = match name.as_str() {
            "ramp" => GeneratorConfig::Ramp,
            "shapes" => GeneratorConfig::Shapes {
                n_of_shapes: required_value(args, "n-of-shapes")?,
                sample: required_value(args, "sample")?,
                obj_size: required_value(args, "object-size")?,
            },
            "noise" => GeneratorConfig::Noise,
            "solid" => GeneratorConfig::Solid {
                sample: required_value(args, "sample")?,
            },
            other => return Err(format!("Unknown generator {other}")),
        };
        Ok(config)
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::args::get_command;

    fn config(args: &[&str]) -> Config {
        let matches = get_command()
            .try_get_matches_from(std::iter::once("vol_gen").chain(args.iter().copied()))
            .unwrap();
        Config::from_args(&matches).unwrap()
    }

    #[test]
    fn solid_with_defaults() {
        let cfg = config(&["--dims=3,4,5", "-g", "solid"]);

        assert_eq!(cfg.dims, vector![3, 4, 5]);
        assert_eq!(cfg.generator, GeneratorConfig::Solid { sample: 4095 });
        assert_eq!(cfg.file_name, OsString::from("a.dat"));
        assert_eq!(cfg.seed, None);
        assert!(cfg.progress);
        assert_eq!(cfg.voxel_count(), 60);
    }

    #[test]
    fn shapes_config() {
        let cfg = config(&[
            "--dims=64,64,64",
            "-g",
            "shapes",
            "--n-of-shapes",
            "3",
            "--object-size",
            "10",
            "--sample",
            "2000",
            "--seed",
            "7",
            "-q",
        ]);

        assert_eq!(
            cfg.generator,
            GeneratorConfig::Shapes {
                n_of_shapes: 3,
                sample: 2000,
                obj_size: 10
            }
        );
        assert_eq!(cfg.seed, Some(7));
        assert!(!cfg.progress);
    }
}
