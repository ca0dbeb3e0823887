//! Argument parsing and validation
//! Uses library `clap`

use std::ffi::OsStr;

use clap::{Arg, Command, ValueHint};

/// Largest 12-bit sample
pub const MAX_SAMPLE: u16 = 4095;

// Dimensions are stored as 16bit values
pub fn is_dimension(num: &str) -> Result<(), String> {
    match num.parse::<u16>() {
        Ok(0) => Err("Dimension must be greater than 0".into()),
        Ok(_) => Ok(()),
        Err(_) => Err("Dimension must be a number in range <1;65535>".into()),
    }
}

pub fn is_positive_number(num: &str) -> Result<(), String> {
    match num.parse::<u64>() {
        Ok(0) => Err("Number must be greater than 0".into()),
        Ok(_) => Ok(()),
        Err(_) => Err("Number required".into()),
    }
}

pub fn is_sample(num: &str) -> Result<(), String> {
    match num.parse::<u16>() {
        Ok(n) if n <= MAX_SAMPLE => Ok(()),
        _ => Err(format!("Sample must be in range <0;{MAX_SAMPLE}>")),
    }
}

pub const GENERATOR_NAMES: &[&str] = &["ramp", "shapes", "noise", "solid"];

pub fn get_command<'a>() -> Command<'a> {
    Command::new("Vol-gen")
        .version("0.1.0")
        .about("Generator of 12-bit .dat volumes")
        .arg(
            Arg::new("dims")
                .help("Dimensions of volume")
                .long("dims")
                .short('d')
                .required(true)
                .number_of_values(3)
                .value_names(&["X", "Y", "Z"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .validator(is_dimension),
        )
        .arg(
            Arg::new("generator")
                .help("Type of generator")
                .long("generator")
                .short('g')
                .required(true)
                .requires_ifs(&[("shapes", "n-of-shapes")])
                .takes_value(true)
                .value_name("NAME")
                .possible_values(GENERATOR_NAMES),
        )
        .arg(
            Arg::new("seed")
                .help("Seed for RNG, leave out for random seed")
                .long("seed")
                .value_name("SEED")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("sample")
                .help("Value of generated objects")
                .long("sample")
                .value_name("VALUE")
                .default_value("4095")
                .validator(is_sample),
        )
        .arg(
            Arg::new("object-size")
                .help("Side of individual generated shapes")
                .long("object-size")
                .value_name("SIDE")
                .default_value("16")
                .validator(is_dimension),
        )
        .arg(
            Arg::new("n-of-shapes")
                .help("Number of shapes generated in volume")
                .long("n-of-shapes")
                .value_name("N")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("output-file")
                .help("File name to output")
                .long("output-file")
                .short('o')
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath)
                .default_value_os(OsStr::new("a.dat")),
        )
        .arg(
            Arg::new("quiet")
                .help("Do not show progress bar")
                .long("quiet")
                .short('q'),
        )
}
