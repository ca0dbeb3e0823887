use std::process::ExitCode;

use log::{error, info};

mod args;
mod config;
mod file;
mod generators;
mod header;

use crate::{args::get_command, config::Config, generators::generate_vol};

pub fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = get_command().get_matches();

    let cfg = match Config::from_args(&args) {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    info!("Generating volume...");
    info!("{:?}", cfg);

    match generate_vol(&cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Generating failed: {e}");
            ExitCode::FAILURE
        }
    }
}
