//! `hexplanet`: generate a hex-sphere, stage its render buffers, and print a
//! summary.

mod checks;
mod error;
mod report;

use clap::Parser;
use hexplanet_config::{CliArgs, Config, default_config_dir};
use hexplanet_mesh::StagingPool;
use hexplanet_sphere::HexSphere;
use tracing::info;

use crate::error::AppError;
use crate::report::{Report, write_tile_records};

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().or_else(default_config_dir);

    let mut config = match &config_dir {
        Some(dir) => Config::load_or_create(dir).unwrap_or_else(|e| {
            eprintln!("Failed to load config: {e}, using defaults");
            Config::default()
        }),
        None => {
            eprintln!("No config directory available, using defaults");
            Config::default()
        }
    };
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.as_ref().map(|d| d.join("logs"));
    hexplanet_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    if let Err(e) = run(&config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), AppError> {
    let sphere = HexSphere::generate(config.planet.to_params())?;

    if config.debug.validate {
        checks::verify(&sphere)?;
    }

    let mode = config.export.mode;
    let mut pool = StagingPool::new();
    let handle = sphere.submit(&mut pool, mode, config.export.fan_apex);
    let packed = pool
        .get(handle)
        .ok_or_else(|| AppError::Check("staged mesh missing from pool".to_string()))?;

    let report = Report::new(&sphere, mode, packed);
    println!("{report}");

    if let Some(path) = &config.export.tiles_out {
        let records = sphere.tile_records();
        write_tile_records(path, &records)?;
        info!("Wrote {} tile records to {}", records.len(), path.display());
    }

    Ok(())
}
