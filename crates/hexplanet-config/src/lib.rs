//! Runtime configuration for the hex-planet generator.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line. Unknown fields are ignored and missing ones fall back to
//! defaults, so older and newer files both load.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, DebugConfig, ExportConfig, PlanetConfig, default_config_dir,
};
pub use error::ConfigFileError;
