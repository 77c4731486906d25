//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use hexplanet_sphere::{FanApex, RenderMode};

use crate::Config;

/// Command-line arguments of the hex-planet generator.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "hexplanet", about = "Hex-sphere planet generator")]
pub struct CliArgs {
    /// Sphere radius.
    #[arg(long)]
    pub radius: Option<f64>,

    /// Subdivision frequency (tile count is 10 * n^2 + 2).
    #[arg(long, short = 'n')]
    pub frequency: Option<u32>,

    /// Coincidence tolerance.
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Render mode.
    #[arg(long, value_parser = ["tiles", "triangles"])]
    pub mode: Option<String>,

    /// Fan apex placement in tile mode.
    #[arg(long, value_parser = ["planar", "surface"])]
    pub apex: Option<String>,

    /// Write tile metadata as JSON to this file.
    #[arg(long)]
    pub tiles_out: Option<PathBuf>,

    /// Run the extra whole-sphere checks after generation.
    #[arg(long)]
    pub validate: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(r) = args.radius {
            self.planet.radius = r;
        }
        if let Some(n) = args.frequency {
            self.planet.frequency = n;
        }
        if let Some(eps) = args.epsilon {
            self.planet.epsilon = Some(eps);
        }
        if let Some(ref mode) = args.mode {
            match mode.as_str() {
                "tiles" => self.export.mode = RenderMode::Tiles,
                "triangles" => self.export.mode = RenderMode::Triangles,
                other => log::warn!("Ignoring unknown render mode '{other}'"),
            }
        }
        if let Some(ref apex) = args.apex {
            match apex.as_str() {
                "planar" => self.export.fan_apex = FanApex::Planar,
                "surface" => self.export.fan_apex = FanApex::Surface,
                other => log::warn!("Ignoring unknown fan apex '{other}'"),
            }
        }
        if let Some(ref path) = args.tiles_out {
            self.export.tiles_out = Some(path.clone());
        }
        if let Some(v) = args.validate {
            self.debug.validate = v;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            frequency: Some(32),
            mode: Some("triangles".to_string()),
            apex: Some("surface".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.planet.frequency, 32);
        assert_eq!(config.export.mode, RenderMode::Triangles);
        assert_eq!(config.export.fan_apex, FanApex::Surface);
        // Non-overridden fields retain defaults
        assert_eq!(config.planet.radius, 1.0);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_unknown_mode_keeps_config_value() {
        let mut config = Config::default();
        config.export.mode = RenderMode::Triangles;
        let args = CliArgs {
            mode: Some("wireframe".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.export.mode, RenderMode::Triangles);
    }

    #[test]
    fn test_parse_from_command_line() {
        let args = CliArgs::try_parse_from([
            "hexplanet",
            "-n",
            "5",
            "--radius",
            "6371000",
            "--mode",
            "tiles",
            "--tiles-out",
            "tiles.json",
        ])
        .unwrap();
        assert_eq!(args.frequency, Some(5));
        assert_eq!(args.radius, Some(6_371_000.0));
        assert_eq!(args.mode.as_deref(), Some("tiles"));
        assert_eq!(args.tiles_out, Some(PathBuf::from("tiles.json")));
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        assert!(CliArgs::try_parse_from(["hexplanet", "--mode", "wireframe"]).is_err());
    }
}
