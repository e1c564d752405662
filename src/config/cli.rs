use std::path::PathBuf;

use clap::Parser;

use super::Config;

/// Interactive solar system viewer. Click a body to fly to it.
///
/// Flags override values from the config file.
#[derive(Debug, Default, Parser)]
#[command(name = "rust-orrery")]
pub struct CliArgs {
    /// RON config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// RON body catalog, replacing the built-in solar system.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Directory holding `<body>.jpg` textures.
    #[arg(long)]
    pub textures: Option<PathBuf>,

    /// Paint bodies in flat colors instead of loading textures.
    #[arg(long)]
    pub flat_colors: bool,

    /// Simulation time units per second.
    #[arg(long)]
    pub time_scale: Option<f64>,

    /// Log filter (error, warn, info, debug, trace, or a full directive).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Config {
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref path) = args.catalog {
            self.scene.catalog = Some(path.clone());
        }
        if let Some(ref dir) = args.textures {
            self.scene.texture_dir = dir.clone();
        }
        if args.flat_colors {
            self.scene.flat_colors = true;
        }
        if let Some(scale) = args.time_scale {
            self.time.time_scale = scale;
        }
        if let Some(ref level) = args.log_level {
            self.log_level = level.clone();
        }
    }
}
