//! Startup configuration: defaults, optionally overridden by a RON file, then by the
//! command line.

mod cli;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{FramingParams, StarFieldParams};

pub use cli::CliArgs;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
    pub time: TimeConfig,
    /// Log filter, e.g. "info" or "debug,rust_orrery::gui=trace". `RUST_LOG` wins
    /// over this.
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub framing: FramingParams,
    /// Vertical field of view.
    pub fov_degrees: f32,
    pub initial_position: [f32; 3],
    /// Limits on how far the user can zoom.
    pub min_distance: f32,
    pub max_distance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Segments per orbit line.
    pub orbit_segments: usize,
    /// Orbit lines are white at this opacity against the black background.
    pub orbit_opacity: f32,
    pub stars: StarFieldParams,
    /// Body catalog file. The built-in solar system is used if unset.
    pub catalog: Option<PathBuf>,
    /// Directory holding `<body id>.jpg` textures.
    pub texture_dir: PathBuf,
    /// Skip textures and paint each body its catalog color.
    pub flat_colors: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// Simulation time units per wall-clock second.
    pub time_scale: f64,
    pub start_paused: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 1280,
            height: 720,
            title: "3D Solar System".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            framing: FramingParams::default(),
            fov_degrees: 45.0,
            initial_position: [0.0, 50.0, 150.0],
            min_distance: 10.0,
            max_distance: 500.0,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            orbit_segments: 100,
            orbit_opacity: 0.3,
            stars: StarFieldParams::default(),
            catalog: None,
            texture_dir: PathBuf::from("textures"),
            flat_colors: false,
        }
    }
}

impl Default for TimeConfig {
    fn default() -> Self {
        TimeConfig {
            time_scale: 1.0,
            start_paused: false,
        }
    }
}

impl Config {
    pub fn read_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        let config = ron::from_str(&contents).map_err(|source| Error::Parse {
            path: path.to_owned(),
            source,
        })?;
        Ok(config)
    }

    /// Defaults, then the file named by `--config` (if any), then the other flags.
    pub fn load(args: &CliArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::read_file(path)?,
            None => Config::default(),
        };
        config.apply_cli_overrides(args);
        if config.log_level.is_empty() {
            config.log_level = "info".to_string();
        }
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would make the scene unbuildable or leave the camera
    /// stuck approaching forever.
    pub fn validate(&self) -> Result<()> {
        if self.scene.orbit_segments < MIN_ORBIT_SEGMENTS {
            return Err(invalid(
                "scene.orbit_segments",
                format!(
                    "need at least {}, got {}",
                    MIN_ORBIT_SEGMENTS, self.scene.orbit_segments
                ),
            ));
        }

        let framing = &self.camera.framing;
        if !(framing.epsilon.is_finite() && framing.epsilon > 0.0) {
            return Err(invalid(
                "camera.framing.epsilon",
                format!("must be positive, got {}", framing.epsilon),
            ));
        }
        if !(framing.distance_multiplier.is_finite() && framing.distance_multiplier > 0.0) {
            return Err(invalid(
                "camera.framing.distance_multiplier",
                format!("must be positive, got {}", framing.distance_multiplier),
            ));
        }
        for (field, blend) in [
            ("camera.framing.target_blend", framing.target_blend),
            ("camera.framing.camera_blend", framing.camera_blend),
            ("camera.framing.look_blend", framing.look_blend),
        ] {
            if !(blend > 0.0 && blend <= 1.0) {
                return Err(invalid(field, format!("must be in (0, 1], got {}", blend)));
            }
        }
        Ok(())
    }
}

// Fewer segments than a triangle can't close an orbit
const MIN_ORBIT_SEGMENTS: usize = 3;

fn invalid(field: &'static str, reason: String) -> Error {
    Error::InvalidConfig { field, reason }
}
