//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`BLP_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use blplanet_core::{SimOptions, DEFAULT_TIME_MULTIPLIER};
use blplanet_physics::{OrbitModel, DEFAULT_GRAVITATIONAL_CONSTANT};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Scene selection
    #[serde(default)]
    pub scene: SceneConfig,
    /// Frame loop and time scaling
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Physics configuration
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// What the console renderer shows
    #[serde(default)]
    pub display: DisplayConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`BLP_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Optional user overrides
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // BLP_SIMULATION__TIME_MULTIPLIER=3600 -> simulation.time_multiplier = 3600
        figment = figment.merge(Env::prefixed("BLP_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Physics settings for the frame loop
    pub fn physics_config(&self) -> blplanet_physics::PhysicsConfig {
        blplanet_physics::PhysicsConfig::new(self.physics.gravitational_constant)
            .with_model(self.simulation.orbit_model)
    }

    /// Initial runtime options for the frame loop
    pub fn sim_options(&self) -> SimOptions {
        let mut time_multiplier = self.simulation.time_multiplier;
        if !time_multiplier.is_finite() {
            log::warn!(
                "Invalid time multiplier {}. Using {}.",
                time_multiplier,
                DEFAULT_TIME_MULTIPLIER
            );
            time_multiplier = DEFAULT_TIME_MULTIPLIER;
        }

        SimOptions {
            time_multiplier,
            show_date_panel: self.display.show_date_panel,
            show_markers: self.display.show_markers,
        }
    }
}

/// Scene selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Path to the RON scene file
    pub path: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: "assets/scenes/earth_moon.ron".to_string(),
        }
    }
}

/// Frame loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Simulated seconds per wall-clock second
    pub time_multiplier: f64,
    /// Longest wall-clock frame delta in seconds before scaling
    pub max_frame_dt: f64,
    /// Frames per second the binary aims for
    pub target_fps: u32,
    /// Stop after this many frames (0 = run forever)
    pub max_frames: u64,
    /// How the satellite moves
    pub orbit_model: OrbitModel,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_multiplier: DEFAULT_TIME_MULTIPLIER,
            max_frame_dt: 0.25,
            target_fps: 60,
            max_frames: 0,
            orbit_model: OrbitModel::Gravity,
        }
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Gravitational constant in scene units (1000 km, 1e22 kg, s)
    pub gravitational_constant: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: DEFAULT_GRAVITATIONAL_CONSTANT,
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Show the simulated date panel
    pub show_date_panel: bool,
    /// Show the radial/tangential markers
    pub show_markers: bool,
    /// Log a frame summary every N rendered frames (0 = never)
    pub log_every_frames: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_date_panel: true,
            show_markers: false,
            log_every_frames: 60,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
