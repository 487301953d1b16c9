//! All of the user config for the playground.

use color_eyre::eyre::{ContextCompat as _, Result, WrapErr as _};

/// A copy of the default config file. It gets copied to the user's config folder the first time
/// they start the playground.
static DEFAULT_CONFIG: &str = include_str!("../../default_config.toml");

/// The name of the config file in the config directory.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "playground.toml";

/// The valid log levels. Based on our `tracing` crate.
#[derive(serde::Serialize, serde::Deserialize, clap::ValueEnum, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum LogLevel {
    /// Error
    Error,
    /// Warnings
    Warn,
    /// Info
    Info,
    /// Debug
    Debug,
    /// Trace
    Trace,
    /// No logging
    Off,
}

/// Managing user config.
#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
#[non_exhaustive]
pub struct Config {
    /// The maximum log level
    pub log_level: LogLevel,
    /// The location of the log file.
    pub log_path: std::path::PathBuf,
    /// Target frame rate
    pub frame_rate: u32,
    /// Logical width of the surface
    pub width: f32,
    /// Logical height of the surface
    pub height: f32,
    /// Device pixels per logical pixel
    pub pixel_density: f32,
    /// Seed for reproducible randomness
    pub seed: Option<u64>,
    /// Whether the render loop starts running or paused
    pub running_on_start: bool,
    /// The particles demo
    pub particles: crate::demos::particles::config::Config,
    /// The ball physics demo
    pub physics: crate::demos::physics::config::Config,
}

impl Default for Config {
    fn default() -> Self {
        let log_directory = match dirs::state_dir() {
            Some(directory) => directory,
            None => std::path::PathBuf::new().join("./"),
        };
        let log_path = log_directory.join("playground").join("playground.log");

        Self {
            log_level: LogLevel::Off,
            log_path,
            frame_rate: 60,
            width: 800.0,
            height: 600.0,
            pixel_density: 1.0,
            seed: None,
            running_on_start: true,
            particles: crate::demos::particles::config::Config::default(),
            physics: crate::demos::physics::config::Config::default(),
        }
    }
}

impl Config {
    /// Get the stable location of the playground's config directory on the user's system.
    pub fn default_directory() -> Result<std::path::PathBuf> {
        Ok(dirs::config_dir()
            .context("Couldn't get standard config directory")?
            .join("playground"))
    }

    /// Load the config from the given path, or from the user's config directory. The default
    /// config is written there the first time.
    pub fn load(maybe_custom_path: Option<std::path::PathBuf>) -> Result<Self> {
        let path = match maybe_custom_path {
            Some(path) => path,
            None => {
                let path = Self::default_directory()?.join(DEFAULT_CONFIG_FILE_NAME);
                Self::write_default_if_missing(&path)?;
                path
            }
        };

        Self::load_from(&path)
    }

    /// Copy the bundled default config to the given path, unless there's already something
    /// there.
    pub fn write_default_if_missing(path: &std::path::Path) -> Result<()> {
        if path.exists() {
            return Ok(());
        }

        let directory = path.parent().context("Couldn't get config path's parent")?;
        std::fs::create_dir_all(directory)?;
        std::fs::write(path, DEFAULT_CONFIG)?;
        tracing::info!("Wrote default config to: {}", path.display());
        Ok(())
    }

    /// Load config from a TOML file.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        tracing::info!("Loading config from: {}", path.display());
        let data = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Couldn't load config at {}", path.display()))?;
        tracing::trace!("Using config file:\n{data}");
        Self::parse(&data).wrap_err_with(|| format!("Bad config file: {}", path.display()))
    }

    /// Parse config from a TOML string.
    pub fn parse(data: &str) -> Result<Self> {
        Ok(toml::from_str::<Self>(data)?)
    }

    /// Parse the shipped default config.
    pub fn parse_default_config() -> Result<Self> {
        Self::parse(DEFAULT_CONFIG)
    }
}
