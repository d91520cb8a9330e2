use accent_color::{AccentPicker, PickError, Settings};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::AppError;

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV: &str = "BACKDROP_CONFIG";

/// How a pick request is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Inline on the calling thread
    #[default]
    Sync,
    /// On the shared elastic pool, awaited through a oneshot channel
    Async,
    /// On a dedicated elastic pool
    Pool,
    /// On the tokio blocking thread pool
    Tokio,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Sync => "sync",
            Mode::Async => "async",
            Mode::Pool => "pool",
            Mode::Tokio => "tokio",
        })
    }
}

/// Picker configuration loaded from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PickerConfig {
    /// Sampling stride in pixels
    pub accuracy: u32,

    /// Image width divided by this gives the left/right border width
    pub vertical_divisor: u32,

    /// Image height divided by this gives the top/bottom border height
    pub horizontal_divisor: u32,

    /// CIEDE2000 distance under which colors are grouped
    pub merge_distance: f64,

    /// Row bands to split the image into (0 = derive from the executor)
    pub workers: usize,

    /// Execution mode
    pub mode: Mode,
}

impl Default for PickerConfig {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            accuracy: settings.accuracy,
            vertical_divisor: settings.vertical_divisor,
            horizontal_divisor: settings.horizontal_divisor,
            merge_distance: settings.merge_distance,
            workers: 0,
            mode: Mode::default(),
        }
    }
}

impl PickerConfig {
    /// Load configuration from a YAML file, or defaults when no path is
    /// given. A file that cannot be read or parsed is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let Some(path) = path else {
            tracing::debug!("No config file, using defaults");
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            mode = %config.mode,
            accuracy = config.accuracy,
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, AppError> {
        // An empty document means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_yaml(&self) -> Result<String, AppError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// The engine settings described by this config, unvalidated.
    pub fn settings(&self) -> Settings {
        Settings {
            accuracy: self.accuracy,
            vertical_divisor: self.vertical_divisor,
            horizontal_divisor: self.horizontal_divisor,
            merge_distance: self.merge_distance,
        }
    }

    /// Push the settings into `picker` through its validating setters.
    pub fn apply_to(&self, picker: &mut AccentPicker) -> Result<(), PickError> {
        picker
            .set_accuracy(self.accuracy)?
            .set_vertical_divisor(self.vertical_divisor)?
            .set_horizontal_divisor(self.horizontal_divisor)?
            .set_merge_distance(self.merge_distance)?;
        Ok(())
    }

    /// A picker configured from this config.
    pub fn picker(&self) -> Result<AccentPicker, PickError> {
        let mut picker = AccentPicker::new();
        self.apply_to(&mut picker)?;
        Ok(picker)
    }
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default, PartialEq, clap::Args)]
pub struct PickerOverrides {
    /// Sample every N-th pixel in both directions
    #[arg(short, long)]
    pub accuracy: Option<u32>,

    /// Set both border divisors
    #[arg(short, long)]
    pub border_divisor: Option<u32>,

    /// Divisor of the image width for the left/right borders
    #[arg(long)]
    pub vertical_divisor: Option<u32>,

    /// Divisor of the image height for the top/bottom borders
    #[arg(long)]
    pub horizontal_divisor: Option<u32>,

    /// CIEDE2000 distance under which colors are grouped
    #[arg(short, long)]
    pub merge_distance: Option<f64>,

    /// Number of row bands (0 = derive from the executor)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Execution mode
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,
}

impl PickerOverrides {
    /// Overwrite the values of `config` that were given. A specific divisor
    /// wins over `border_divisor`.
    pub fn apply(&self, config: &mut PickerConfig) {
        if let Some(accuracy) = self.accuracy {
            config.accuracy = accuracy;
        }
        if let Some(divisor) = self.border_divisor {
            config.vertical_divisor = divisor;
            config.horizontal_divisor = divisor;
        }
        if let Some(divisor) = self.vertical_divisor {
            config.vertical_divisor = divisor;
        }
        if let Some(divisor) = self.horizontal_divisor {
            config.horizontal_divisor = divisor;
        }
        if let Some(distance) = self.merge_distance {
            config.merge_distance = distance;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
    }
}
