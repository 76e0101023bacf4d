use lifegrid_common::{Dimensions, GridError};
use serde::{Deserialize, Serialize};

/// Probability of a cell being alive after `randomize` unless configured.
pub const DEFAULT_DENSITY: f64 = 0.5;

/// Errors from loading a universe configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
}

/// Construction parameters for a [`Universe`](crate::Universe).
///
/// `density` and `seed` may be omitted from serialized forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniverseConfig {
    pub width: u32,
    pub height: u32,
    /// Probability in `[0, 1]` that `randomize` makes a cell alive.
    #[serde(default = "default_density")]
    pub density: f64,
    /// Starting point of the seed stream consumed by `randomize`.
    #[serde(default)]
    pub seed: u64,
}

fn default_density() -> f64 {
    DEFAULT_DENSITY
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            density: DEFAULT_DENSITY,
            seed: 0,
        }
    }
}

impl UniverseConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Check every field, returning the validated grid dimensions.
    pub fn validate(&self) -> Result<Dimensions, GridError> {
        let dims = Dimensions::new(self.width, self.height)?;
        validate_density(self.density)?;
        Ok(dims)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

pub(crate) fn validate_density(density: f64) -> Result<(), GridError> {
    // NaN fails `contains` too.
    if (0.0..=1.0).contains(&density) {
        Ok(())
    } else {
        Err(GridError::InvalidDensity(density))
    }
}
