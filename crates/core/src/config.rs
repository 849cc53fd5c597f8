use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::selection::SelectionMode;

/// Env var selecting the mode a fresh engine starts in.
pub const ENV_INITIAL_MODE: &str = "ANNOTATOR_INITIAL_MODE";

/// Env var enabling `[0, 1]` clamping of captured coordinates.
pub const ENV_CLAMP_COORDINATES: &str = "ANNOTATOR_CLAMP_COORDINATES";

/// Env var dropping zero-extent box drags instead of finalizing them.
pub const ENV_DISCARD_DEGENERATE_BOXES: &str = "ANNOTATOR_DISCARD_DEGENERATE_BOXES";

/// Behavior switches for the selection engine.
///
/// The defaults reproduce the observed capture behavior: coordinates outside
/// the image are kept unclamped and a click without movement in box mode
/// still yields a zero-size box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub initial_mode: SelectionMode,
    pub clamp_coordinates: bool,
    pub discard_degenerate_boxes: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_mode: SelectionMode::Point,
            clamp_coordinates: false,
            discard_degenerate_boxes: false,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                              | Default  |
    /// |--------------------------------------|----------|
    /// | `ANNOTATOR_INITIAL_MODE`             | `point`  |
    /// | `ANNOTATOR_CLAMP_COORDINATES`        | `false`  |
    /// | `ANNOTATOR_DISCARD_DEGENERATE_BOXES` | `false`  |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads from an arbitrary
    /// key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let initial_mode = match lookup(ENV_INITIAL_MODE) {
            Some(raw) => SelectionMode::from_str(raw.trim())?,
            None => defaults.initial_mode,
        };
        let clamp_coordinates = match lookup(ENV_CLAMP_COORDINATES) {
            Some(raw) => parse_flag(ENV_CLAMP_COORDINATES, &raw)?,
            None => defaults.clamp_coordinates,
        };
        let discard_degenerate_boxes = match lookup(ENV_DISCARD_DEGENERATE_BOXES) {
            Some(raw) => parse_flag(ENV_DISCARD_DEGENERATE_BOXES, &raw)?,
            None => defaults.discard_degenerate_boxes,
        };

        Ok(Self {
            initial_mode,
            clamp_coordinates,
            discard_degenerate_boxes,
        })
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, CoreError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(CoreError::Validation(format!(
            "{key} must be a boolean (true/false, 1/0, yes/no), got '{other}'"
        ))),
    }
}
