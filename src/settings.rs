//! Simulation tuning
//!
//! Every constant the step loop depends on lives here so scenes and tests can
//! override them per run. Loaded from JSON, either whole (missing fields use
//! defaults) or as overrides on top of a scene's preferred settings.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Physics settings for one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    /// Fixed step size in seconds
    pub fixed_dt: f32,
    /// Most steps a single frame may run; extra backlog is dropped
    pub max_substeps: u32,
    /// Vertical acceleration applied to every dynamic body
    pub gravity: f32,
    /// Per-axis friction coefficient, applied only to grounded bodies
    pub friction: Vec2,
    /// Extra separation added after resolving a penetration
    pub collision_bias: f32,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            fixed_dt: SIM_DT,
            max_substeps: MAX_SUBSTEPS,
            gravity: GRAVITY,
            friction: Vec2::new(FRICTION_X, FRICTION_Y),
            collision_bias: COLLISION_BIAS,
        }
    }
}

impl SimSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fixed_dt(mut self, fixed_dt: f32) -> Self {
        self.fixed_dt = fixed_dt;
        self
    }

    /// Set the substep cap (at least one step per frame)
    pub fn with_max_substeps(mut self, max_substeps: u32) -> Self {
        self.max_substeps = max_substeps.max(1);
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_friction(mut self, friction: Vec2) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_collision_bias(mut self, bias: f32) -> Self {
        self.collision_bias = bias;
        self
    }

    /// Check that the values can drive a stable simulation
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.fixed_dt.is_finite() || self.fixed_dt <= 0.0 {
            return Err(SettingsError::Invalid {
                field: "fixed_dt",
                reason: "must be positive and finite",
            });
        }
        if self.max_substeps == 0 {
            return Err(SettingsError::Invalid {
                field: "max_substeps",
                reason: "must be at least 1",
            });
        }
        if !self.gravity.is_finite() {
            return Err(SettingsError::Invalid {
                field: "gravity",
                reason: "must be finite",
            });
        }
        if !self.friction.is_finite() || self.friction.min_element() < 0.0 {
            return Err(SettingsError::Invalid {
                field: "friction",
                reason: "must be finite and non-negative",
            });
        }
        if !self.collision_bias.is_finite() || self.collision_bias < 0.0 {
            return Err(SettingsError::Invalid {
                field: "collision_bias",
                reason: "must be finite and non-negative",
            });
        }
        Ok(())
    }

    /// Parse and validate settings from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Apply the fields present in a JSON object on top of `self`
    ///
    /// Fields the document leaves out keep this value's setting rather than
    /// the global default, so a scene's own tuning survives a partial file.
    pub fn merged_with_json(&self, json: &str) -> Result<Self, SettingsError> {
        let overrides = match serde_json::from_str::<serde_json::Value>(json)? {
            serde_json::Value::Object(overrides) => overrides,
            _ => {
                return Err(SettingsError::Invalid {
                    field: "settings",
                    reason: "must be a JSON object",
                });
            }
        };
        let mut merged = serde_json::to_value(self)?;
        if let serde_json::Value::Object(fields) = &mut merged {
            fields.extend(overrides);
        }
        let settings: Self = serde_json::from_value(merged)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load a JSON file as overrides on top of `self`
    pub fn load_over(&self, path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = self.merged_with_json(&json)?;
        log::info!("Applied settings overrides from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
