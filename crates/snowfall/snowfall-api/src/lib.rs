//! Snowfall Engine Configuration API
//!
//! Configuration types, defaults, and validation for the decision engine.
//! All sections are validated eagerly at engine construction; a
//! misconfiguration fails fast rather than silently misclassifying.

use serde::{Deserialize, Serialize};
use snowfall_spi::{Result, SnowfallError};

// ============================================================================
// Severity Thresholds
// ============================================================================

/// Severity tier thresholds, as inclusive lower bounds in inches.
///
/// Must be strictly increasing: `light < moderate < heavy`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Minimum inches for a light alert (default: 2.0).
    pub light: f64,
    /// Minimum inches for a moderate alert (default: 6.0).
    pub moderate: f64,
    /// Minimum inches for a heavy alert (default: 12.0).
    pub heavy: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            light: 2.0,
            moderate: 6.0,
            heavy: 12.0,
        }
    }
}

impl TierThresholds {
    /// Create thresholds; call [`TierThresholds::validate`] before use.
    pub fn new(light: f64, moderate: f64, heavy: f64) -> Self {
        Self {
            light,
            moderate,
            heavy,
        }
    }

    /// Check that thresholds are finite, positive, and strictly increasing.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("light", self.light),
            ("moderate", self.moderate),
            ("heavy", self.heavy),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(configuration(
                    "thresholds",
                    format!("{} threshold must be a positive number, got {}", name, value),
                ));
            }
        }
        if self.light >= self.moderate {
            return Err(configuration(
                "thresholds",
                format!(
                    "light ({}) must be below moderate ({})",
                    self.light, self.moderate
                ),
            ));
        }
        if self.moderate >= self.heavy {
            return Err(configuration(
                "thresholds",
                format!(
                    "moderate ({}) must be below heavy ({})",
                    self.moderate, self.heavy
                ),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Verifier Configuration
// ============================================================================

/// Cross-source verification configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Maximum allowed disagreement between sources, in inches
    /// (default: 2.0). Fixed inches, not relative to the primary value.
    pub tolerance_in: f64,
    /// Primary readings at or below this level skip the secondary source
    /// entirely (default: 0.1). Keeps negligible readings from spending
    /// the secondary source's quota.
    pub noise_floor_in: f64,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            tolerance_in: 2.0,
            noise_floor_in: 0.1,
        }
    }
}

impl VerifierConfig {
    pub fn new(tolerance_in: f64, noise_floor_in: f64) -> Self {
        Self {
            tolerance_in,
            noise_floor_in,
        }
    }

    /// Check that tolerance is positive and the noise floor non-negative.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance_in.is_finite() || self.tolerance_in <= 0.0 {
            return Err(configuration(
                "verifier",
                format!("tolerance must be positive, got {}", self.tolerance_in),
            ));
        }
        if !self.noise_floor_in.is_finite() || self.noise_floor_in < 0.0 {
            return Err(configuration(
                "verifier",
                format!("noise floor must be non-negative, got {}", self.noise_floor_in),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Cooldown Configuration
// ============================================================================

/// Alert cooldown configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CooldownConfig {
    /// Minimum hours between same-tier alerts for a location (default: 12).
    pub window_hours: i64,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self { window_hours: 12 }
    }
}

impl CooldownConfig {
    pub fn new(window_hours: i64) -> Self {
        Self { window_hours }
    }

    /// Check that the window is positive.
    pub fn validate(&self) -> Result<()> {
        if self.window_hours <= 0 {
            return Err(configuration(
                "cooldown",
                format!("window must be positive, got {} hours", self.window_hours),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Engine Configuration
// ============================================================================

/// Complete engine configuration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub thresholds: TierThresholds,
    pub verifier: VerifierConfig,
    pub cooldown: CooldownConfig,
}

impl EngineConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        self.verifier.validate()?;
        self.cooldown.validate()
    }

    /// Load configuration from process environment variables, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Separated from [`EngineConfig::from_env`] so parsing and validation
    /// are testable without touching process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup("THRESHOLD_LIGHT") {
            config.thresholds.light = parse_f64("THRESHOLD_LIGHT", &value)?;
        }
        if let Some(value) = lookup("THRESHOLD_MODERATE") {
            config.thresholds.moderate = parse_f64("THRESHOLD_MODERATE", &value)?;
        }
        if let Some(value) = lookup("THRESHOLD_HEAVY") {
            config.thresholds.heavy = parse_f64("THRESHOLD_HEAVY", &value)?;
        }
        if let Some(value) = lookup("VERIFICATION_THRESHOLD") {
            config.verifier.tolerance_in = parse_f64("VERIFICATION_THRESHOLD", &value)?;
        }
        if let Some(value) = lookup("VERIFICATION_NOISE_FLOOR") {
            config.verifier.noise_floor_in = parse_f64("VERIFICATION_NOISE_FLOOR", &value)?;
        }
        if let Some(value) = lookup("ALERT_COOLDOWN_HOURS") {
            config.cooldown.window_hours = parse_i64("ALERT_COOLDOWN_HOURS", &value)?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn configuration(name: &str, reason: String) -> SnowfallError {
    SnowfallError::Configuration {
        name: name.to_string(),
        reason,
    }
}

fn parse_f64(name: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| configuration(name, format!("expected a number, got '{}'", value)))
}

fn parse_i64(name: &str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| configuration(name, format!("expected an integer, got '{}'", value)))
}
