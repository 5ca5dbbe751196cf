//! Configuration error types.
//!
//! The simulation itself never fails: every per-frame operation is a plain
//! numeric transform.  Only loading and validating [`crate::config::FieldConfig`]
//! can go wrong, and those failures fall back to compiled defaults.

use std::fmt;

/// Top-level error enum for wavefall.
#[derive(Debug)]
pub enum FieldError {
    /// The config file exists but could not be read.
    Io(std::io::Error),

    /// The config file is not valid TOML or has a mistyped key.
    Parse(toml::de::Error),

    /// A config value is outside its safe operating range.
    UnsafeConstant {
        /// Name of the config key (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// `WAVEFALL_VARIANT` named a variant that does not exist.
    UnknownVariant(String),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Io(e) => write!(f, "could not read config: {}", e),
            FieldError::Parse(e) => write!(f, "could not parse config: {}", e),
            FieldError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "config '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            FieldError::UnknownVariant(name) => write!(
                f,
                "unknown variant '{}' (expected 'wave_field' or 'gravity_fall')",
                name
            ),
        }
    }
}

impl std::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FieldError::Io(e) => Some(e),
            FieldError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FieldError {
    fn from(e: std::io::Error) -> Self {
        FieldError::Io(e)
    }
}

impl From<toml::de::Error> for FieldError {
    fn from(e: toml::de::Error) -> Self {
        FieldError::Parse(e)
    }
}

/// Convenience alias: a `Result` using `FieldError` as the error type.
pub type FieldResult<T> = Result<T, FieldError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `lo < value <= hi` (or `lo <= value` when
/// `inclusive_lo` is set).
pub fn validate_range(
    name: &'static str,
    value: f32,
    lo: f32,
    hi: f32,
    inclusive_lo: bool,
    safe_range: &'static str,
) -> FieldResult<()> {
    let above_lo = if inclusive_lo { value >= lo } else { value > lo };
    if above_lo && value <= hi && value.is_finite() {
        Ok(())
    } else {
        Err(FieldError::UnsafeConstant {
            name,
            value,
            safe_range,
        })
    }
}

/// Returns an error if `value` is not strictly positive.
pub fn validate_positive(name: &'static str, value: f32) -> FieldResult<()> {
    validate_range(name, value, 0.0, f32::MAX, false, "(0.0, ∞)")
}
