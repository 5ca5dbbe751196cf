//! Runtime field configuration loaded from `assets/field.toml`.
//!
//! [`FieldConfig`] is a Bevy [`Resource`] that mirrors the tunable defaults in
//! [`crate::constants`].  At startup, [`load_field_config`] reads
//! `assets/field.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about:
//!
//! ```toml
//! variant = "gravity_fall"
//! spawn_rate = 0.8
//! seed = 42
//! ```
//!
//! The `WAVEFALL_VARIANT` environment variable overrides `variant` after the
//! file is read.

use crate::constants::*;
use crate::error::{validate_positive, validate_range, FieldError, FieldResult};
use crate::policy::Variant;
use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;

/// Default location of the config file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/field.toml";

/// Environment variable selecting the variant.
pub const VARIANT_ENV: &str = "WAVEFALL_VARIANT";

/// Runtime-tunable simulation configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub variant: Variant,

    // ── Physics ───────────────────────────────────────────────────────────────
    pub gravity: f32,
    pub friction: f32,
    pub shape_size: f32,

    // ── Population ────────────────────────────────────────────────────────────
    pub spawn_rate: f32,
    pub max_shapes: usize,
    pub seed_count: usize,

    // ── Canvas ────────────────────────────────────────────────────────────────
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub line_width: f32,

    /// Fixed RNG seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            gravity: GRAVITY,
            friction: FRICTION,
            shape_size: SHAPE_SIZE,
            spawn_rate: SPAWN_RATE,
            max_shapes: MAX_SHAPES,
            seed_count: SEED_COUNT,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            line_width: GIZMO_LINE_WIDTH,
            seed: None,
        }
    }
}

impl FieldConfig {
    /// Defaults with the given variant.
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Default::default()
        }
    }

    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas_width, self.canvas_height)
    }

    /// Parse a TOML document and validate the result.
    pub fn from_toml_str(contents: &str) -> FieldResult<Self> {
        let config: FieldConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn from_path(path: impl AsRef<Path>) -> FieldResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Reject values that would make the simulation degenerate.
    pub fn validate(&self) -> FieldResult<()> {
        validate_positive("shape_size", self.shape_size)?;
        validate_range("friction", self.friction, 0.0, 1.0, false, "(0.0, 1.0]")?;
        validate_range("spawn_rate", self.spawn_rate, 0.0, 1.0, true, "[0.0, 1.0]")?;
        validate_range("gravity", self.gravity, 0.0, f32::MAX, true, "[0.0, ∞)")?;
        validate_positive("line_width", self.line_width)?;
        if self.max_shapes == 0 {
            return Err(FieldError::UnsafeConstant {
                name: "max_shapes",
                value: 0.0,
                safe_range: "[1, ∞)",
            });
        }
        let min_canvas = self.shape_size * 2.0;
        for (name, value) in [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
        ] {
            if !(value > min_canvas && value.is_finite()) {
                return Err(FieldError::UnsafeConstant {
                    name,
                    value,
                    safe_range: "(2 × shape_size, ∞)",
                });
            }
        }
        Ok(())
    }

    /// Apply `WAVEFALL_VARIANT` if it is set.
    pub fn apply_variant_override(&mut self, value: Option<&str>) -> FieldResult<()> {
        if let Some(name) = value {
            self.variant = name.parse()?;
        }
        Ok(())
    }
}

/// Startup system: attempt to load `assets/field.toml` and overwrite the
/// `FieldConfig` resource with it, then apply the variant override.
///
/// Parse and validation errors are logged and the compiled defaults kept.  A
/// missing file is not an error.
pub fn load_field_config(mut config: ResMut<FieldConfig>) {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        match FieldConfig::from_path(path) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded field config from {}", CONFIG_PATH);
            }
            Err(err) => warn!("{}: {}; using defaults", CONFIG_PATH, err),
        }
    } else {
        info!("No {} found; using compiled defaults", CONFIG_PATH);
    }

    let env_variant = std::env::var(VARIANT_ENV).ok();
    if let Err(err) = config.apply_variant_override(env_variant.as_deref()) {
        warn!("{}: {}; keeping '{}'", VARIANT_ENV, err, config.variant.label());
    }
}
