//! Windowless run mode.
//!
//! `WAVEFALL_HEADLESS=<frames>` runs the field under `MinimalPlugins`, logs
//! population stats every [`HEADLESS_LOG_INTERVAL`] frames, and exits once the
//! frame limit is reached.  Useful for tuning the config without a display.

use crate::config::FieldConfig;
use crate::constants::HEADLESS_LOG_INTERVAL;
use crate::simulation::{self, FieldState};
use bevy::prelude::*;

/// Environment variable enabling headless mode; its value is the frame limit.
pub const HEADLESS_ENV: &str = "WAVEFALL_HEADLESS";

/// Default frame limit when the variable is set but not a number.
pub const DEFAULT_FRAME_LIMIT: u64 = 600;

/// Headless run settings.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessConfig {
    pub frame_limit: u64,
}

impl HeadlessConfig {
    /// Parse the env-var value; anything unparsable gets the default limit.
    pub fn from_env_value(value: &str) -> Self {
        let frame_limit = value.trim().parse().unwrap_or(DEFAULT_FRAME_LIMIT);
        Self { frame_limit }
    }
}

/// Step the field without a window and exit after the frame limit.
pub struct HeadlessPlugin {
    pub config: HeadlessConfig,
}

impl Plugin for HeadlessPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FieldConfig>()
            .insert_resource(self.config)
            .add_systems(Startup, simulation::setup_field_system)
            .add_systems(
                Update,
                (simulation::field_step_system, headless_logging_system).chain(),
            );
    }
}

/// Log stats periodically and request exit at the frame limit.
pub fn headless_logging_system(
    headless: Res<HeadlessConfig>,
    field: Option<Res<FieldState>>,
    mut exit: MessageWriter<bevy::app::AppExit>,
) {
    let Some(field) = field else {
        return;
    };
    let stats = field.0.stats();

    if stats.frame == 1 || stats.frame.is_multiple_of(HEADLESS_LOG_INTERVAL) {
        info!(
            "[Frame {}] {} | particles: {} | resting: {} | spawning: {}",
            stats.frame,
            field.0.variant().label(),
            stats.population,
            stats.resting,
            stats.spawning
        );
    }

    if stats.frame >= headless.frame_limit {
        info!(
            "Headless run finished after {} frames with {} particles ({} resting)",
            stats.frame, stats.population, stats.resting
        );
        exit.write(bevy::app::AppExit::Success);
    }
}
