use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use std::env;

use wavefall::config::{self, FieldConfig};
use wavefall::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use wavefall::graphics;
use wavefall::headless::{HeadlessConfig, HeadlessPlugin, HEADLESS_ENV};
use wavefall::simulation::{self, SimulationPlugin};

fn main() {
    // Check for headless mode
    let headless = env::var(HEADLESS_ENV).ok();

    let mut app = App::new();

    if let Some(frames) = headless {
        let headless_config = HeadlessConfig::from_env_value(&frames);
        app.add_plugins((MinimalPlugins, LogPlugin::default()))
            .insert_resource(FieldConfig::default())
            .add_plugins(HeadlessPlugin {
                config: headless_config,
            })
            .add_systems(
                Startup,
                config::load_field_config.before(simulation::setup_field_system),
            );
        println!("Running headless for {} frames", headless_config.frame_limit);
    } else {
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Wavefall".into(),
                resolution: WindowResolution::new(CANVAS_WIDTH as u32, CANVAS_HEIGHT as u32),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // Compiled defaults; load_field_config overwrites them from
        // assets/field.toml (if present) before the field is built.
        .insert_resource(FieldConfig::default())
        .add_plugins(SimulationPlugin)
        .add_systems(
            Startup,
            (
                // Load config first so every other startup system sees the final values.
                config::load_field_config
                    .before(simulation::setup_field_system)
                    .before(graphics::fit_window_to_canvas)
                    .before(graphics::configure_gizmo_lines),
                graphics::setup_camera,
            ),
        );
    }

    app.run();
}
