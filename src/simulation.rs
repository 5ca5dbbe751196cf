//! Simulation plugin and systems for Bevy ECS

use crate::config::FieldConfig;
use crate::field::ParticleField;
use crate::graphics::{self, GizmoSurface};
use bevy::prelude::*;
use bevy::window::{CursorOptions, PrimaryWindow};

/// The live particle field.
#[derive(Resource)]
pub struct FieldState(pub ParticleField);

/// Windowed simulation: builds the field, steps and draws it every frame.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FieldConfig>()
            .add_systems(
                Startup,
                (
                    setup_field_system,
                    graphics::fit_window_to_canvas,
                    graphics::configure_gizmo_lines,
                    hide_cursor_system.after(setup_field_system),
                ),
            )
            .add_systems(Update, (sync_canvas_size_system, field_frame_system).chain());
    }
}

/// Startup system: build the field from the (already loaded) config.
///
/// An invalid config is replaced by the defaults for its variant.
pub fn setup_field_system(mut commands: Commands, config: Res<FieldConfig>) {
    let config = match config.validate() {
        Ok(()) => config.clone(),
        Err(err) => {
            warn!("Invalid field config: {}; using defaults", err);
            FieldConfig::for_variant(config.variant)
        }
    };
    commands.insert_resource(FieldState(ParticleField::new(config)));
}

/// Hide the pointer over the canvas for variants that want it gone.
pub fn hide_cursor_system(
    field: Res<FieldState>,
    mut cursors: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    if !field.0.variant().hides_cursor() {
        return;
    }
    for mut cursor in cursors.iter_mut() {
        cursor.visible = false;
    }
}

/// Follow window resizes for variants whose canvas tracks the window.
pub fn sync_canvas_size_system(
    field: Option<ResMut<FieldState>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Some(mut field) = field else {
        return;
    };
    if !field.0.variant().tracks_window() {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let size = Vec2::new(window.width(), window.height());
    if size != field.0.bounds() {
        field.0.resize(size);
    }
}

/// Advance the field one frame and draw it with gizmos.
pub fn field_frame_system(
    field: Option<ResMut<FieldState>>,
    mut gizmos: Gizmos,
    mut clear_color: ResMut<ClearColor>,
) {
    let Some(mut field) = field else {
        return;
    };
    let canvas = field.0.bounds();
    let mut surface = GizmoSurface::new(&mut gizmos, canvas);
    field.0.frame_with(&mut surface);
    if let Some(background) = surface.background() {
        if clear_color.0 != background {
            clear_color.0 = background;
        }
    }
}

/// Advance the field one frame without drawing.
pub fn field_step_system(field: Option<ResMut<FieldState>>) {
    if let Some(mut field) = field {
        field.0.step();
    }
}
