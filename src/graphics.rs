use crate::config::FieldConfig;
use crate::render::DrawSurface;
use bevy::math::Affine2;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Setup camera for 2D rendering
pub fn setup_camera(mut commands: Commands) {
    // Default Camera2d maps one world unit to one window pixel
    commands.spawn(Camera2d);
    info!("[SETUP] Camera spawned");
}

/// Size the primary window to the configured canvas.
pub fn fit_window_to_canvas(
    config: Res<FieldConfig>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    for mut window in windows.iter_mut() {
        window
            .resolution
            .set(config.canvas_width, config.canvas_height);
    }
}

/// Apply the configured line width to the default gizmo group.
pub fn configure_gizmo_lines(config: Res<FieldConfig>, mut store: ResMut<GizmoConfigStore>) {
    let (gizmo_config, _) = store.config_mut::<DefaultGizmoConfigGroup>();
    gizmo_config.line.width = config.line_width;
}

/// [`DrawSurface`] backed by Bevy immediate-mode gizmos.
///
/// Transforms are tracked in canvas space (origin top-left, y down).  Each
/// finished polyline is mapped into world space (origin centre, y up) and
/// emitted as one `linestrip_2d`.
///
/// Stroke weight is a per-group gizmo setting, so [`configure_gizmo_lines`]
/// applies it once at startup and `stroke_weight` is a no-op here.
pub struct GizmoSurface<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
    canvas: Vec2,
    current: Affine2,
    stack: Vec<Affine2>,
    color: Color,
    path: Vec<Vec2>,
    background: Option<Color>,
}

impl<'a, 'w, 's> GizmoSurface<'a, 'w, 's> {
    pub fn new(gizmos: &'a mut Gizmos<'w, 's>, canvas: Vec2) -> Self {
        Self {
            gizmos,
            canvas,
            current: Affine2::IDENTITY,
            stack: Vec::new(),
            color: Color::WHITE,
            path: Vec::new(),
            background: None,
        }
    }

    /// Background requested by the last `clear`, for the caller to apply to
    /// `ClearColor`.
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    fn to_world(&self, canvas_point: Vec2) -> Vec2 {
        Vec2::new(
            canvas_point.x - self.canvas.x * 0.5,
            self.canvas.y * 0.5 - canvas_point.y,
        )
    }
}

impl DrawSurface for GizmoSurface<'_, '_, '_> {
    fn clear(&mut self, color: Color) {
        self.background = Some(color);
    }

    fn push(&mut self) {
        self.stack.push(self.current);
    }

    fn pop(&mut self) {
        self.current = self.stack.pop().unwrap_or(Affine2::IDENTITY);
    }

    fn translate(&mut self, offset: Vec2) {
        self.current = self.current * Affine2::from_translation(offset);
    }

    fn rotate(&mut self, angle: f32) {
        self.current = self.current * Affine2::from_angle(angle);
    }

    fn stroke(&mut self, color: Color) {
        self.color = color;
    }

    fn stroke_weight(&mut self, _weight: f32) {}

    fn no_fill(&mut self) {}

    fn begin_shape(&mut self) {
        self.path.clear();
    }

    fn vertex(&mut self, point: Vec2) {
        let canvas_point = self.current.transform_point2(point);
        let world = self.to_world(canvas_point);
        self.path.push(world);
    }

    fn end_shape(&mut self) {
        if self.path.len() >= 2 {
            self.gizmos.linestrip_2d(self.path.drain(..), self.color);
        } else {
            self.path.clear();
        }
    }
}
