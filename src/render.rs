//! Drawing contract between the field and whatever displays it.
//!
//! The field only speaks in canvas-space primitives (transform stack,
//! stroke settings, polylines).  [`crate::graphics::GizmoSurface`] maps them
//! onto Bevy gizmos; [`NullSurface`] discards them for headless runs.

use crate::constants::*;
use crate::particle::Particle;
use bevy::prelude::*;

/// A 2D canvas with a transform stack and polyline drawing.
pub trait DrawSurface {
    /// Fill the whole canvas with `color`.
    fn clear(&mut self, color: Color);

    fn push(&mut self);
    fn pop(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, angle: f32);

    fn stroke(&mut self, color: Color);
    fn stroke_weight(&mut self, weight: f32);
    fn no_fill(&mut self);

    fn begin_shape(&mut self);
    fn vertex(&mut self, point: Vec2);
    fn end_shape(&mut self);
}

/// Surface that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl DrawSurface for NullSurface {
    fn clear(&mut self, _color: Color) {}
    fn push(&mut self) {}
    fn pop(&mut self) {}
    fn translate(&mut self, _offset: Vec2) {}
    fn rotate(&mut self, _angle: f32) {}
    fn stroke(&mut self, _color: Color) {}
    fn stroke_weight(&mut self, _weight: f32) {}
    fn no_fill(&mut self) {}
    fn begin_shape(&mut self) {}
    fn vertex(&mut self, _point: Vec2) {}
    fn end_shape(&mut self) {}
}

/// Local-space samples of a particle's wave line.
///
/// x runs from `-size * line_length` up to (not including)
/// `size * line_length` in `WAVE_SAMPLE_STEP` steps; y is
/// `sin((x + age * frequency) * WAVE_PHASE_SCALE) * amplitude`.
pub fn wave_points(p: &Particle) -> impl Iterator<Item = Vec2> + '_ {
    let style = p.style();
    let half = p.size() * style.line_length;
    let count = ((half * 2.0) / WAVE_SAMPLE_STEP).ceil().max(0.0) as usize;
    let phase = p.age() as f32 * style.frequency;
    (0..count).map(move |k| {
        let x = -half + k as f32 * WAVE_SAMPLE_STEP;
        let y = ((x + phase) * WAVE_PHASE_SCALE).sin() * style.amplitude;
        Vec2::new(x, y)
    })
}

/// Draw one particle as an unfilled wavy polyline in its own rotated frame.
pub fn draw_particle<S: DrawSurface + ?Sized>(surface: &mut S, p: &Particle) {
    surface.push();
    surface.translate(p.position);
    surface.rotate(p.rotation());

    surface.stroke(p.style().color);
    surface.stroke_weight(STROKE_WEIGHT);
    surface.no_fill();

    surface.begin_shape();
    for point in wave_points(p) {
        surface.vertex(point);
    }
    surface.end_shape();

    surface.pop();
}
