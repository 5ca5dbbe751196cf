//! Centralised simulation and rendering constants.
//!
//! All tuneable defaults live here so they can be found and changed in one
//! place.  [`crate::config::FieldConfig::default`] reads from this module, and
//! `assets/field.toml` can override any of the runtime-configurable ones.

// ── Canvas ────────────────────────────────────────────────────────────────────

/// Default canvas width (pixels).
pub const CANVAS_WIDTH: f32 = 1920.0;

/// Default canvas height (pixels).  The wide, short strip suits the wave field.
pub const CANVAS_HEIGHT: f32 = 380.0;

// ── Physics ───────────────────────────────────────────────────────────────────

/// Downward acceleration per frame applied to moving particles in the
/// gravity-fall variant.
pub const GRAVITY: f32 = 0.3;

/// Per-frame velocity multiplier.  1.0 disables damping.
pub const FRICTION: f32 = 0.99;

/// Half-extent of every particle (pixels).
pub const SHAPE_SIZE: f32 = 10.0;

/// Horizontal wave force: `sin(age * WAVE_FORCE_RATE) * WAVE_FORCE_STRENGTH`.
pub const WAVE_FORCE_RATE: f32 = 0.02;
pub const WAVE_FORCE_STRENGTH: f32 = 0.8;

/// Pull toward the vertical centre of the canvas, per pixel of displacement.
pub const CENTER_RESTORE_COEFF: f32 = 0.00005;

/// Side-wall bounce multiplier for the gravity-fall variant.
pub const WALL_BOUNCE: f32 = -0.3;

/// Horizontal speed below which a side-wall hit zeroes velocity instead of
/// bouncing.  Stops particles from buzzing against the wall forever.
pub const WALL_REST_SPEED: f32 = 2.0;

// ── Overlap ───────────────────────────────────────────────────────────────────

/// Minimum separation as a fraction of the summed sizes, wave-field variant.
pub const WAVE_FIELD_TIGHTNESS: f32 = 0.85;

/// Minimum separation as a fraction of the summed sizes, gravity-fall variant.
pub const GRAVITY_FALL_TIGHTNESS: f32 = 0.9;

/// Wave-field pairs farther apart than `size * NEIGHBOR_RADIUS_FACTOR` are
/// skipped by the overlap pass.
pub const NEIGHBOR_RADIUS_FACTOR: f32 = 4.0;

// ── Population ────────────────────────────────────────────────────────────────

/// Per-frame probability of spawning one particle (gravity-fall variant).
pub const SPAWN_RATE: f32 = 0.5;

/// Hard population cap for both variants.
pub const MAX_SHAPES: usize = 3000;

/// Number of particles scattered at setup by the gravity-fall variant.
pub const SEED_COUNT: usize = 5;

/// Grid spacing of the wave-field setup, as a multiple of the shape size.
pub const GRID_SPACING_FACTOR: f32 = 2.5;

/// Particles must be older than this (frames) before they can be culled.
pub const CULL_MIN_AGE: u32 = 60;

/// Particles are culled once they fall this many sizes below the bottom edge.
pub const CULL_DEPTH_FACTOR: f32 = 2.0;

// ── Drawing ───────────────────────────────────────────────────────────────────

/// Horizontal sample spacing along a wave polyline (pixels).
pub const WAVE_SAMPLE_STEP: f32 = 2.0;

/// Phase scale inside the wave: `sin((x + age * frequency) * WAVE_PHASE_SCALE)`.
pub const WAVE_PHASE_SCALE: f32 = 0.05;

/// Stroke weight requested by the renderer (canvas pixels).
pub const STROKE_WEIGHT: f32 = 0.2;

/// Gizmo line width actually used on screen.  Sub-pixel gizmo lines vanish on
/// most displays, so the default is one pixel.
pub const GIZMO_LINE_WIDTH: f32 = 1.0;

/// Random ranges for per-particle drawing parameters.
pub const ROTATION_SPEED_RANGE: f32 = 0.05;
pub const AMPLITUDE_MIN: f32 = 5.0;
pub const AMPLITUDE_MAX: f32 = 15.0;
pub const FREQUENCY_MIN: f32 = 0.05;
pub const FREQUENCY_MAX: f32 = 0.15;
pub const LINE_LENGTH_MIN: f32 = 1.2;
pub const LINE_LENGTH_MAX: f32 = 2.5;

// ── Colour bands (0–255 sRGB channel ranges) ─────────────────────────────────

/// Cumulative probability thresholds for the gold and orange bands; the
/// remainder falls into the red band.
pub const GOLD_BAND_CHANCE: f32 = 0.4;
pub const ORANGE_BAND_CHANCE: f32 = 0.7;

pub const GOLD_BAND: [(f32, f32); 3] = [(200.0, 230.0), (160.0, 200.0), (80.0, 120.0)];
pub const ORANGE_BAND: [(f32, f32); 3] = [(220.0, 245.0), (140.0, 180.0), (60.0, 100.0)];
pub const RED_BAND: [(f32, f32); 3] = [(210.0, 240.0), (100.0, 140.0), (80.0, 120.0)];

/// Solid stroke colour of the gravity-fall variant (0–255 sRGB).
pub const GRAVITY_FALL_STROKE: [f32; 3] = [255.0, 255.0, 255.0];

// ── Headless mode ─────────────────────────────────────────────────────────────

/// Frames between stats lines in headless mode.
pub const HEADLESS_LOG_INTERVAL: u64 = 60;
