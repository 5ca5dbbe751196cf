//! The two behaviour variants, as one tagged policy.
//!
//! | Variant        | Forces                              | Walls                            | Population              |
//! |----------------|-------------------------------------|----------------------------------|-------------------------|
//! | `WaveField`    | sideways sine wave + centre pull    | clamp all four edges             | dense grid at setup     |
//! | `GravityFall`  | constant gravity                    | floor settles, lossy side bounce | trickle spawn + culling |
//!
//! Both share overlap resolution and rendering.

use crate::config::FieldConfig;
use crate::constants::*;
use crate::error::FieldError;
use crate::particle::{Palette, Particle};
use bevy::prelude::*;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Lines drift in an ambient sine wave and fill the whole canvas.
    #[default]
    WaveField,
    /// Lines rain in from the top and pile up on the floor.
    GravityFall,
}

impl FromStr for Variant {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wave_field" | "wave" | "a" => Ok(Variant::WaveField),
            "gravity_fall" | "gravity" | "b" => Ok(Variant::GravityFall),
            other => Err(FieldError::UnknownVariant(other.to_string())),
        }
    }
}

impl Variant {
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Variant::WaveField => "wave_field",
            Variant::GravityFall => "gravity_fall",
        }
    }

    /// Fraction of the summed sizes two particles may approach to.
    pub fn tightness(self) -> f32 {
        match self {
            Variant::WaveField => WAVE_FIELD_TIGHTNESS,
            Variant::GravityFall => GRAVITY_FALL_TIGHTNESS,
        }
    }

    /// Pairs farther apart than this are not checked for overlap.
    /// `None` means every pair is checked.
    pub fn neighbor_radius(self, size: f32) -> Option<f32> {
        match self {
            Variant::WaveField => Some(size * NEIGHBOR_RADIUS_FACTOR),
            Variant::GravityFall => None,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Variant::WaveField => Palette::Embers,
            Variant::GravityFall => {
                let [r, g, b] = GRAVITY_FALL_STROKE.map(|c| c / 255.0);
                Palette::Solid(Color::srgb(r, g, b))
            }
        }
    }

    /// Whether new particles trickle in at the top every frame.
    pub fn spawns(self) -> bool {
        matches!(self, Variant::GravityFall)
    }

    /// Whether the cursor should be hidden over the canvas.
    pub fn hides_cursor(self) -> bool {
        matches!(self, Variant::WaveField)
    }

    /// Whether the canvas follows the window size.
    pub fn tracks_window(self) -> bool {
        matches!(self, Variant::GravityFall)
    }

    /// Accumulate this frame's forces and apply friction.
    ///
    /// Resting particles are skipped in both variants so their velocity stays
    /// exactly zero.
    pub fn apply_forces(self, p: &mut Particle, config: &FieldConfig, bounds: Vec2) {
        if p.resting {
            return;
        }
        match self {
            Variant::WaveField => {
                let wave = (p.age as f32 * WAVE_FORCE_RATE).sin() * WAVE_FORCE_STRENGTH;
                let from_center = p.position.y - bounds.y * 0.5;
                p.push_force(Vec2::new(wave, -from_center * CENTER_RESTORE_COEFF));
            }
            Variant::GravityFall => {
                p.push_force(Vec2::new(0.0, config.gravity));
            }
        }
        p.velocity *= config.friction;
    }

    /// Keep the particle inside the canvas.
    pub fn apply_boundaries(self, p: &mut Particle, bounds: Vec2) {
        let size = p.size;
        match self {
            Variant::WaveField => {
                if p.position.y - size < 0.0 {
                    p.position.y = size;
                    p.velocity.y = 0.0;
                }
                if p.position.y + size > bounds.y {
                    p.position.y = bounds.y - size;
                    p.velocity.y = 0.0;
                }
                if p.position.x - size < 0.0 {
                    p.position.x = size;
                    p.velocity.x = -p.velocity.x;
                }
                if p.position.x + size > bounds.x {
                    p.position.x = bounds.x - size;
                    p.velocity.x = -p.velocity.x;
                }
            }
            Variant::GravityFall => {
                if p.position.y + size >= bounds.y {
                    p.position.y = bounds.y - size;
                    if !p.resting {
                        p.settle();
                    }
                }
                if p.position.x - size < 0.0 {
                    p.position.x = size;
                    wall_bounce(p);
                }
                if p.position.x + size > bounds.x {
                    p.position.x = bounds.x - size;
                    wall_bounce(p);
                }
            }
        }
    }

    /// Whether a particle has left the canvas for good.
    pub fn should_cull(self, p: &Particle, bounds: Vec2) -> bool {
        match self {
            Variant::WaveField => false,
            Variant::GravityFall => {
                p.position.y > bounds.y + p.size * CULL_DEPTH_FACTOR && p.age > CULL_MIN_AGE
            }
        }
    }
}

fn wall_bounce(p: &mut Particle) {
    if p.velocity.x.abs() < WALL_REST_SPEED {
        p.velocity.x = 0.0;
    } else {
        p.velocity.x *= WALL_BOUNCE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::WaveStyle;

    const BOUNDS: Vec2 = Vec2::new(400.0, 300.0);

    fn at(x: f32, y: f32, vel: Vec2) -> Particle {
        Particle::new(Vec2::new(x, y), SHAPE_SIZE, 0.0, 0.02, WaveStyle::default()).with_velocity(vel)
    }

    fn in_bounds(p: &Particle) -> bool {
        let s = p.size();
        p.position.x >= s
            && p.position.x <= BOUNDS.x - s
            && p.position.y >= s
            && p.position.y <= BOUNDS.y - s
    }

    #[test]
    fn variant_parses_from_env_spellings() {
        assert_eq!("wave_field".parse::<Variant>().unwrap(), Variant::WaveField);
        assert_eq!(" Gravity_Fall ".parse::<Variant>().unwrap(), Variant::GravityFall);
        assert_eq!("b".parse::<Variant>().unwrap(), Variant::GravityFall);
        assert!(matches!(
            "sideways".parse::<Variant>(),
            Err(FieldError::UnknownVariant(_))
        ));
    }

    // ── Forces ────────────────────────────────────────────────────────────────

    #[test]
    fn wave_force_follows_age_and_pulls_toward_centre() {
        let config = FieldConfig::default();
        let mut p = at(200.0, 250.0, Vec2::ZERO);
        p.age = 40;
        Variant::WaveField.apply_forces(&mut p, &config, BOUNDS);
        let expected_x = (40.0_f32 * WAVE_FORCE_RATE).sin() * WAVE_FORCE_STRENGTH;
        assert!((p.acceleration.x - expected_x).abs() < 1e-6);
        // Below centre (y grows down) → pulled up.
        assert!(p.acceleration.y < 0.0);
        assert!((p.acceleration.y + 100.0 * CENTER_RESTORE_COEFF).abs() < 1e-7);
    }

    #[test]
    fn friction_damps_velocity() {
        let config = FieldConfig::default();
        let mut p = at(200.0, 150.0, Vec2::new(10.0, -10.0));
        Variant::WaveField.apply_forces(&mut p, &config, BOUNDS);
        assert!((p.velocity().x - 10.0 * config.friction).abs() < 1e-5);
        assert!((p.velocity().y + 10.0 * config.friction).abs() < 1e-5);
    }

    #[test]
    fn gravity_only_acts_on_moving_particles() {
        let config = FieldConfig::default();
        let mut moving = at(200.0, 100.0, Vec2::ZERO);
        Variant::GravityFall.apply_forces(&mut moving, &config, BOUNDS);
        assert_eq!(moving.acceleration, Vec2::new(0.0, config.gravity));

        let mut resting = at(200.0, 100.0, Vec2::ZERO);
        resting.settle();
        Variant::GravityFall.apply_forces(&mut resting, &config, BOUNDS);
        assert_eq!(resting.acceleration, Vec2::ZERO);
        assert_eq!(resting.velocity(), Vec2::ZERO);
    }

    // ── Wave-field walls ──────────────────────────────────────────────────────

    #[test]
    fn wave_field_clamps_every_edge() {
        let cases = [
            (at(-5.0, 150.0, Vec2::new(-3.0, 1.0)), Vec2::new(3.0, 1.0)),
            (at(405.0, 150.0, Vec2::new(3.0, 1.0)), Vec2::new(-3.0, 1.0)),
            (at(200.0, 2.0, Vec2::new(1.0, -3.0)), Vec2::new(1.0, 0.0)),
            (at(200.0, 299.0, Vec2::new(1.0, 3.0)), Vec2::new(1.0, 0.0)),
        ];
        for (mut p, expected_vel) in cases {
            Variant::WaveField.apply_boundaries(&mut p, BOUNDS);
            assert!(in_bounds(&p), "position {:?} escaped", p.position);
            assert_eq!(p.velocity(), expected_vel);
            assert!(!p.is_resting());
        }
    }

    #[test]
    fn wave_field_leaves_interior_particles_alone() {
        let mut p = at(200.0, 150.0, Vec2::new(2.0, 2.0));
        Variant::WaveField.apply_boundaries(&mut p, BOUNDS);
        assert_eq!(p.position, Vec2::new(200.0, 150.0));
        assert_eq!(p.velocity(), Vec2::new(2.0, 2.0));
    }

    // ── Gravity-fall walls ────────────────────────────────────────────────────

    #[test]
    fn floor_contact_settles() {
        let mut p = at(200.0, 295.0, Vec2::new(1.0, 6.0));
        Variant::GravityFall.apply_boundaries(&mut p, BOUNDS);
        assert!(p.is_resting());
        assert_eq!(p.position.y, BOUNDS.y - SHAPE_SIZE);
        assert_eq!(p.velocity(), Vec2::ZERO);
        assert_eq!(p.rotation_speed(), 0.0);
    }

    #[test]
    fn fast_wall_hit_bounces_with_loss() {
        let mut p = at(-1.0, 100.0, Vec2::new(-10.0, 0.0));
        Variant::GravityFall.apply_boundaries(&mut p, BOUNDS);
        assert_eq!(p.position.x, SHAPE_SIZE);
        assert!((p.velocity().x - 3.0).abs() < 1e-6);

        let mut p = at(395.0, 100.0, Vec2::new(10.0, 0.0));
        Variant::GravityFall.apply_boundaries(&mut p, BOUNDS);
        assert_eq!(p.position.x, BOUNDS.x - SHAPE_SIZE);
        assert!((p.velocity().x + 3.0).abs() < 1e-6);
    }

    #[test]
    fn slow_wall_hit_stops_instead_of_bouncing() {
        let mut p = at(395.0, 100.0, Vec2::new(1.5, 0.0));
        Variant::GravityFall.apply_boundaries(&mut p, BOUNDS);
        assert_eq!(p.velocity().x, 0.0);
    }

    // ── Culling ───────────────────────────────────────────────────────────────

    #[test]
    fn cull_needs_both_depth_and_age() {
        let deep = BOUNDS.y + SHAPE_SIZE * CULL_DEPTH_FACTOR + 1.0;
        let mut young_deep = at(100.0, deep, Vec2::ZERO);
        young_deep.age = CULL_MIN_AGE;
        assert!(!Variant::GravityFall.should_cull(&young_deep, BOUNDS));

        let mut old_shallow = at(100.0, BOUNDS.y + SHAPE_SIZE, Vec2::ZERO);
        old_shallow.age = CULL_MIN_AGE + 1;
        assert!(!Variant::GravityFall.should_cull(&old_shallow, BOUNDS));

        let mut old_deep = at(100.0, deep, Vec2::ZERO);
        old_deep.age = CULL_MIN_AGE + 1;
        assert!(Variant::GravityFall.should_cull(&old_deep, BOUNDS));
        assert!(!Variant::WaveField.should_cull(&old_deep, BOUNDS));
    }
}
