//! The wavy-line particle: physical state, drawing parameters, and the
//! pairwise overlap / resting rules shared by both variants.

use crate::constants::*;
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Per-particle drawing parameters, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveStyle {
    /// Peak vertical offset of the wave (pixels).
    pub amplitude: f32,
    /// How fast the wave phase travels with age.
    pub frequency: f32,
    /// Half-length of the line as a multiple of the particle size.
    pub line_length: f32,
    pub color: Color,
}

impl WaveStyle {
    /// Draw amplitude, frequency and length from their configured ranges and
    /// the colour from `palette`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, palette: Palette) -> Self {
        Self {
            amplitude: rng.gen_range(AMPLITUDE_MIN..AMPLITUDE_MAX),
            frequency: rng.gen_range(FREQUENCY_MIN..FREQUENCY_MAX),
            line_length: rng.gen_range(LINE_LENGTH_MIN..LINE_LENGTH_MAX),
            color: palette.pick(rng),
        }
    }
}

impl Default for WaveStyle {
    fn default() -> Self {
        Self {
            amplitude: (AMPLITUDE_MIN + AMPLITUDE_MAX) * 0.5,
            frequency: (FREQUENCY_MIN + FREQUENCY_MAX) * 0.5,
            line_length: (LINE_LENGTH_MIN + LINE_LENGTH_MAX) * 0.5,
            color: Color::WHITE,
        }
    }
}

/// Stroke colour policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Palette {
    /// Sunset-lit rice: gold, orange or red, each channel drawn within its band.
    Embers,
    /// Every particle gets the same colour.
    Solid(Color),
}

impl Palette {
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        match *self {
            Palette::Solid(color) => color,
            Palette::Embers => {
                let roll: f32 = rng.gen();
                let band = if roll < GOLD_BAND_CHANCE {
                    GOLD_BAND
                } else if roll < ORANGE_BAND_CHANCE {
                    ORANGE_BAND
                } else {
                    RED_BAND
                };
                let [r, g, b] = band.map(|(lo, hi)| rng.gen_range(lo..hi) / 255.0);
                Color::srgb(r, g, b)
            }
        }
    }
}

/// A single wavy-line particle.
///
/// Positions are canvas coordinates: origin top-left, y grows downward.
/// `resting` is one-way; once set, velocity and rotation speed stay zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) acceleration: Vec2,
    pub(crate) size: f32,
    pub(crate) age: u32,
    pub(crate) resting: bool,
    pub(crate) rotation: f32,
    pub(crate) rotation_speed: f32,
    style: WaveStyle,
}

impl Particle {
    /// A moving particle with zero velocity and the given orientation and style.
    pub fn new(
        position: Vec2,
        size: f32,
        rotation: f32,
        rotation_speed: f32,
        style: WaveStyle,
    ) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            size,
            age: 0,
            resting: false,
            rotation,
            rotation_speed,
            style,
        }
    }

    /// A moving particle with random orientation, spin and style.
    pub fn random<R: Rng + ?Sized>(
        position: Vec2,
        size: f32,
        palette: Palette,
        rng: &mut R,
    ) -> Self {
        let rotation = rng.gen_range(0.0..TAU);
        let rotation_speed = rng.gen_range(-ROTATION_SPEED_RANGE..ROTATION_SPEED_RANGE);
        let style = WaveStyle::random(rng, palette);
        Self::new(position, size, rotation, rotation_speed, style)
    }

    /// Builder used to give a fresh particle an initial velocity.
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        if !self.resting {
            self.velocity = velocity;
        }
        self
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn is_resting(&self) -> bool {
        self.resting
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    pub fn style(&self) -> &WaveStyle {
        &self.style
    }

    /// Accumulate a force for this frame.
    pub fn push_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// Freeze the particle for good.
    pub fn settle(&mut self) {
        self.velocity = Vec2::ZERO;
        self.acceleration = Vec2::ZERO;
        self.rotation_speed = 0.0;
        self.resting = true;
    }

    /// Euler step.  Resting particles only age.
    pub fn integrate(&mut self) {
        if !self.resting {
            self.velocity += self.acceleration;
            self.position += self.velocity;
            self.acceleration = Vec2::ZERO;
            self.rotation += self.rotation_speed;
        }
        self.age += 1;
    }

    /// Minimum centre distance this pair may sit at.
    pub fn min_distance(&self, other: &Particle, tightness: f32) -> f32 {
        (self.size + other.size) * tightness
    }

    /// Push this particle and `other` apart if they overlap, and settle this
    /// one if it has landed on top of a resting `other`.
    ///
    /// Coincident centres are skipped since no push direction exists.
    /// Returns `true` if the pair was overlapping.
    pub fn prevent_overlap(&mut self, other: &mut Particle, tightness: f32) -> bool {
        let distance = self.position.distance(other.position);
        let min_distance = self.min_distance(other, tightness);
        if !(distance < min_distance && distance > 0.0) {
            return false;
        }

        let delta = other.position - self.position;
        let angle = delta.y.atan2(delta.x);
        let overlap = min_distance - distance;
        let dir = Vec2::new(angle.cos(), angle.sin());

        match (self.resting, other.resting) {
            (false, false) => {
                self.position -= dir * overlap * 0.5;
                other.position += dir * overlap * 0.5;
            }
            (false, true) => self.position -= dir * overlap,
            (true, false) => other.position += dir * overlap,
            (true, true) => {}
        }

        // `other` lies below this one when the angle points down the screen.
        if other.resting && !self.resting && angle > 0.0 && angle < PI {
            let bottom = self.position.y + self.size;
            let other_top = other.position.y - other.size;
            if bottom >= other_top {
                self.settle();
            }
        }

        true
    }
}

/// Borrow two distinct elements of a slice mutably.
pub fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    assert_ne!(a, b, "pair_mut needs two distinct indices");
    if a < b {
        let (lo, hi) = items.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), SHAPE_SIZE, 0.0, 0.03, WaveStyle::default())
    }

    fn min_dist() -> f32 {
        SHAPE_SIZE * 2.0 * WAVE_FIELD_TIGHTNESS
    }

    // ── Construction ──────────────────────────────────────────────────────────

    #[test]
    fn random_particle_draws_within_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let p = Particle::random(Vec2::ZERO, SHAPE_SIZE, Palette::Embers, &mut rng);
            assert!((0.0..TAU).contains(&p.rotation()));
            assert!(p.rotation_speed().abs() <= ROTATION_SPEED_RANGE);
            let s = p.style();
            assert!((AMPLITUDE_MIN..AMPLITUDE_MAX).contains(&s.amplitude));
            assert!((FREQUENCY_MIN..FREQUENCY_MAX).contains(&s.frequency));
            assert!((LINE_LENGTH_MIN..LINE_LENGTH_MAX).contains(&s.line_length));
            assert!(!p.is_resting());
            assert_eq!(p.age(), 0);
            assert_eq!(p.velocity(), Vec2::ZERO);
        }
    }

    #[test]
    fn ember_colours_fall_in_one_of_the_bands() {
        let mut rng = StdRng::seed_from_u64(11);
        let in_band = |c: [f32; 3], band: &[(f32, f32); 3]| {
            c.iter()
                .zip(band.iter())
                .all(|(v, (lo, hi))| *v >= lo - 0.5 && *v <= hi + 0.5)
        };
        for _ in 0..300 {
            let s = Palette::Embers.pick(&mut rng).to_srgba();
            let c = [s.red * 255.0, s.green * 255.0, s.blue * 255.0];
            assert!(
                in_band(c, &GOLD_BAND) || in_band(c, &ORANGE_BAND) || in_band(c, &RED_BAND),
                "colour {c:?} matches no band"
            );
        }
    }

    #[test]
    fn solid_palette_is_constant() {
        let mut rng = StdRng::seed_from_u64(3);
        let color = Color::srgb(1.0, 0.5, 0.25);
        for _ in 0..10 {
            assert_eq!(Palette::Solid(color).pick(&mut rng), color);
        }
    }

    // ── Integration ───────────────────────────────────────────────────────────

    #[test]
    fn integrate_applies_acceleration_then_clears_it() {
        let mut p = at(50.0, 50.0).with_velocity(Vec2::new(1.0, 0.0));
        p.push_force(Vec2::new(0.0, 2.0));
        p.integrate();
        assert_eq!(p.velocity(), Vec2::new(1.0, 2.0));
        assert_eq!(p.position, Vec2::new(51.0, 52.0));
        assert_eq!(p.acceleration, Vec2::ZERO);
        assert!((p.rotation() - 0.03).abs() < 1e-6);
        assert_eq!(p.age(), 1);
    }

    #[test]
    fn resting_particle_ages_but_does_not_move() {
        let mut p = at(50.0, 50.0);
        p.settle();
        p.push_force(Vec2::new(3.0, 3.0));
        for frame in 1..=5 {
            p.integrate();
            assert_eq!(p.age(), frame);
        }
        assert_eq!(p.position, Vec2::new(50.0, 50.0));
        assert_eq!(p.velocity(), Vec2::ZERO);
        assert_eq!(p.rotation_speed(), 0.0);
    }

    #[test]
    fn with_velocity_is_ignored_once_resting() {
        let mut p = at(0.0, 0.0);
        p.settle();
        let p = p.with_velocity(Vec2::new(5.0, 5.0));
        assert_eq!(p.velocity(), Vec2::ZERO);
    }

    // ── Overlap resolution ────────────────────────────────────────────────────

    #[test]
    fn moving_pair_splits_the_correction_evenly() {
        let start = min_dist() * 0.5;
        let mut a = at(100.0, 100.0);
        let mut b = at(100.0 + start, 100.0);
        assert!(a.prevent_overlap(&mut b, WAVE_FIELD_TIGHTNESS));

        let d = a.position.distance(b.position);
        assert!((d - min_dist()).abs() < 1e-4, "distance {d} != {}", min_dist());
        let half = (min_dist() - start) * 0.5;
        assert!((a.position.x - (100.0 - half)).abs() < 1e-4);
        assert!((b.position.x - (100.0 + start + half)).abs() < 1e-4);
    }

    #[test]
    fn only_the_moving_particle_is_pushed_when_other_rests() {
        let mut a = at(100.0, 100.0);
        let mut b = at(110.0, 100.0);
        b.settle();
        a.prevent_overlap(&mut b, WAVE_FIELD_TIGHTNESS);
        assert_eq!(b.position, Vec2::new(110.0, 100.0));
        assert!((a.position.distance(b.position) - min_dist()).abs() < 1e-4);
    }

    #[test]
    fn resting_self_pushes_moving_other() {
        let mut a = at(100.0, 100.0);
        a.settle();
        let mut b = at(110.0, 100.0);
        a.prevent_overlap(&mut b, WAVE_FIELD_TIGHTNESS);
        assert_eq!(a.position, Vec2::new(100.0, 100.0));
        assert!((a.position.distance(b.position) - min_dist()).abs() < 1e-4);
    }

    #[test]
    fn resting_pair_is_left_alone() {
        let mut a = at(100.0, 100.0);
        let mut b = at(105.0, 100.0);
        a.settle();
        b.settle();
        assert!(a.prevent_overlap(&mut b, WAVE_FIELD_TIGHTNESS));
        assert_eq!(a.position, Vec2::new(100.0, 100.0));
        assert_eq!(b.position, Vec2::new(105.0, 100.0));
    }

    #[test]
    fn coincident_centres_are_skipped() {
        let mut a = at(100.0, 100.0);
        let mut b = at(100.0, 100.0);
        assert!(!a.prevent_overlap(&mut b, WAVE_FIELD_TIGHTNESS));
        assert_eq!(a.position, b.position);
    }

    #[test]
    fn distant_pair_is_untouched() {
        let mut a = at(0.0, 0.0);
        let mut b = at(100.0, 0.0);
        assert!(!a.prevent_overlap(&mut b, WAVE_FIELD_TIGHTNESS));
        assert_eq!(a.position, Vec2::ZERO);
    }

    #[test]
    fn separation_grows_unless_both_rest() {
        let offsets = [
            Vec2::new(3.0, 1.0),
            Vec2::new(-4.0, 6.0),
            Vec2::new(0.5, -8.0),
            Vec2::new(-12.0, -2.0),
        ];
        for offset in offsets {
            for (rest_a, rest_b) in [(false, false), (true, false), (false, true)] {
                let mut a = at(200.0, 200.0);
                let mut b = at(200.0 + offset.x, 200.0 + offset.y);
                if rest_a {
                    a.settle();
                }
                if rest_b {
                    b.settle();
                }
                let before = a.position.distance(b.position);
                a.prevent_overlap(&mut b, WAVE_FIELD_TIGHTNESS);
                let after = a.position.distance(b.position);
                assert!(after > before, "{offset:?} {rest_a}/{rest_b}: {before} -> {after}");
            }
        }
    }

    #[test]
    fn landing_on_a_resting_particle_settles() {
        let mut falling = at(100.0, 90.0).with_velocity(Vec2::new(0.0, 4.0));
        let mut floor = at(100.0, 100.0);
        floor.settle();
        falling.prevent_overlap(&mut floor, GRAVITY_FALL_TIGHTNESS);
        assert!(falling.is_resting());
        assert_eq!(falling.velocity(), Vec2::ZERO);
        assert_eq!(falling.rotation_speed(), 0.0);
    }

    #[test]
    fn resting_particle_above_does_not_settle_one_below() {
        let mut below = at(100.0, 110.0);
        let mut above = at(100.0, 100.0);
        above.settle();
        below.prevent_overlap(&mut above, GRAVITY_FALL_TIGHTNESS);
        assert!(!below.is_resting());
    }

    #[test]
    fn side_by_side_contact_does_not_settle() {
        let mut mover = at(100.0, 100.0);
        let mut rested = at(110.0, 100.0);
        rested.settle();
        mover.prevent_overlap(&mut rested, GRAVITY_FALL_TIGHTNESS);
        assert!(!mover.is_resting(), "angle 0 is not strictly inside (0, π)");
    }

    #[test]
    fn pair_mut_returns_requested_order() {
        let mut v = vec![1, 2, 3, 4];
        let (a, b) = pair_mut(&mut v, 3, 1);
        assert_eq!((*a, *b), (4, 2));
        let (a, b) = pair_mut(&mut v, 0, 2);
        assert_eq!((*a, *b), (1, 3));
    }
}
