//! The particle field: one ordered collection of particles advanced one
//! frame at a time.
//!
//! ## Frame pass
//!
//! 1. Clear the canvas.
//! 2. Fill detection: if a resting particle's top reaches the top edge,
//!    spawning stops for the rest of the run.
//! 3. Spawn at most one particle just above the top edge.
//! 4. For every particle from last to first: forces → walls → integrate →
//!    overlap against every other live particle (ascending index) → draw →
//!    cull.
//!
//! Overlap resolution mutates both particles of a pair in place while the
//! pass is running, so later pairs see earlier corrections.  With three or
//! more particles touching in one frame the outcome depends on index order.

use crate::config::FieldConfig;
use crate::constants::*;
use crate::particle::{pair_mut, Particle};
use crate::policy::Variant;
use crate::render::{draw_particle, DrawSurface, NullSurface};
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Snapshot of field population for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldStats {
    pub frame: u64,
    pub population: usize,
    pub resting: usize,
    pub spawning: bool,
}

pub struct ParticleField {
    config: FieldConfig,
    bounds: Vec2,
    particles: Vec<Particle>,
    /// Live spawn probability; drops to zero for good once the canvas fills.
    spawn_rate: f32,
    rng: StdRng,
    frame: u64,
}

impl ParticleField {
    /// Build a field and seed it according to its variant.
    pub fn new(config: FieldConfig) -> Self {
        let mut field = Self::empty(config);
        field.seed();
        field
    }

    /// Build a field with no particles.
    pub fn empty(config: FieldConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let spawn_rate = if config.variant.spawns() {
            config.spawn_rate
        } else {
            0.0
        };
        Self {
            bounds: config.canvas_size(),
            spawn_rate,
            particles: Vec::new(),
            rng,
            frame: 0,
            config,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn spawn_rate(&self) -> f32 {
        self.spawn_rate
    }

    pub fn spawning_halted(&self) -> bool {
        self.spawn_rate == 0.0
    }

    /// Add a particle at the end of the collection.  Ignored at the cap.
    pub fn insert(&mut self, particle: Particle) -> bool {
        if self.particles.len() >= self.config.max_shapes {
            return false;
        }
        self.particles.push(particle);
        true
    }

    /// Follow a resized canvas.  Canvases too small to hold one particle
    /// are ignored.
    pub fn resize(&mut self, bounds: Vec2) {
        let min = self.config.shape_size * 2.0;
        if bounds.x > min && bounds.y > min {
            self.bounds = bounds;
        }
    }

    pub fn stats(&self) -> FieldStats {
        FieldStats {
            frame: self.frame,
            population: self.particles.len(),
            resting: self.particles.iter().filter(|p| p.is_resting()).count(),
            spawning: !self.spawning_halted(),
        }
    }

    // ── Setup ─────────────────────────────────────────────────────────────────

    fn seed(&mut self) {
        let size = self.config.shape_size;
        let palette = self.config.variant.palette();
        match self.config.variant {
            Variant::WaveField => {
                let spacing = size * GRID_SPACING_FACTOR;
                let mut y = self.bounds.y - size;
                'rows: while y >= 0.0 {
                    let mut x = size;
                    while x < self.bounds.x {
                        let p = Particle::random(Vec2::new(x, y), size, palette, &mut self.rng);
                        if !self.insert(p) {
                            break 'rows;
                        }
                        x += spacing;
                    }
                    y -= spacing;
                }
            }
            Variant::GravityFall => {
                for _ in 0..self.config.seed_count {
                    let x = self.rng.gen_range(size..self.bounds.x - size);
                    let y = self.rng.gen_range(size..self.bounds.y * 0.5);
                    let p = Particle::random(Vec2::new(x, y), size, palette, &mut self.rng);
                    if !self.insert(p) {
                        break;
                    }
                }
            }
        }
        info!(
            "Seeded {} field with {} particles",
            self.config.variant.label(),
            self.particles.len()
        );
    }

    // ── Frame ─────────────────────────────────────────────────────────────────

    /// Advance one frame without drawing.
    pub fn step(&mut self) {
        self.frame_with(&mut NullSurface);
    }

    /// Advance one frame, drawing each particle right after it is resolved.
    pub fn frame_with<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear(Color::BLACK);
        self.frame += 1;

        self.detect_fill();
        self.maybe_spawn();

        let variant = self.config.variant;
        let tightness = variant.tightness();
        let cutoff = variant.neighbor_radius(self.config.shape_size);

        for i in (0..self.particles.len()).rev() {
            {
                let p = &mut self.particles[i];
                variant.apply_forces(p, &self.config, self.bounds);
                variant.apply_boundaries(p, self.bounds);
                p.integrate();
            }

            match cutoff {
                Some(radius) => self.resolve_nearby(i, radius, tightness),
                None => self.resolve_all(i, tightness),
            }

            draw_particle(surface, &self.particles[i]);

            if variant.should_cull(&self.particles[i], self.bounds) {
                self.particles.remove(i);
            }
        }
    }

    /// Resolve particle `i` against every other particle.
    fn resolve_all(&mut self, i: usize, tightness: f32) {
        for j in 0..self.particles.len() {
            if i != j {
                let (a, b) = pair_mut(&mut self.particles, i, j);
                a.prevent_overlap(b, tightness);
            }
        }
    }

    /// Resolve particle `i` against particles within `radius` of it.
    ///
    /// Distances are measured at check time: a push earlier in this loop can
    /// bring a later `j` inside the cutoff or move it out.
    fn resolve_nearby(&mut self, i: usize, radius: f32, tightness: f32) {
        for j in 0..self.particles.len() {
            if i == j {
                continue;
            }
            let (a, b) = pair_mut(&mut self.particles, i, j);
            if a.position.distance(b.position) < radius {
                a.prevent_overlap(b, tightness);
            }
        }
    }

    /// Halt spawning for good once a resting particle reaches the top edge.
    fn detect_fill(&mut self) {
        if self.spawning_halted() {
            return;
        }
        let top = self
            .particles
            .iter()
            .filter(|p| p.is_resting())
            .map(|p| p.position.y)
            .fold(f32::INFINITY, f32::min);
        if top < self.config.shape_size {
            self.spawn_rate = 0.0;
            info!(
                "Canvas filled at frame {} with {} particles; spawning halted",
                self.frame,
                self.particles.len()
            );
        }
    }

    fn maybe_spawn(&mut self) {
        if self.spawning_halted() || self.particles.len() >= self.config.max_shapes {
            return;
        }
        if self.rng.gen::<f32>() >= self.spawn_rate {
            return;
        }
        let size = self.config.shape_size;
        let x = self.rng.gen_range(size..self.bounds.x - size);
        let palette = self.config.variant.palette();
        let p = Particle::random(Vec2::new(x, -size), size, palette, &mut self.rng);
        self.insert(p);
    }
}
