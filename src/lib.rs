//! Wavefall: wavy-line particles drifting and stacking under toy physics.
//!
//! The core ([`field`], [`particle`], [`policy`]) is plain Rust over Bevy's
//! math types and draws through the [`render::DrawSurface`] trait; the
//! [`simulation`] and [`headless`] plugins wire it into a Bevy app.

pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod graphics;
pub mod headless;
pub mod particle;
pub mod policy;
pub mod render;
pub mod simulation;
