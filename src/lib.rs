// Disks bouncing around a rectangle, colliding elastically with each other and the edges.
// The physics lives in plain Rust so it can be tested natively; the `web` module
// hooks it up to an html canvas when built for wasm.

pub mod color;
pub mod config;
pub mod error;
pub mod particle;
pub mod particle_set;
pub mod simulation;
pub mod surface;

#[cfg(target_arch = "wasm32")]
mod utils;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use color::{Color, Palette};
pub use config::SimConfig;
pub use error::{Error, Result};
pub use particle::Particle;
pub use particle_set::{ParticleSet, TickStats};
pub use simulation::Simulation;
pub use surface::{FrameClock, Surface, Viewport};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(all(target_arch = "wasm32", feature = "wee_alloc"))]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;
