// Drives a ParticleSet once per frame: reads the latest viewport size from the host,
// clears the surface and ticks every particle

use crate::config::SimConfig;
use crate::error::Result;
use crate::particle_set::{ParticleSet, TickStats};
use crate::surface::{FrameClock, Surface, Viewport};
use log::debug;

pub struct Simulation {
    config: SimConfig,
    particles: Option<ParticleSet>,
    running: bool,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Simulation {
        Simulation {
            config,
            particles: None,
            running: false,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Spawns `particle_count` particles in a `width` x `height` viewport and starts running.
    /// On error the previous state is kept as is.
    pub fn start(&mut self, particle_count: usize, width: f64, height: f64) -> Result<()> {
        let config = SimConfig {
            particle_count,
            ..self.config.clone()
        };
        let particles = ParticleSet::spawn(&config, width, height)?;
        self.particles = Some(particles);
        self.running = true;
        debug!("simulation started with {} particles", particle_count);
        Ok(())
    }

    /// Stops further ticks. Calling it again is harmless.
    pub fn stop(&mut self) {
        if self.running {
            debug!("simulation stopped");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn particles(&self) -> Option<&ParticleSet> {
        self.particles.as_ref()
    }

    /// Runs one frame if the simulation is running. Returns the tick's stats, or None when stopped.
    pub fn frame<V, S>(&mut self, viewport: &V, surface: &mut S) -> Option<TickStats>
    where
        V: Viewport + ?Sized,
        S: Surface + ?Sized,
    {
        if !self.running {
            return None;
        }
        let particles = self.particles.as_mut()?;
        let (width, height) = viewport.viewport_size();
        surface.clear(width, height);
        Some(particles.tick(width, height, surface))
    }

    /// Ticks once per frame until stopped or until the clock reports shutdown.
    /// Returns the number of frames run.
    pub fn run<C, S>(&mut self, clock: &mut C, surface: &mut S) -> usize
    where
        C: FrameClock + ?Sized,
        S: Surface + ?Sized,
    {
        let mut frames = 0;
        while self.running && clock.next_frame() {
            if self.frame(&*clock, surface).is_some() {
                frames += 1;
            }
        }
        frames
    }
}
