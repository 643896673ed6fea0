// Owns every particle in the simulation and advances them one frame at a time:
// brute force collision checks between every pair, elastic collision response,
// bouncing off the viewport edges, then moving and drawing each particle.

use crate::color::Color;
use crate::config::SimConfig;
use crate::error::{Error, Result};
use crate::particle::Particle;
use crate::surface::Surface;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use vecmath::{vec2_add, vec2_dot, vec2_len, vec2_sub, Vector2};
extern crate nalgebra_glm as glm;

/// What happened during one tick, mostly for logging.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Pairs that were approaching and had their velocities exchanged.
    pub collisions: usize,
    /// Velocity components flipped by the viewport edges.
    pub reflections: usize,
}

#[derive(Clone, Debug)]
pub struct ParticleSet {
    particles: Vec<Particle>,
    stroke: Color,
}

impl ParticleSet {
    /// Places `config.particle_count` particles at random inside a `width` x `height` viewport.
    ///
    /// Positions are rejection sampled so no two disks start closer than
    /// `2 * radius + separation_margin`. Errors if the viewport can't hold a
    /// single disk, if the count could never fit at that spacing, or if a particle
    /// can't be placed within `max_spawn_attempts`.
    pub fn spawn(config: &SimConfig, width: f64, height: f64) -> Result<ParticleSet> {
        config.validate()?;
        let radius = config.radius;
        if !width.is_finite() || !height.is_finite() || width < 2.0 * radius || height < 2.0 * radius
        {
            return Err(Error::InvalidParam(format!(
                "viewport {}x{} is too small for particles of radius {}",
                width, height, radius
            )));
        }
        let palette = config.palette()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let min_dist = 2.0 * radius + config.separation_margin;
        let min_dist_sq = min_dist * min_dist;
        // disks of diameter min_dist around each center can't overlap and all sit inside
        // the spawn area grown by min_dist / 2 on every side, so their areas bound the count
        let max_fit = ((width - 2.0 * radius + min_dist) * (height - 2.0 * radius + min_dist)
            / (PI * min_dist_sq / 4.0))
            .floor();
        if config.particle_count as f64 > max_fit {
            return Err(Error::InvalidParam(format!(
                "{} particles of radius {} can't fit in a {}x{} viewport (at most {})",
                config.particle_count, radius, width, height, max_fit
            )));
        }
        let mut particles: Vec<Particle> = Vec::with_capacity(config.particle_count);
        for index in 0..config.particle_count {
            let mut attempts = 0;
            let pos = loop {
                if attempts >= config.max_spawn_attempts {
                    return Err(Error::Placement { index, attempts });
                }
                attempts += 1;
                let pos: Vector2<f64> = [
                    radius + rng.gen::<f64>() * (width - 2.0 * radius),
                    radius + rng.gen::<f64>() * (height - 2.0 * radius),
                ];
                let crowded = particles.iter().any(|p| {
                    let d = vec2_sub(p.pos, pos);
                    vec2_dot(d, d) < min_dist_sq
                });
                if !crowded {
                    break pos;
                }
            };
            let vel = [
                (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed,
                (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed,
            ];
            let color = palette.pick(&mut rng);
            particles.push(Particle::new(pos, vel, radius, config.mass, color)?);
        }
        debug!(
            "spawned {} particles in a {}x{} viewport",
            particles.len(),
            width,
            height
        );

        Ok(ParticleSet {
            particles,
            stroke: config.stroke(),
        })
    }

    /// Wraps an already built set of particles after re-checking each one.
    /// Overlap between them is the caller's business.
    pub fn from_particles(particles: Vec<Particle>, stroke: Color) -> Result<ParticleSet> {
        for p in &particles {
            p.validate()?;
        }
        Ok(ParticleSet { particles, stroke })
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn total_momentum(&self) -> Vector2<f64> {
        self.particles
            .iter()
            .fold([0.0, 0.0], |sum, p| vec2_add(sum, p.momentum()))
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.kinetic_energy()).sum()
    }

    /// Advances every particle by one frame and draws it.
    ///
    /// Particles are handled in order. Collisions are resolved the moment they are
    /// found, so a particle later in the list sees velocities already changed by
    /// earlier ones in the same tick.
    pub fn tick<S: Surface + ?Sized>(&mut self, width: f64, height: f64, surface: &mut S) -> TickStats {
        let mut stats = TickStats::default();
        let count = self.particles.len();
        for i in 0..count {
            for j in 0..count {
                if i == j {
                    continue;
                }
                let (p, q) = (&self.particles[i], &self.particles[j]);
                let distance = vec2_len(vec2_sub(p.pos, q.pos));
                if distance - (p.radius + q.radius) < 0.0 && self.resolve(i, j) {
                    stats.collisions += 1;
                }
            }

            let p = &mut self.particles[i];
            if p.pos[0] + p.radius > width || p.pos[0] - p.radius < 0.0 {
                p.vel[0] = -p.vel[0];
                stats.reflections += 1;
            }
            if p.pos[1] + p.radius > height || p.pos[1] - p.radius < 0.0 {
                p.vel[1] = -p.vel[1];
                stats.reflections += 1;
            }
            p.pos = vec2_add(p.pos, p.vel);

            surface.draw_circle(p.pos[0], p.pos[1], p.radius, p.color, self.stroke);
        }
        trace!(
            "tick: {} collisions, {} reflections",
            stats.collisions,
            stats.reflections
        );
        stats
    }

    /// Elastic collision between particles `a` and `b`.
    ///
    /// Both velocities are rotated into the frame of the line between the centers,
    /// the 1D elastic formula is applied to the normal component, and the result is
    /// rotated back; the tangential component is untouched. Pairs already moving
    /// apart are left alone. Afterwards `a` takes `b`'s color if it ended up faster
    /// than `b` on either axis (`b` never takes `a`'s).
    ///
    /// Returns true if the velocities were updated.
    pub fn resolve(&mut self, a: usize, b: usize) -> bool {
        if a == b {
            return false;
        }
        let mut p = self.particles[a];
        let mut q = self.particles[b];

        let vel_diff = vec2_sub(p.vel, q.vel);
        let dist = vec2_sub(q.pos, p.pos);
        if vec2_dot(vel_diff, dist) < 0.0 {
            return false;
        }

        let angle = -dist[1].atan2(dist[0]);
        let (m1, m2) = (p.mass, q.mass);
        let total = m1 + m2;

        let u1 = rotate(p.vel, angle);
        let u2 = rotate(q.vel, angle);
        let v1 = glm::vec2(u1.x * (m1 - m2) / total + u2.x * 2.0 * m2 / total, u1.y);
        let v2 = glm::vec2(u2.x * (m2 - m1) / total + u1.x * 2.0 * m1 / total, u2.y);

        let final1 = glm::rotate_vec2(&v1, -angle);
        let final2 = glm::rotate_vec2(&v2, -angle);
        p.vel = [final1.x, final1.y];
        q.vel = [final2.x, final2.y];

        if p.vel[0] > q.vel[0] || p.vel[1] > q.vel[1] {
            p.color = q.color;
        }

        self.particles[a] = p;
        self.particles[b] = q;
        true
    }
}

fn rotate(vel: Vector2<f64>, angle: f64) -> glm::TVec2<f64> {
    glm::rotate_vec2(&glm::vec2(vel[0], vel[1]), angle)
}
