// Simple particle struct to keep track of individual position, velocity, size, mass and color

use crate::color::Color;
use crate::error::{Error, Result};
use vecmath::{vec2_dot, vec2_scale, Vector2};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
    pub mass: f64,
    pub color: Color,
}

impl Particle {
    /// Builds a particle, refusing anything that would turn into NaN physics later.
    pub fn new(
        pos: Vector2<f64>,
        vel: Vector2<f64>,
        radius: f64,
        mass: f64,
        color: Color,
    ) -> Result<Particle> {
        let particle = Particle {
            pos,
            vel,
            radius,
            mass,
            color,
        };
        particle.validate()?;
        Ok(particle)
    }

    /// Checks radius and mass are finite and positive, position and velocity finite.
    /// The fields are public, so anything handed over as a whole set goes through this again.
    pub fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        if !self.pos.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !self.vel.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        Ok(())
    }

    pub fn momentum(&self) -> Vector2<f64> {
        vec2_scale(self.vel, self.mass)
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * vec2_dot(self.vel, self.vel)
    }
}
