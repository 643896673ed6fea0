// Simulation settings. Every field defaults to the classic setup (1000 white-stroked
// disks of radius 5), so a JSON config like { "particle_count": 300, "seed": 42 }
// only needs the fields it changes.

use crate::color::{Color, Palette, DEFAULT_PALETTE};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub particle_count: usize,
    pub radius: f64,
    pub mass: f64,
    /// Initial velocity components are drawn from [-max_speed, max_speed).
    pub max_speed: f64,
    /// Extra gap required between spawned disks on top of touching distance.
    pub separation_margin: f64,
    /// Placement attempts per particle before spawning gives up.
    pub max_spawn_attempts: usize,
    /// Fixed seed for reproducible spawns; entropy when unset.
    pub seed: Option<u64>,
    /// RRGGBBAA colors
    pub palette: Vec<u32>,
    pub stroke_color: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            particle_count: 1000,
            radius: 5.0,
            mass: 1.0,
            max_speed: 2.5,
            separation_margin: 1.0,
            max_spawn_attempts: 10_000,
            seed: None,
            palette: DEFAULT_PALETTE.to_vec(),
            stroke_color: Color::WHITE.to_u32(),
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<SimConfig> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        if !self.max_speed.is_finite() || self.max_speed < 0.0 {
            return Err(Error::InvalidParam(
                "max_speed must be finite and >= 0".into(),
            ));
        }
        if !self.separation_margin.is_finite() || self.separation_margin < 0.0 {
            return Err(Error::InvalidParam(
                "separation_margin must be finite and >= 0".into(),
            ));
        }
        if self.max_spawn_attempts == 0 {
            return Err(Error::InvalidParam("max_spawn_attempts must be > 0".into()));
        }
        if self.palette.is_empty() {
            return Err(Error::InvalidParam("palette must not be empty".into()));
        }
        Ok(())
    }

    pub fn palette(&self) -> Result<Palette> {
        Palette::from_u32s(&self.palette)
    }

    pub fn stroke(&self) -> Color {
        Color::from_u32(self.stroke_color)
    }
}
