// Error type for building a simulation. Once a particle set exists, ticking it can't fail.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A particle or configuration value breaks an invariant (non-positive mass, NaN position...)
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Rejection sampling ran out of attempts before finding a free spot.
    #[error("failed to place particle {index} without overlap after {attempts} attempts; try fewer particles or a larger viewport")]
    Placement { index: usize, attempts: usize },

    #[error("failed to parse config: {0}")]
    Config(#[from] serde_json::Error),
}
