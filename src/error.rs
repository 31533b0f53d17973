use std::io;

use thiserror::Error;

/// Tuning values that cannot produce a playable world.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("flap impulse must be negative (upward), got {0}")]
    FlapNotUpward(f64),
    #[error("gap {gap} does not fit in playable height {playable}")]
    GapTooLarge { gap: f64, playable: f64 },
    #[error("no valid gap center: range [{min}, {max}] is empty")]
    EmptyGapRange { min: f64, max: f64 },
    #[error("spawn threshold {threshold} must be in (0, {world_width}]")]
    SpawnThreshold { threshold: f64, world_width: f64 },
    #[error("bird does not fit in the playable band at its start position")]
    BirdOutOfBounds,
    #[error("tilt bounds must satisfy nose-up {up} <= 0 <= nose-down {down}")]
    TiltBounds { up: f64, down: f64 },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid tuning: {0}")]
    Config(#[from] ConfigError),
}
