//! Flappy - a side-scrolling arcade game for the terminal
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bird physics, pipes, ground, collisions, game state)
//! - `config`: Tuning constants a game is built from
//! - `input`: Key events to per-tick input
//! - `audio`: Procedural sound effects
//! - `render`: Half-block terminal renderer

pub mod audio;
pub mod config;
pub mod error;
pub mod input;
pub mod render;
pub mod sim;

pub use config::Tuning;
pub use error::{ConfigError, Error};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate. Physics constants are per tick at this rate.
    pub const TICKS_PER_SECOND: u32 = 60;

    /// World dimensions
    pub const WORLD_WIDTH: f64 = 400.0;
    pub const WORLD_HEIGHT: f64 = 600.0;
    pub const GROUND_HEIGHT: f64 = 80.0;

    /// Pipe defaults
    pub const PIPE_GAP: f64 = 160.0;
    pub const PIPE_WIDTH: f64 = 70.0;
    /// Shared by pipes and ground (pixels/tick)
    pub const SCROLL_SPEED: f64 = 3.0;
    /// Next pipe spawns once the newest one is this far from the right edge
    pub const SPAWN_THRESHOLD: f64 = 200.0;
    /// Minimum pipe segment height above and below the gap
    pub const SPAWN_MARGIN: f64 = 70.0;

    /// Bird defaults
    pub const BIRD_X: f64 = 80.0;
    pub const BIRD_RADIUS: f64 = 18.0;
    pub const GRAVITY: f64 = 0.35;
    pub const FLAP_IMPULSE: f64 = -7.5;
    pub const FALL_CAP: f64 = 10.0;

    /// Tilt in degrees, negative is nose-up
    pub const NOSE_UP_MAX: f64 = -25.0;
    pub const NOSE_DOWN_MAX: f64 = 90.0;
    pub const TILT_UP_RATE: f64 = 5.0;
    pub const TILT_DOWN_RATE: f64 = 3.0;
}
