//! Tuning values a game is built from.
//!
//! All physics values are per tick at [`consts::TICKS_PER_SECOND`]; changing
//! the tick rate without rescaling them changes how the game feels.

use std::ops::RangeInclusive;

use crate::consts;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub world_width: f64,
    pub world_height: f64,
    pub ground_height: f64,
    pub pipe_gap: f64,
    pub pipe_width: f64,
    pub scroll_speed: f64,
    pub spawn_threshold: f64,
    pub spawn_margin: f64,
    pub bird_x: f64,
    pub bird_radius: f64,
    pub gravity: f64,
    pub flap_impulse: f64,
    pub fall_cap: f64,
    pub nose_up_max: f64,
    pub nose_down_max: f64,
    pub tilt_up_rate: f64,
    pub tilt_down_rate: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: consts::WORLD_WIDTH,
            world_height: consts::WORLD_HEIGHT,
            ground_height: consts::GROUND_HEIGHT,
            pipe_gap: consts::PIPE_GAP,
            pipe_width: consts::PIPE_WIDTH,
            scroll_speed: consts::SCROLL_SPEED,
            spawn_threshold: consts::SPAWN_THRESHOLD,
            spawn_margin: consts::SPAWN_MARGIN,
            bird_x: consts::BIRD_X,
            bird_radius: consts::BIRD_RADIUS,
            gravity: consts::GRAVITY,
            flap_impulse: consts::FLAP_IMPULSE,
            fall_cap: consts::FALL_CAP,
            nose_up_max: consts::NOSE_UP_MAX,
            nose_down_max: consts::NOSE_DOWN_MAX,
            tilt_up_rate: consts::TILT_UP_RATE,
            tilt_down_rate: consts::TILT_DOWN_RATE,
        }
    }
}

impl Tuning {
    /// Top of the ground strip; also the floor for collisions.
    pub fn ground_top(&self) -> f64 {
        self.world_height - self.ground_height
    }

    /// Bird start height (vertically centered in the world).
    pub fn bird_start_y(&self) -> f64 {
        self.world_height / 2.0
    }

    /// Inclusive range of gap centers that leave both pipe segments at least
    /// `spawn_margin` tall.
    pub fn gap_center_range(&self) -> RangeInclusive<f64> {
        let half = self.pipe_gap / 2.0;
        (half + self.spawn_margin)..=(self.ground_top() - half - self.spawn_margin)
    }

    /// Reject tuning that cannot produce a playable world.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("world width", self.world_width),
            ("world height", self.world_height),
            ("ground height", self.ground_height),
            ("pipe gap", self.pipe_gap),
            ("pipe width", self.pipe_width),
            ("scroll speed", self.scroll_speed),
            ("gravity", self.gravity),
            ("fall cap", self.fall_cap),
            ("bird radius", self.bird_radius),
            ("spawn margin", self.spawn_margin),
            ("tilt up rate", self.tilt_up_rate),
            ("tilt down rate", self.tilt_down_rate),
        ];
        for (name, value) in positive {
            // NaN fails this too
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if !(self.flap_impulse < 0.0) {
            return Err(ConfigError::FlapNotUpward(self.flap_impulse));
        }

        let playable = self.ground_top();
        if !(self.pipe_gap < playable) {
            return Err(ConfigError::GapTooLarge {
                gap: self.pipe_gap,
                playable,
            });
        }
        let range = self.gap_center_range();
        if !(range.start() <= range.end()) {
            return Err(ConfigError::EmptyGapRange {
                min: *range.start(),
                max: *range.end(),
            });
        }
        if !(self.spawn_threshold > 0.0 && self.spawn_threshold <= self.world_width) {
            return Err(ConfigError::SpawnThreshold {
                threshold: self.spawn_threshold,
                world_width: self.world_width,
            });
        }

        let y = self.bird_start_y();
        let fits = y - self.bird_radius > 0.0
            && y + self.bird_radius < playable
            && self.bird_x >= 0.0
            && self.bird_x <= self.world_width;
        if !fits {
            return Err(ConfigError::BirdOutOfBounds);
        }

        // Nose-up bound is negative, nose-down positive
        if !(self.nose_up_max <= 0.0 && self.nose_down_max >= 0.0) {
            return Err(ConfigError::TiltBounds {
                up: self.nose_up_max,
                down: self.nose_down_max,
            });
        }
        Ok(())
    }
}
