//! Player bird physics

use super::collision::Rect;
use crate::config::Tuning;

/// The player-controlled bird. `x` is fixed after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    /// Positive is downward
    pub velocity: f64,
    /// Degrees, negative is nose-up
    pub angle: f64,
    pub alive: bool,
}

impl Bird {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.bird_x,
            y: tuning.bird_start_y(),
            velocity: 0.0,
            angle: 0.0,
            alive: true,
        }
    }

    /// Replace the current velocity with the upward impulse.
    ///
    /// Returns `false` (and changes nothing) if the bird is dead.
    pub fn flap(&mut self, tuning: &Tuning) -> bool {
        if !self.alive {
            return false;
        }
        self.velocity = tuning.flap_impulse;
        true
    }

    /// Integrate one tick of gravity and tilt.
    pub fn update(&mut self, tuning: &Tuning) {
        self.velocity += tuning.gravity;
        self.y += self.velocity;
        // Cap is applied after the position step
        self.velocity = self.velocity.min(tuning.fall_cap);

        if self.velocity < 0.0 {
            self.angle = (self.angle - tuning.tilt_up_rate).max(tuning.nose_up_max);
        } else {
            self.angle = (self.angle + tuning.tilt_down_rate).min(tuning.nose_down_max);
        }
    }

    /// Axis-aligned square of half-extent `bird_radius` around the center.
    pub fn bounds(&self, tuning: &Tuning) -> Rect {
        let r = tuning.bird_radius;
        Rect::new(self.x - r, self.y - r, r * 2.0, r * 2.0)
    }
}
