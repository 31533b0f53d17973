//! Collision detection
//!
//! Collisions are immediate and terminal: no tolerance, no grace frames.

use super::bird::Bird;
use super::pipes::Pipe;
use crate::config::Tuning;

/// Axis-aligned rectangle, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Whether the bird hits the ceiling, the ground, or any pipe segment.
pub fn collides(bird: &Bird, ground_top: f64, pipes: &[Pipe], tuning: &Tuning) -> bool {
    let r = tuning.bird_radius;
    if bird.y - r <= 0.0 || bird.y + r >= ground_top {
        return true;
    }

    let bounds = bird.bounds(tuning);
    pipes.iter().any(|pipe| {
        bounds.intersects(&pipe.top_rect(tuning)) || bounds.intersects(&pipe.bottom_rect(tuning))
    })
}
