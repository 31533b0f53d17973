//! Scrolling ground strip

use crate::config::Tuning;

/// Two world-wide segments that leapfrog each other for seamless scroll.
#[derive(Debug, Clone, PartialEq)]
pub struct Ground {
    pub x1: f64,
    pub x2: f64,
}

impl Ground {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x1: 0.0,
            x2: tuning.world_width,
        }
    }

    pub fn update(&mut self, tuning: &Tuning) {
        let w = tuning.world_width;
        self.x1 -= tuning.scroll_speed;
        self.x2 -= tuning.scroll_speed;
        if self.x1 + w < 0.0 {
            self.x1 = self.x2 + w;
        }
        if self.x2 + w < 0.0 {
            self.x2 = self.x1 + w;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_scroll_together() {
        let tuning = Tuning::default();
        let mut ground = Ground::new(&tuning);
        ground.update(&tuning);
        assert_eq!(ground.x1, -3.0);
        assert_eq!(ground.x2, 397.0);
    }

    #[test]
    fn test_exited_segment_wraps_behind_other() {
        let tuning = Tuning::default();
        let mut ground = Ground::new(&tuning);
        // x1 reaches -402 on tick 134
        for _ in 0..133 {
            ground.update(&tuning);
        }
        assert_eq!(ground.x1, -399.0);
        ground.update(&tuning);
        assert_eq!(ground.x2, -2.0);
        assert_eq!(ground.x1, 398.0);
    }

    #[test]
    fn test_no_seam_over_long_run() {
        let tuning = Tuning::default();
        let mut ground = Ground::new(&tuning);
        for _ in 0..10_000 {
            ground.update(&tuning);
            let (left, right) = if ground.x1 < ground.x2 {
                (ground.x1, ground.x2)
            } else {
                (ground.x2, ground.x1)
            };
            assert_eq!(right - left, tuning.world_width);
            assert!(left <= 0.0);
            // Together the segments cover [0, world_width]
            assert!(right >= 0.0 && right <= tuning.world_width);
        }
    }
}
