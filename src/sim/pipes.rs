//! Pipe obstacles and the field that spawns, scrolls and recycles them

use rand::Rng;

use super::collision::Rect;
use crate::config::Tuning;

/// A pair of top and bottom pipe segments around a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Spawn order within the field
    pub id: u32,
    /// Left edge
    pub x: f64,
    /// Gap center, fixed at spawn
    pub gap_y: f64,
    /// Set once the pipe's right edge is behind the bird
    pub passed: bool,
}

impl Pipe {
    pub fn right(&self, tuning: &Tuning) -> f64 {
        self.x + tuning.pipe_width
    }

    pub fn top_rect(&self, tuning: &Tuning) -> Rect {
        Rect::new(
            self.x,
            0.0,
            tuning.pipe_width,
            self.gap_y - tuning.pipe_gap / 2.0,
        )
    }

    pub fn bottom_rect(&self, tuning: &Tuning) -> Rect {
        let top = self.gap_y + tuning.pipe_gap / 2.0;
        Rect::new(self.x, top, tuning.pipe_width, tuning.ground_top() - top)
    }

    fn is_offscreen(&self, tuning: &Tuning) -> bool {
        self.right(tuning) < 0.0
    }
}

/// Ordered by spawn time, oldest (leftmost) first.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeField {
    pipes: Vec<Pipe>,
    next_id: u32,
}

impl PipeField {
    /// A field holding a single freshly spawned pipe.
    pub fn new<R: Rng>(rng: &mut R, tuning: &Tuning) -> Self {
        let mut field = Self {
            pipes: Vec::new(),
            next_id: 0,
        };
        field.spawn(rng, tuning);
        field
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    /// Append a pipe at the right edge with a uniformly random gap center.
    pub fn spawn<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning) {
        let gap_y = rng.random_range(tuning.gap_center_range());
        let id = self.next_id;
        self.next_id += 1;
        log::debug!("spawn pipe {id} gap_y={gap_y:.1}");
        self.pipes.push(Pipe {
            id,
            x: tuning.world_width,
            gap_y,
            passed: false,
        });
    }

    /// Advance one tick: scroll, spawn, evict, then score pass-throughs.
    ///
    /// Returns how many pipes the bird cleared this tick.
    pub fn update<R: Rng>(&mut self, bird_x: f64, rng: &mut R, tuning: &Tuning) -> u32 {
        for pipe in &mut self.pipes {
            pipe.x -= tuning.scroll_speed;
        }

        let spawn_due = self
            .pipes
            .last()
            .is_none_or(|newest| newest.x < tuning.world_width - tuning.spawn_threshold);
        if spawn_due {
            self.spawn(rng, tuning);
        }

        self.pipes.retain(|pipe| {
            let gone = pipe.is_offscreen(tuning);
            if gone {
                log::debug!("evict pipe {}", pipe.id);
            }
            !gone
        });

        self.score_passes(bird_x, tuning)
    }

    /// Mark every pipe whose right edge is strictly behind `bird_x` as passed.
    /// Each pipe counts at most once.
    pub fn score_passes(&mut self, bird_x: f64, tuning: &Tuning) -> u32 {
        let mut cleared = 0;
        for pipe in &mut self.pipes {
            if !pipe.passed && pipe.right(tuning) < bird_x {
                pipe.passed = true;
                cleared += 1;
                log::debug!("passed pipe {}", pipe.id);
            }
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_field_has_one_pipe_at_right_edge() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let field = PipeField::new(&mut rng, &tuning);
        assert_eq!(field.pipes().len(), 1);
        let pipe = &field.pipes()[0];
        assert_eq!(pipe.id, 0);
        assert_eq!(pipe.x, tuning.world_width);
        assert!(!pipe.passed);
        assert!(tuning.gap_center_range().contains(&pipe.gap_y));
    }

    #[test]
    fn test_segments_around_gap() {
        let tuning = Tuning::default();
        let pipe = Pipe {
            id: 0,
            x: 100.0,
            gap_y: 250.0,
            passed: false,
        };
        assert_eq!(pipe.top_rect(&tuning), Rect::new(100.0, 0.0, 70.0, 170.0));
        assert_eq!(
            pipe.bottom_rect(&tuning),
            Rect::new(100.0, 330.0, 70.0, 190.0)
        );
    }

    #[test]
    fn test_spawn_spacing() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut field = PipeField::new(&mut rng, &tuning);
        // The first pipe needs to get more than 200 px in: 67 ticks
        for _ in 0..66 {
            field.update(0.0, &mut rng, &tuning);
        }
        assert_eq!(field.pipes().len(), 1);
        field.update(0.0, &mut rng, &tuning);
        assert_eq!(field.pipes().len(), 2);
        assert_eq!(field.pipes()[1].x, tuning.world_width);
        assert_eq!(field.pipes()[1].id, 1);
    }

    #[test]
    fn test_pass_counted_once() {
        let tuning = Tuning::default();
        let mut field = PipeField {
            pipes: vec![Pipe {
                id: 0,
                x: 11.0,
                gap_y: 250.0,
                passed: false,
            }],
            next_id: 1,
        };
        // Right edge at 81, bird at 80: not yet
        assert_eq!(field.score_passes(80.0, &tuning), 0);
        field.pipes[0].x = 9.0;
        assert_eq!(field.score_passes(80.0, &tuning), 1);
        assert!(field.pipes[0].passed);
        assert_eq!(field.score_passes(80.0, &tuning), 0);
    }

    #[test]
    fn test_multiple_passes_in_one_call() {
        let tuning = Tuning::default();
        let mut field = PipeField {
            pipes: (0..3)
                .map(|id| Pipe {
                    id,
                    x: -60.0 + id as f64,
                    gap_y: 250.0,
                    passed: false,
                })
                .collect(),
            next_id: 3,
        };
        assert_eq!(field.score_passes(80.0, &tuning), 3);
    }

    #[test]
    fn test_offscreen_pipes_evicted() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = PipeField {
            pipes: vec![
                Pipe {
                    id: 0,
                    x: -68.0,
                    gap_y: 250.0,
                    passed: true,
                },
                Pipe {
                    id: 1,
                    x: 300.0,
                    gap_y: 250.0,
                    passed: false,
                },
            ],
            next_id: 2,
        };
        field.update(80.0, &mut rng, &tuning);
        // -71 + 70 < 0
        let ids: Vec<u32> = field.pipes().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);
    }

    proptest! {
        #[test]
        fn prop_spawned_gaps_leave_positive_segments(
            seed in any::<u64>(),
            margin in 0.001f64..150.0,
        ) {
            let tuning = Tuning {
                spawn_margin: margin,
                ..Default::default()
            };
            prop_assert!(tuning.validate().is_ok());
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut field = PipeField::new(&mut rng, &tuning);
            for _ in 0..64 {
                field.spawn(&mut rng, &tuning);
            }
            for pipe in field.pipes() {
                prop_assert!(tuning.gap_center_range().contains(&pipe.gap_y));
                prop_assert!(pipe.top_rect(&tuning).h > 0.0);
                prop_assert!(pipe.bottom_rect(&tuning).h > 0.0);
            }
        }
    }
}
