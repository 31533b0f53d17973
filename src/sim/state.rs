//! Game state machine
//!
//! Owns every mutable simulation entity for the current run. The renderer
//! only ever sees a [`Snapshot`].

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bird::Bird;
use super::collision::collides;
use super::ground::Ground;
use super::pipes::{Pipe, PipeField};
use super::score::Score;
use crate::config::Tuning;
use crate::error::ConfigError;

/// Input gathered during one poll (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// At least one flap key this tick
    pub flap: bool,
    /// Restart request, honored only after game over
    pub reset: bool,
    /// Handled by the loop driver, ignored by the simulation
    pub quit: bool,
}

/// Events produced by a tick, for the audio collaborator and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Flap,
    Hit,
    /// Pipes cleared this tick
    Scored(u32),
    Restarted,
}

/// Everything that moves during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub bird: Bird,
    pub pipes: PipeField,
    pub ground: Ground,
}

impl World {
    fn new(rng: &mut Pcg32, tuning: &Tuning) -> Self {
        Self {
            bird: Bird::new(tuning),
            pipes: PipeField::new(rng, tuning),
            ground: Ground::new(tuning),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Playing(World),
    /// Frozen at the moment of the hit
    GameOver(World),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Playing,
    GameOver,
}

/// Read-only view handed to the renderer each frame.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub tuning: &'a Tuning,
    pub bird: &'a Bird,
    pub pipes: &'a [Pipe],
    pub ground: &'a Ground,
    pub score: Score,
    pub phase: PhaseKind,
}

pub struct Game {
    tuning: Tuning,
    rng: Pcg32,
    score: Score,
    phase: Phase,
}

impl Game {
    /// Validate `tuning` and start the first run.
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let world = World::new(&mut rng, &tuning);
        log::info!("run started (seed {seed})");
        Ok(Self {
            tuning,
            rng,
            score: Score::default(),
            phase: Phase::Playing(world),
        })
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn phase(&self) -> PhaseKind {
        match self.phase {
            Phase::Playing(_) => PhaseKind::Playing,
            Phase::GameOver(_) => PhaseKind::GameOver,
        }
    }

    pub fn world(&self) -> &World {
        match &self.phase {
            Phase::Playing(world) | Phase::GameOver(world) => world,
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let world = self.world();
        Snapshot {
            tuning: &self.tuning,
            bird: &world.bird,
            pipes: world.pipes.pipes(),
            ground: &world.ground,
            score: self.score,
            phase: self.phase(),
        }
    }

    /// Advance the game by one fixed tick.
    pub fn tick(&mut self, input: &TickInput) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if let Phase::GameOver(_) = self.phase {
            if input.flap || input.reset {
                self.restart();
                events.push(GameEvent::Restarted);
            }
            return events;
        }

        let tuning = &self.tuning;
        let Phase::Playing(world) = &mut self.phase else {
            return events;
        };

        if input.flap && world.bird.flap(tuning) {
            events.push(GameEvent::Flap);
        }

        world.bird.update(tuning);
        let cleared = world.pipes.update(world.bird.x, &mut self.rng, tuning);
        world.ground.update(tuning);

        if cleared > 0 {
            self.score.add(cleared);
            events.push(GameEvent::Scored(cleared));
        }

        if collides(&world.bird, tuning.ground_top(), world.pipes.pipes(), tuning) {
            world.bird.alive = false;
            let frozen = world.clone();
            self.score.finish_run();
            log::info!(
                "run over: score {} (high {})",
                self.score.current,
                self.score.high
            );
            self.phase = Phase::GameOver(frozen);
            events.push(GameEvent::Hit);
        }

        events
    }

    /// Rebuild the run from scratch. The high score and RNG stream carry over.
    fn restart(&mut self) {
        self.score.start_run();
        self.phase = Phase::Playing(World::new(&mut self.rng, &self.tuning));
        log::info!("run started");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAP: TickInput = TickInput {
        flap: true,
        reset: false,
        quit: false,
    };
    const RESET: TickInput = TickInput {
        flap: false,
        reset: true,
        quit: false,
    };

    fn playing_world(game: &mut Game) -> &mut World {
        match &mut game.phase {
            Phase::Playing(world) => world,
            Phase::GameOver(_) => panic!("expected Playing"),
        }
    }

    #[test]
    fn test_initial_state() {
        let game = Game::new(Tuning::default(), 7).unwrap();
        assert_eq!(game.phase(), PhaseKind::Playing);
        assert_eq!(game.score(), Score::default());
        let world = game.world();
        assert_eq!(world.bird, Bird::new(game.tuning()));
        assert_eq!(world.pipes.pipes().len(), 1);
        assert_eq!(world.ground, Ground::new(game.tuning()));
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = Tuning {
            pipe_gap: 1000.0,
            ..Default::default()
        };
        assert!(Game::new(tuning, 0).is_err());
    }

    #[test]
    fn test_flap_emits_event() {
        let mut game = Game::new(Tuning::default(), 1).unwrap();
        let events = game.tick(&FLAP);
        assert_eq!(events, vec![GameEvent::Flap]);
        assert!(game.world().bird.velocity < 0.0);
    }

    #[test]
    fn test_reset_ignored_while_playing() {
        let mut game = Game::new(Tuning::default(), 1).unwrap();
        game.tick(&TickInput::default());
        let before = game.world().clone();
        let events = game.tick(&RESET);
        assert!(events.is_empty());
        assert_eq!(game.phase(), PhaseKind::Playing);
        // Advanced normally, not rebuilt
        assert!(game.world().bird.y > before.bird.y);
        assert_eq!(game.world().ground.x1, before.ground.x1 - 3.0);
    }

    #[test]
    fn test_just_above_ground_falls_into_game_over() {
        let mut game = Game::new(Tuning::default(), 1).unwrap();
        let ground_top = game.tuning().ground_top();
        let radius = game.tuning().bird_radius;
        {
            let world = playing_world(&mut game);
            world.bird.y = ground_top - radius - 0.5;
            world.bird.velocity = 2.0;
        }
        game.score.add(4);
        let events = game.tick(&TickInput::default());
        assert_eq!(events, vec![GameEvent::Hit]);
        assert_eq!(game.phase(), PhaseKind::GameOver);
        assert!(!game.world().bird.alive);
        assert_eq!(game.score().high, 4);
    }

    #[test]
    fn test_game_over_is_frozen() {
        let mut game = Game::new(Tuning::default(), 1).unwrap();
        while game.phase() == PhaseKind::Playing {
            game.tick(&TickInput::default());
        }
        let frozen = game.world().clone();
        for _ in 0..10 {
            assert!(game.tick(&TickInput::default()).is_empty());
        }
        assert_eq!(game.world(), &frozen);
    }

    #[test]
    fn test_scoring_during_play() {
        let mut game = Game::new(Tuning::default(), 1).unwrap();
        let mut scored = Vec::new();
        // Right edge of the first pipe gets behind x = 80 on tick 131
        for tick in 1..=140 {
            let world = playing_world(&mut game);
            world.bird.y = world.pipes.pipes()[0].gap_y;
            world.bird.velocity = 0.0;
            for event in game.tick(&TickInput::default()) {
                if let GameEvent::Scored(n) = event {
                    scored.push((tick, n));
                }
            }
            assert_eq!(game.phase(), PhaseKind::Playing);
        }
        assert_eq!(scored, vec![(131, 1)]);
        assert_eq!(game.score().current, 1);
    }

    /// Keep the bird level in the first pipe's gap for `ticks` ticks.
    fn glide_through_gap(game: &mut Game, ticks: u32) {
        for _ in 0..ticks {
            let world = playing_world(game);
            world.bird.y = world.pipes.pipes()[0].gap_y;
            world.bird.velocity = 0.0;
            assert!(game.tick(&TickInput::default()).is_empty());
        }
    }

    #[test]
    fn test_flying_into_pipe_ends_run() {
        let mut game = Game::new(Tuning::default(), 11).unwrap();
        let tuning = *game.tuning();
        glide_through_gap(&mut game, 110);

        // After tick 111 the pipe spans x 67..137, over the bird
        {
            let world = playing_world(&mut game);
            let gap_top = world.pipes.pipes()[0].gap_y - tuning.pipe_gap / 2.0;
            world.bird.y = gap_top - 25.0;
            assert!(world.bird.y - tuning.bird_radius > 0.0);
        }
        let events = game.tick(&TickInput::default());
        assert_eq!(events, vec![GameEvent::Hit]);
        assert_eq!(game.phase(), PhaseKind::GameOver);
        assert!(!game.world().bird.alive);
        assert_eq!(game.score(), Score { current: 0, high: 0 });
    }

    #[test]
    fn test_score_and_hit_on_same_tick() {
        let mut game = Game::new(Tuning::default(), 11).unwrap();
        let tuning = *game.tuning();
        glide_through_gap(&mut game, 130);

        // Tick 131 clears the first pipe while the bird reaches the floor
        {
            let world = playing_world(&mut game);
            world.bird.y = tuning.ground_top() - tuning.bird_radius - 0.5;
            world.bird.velocity = 2.0;
        }
        let events = game.tick(&TickInput::default());
        assert_eq!(events, vec![GameEvent::Scored(1), GameEvent::Hit]);
        assert_eq!(game.phase(), PhaseKind::GameOver);
        assert_eq!(game.score(), Score { current: 1, high: 1 });
        assert!(game.world().pipes.pipes()[0].passed);
    }

    #[test]
    fn test_restart_keeps_high_score() {
        let mut game = Game::new(Tuning::default(), 9).unwrap();
        game.score.add(3);
        while game.phase() == PhaseKind::Playing {
            game.tick(&TickInput::default());
        }
        assert_eq!(game.score().high, 3);

        let events = game.tick(&FLAP);
        assert_eq!(events, vec![GameEvent::Restarted]);
        assert_eq!(game.phase(), PhaseKind::Playing);
        assert_eq!(game.score(), Score { current: 0, high: 3 });
        // The restarting flap is not applied to the new bird
        assert_eq!(game.world().bird, Bird::new(game.tuning()));
    }
}
