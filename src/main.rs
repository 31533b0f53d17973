use crossterm::{
    cursor,
    event::{self, Event},
    execute, terminal,
};
use std::io::{self, Stdout, Write, stdout};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use flappy_sim::audio::Audio;
use flappy_sim::consts::TICKS_PER_SECOND;
use flappy_sim::render::Renderer;
use flappy_sim::sim::{Game, TickInput};
use flappy_sim::{Error, Tuning};

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("flappy-sim: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Error> {
    let seed: u64 = rand::random();
    // Bad tuning is fatal before the terminal is touched
    let mut game = Game::new(Tuning::default(), seed)?;
    let audio = Audio::open();

    let (cols, rows) = terminal::size()?;
    log::info!("starting: seed {seed}, terminal {cols}x{rows}, sound {}", audio.is_enabled());
    let mut renderer = Renderer::new(cols, rows, game.tuning(), seed.rotate_left(32));

    let mut out = stdout();
    enter(&mut out)?;
    let result = game_loop(&mut out, &mut game, &mut renderer, &audio);
    let restored = leave(&mut out);
    result?;
    restored?;
    Ok(())
}

fn enter(out: &mut impl Write) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    enter_screen(out)
}

/// Switch to the game screen; on failure undo whatever already took effect.
fn enter_screen(out: &mut impl Write) -> io::Result<()> {
    let entered = execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
    );
    if entered.is_err() {
        if let Err(e) = leave(out) {
            log::warn!("terminal restore after failed setup: {e}");
        }
    }
    entered
}

fn leave(out: &mut impl Write) -> io::Result<()> {
    execute!(
        out,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()
}

fn game_loop(
    out: &mut Stdout,
    game: &mut Game,
    renderer: &mut Renderer,
    audio: &Audio,
) -> io::Result<()> {
    let tick_dur = Duration::from_secs(1) / TICKS_PER_SECOND;

    loop {
        let tick_start = Instant::now();

        // Input
        let mut input = TickInput::default();
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            if let Event::Resize(c, r) = ev {
                renderer.resize(c, r);
            }
            input.record(&ev);
        }
        if input.quit {
            log::info!("quit (high score {})", game.score().high);
            return Ok(());
        }

        // Update
        for ev in game.tick(&input) {
            audio.play(ev);
        }

        // Render
        renderer.draw(&game.snapshot());
        renderer.present(out)?;

        // Tick pacing
        let elapsed = tick_start.elapsed();
        if elapsed < tick_dur {
            std::thread::sleep(tick_dur - elapsed);
        }
    }
}
