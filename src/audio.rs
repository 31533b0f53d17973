//! Sound effects, synthesized procedurally - no asset files needed.
//!
//! The output device is optional. If it cannot be opened the game runs
//! silently.

use fundsp::prelude32::{AudioUnit, lerp, lfo, saw, sine};
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle};

use crate::sim::GameEvent;

const SAMPLE_RATE: u32 = 44_100;

/// Open stream plus the handle sounds are played through. The stream must
/// outlive every sound.
struct Output {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

pub struct Audio {
    output: Option<Output>,
    flap: Vec<f32>,
    hit: Vec<f32>,
}

impl Audio {
    /// Open the default output device, or fall back to silence.
    pub fn open() -> Self {
        let output = match OutputStream::try_default() {
            Ok((stream, handle)) => Some(Output {
                _stream: stream,
                handle,
            }),
            Err(e) => {
                log::warn!("audio unavailable, sound disabled: {e}");
                None
            }
        };
        Self {
            output,
            flap: flap_samples(),
            hit: hit_samples(),
        }
    }

    /// No device; every `play` is a no-op.
    pub fn disabled() -> Self {
        Self {
            output: None,
            flap: Vec::new(),
            hit: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some()
    }

    /// Fire and forget. Events without a sound are ignored.
    pub fn play(&self, event: GameEvent) {
        let Some(output) = &self.output else {
            return;
        };
        let samples = match event {
            GameEvent::Flap => &self.flap,
            GameEvent::Hit => &self.hit,
            GameEvent::Scored(_) | GameEvent::Restarted => return,
        };
        let source = SamplesBuffer::new(1, SAMPLE_RATE, samples.clone());
        if let Err(e) = output.handle.play_raw(source) {
            log::warn!("failed to play {event:?}: {e}");
        }
    }
}

fn render(unit: &mut dyn AudioUnit, seconds: f64) -> Vec<f32> {
    unit.set_sample_rate(f64::from(SAMPLE_RATE));
    unit.reset();
    let len = (f64::from(SAMPLE_RATE) * seconds).round() as usize;
    (0..len).map(|_| unit.get_mono()).collect()
}

/// Short rising chirp.
fn flap_samples() -> Vec<f32> {
    let freq = lfo(|t: f32| lerp(520.0, 880.0, (t / 0.08).min(1.0)));
    let gain = lfo(|t: f32| lerp(0.2, 0.0, (t / 0.12).min(1.0)));
    let mut sound = (freq >> sine()) * gain;
    render(&mut sound, 0.12)
}

/// Falling sawtooth, 400 Hz to 80 Hz.
fn hit_samples() -> Vec<f32> {
    let freq = lfo(|t: f32| lerp(400.0, 80.0, (t / 0.4).min(1.0)));
    let gain = lfo(|t: f32| lerp(0.15, 0.0, (t / 0.5).min(1.0)));
    let mut sound = (freq >> saw()) * gain;
    render(&mut sound, 0.5)
}
