use std::io::Cursor;
use std::sync::Arc;

use fundsp::prelude64::*;
use rodio::buffer::SamplesBuffer;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

pub const SAMPLE_RATE: u32 = 44_100;

// ── Clips ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub enum ClipData {
    /// An encoded file (ogg, wav, ...) decoded on every play.
    Encoded(Arc<[u8]>),
    /// Raw mono samples.
    Samples { rate: u32, samples: Arc<[f32]> },
}

/// A playable sound, named after the asset it came from.
#[derive(Clone, Debug)]
pub struct Clip {
    name: String,
    data: ClipData,
}

impl Clip {
    pub fn new(name: impl Into<String>, data: ClipData) -> Self {
        Clip {
            name: name.into(),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ClipData {
        &self.data
    }
}

/// The five cues the game plays.
#[derive(Clone, Debug)]
pub struct Sounds {
    pub swoosh: Clip,
    pub wing: Clip,
    pub point: Clip,
    pub hit: Clip,
    pub die: Clip,
}

// ── Sinks ───────────────────────────────────────────────────────────────────

/// Fire-and-forget playback.
pub trait AudioSink {
    fn play(&mut self, clip: &Clip);
}

/// Drops every cue.
#[derive(Debug, Default)]
pub struct SilentSink;

impl AudioSink for SilentSink {
    fn play(&mut self, _clip: &Clip) {}
}

/// Plays clips on the default output device, each on its own detached sink.
pub struct RodioSink {
    stream: Option<OutputStream>,
    volume: f32,
}

impl RodioSink {
    /// Opens the default device. Without one the sink stays silent.
    pub fn new(volume: f32) -> Self {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => Some(stream),
            Err(e) => {
                warn!("Audio output device is unavailable ({e}); cues will be dropped");
                None
            }
        };
        RodioSink {
            stream,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    pub fn is_available(&self) -> bool {
        self.stream.is_some()
    }
}

impl AudioSink for RodioSink {
    fn play(&mut self, clip: &Clip) {
        let Some(stream) = &self.stream else {
            return;
        };
        let sink = Sink::connect_new(stream.mixer());
        sink.set_volume(self.volume);
        match clip.data() {
            ClipData::Encoded(bytes) => match Decoder::new(Cursor::new(bytes.clone())) {
                Ok(source) => sink.append(source),
                Err(e) => {
                    debug!("cannot decode {}: {e}", clip.name());
                    return;
                }
            },
            ClipData::Samples { rate, samples } => {
                sink.append(SamplesBuffer::new(1, *rate, samples.to_vec()));
            }
        }
        sink.detach(); // Play in background
    }
}

// ── Synthesized cues ────────────────────────────────────────────────────────

fn render(mut unit: impl AudioUnit, secs: f64) -> Arc<[f32]> {
    unit.set_sample_rate(SAMPLE_RATE as f64);
    let n = (SAMPLE_RATE as f64 * secs).round() as usize;
    (0..n).map(|_| unit.get_mono()).collect()
}

fn ramp(from: f64, to: f64, t: f64, over: f64) -> f64 {
    lerp(from, to, (t / over).min(1.0))
}

fn samples(name: &str, data: Arc<[f32]>) -> Clip {
    Clip::new(
        name,
        ClipData::Samples {
            rate: SAMPLE_RATE,
            samples: data,
        },
    )
}

/// Descending sawtooth wail.
pub fn synth_die() -> Clip {
    let freq = lfo(|t: f64| ramp(400.0, 80.0, t, 0.4));
    let gain = lfo(|t: f64| ramp(0.15, 0.0, t, 0.5));
    samples("die.ogg", render((freq >> saw()) * gain, 0.5))
}

/// Short noise burst.
pub fn synth_hit() -> Clip {
    let gain = lfo(|t: f64| ramp(0.4, 0.0, t, 0.08));
    samples("hit.ogg", render(noise() * gain, 0.1))
}

/// Quick rising chirp.
pub fn synth_wing() -> Clip {
    let freq = lfo(|t: f64| ramp(500.0, 900.0, t, 0.06));
    let gain = lfo(|t: f64| ramp(0.3, 0.0, t, 0.08));
    samples("wing.ogg", render((freq >> sine()) * gain, 0.08))
}

/// Two-note chime.
pub fn synth_point() -> Clip {
    let freq = lfo(|t: f64| if t < 0.08 { 988.0 } else { 1319.0 });
    let gain = lfo(|t: f64| ramp(0.3, 0.0, t, 0.3));
    samples("point.ogg", render((freq >> sine()) * gain, 0.3))
}

/// Filtered noise swelling in and out.
pub fn synth_swoosh() -> Clip {
    let gain = lfo(|t: f64| {
        if t < 0.1 {
            ramp(0.0, 0.3, t, 0.1)
        } else {
            ramp(0.3, 0.0, t - 0.1, 0.2)
        }
    });
    samples(
        "swoosh.ogg",
        render((noise() >> lowpass_hz(1500.0, 0.7)) * gain, 0.3),
    )
}
