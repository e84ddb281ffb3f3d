//! Naive (non band-limited) retro oscillators.
//!
//! Aliasing is part of the sound here, so unlike a playback synth there is
//! no PolyBLEP correction: every waveform is a direct function of phase.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::buffer::{SampleBuffer, sample_count};
use crate::error::{Result, SfxError, ensure_positive};

/// Supported waveform shapes.
///
/// Deserializing an unrecognised name yields [`Waveform::Sine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Waveform {
    Square,
    Triangle,
    Saw,
    #[default]
    Sine,
}

impl Waveform {
    /// Parse a waveform name. Unknown names fall back to `Sine`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "square" => Waveform::Square,
            "triangle" => Waveform::Triangle,
            "saw" | "sawtooth" => Waveform::Saw,
            "sine" => Waveform::Sine,
            other => {
                tracing::debug!(waveform = other, "unsupported waveform, using sine");
                Waveform::Sine
            }
        }
    }

    /// Sample value at an absolute phase in radians. Always in `[-1, 1]`.
    pub fn at_phase(self, phase: f64) -> f64 {
        let cycles = phase / TAU;
        match self {
            Waveform::Square => sign(phase.sin()),
            Waveform::Triangle => 2.0 * (2.0 * (cycles - (0.5 + cycles).floor())).abs() - 1.0,
            Waveform::Saw => 2.0 * (cycles - (0.5 + cycles).floor()),
            Waveform::Sine => phase.sin(),
        }
    }
}

impl From<String> for Waveform {
    fn from(name: String) -> Self {
        Waveform::from_name(&name)
    }
}

/// Sign with `sign(0) = 0`; `f64::signum` would map zero to 1.
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

pub(crate) fn ensure_sample_rate(sample_rate: u32) -> Result<()> {
    if sample_rate == 0 {
        return Err(SfxError::invalid("sample_rate", "must be > 0"));
    }
    Ok(())
}

/// Generate `round(sample_rate * duration)` samples of a fixed-frequency tone.
///
/// Sample `i` sits at `t = i / sample_rate` with phase `2π·frequency·t`.
pub fn generate(
    frequency: f64,
    duration: f64,
    waveform: Waveform,
    sample_rate: u32,
) -> Result<SampleBuffer> {
    ensure_positive("frequency", frequency)?;
    ensure_positive("duration", duration)?;
    ensure_sample_rate(sample_rate)?;

    let sr = sample_rate as f64;
    let n = sample_count(sample_rate, duration)?;
    Ok((0..n)
        .map(|i| waveform.at_phase(TAU * frequency * i as f64 / sr))
        .collect())
}
