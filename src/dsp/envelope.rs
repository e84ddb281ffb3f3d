//! Amplitude envelopes applied to whole buffers.

use serde::{Deserialize, Serialize};

use super::buffer::{SampleBuffer, linspace};
use crate::error::{Result, SfxError};

/// Slack for fraction sums such as `0.1 + 0.2 + 0.7`.
const FRACTION_EPSILON: f64 = 1e-9;

/// How a buffer's loudness evolves over its length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnvelopeSpec {
    /// `exp(-rate · x)` for `x` running linearly from 0 to 1.
    ExponentialDecay { rate: f64 },
    /// Linear attack/decay/release segments sized as fractions of the buffer;
    /// sustain takes whatever remains.
    Adsr {
        attack: f64,
        decay: f64,
        sustain: f64,
        release: f64,
    },
}

impl Default for EnvelopeSpec {
    fn default() -> Self {
        EnvelopeSpec::Adsr {
            attack: 0.01,
            decay: 0.1,
            sustain: 0.5,
            release: 0.1,
        }
    }
}

impl EnvelopeSpec {
    pub fn apply(&self, buffer: &SampleBuffer) -> Result<SampleBuffer> {
        match *self {
            EnvelopeSpec::ExponentialDecay { rate } => apply_exponential_decay(buffer, rate),
            EnvelopeSpec::Adsr {
                attack,
                decay,
                sustain,
                release,
            } => apply_adsr(buffer, attack, decay, sustain, release),
        }
    }
}

/// Multiply by `exp(-rate · linspace(0, 1, N))`.
pub fn apply_exponential_decay(buffer: &SampleBuffer, rate: f64) -> Result<SampleBuffer> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(SfxError::invalid(
            "rate",
            format!("must be finite and >= 0, got {rate}"),
        ));
    }
    let envelope: Vec<f64> = linspace(0.0, 1.0, buffer.len())
        .map(|x| (-rate * x).exp())
        .collect();
    Ok(buffer.shaped_by(&envelope))
}

fn ensure_fraction(name: &'static str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(SfxError::invalid(
            name,
            format!("must be within [0, 1], got {value}"),
        ))
    }
}

/// Build the ADSR gain curve for `samples` samples.
fn adsr_curve(
    samples: usize,
    attack: f64,
    decay: f64,
    sustain: f64,
    release: f64,
) -> Result<Vec<f64>> {
    ensure_fraction("attack", attack)?;
    ensure_fraction("decay", decay)?;
    ensure_fraction("release", release)?;
    if !sustain.is_finite() || sustain < 0.0 {
        return Err(SfxError::invalid(
            "sustain",
            format!("must be finite and >= 0, got {sustain}"),
        ));
    }
    let total = attack + decay + release;
    if total > 1.0 + FRACTION_EPSILON {
        return Err(SfxError::invalid(
            "attack + decay + release",
            format!("must not exceed 1, got {total}"),
        ));
    }

    let n = samples as f64;
    let attack_samples = (attack * n) as usize;
    let decay_samples = (decay * n) as usize;
    let release_samples = (release * n) as usize;
    let sustain_samples = samples
        .checked_sub(attack_samples + decay_samples + release_samples)
        .ok_or_else(|| {
            SfxError::invalid("attack + decay + release", "segments exceed buffer length")
        })?;

    let mut curve = Vec::with_capacity(samples);
    curve.extend(linspace(0.0, 1.0, attack_samples));
    curve.extend(linspace(1.0, sustain, decay_samples));
    curve.extend(std::iter::repeat_n(sustain, sustain_samples));
    curve.extend(linspace(sustain, 0.0, release_samples));
    Ok(curve)
}

/// Shape `buffer` with a four-stage attack/decay/sustain/release envelope.
pub fn apply_adsr(
    buffer: &SampleBuffer,
    attack: f64,
    decay: f64,
    sustain: f64,
    release: f64,
) -> Result<SampleBuffer> {
    let curve = adsr_curve(buffer.len(), attack, decay, sustain, release)?;
    Ok(buffer.shaped_by(&curve))
}
