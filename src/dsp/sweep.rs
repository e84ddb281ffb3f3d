//! Frequency sweeps (chirps) by phase accumulation.

use std::f64::consts::TAU;

use super::buffer::{SampleBuffer, linspace, sample_count};
use super::oscillator::{Waveform, ensure_sample_rate};
use crate::error::{Result, ensure_positive};

/// Sweep linearly from `start_freq` to `end_freq` over `duration` seconds.
///
/// The instantaneous frequency ramp is integrated with a running sum, so
/// `phase[i] = 2π/sr · Σ_{k≤i} f[k]`. Evaluating `sin(2π·f(t)·t)` instead
/// would double the effective sweep rate.
pub fn generate_sweep(
    start_freq: f64,
    end_freq: f64,
    duration: f64,
    waveform: Waveform,
    sample_rate: u32,
) -> Result<SampleBuffer> {
    ensure_positive("start_freq", start_freq)?;
    ensure_positive("end_freq", end_freq)?;
    ensure_positive("duration", duration)?;
    ensure_sample_rate(sample_rate)?;

    let scale = TAU / sample_rate as f64;
    let n = sample_count(sample_rate, duration)?;
    Ok(linspace(start_freq, end_freq, n)
        .scan(0.0, |phase, freq| {
            *phase += freq * scale;
            Some(waveform.at_phase(*phase))
        })
        .collect())
}
