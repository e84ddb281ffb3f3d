//! Immutable sample buffers.

use std::ops::Deref;

use crate::error::{Result, SfxError};

/// Most samples a 16-bit mono WAV data chunk can hold.
pub const MAX_SAMPLES: usize = i32::MAX as usize;

/// Ordered, fixed-length mono samples; index 0 is time 0.
///
/// Generators produce buffers in `[-1, 1]`; mixing may transiently exceed
/// that range, which is why the encoder clips. Combinators never mutate
/// their inputs, they build a new buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f64>,
}

impl SampleBuffer {
    pub fn new(samples: Vec<f64>) -> Self {
        SampleBuffer { samples }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Largest absolute sample value (0 for an empty buffer).
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0, |acc, s| acc.max(s.abs()))
    }

    /// Element-wise product with an envelope of the same length.
    pub(crate) fn shaped_by(&self, envelope: &[f64]) -> SampleBuffer {
        debug_assert_eq!(self.samples.len(), envelope.len());
        self.samples
            .iter()
            .zip(envelope)
            .map(|(s, e)| s * e)
            .collect()
    }
}

impl Deref for SampleBuffer {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.samples
    }
}

impl From<Vec<f64>> for SampleBuffer {
    fn from(samples: Vec<f64>) -> Self {
        SampleBuffer::new(samples)
    }
}

impl FromIterator<f64> for SampleBuffer {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        SampleBuffer::new(iter.into_iter().collect())
    }
}

/// `n` evenly spaced values from `start` to `end`, both inclusive.
/// A single point yields `start`.
pub(crate) fn linspace(start: f64, end: f64, n: usize) -> impl Iterator<Item = f64> {
    let step = if n > 1 {
        (end - start) / (n - 1) as f64
    } else {
        0.0
    };
    (0..n).map(move |i| start + step * i as f64)
}

/// Number of samples covering `duration` seconds, capped at [`MAX_SAMPLES`].
pub(crate) fn sample_count(sample_rate: u32, duration: f64) -> Result<usize> {
    let n = (sample_rate as f64 * duration).round();
    if n.is_nan() || n > MAX_SAMPLES as f64 {
        return Err(SfxError::invalid(
            "duration",
            format!("{duration} s at {sample_rate} Hz exceeds {MAX_SAMPLES} samples"),
        ));
    }
    Ok(n as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_ends() {
        let v: Vec<f64> = linspace(0.0, 1.0, 5).collect();
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn linspace_degenerate_lengths() {
        assert_eq!(linspace(3.0, 9.0, 0).count(), 0);
        assert_eq!(linspace(3.0, 9.0, 1).collect::<Vec<_>>(), vec![3.0]);
    }

    #[test]
    fn sample_count_rounds() {
        assert_eq!(sample_count(22050, 0.05).unwrap(), 1103);
        assert_eq!(sample_count(22050, 30.0).unwrap(), 661_500);
    }

    #[test]
    fn sample_count_rejects_oversized_durations() {
        for duration in [1e300, f64::INFINITY, f64::NAN, 100_000.0] {
            let err = sample_count(22050, duration).unwrap_err();
            assert!(
                matches!(err, SfxError::InvalidParameter { name: "duration", .. }),
                "{duration}: {err:?}"
            );
        }
        assert_eq!(sample_count(1, MAX_SAMPLES as f64).unwrap(), MAX_SAMPLES);
    }

    #[test]
    fn peak_and_shaping() {
        let buf = SampleBuffer::from(vec![0.5, -0.8, 0.25]);
        assert!((buf.peak() - 0.8).abs() < 1e-12);
        let shaped = buf.shaped_by(&[1.0, 0.5, 0.0]);
        assert_eq!(shaped.as_slice(), &[0.5, -0.4, 0.0]);
        assert_eq!(buf.len(), 3, "source buffer must be untouched");
    }
}
