//! Bit crusher (amplitude quantization).

use super::buffer::SampleBuffer;
use crate::error::{Result, SfxError};

/// Bit depth used by every catalog preset and the background track.
pub const DEFAULT_BITS: u32 = 4;

/// Highest quantization level for a bit depth: `2^(bits-1) - 1`.
///
/// A single bit would leave zero levels; it is treated as one level
/// (samples snap to -1, 0 or 1), the same as two bits.
pub fn max_level(bits: u32) -> Result<f64> {
    if !(1..=32).contains(&bits) {
        return Err(SfxError::invalid(
            "bits",
            format!("must be in 1..=32, got {bits}"),
        ));
    }
    Ok(((2.0_f64).powi(bits as i32 - 1) - 1.0).max(1.0))
}

/// Quantize each sample to `round(sample · max_level) / max_level`.
///
/// Run this after mixing and enveloping; quantizing the parts before the
/// sum would quantize twice.
pub fn crush(buffer: &SampleBuffer, bits: u32) -> Result<SampleBuffer> {
    let levels = max_level(bits)?;
    Ok(buffer
        .iter()
        .map(|&s| (s * levels).round() / levels)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::{Waveform, generate};

    #[test]
    fn four_bits_gives_seven_levels() {
        assert_eq!(max_level(4).unwrap(), 7.0);
        assert_eq!(max_level(8).unwrap(), 127.0);
        assert_eq!(max_level(16).unwrap(), 32767.0);
    }

    #[test]
    fn one_bit_behaves_like_two() {
        assert_eq!(max_level(1).unwrap(), 1.0);
        assert_eq!(max_level(2).unwrap(), 1.0);
    }

    #[test]
    fn bit_depth_bounds() {
        assert!(max_level(0).is_err());
        assert!(max_level(33).is_err());
        assert!(crush(&SampleBuffer::from(vec![0.5]), 0).is_err());
    }

    #[test]
    fn quantizes_to_grid() {
        let buf = SampleBuffer::from(vec![0.0, 0.1, 0.5, -0.93, 1.0, -1.0]);
        let out = crush(&buf, 4).unwrap();
        for (&s, &q) in buf.iter().zip(out.iter()) {
            let k = q * 7.0;
            assert!((k - k.round()).abs() < 1e-9, "{q} is not on the 1/7 grid");
            assert!((s - q).abs() <= 0.5 / 7.0 + 1e-12, "{s} moved to {q}");
        }
        assert_eq!(out[0], 0.0);
        assert_eq!(out[4], 1.0);
        assert_eq!(out[5], -1.0);
    }

    #[test]
    fn crushing_is_idempotent() {
        let tone = generate(440.0, 0.05, Waveform::Sine, 22050).unwrap();
        for bits in [1, 2, 4, 8, 12] {
            let once = crush(&tone, bits).unwrap();
            let twice = crush(&once, bits).unwrap();
            assert_eq!(once, twice, "{bits} bits");
        }
    }
}
