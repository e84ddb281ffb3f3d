//! Note runs, concatenation and looping.

use super::buffer::SampleBuffer;
use super::oscillator::{Waveform, generate};
use crate::error::{Result, SfxError};

/// Frequency ratio of an equal-tempered interval: `2^(semitones / 12)`.
pub fn semitone_ratio(semitones: i32) -> f64 {
    (2.0_f64).powf(semitones as f64 / 12.0)
}

/// Append buffers in order.
pub fn concatenate<'a, I>(buffers: I) -> SampleBuffer
where
    I: IntoIterator<Item = &'a SampleBuffer>,
{
    buffers
        .into_iter()
        .flat_map(|buf| buf.iter().copied())
        .collect()
}

/// Play `frequencies` back to back as square-wave notes sharing
/// `total_duration` equally.
pub fn melody(frequencies: &[f64], total_duration: f64, sample_rate: u32) -> Result<SampleBuffer> {
    if frequencies.is_empty() {
        return Err(SfxError::invalid("frequencies", "must not be empty"));
    }
    let note_duration = total_duration / frequencies.len() as f64;
    let notes = frequencies
        .iter()
        .map(|&f| generate(f, note_duration, Waveform::Square, sample_rate))
        .collect::<Result<Vec<_>>>()?;
    Ok(concatenate(&notes))
}

/// Square-wave arpeggio: one note per entry of `pattern`, each offset from
/// `base_freq` by that many semitones. Every note is rounded to whole
/// samples on its own, so the total may differ from
/// `round(sample_rate * total_duration)` by up to `pattern.len() - 1`.
pub fn arpeggio(
    base_freq: f64,
    total_duration: f64,
    pattern: &[i32],
    sample_rate: u32,
) -> Result<SampleBuffer> {
    if pattern.is_empty() {
        return Err(SfxError::invalid("pattern", "must not be empty"));
    }
    let frequencies: Vec<f64> = pattern
        .iter()
        .map(|&semitones| base_freq * semitone_ratio(semitones))
        .collect();
    melody(&frequencies, total_duration, sample_rate)
}

/// Repeat `buffer` end to end and cut to exactly `target_len` samples.
pub fn tile(buffer: &SampleBuffer, target_len: usize) -> Result<SampleBuffer> {
    if target_len == 0 {
        return Ok(SampleBuffer::default());
    }
    if buffer.is_empty() {
        return Err(SfxError::invalid(
            "buffer",
            "cannot tile an empty buffer to a non-zero length",
        ));
    }
    Ok(buffer.iter().copied().cycle().take(target_len).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::buffer::sample_count;
    use crate::dsp::rising_crossings;

    const SR: u32 = 22050;

    #[test]
    fn semitone_ratios() {
        assert!((semitone_ratio(0) - 1.0).abs() < 1e-12);
        assert!((semitone_ratio(12) - 2.0).abs() < 1e-12);
        assert!((semitone_ratio(-12) - 0.5).abs() < 1e-12);
        assert!((440.0 * semitone_ratio(7) - 659.255).abs() < 0.01);
    }

    #[test]
    fn concatenate_appends_in_order() {
        let a = SampleBuffer::from(vec![1.0, 2.0]);
        let b = SampleBuffer::from(vec![3.0]);
        let c = SampleBuffer::default();
        let out = concatenate([&a, &c, &b]);
        assert_eq!(out.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn arpeggio_length_within_rounding() {
        let pattern = [0, 4, 7, 12];
        for d in [0.5, 0.2, 0.33, 1.0 / 3.0] {
            let buf = arpeggio(440.0, d, &pattern, SR).unwrap();
            let ideal = (SR as f64 * d).round() as i64;
            let diff = (buf.len() as i64 - ideal).abs();
            assert!(diff < pattern.len() as i64, "{d}s: {} vs {ideal}", buf.len());
        }
    }

    #[test]
    fn arpeggio_segments_carry_interval_frequencies() {
        let pattern = [0, 4, 7, 12];
        let base = 220.0;
        let buf = arpeggio(base, 2.0, &pattern, SR).unwrap();
        let seg = buf.len() / pattern.len();
        for (i, &semis) in pattern.iter().enumerate() {
            let part = &buf[i * seg..(i + 1) * seg];
            let expected = base * semitone_ratio(semis) * 0.5;
            let counted = rising_crossings(part) as f64;
            assert!(
                (counted - expected).abs() <= 2.0,
                "segment {i}: expected ~{expected} cycles, counted {counted}"
            );
        }
    }

    #[test]
    fn arpeggio_rejects_empty_pattern() {
        assert!(arpeggio(440.0, 0.2, &[], SR).is_err());
    }

    #[test]
    fn melody_of_four_notes() {
        let buf = melody(&[440.0, 415.0, 392.0, 370.0], 0.6, SR).unwrap();
        assert_eq!(buf.len(), 4 * sample_count(SR, 0.6 / 4.0).unwrap());
        assert!(buf.iter().all(|&s| s == -1.0 || s == 0.0 || s == 1.0));
    }

    #[test]
    fn tile_repeats_with_period() {
        let base = SampleBuffer::from(vec![0.1, 0.2, 0.3]);
        let out = tile(&base, 8).unwrap();
        assert_eq!(out.len(), 8);
        assert_eq!(&out[..3], base.as_slice());
        for i in 3..8 {
            assert_eq!(out[i], out[i - 3], "period broken at {i}");
        }
    }

    #[test]
    fn tile_truncates_longer_input() {
        let base = SampleBuffer::from(vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(tile(&base, 2).unwrap().as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn tile_edge_cases() {
        let empty = SampleBuffer::default();
        assert!(tile(&empty, 0).unwrap().is_empty());
        assert!(tile(&empty, 5).is_err());
    }
}
