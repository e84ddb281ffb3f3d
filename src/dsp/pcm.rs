//! 16-bit PCM encoding.

use super::buffer::SampleBuffer;

/// Convert samples in `[-1, 1]` to signed 16-bit via `round(s · 32767)`.
///
/// Input is expected to be clipped already (see [`super::mixer::clip`]);
/// anything outside saturates rather than wrapping.
pub fn encode(buffer: &SampleBuffer) -> Vec<i16> {
    buffer
        .iter()
        .map(|&s| (s * 32767.0).round().clamp(-32768.0, 32767.0) as i16)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_scale_and_silence() {
        let buf = SampleBuffer::from(vec![0.0, 1.0, -1.0, 0.5]);
        assert_eq!(encode(&buf), vec![0, 32767, -32767, 16384]);
    }

    #[test]
    fn crushed_levels_map_exactly() {
        let buf = SampleBuffer::from(vec![1.0 / 7.0, -3.0 / 7.0]);
        assert_eq!(encode(&buf), vec![4681, -14043]);
    }

    #[test]
    fn out_of_range_saturates() {
        let buf = SampleBuffer::from(vec![1.5, -3.0]);
        assert_eq!(encode(&buf), vec![32767, -32768]);
    }
}
