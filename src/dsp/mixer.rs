//! Mixer: weighted sums of buffers and the final hard clip.

use super::buffer::SampleBuffer;

/// Element-wise weighted sum, truncated to the shortest input.
///
/// Weights need not sum to 1; any overshoot is dealt with by [`clip`]
/// before encoding. An empty input list mixes to an empty buffer.
pub fn mix(inputs: &[(&SampleBuffer, f64)]) -> SampleBuffer {
    let len = inputs.iter().map(|(buf, _)| buf.len()).min().unwrap_or(0);
    let mut out = vec![0.0; len];
    for (buf, weight) in inputs {
        for (acc, &s) in out.iter_mut().zip(buf.iter()) {
            *acc += weight * s;
        }
    }
    SampleBuffer::new(out)
}

/// Hard-clip every sample into `[-1, 1]`.
pub fn clip(buffer: &SampleBuffer) -> SampleBuffer {
    buffer.iter().map(|&s| s.clamp(-1.0, 1.0)).collect()
}
