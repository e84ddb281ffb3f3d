//! Offline retro synthesis into in-memory buffers.
//!
//! Data flows one way: oscillators and sweeps feed the sequencer and
//! envelopes, the result is bit-crushed, clipped and encoded to 16-bit PCM,
//! and finally handed to the WAV renderer.

pub mod buffer;
pub mod crusher;
pub mod envelope;
pub mod mixer;
pub mod noise;
pub mod oscillator;
pub mod pcm;
pub mod renderer;
pub mod sequencer;
pub mod sweep;

pub use buffer::SampleBuffer;
pub use oscillator::Waveform;

/// Process-wide default sample rate in Hz.
pub const SAMPLE_RATE: u32 = 22_050;

/// Count sign changes from negative to non-negative.
#[cfg(test)]
pub(crate) fn rising_crossings(samples: &[f64]) -> usize {
    samples
        .windows(2)
        .filter(|w| w[0] < 0.0 && w[1] >= 0.0)
        .count()
}
