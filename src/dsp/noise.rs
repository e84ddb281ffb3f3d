//! Seeded white noise.

use super::buffer::SampleBuffer;

/// Uniform white noise in `[-1, 1)` from a reproducible PRNG stream.
#[derive(Debug)]
pub struct Noise(oorandom::Rand64);

impl Noise {
    /// The same seed always yields the same stream.
    pub fn new_with_seed(seed: u64) -> Self {
        Noise(oorandom::Rand64::new(seed as u128))
    }

    pub fn next_sample(&mut self) -> f64 {
        self.0.rand_float() * 2.0 - 1.0
    }

    pub fn generate(&mut self, len: usize) -> SampleBuffer {
        (0..len).map(|_| self.next_sample()).collect()
    }
}
