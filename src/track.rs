//! Background track: a looping arpeggio melody over a square bass.

use serde::{Deserialize, Serialize};

use crate::dsp::buffer::sample_count;
use crate::dsp::crusher::{DEFAULT_BITS, crush};
use crate::dsp::mixer::{clip, mix};
use crate::dsp::oscillator::{Waveform, ensure_sample_rate, generate};
use crate::dsp::sequencer::{arpeggio, concatenate, tile};
use crate::dsp::{SampleBuffer, pcm};
use crate::error::{Result, ensure_positive};

/// Chord roots of the progression: A4, G4, F4, A4.
pub const CHORD_ROOTS: [f64; 4] = [440.0, 392.0, 349.0, 440.0];
/// Major arpeggio: root, major third, fifth, octave.
pub const ARPEGGIO_PATTERN: [i32; 4] = [0, 4, 7, 12];
/// Each chord's arpeggio plays this many times in a row.
pub const ARPEGGIO_REPEATS: usize = 4;
/// A2.
pub const BASS_FREQ: f64 = 110.0;
pub const BASS_BEATS: f64 = 4.0;
pub const MELODY_WEIGHT: f64 = 0.6;
pub const BASS_WEIGHT: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundTrack {
    /// Output file stem.
    pub name: String,
    /// Seconds.
    pub duration: f64,
    /// Beats per minute.
    pub tempo: f64,
    pub bits: u32,
}

impl Default for BackgroundTrack {
    fn default() -> Self {
        BackgroundTrack {
            name: "background".to_string(),
            duration: 30.0,
            tempo: 120.0,
            bits: DEFAULT_BITS,
        }
    }
}

impl BackgroundTrack {
    /// Seconds per beat.
    pub fn beat(&self) -> Result<f64> {
        Ok(60.0 / ensure_positive("tempo", self.tempo)?)
    }

    /// One pass over the progression: every chord's one-beat arpeggio,
    /// repeated [`ARPEGGIO_REPEATS`] times, chord after chord.
    pub fn melody_loop(&self, sample_rate: u32) -> Result<SampleBuffer> {
        let beat = self.beat()?;
        let mut blocks = Vec::with_capacity(CHORD_ROOTS.len() * ARPEGGIO_REPEATS);
        for root in CHORD_ROOTS {
            let arp = arpeggio(root, beat, &ARPEGGIO_PATTERN, sample_rate)?;
            blocks.extend(std::iter::repeat_n(arp, ARPEGGIO_REPEATS));
        }
        Ok(concatenate(&blocks))
    }

    /// A single sustained bass note lasting [`BASS_BEATS`] beats.
    pub fn bass_note(&self, sample_rate: u32) -> Result<SampleBuffer> {
        generate(BASS_FREQ, self.beat()? * BASS_BEATS, Waveform::Square, sample_rate)
    }

    /// Loop melody and bass out to the full duration, mix and crush.
    pub fn compose(&self, sample_rate: u32) -> Result<SampleBuffer> {
        ensure_positive("duration", self.duration)?;
        ensure_sample_rate(sample_rate)?;
        let total = sample_count(sample_rate, self.duration)?;

        let melody = tile(&self.melody_loop(sample_rate)?, total)?;
        let bass = tile(&self.bass_note(sample_rate)?, total)?;
        let mixed = mix(&[(&melody, MELODY_WEIGHT), (&bass, BASS_WEIGHT)]);
        crush(&mixed, self.bits)
    }

    /// Compose, clip and encode to 16-bit PCM.
    pub fn render(&self, sample_rate: u32) -> Result<Vec<i16>> {
        let track = self.compose(sample_rate)?;
        tracing::debug!(
            samples = track.len(),
            tempo = self.tempo,
            "composed background track"
        );
        Ok(pcm::encode(&clip(&track)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SfxError;

    const SR: u32 = 22050;

    #[test]
    fn thirty_seconds_at_120_bpm() {
        let pcm = BackgroundTrack::default().render(SR).unwrap();
        assert_eq!(pcm.len(), 661_500);
        assert!(pcm.iter().any(|&s| s != 0));
    }

    #[test]
    fn melody_loop_layout() {
        let track = BackgroundTrack::default();
        let arp = arpeggio(440.0, 0.5, &ARPEGGIO_PATTERN, SR).unwrap();
        let melody = track.melody_loop(SR).unwrap();
        assert_eq!(melody.len(), arp.len() * 16);
        // first four beats are the same A arpeggio
        for rep in 0..4 {
            let start = rep * arp.len();
            assert_eq!(&melody[start..start + arp.len()], arp.as_slice(), "repeat {rep}");
        }
        // fifth beat moves to G
        let g = arpeggio(392.0, 0.5, &ARPEGGIO_PATTERN, SR).unwrap();
        assert_eq!(&melody[4 * arp.len()..5 * arp.len()], g.as_slice());
    }

    #[test]
    fn bass_spans_four_beats() {
        let track = BackgroundTrack {
            tempo: 100.0,
            ..BackgroundTrack::default()
        };
        let bass = track.bass_note(SR).unwrap();
        assert_eq!(bass.len(), (SR as f64 * 2.4).round() as usize);
    }

    #[test]
    fn mix_stays_within_unity_and_on_grid() {
        let track = BackgroundTrack {
            duration: 3.0,
            ..BackgroundTrack::default()
        };
        let wave = track.compose(SR).unwrap();
        assert_eq!(wave.len(), 66_150);
        for &s in wave.iter() {
            assert!(s.abs() <= 1.0 + 1e-12);
            let k = s * 7.0;
            assert!((k - k.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn short_track_is_truncated_loop() {
        // shorter than one melody pass; still exact length
        let track = BackgroundTrack {
            duration: 0.75,
            ..BackgroundTrack::default()
        };
        assert_eq!(track.render(SR).unwrap().len(), 16_538);
    }

    #[test]
    fn rejects_bad_tempo_and_duration() {
        let no_tempo = BackgroundTrack {
            tempo: 0.0,
            ..BackgroundTrack::default()
        };
        assert!(matches!(
            no_tempo.render(SR),
            Err(SfxError::InvalidParameter { name: "tempo", .. })
        ));
        let no_time = BackgroundTrack {
            duration: -1.0,
            ..BackgroundTrack::default()
        };
        assert!(no_time.render(SR).is_err());
        // what `sfxgen generate --duration 1e300` would ask for
        let forever = BackgroundTrack {
            duration: 1e300,
            ..BackgroundTrack::default()
        };
        assert!(matches!(
            forever.render(SR),
            Err(SfxError::InvalidParameter { name: "duration", .. })
        ));
    }
}
