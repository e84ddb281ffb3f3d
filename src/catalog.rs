//! Effect catalog. Named presets, each a fixed synthesis recipe.
//!
//! A [`Catalog`] is the whole configuration surface: sample rate, noise
//! seed, the effect list and the background track. It serializes to the
//! JSON document read by `sfxgen --config`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dsp::crusher::{DEFAULT_BITS, crush};
use crate::dsp::envelope::{EnvelopeSpec, apply_exponential_decay};
use crate::dsp::mixer::{clip, mix};
use crate::dsp::noise::Noise;
use crate::dsp::oscillator::{Waveform, generate};
use crate::dsp::sequencer::melody;
use crate::dsp::sweep::generate_sweep;
use crate::dsp::{SAMPLE_RATE, SampleBuffer, pcm};
use crate::error::{Result, SfxError};
use crate::track::BackgroundTrack;

/// Default noise seed; any fixed value keeps renders reproducible.
pub const DEFAULT_SEED: u64 = 0x5EED_F00D;

// ── Recipes ─────────────────────────────────────────────────

/// The closed set of synthesis recipes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Recipe {
    /// Square 880 Hz + 1760 Hz (0.7 / 0.3), sharp exponential decay.
    ArcadeHit,
    /// Rising square sweep 440 → 880 Hz.
    Bounce,
    /// Falling square sweep 880 → 220 Hz mixed with white noise.
    Break,
    /// Descending chromatic four-note run.
    GameOver,
    /// Rising A-major arpeggio.
    Start,
    /// Short 1500 Hz square burst.
    Click,
    /// Single enveloped tone.
    Tone {
        #[serde(default)]
        waveform: Waveform,
        frequency: f64,
        #[serde(default)]
        envelope: EnvelopeSpec,
    },
}

impl Recipe {
    /// Duration used when a preset does not specify one.
    pub fn default_duration(&self) -> f64 {
        match self {
            Recipe::ArcadeHit => 0.1,
            Recipe::Bounce => 0.08,
            Recipe::Break => 0.15,
            Recipe::GameOver => 0.6,
            Recipe::Start => 0.5,
            Recipe::Click => 0.05,
            Recipe::Tone { .. } => 0.3,
        }
    }

    /// Run the recipe. The result is enveloped but not yet crushed.
    pub fn synthesize(
        &self,
        duration: f64,
        sample_rate: u32,
        noise: &mut Noise,
    ) -> Result<SampleBuffer> {
        let sq = |freq| generate(freq, duration, Waveform::Square, sample_rate);
        match self {
            Recipe::ArcadeHit => {
                let (low, high) = (sq(880.0)?, sq(1760.0)?);
                apply_exponential_decay(&mix(&[(&low, 0.7), (&high, 0.3)]), 10.0)
            }
            Recipe::Bounce => generate_sweep(440.0, 880.0, duration, Waveform::Square, sample_rate),
            Recipe::Break => {
                let sweep = generate_sweep(880.0, 220.0, duration, Waveform::Square, sample_rate)?;
                let hiss = noise.generate(sweep.len());
                apply_exponential_decay(&mix(&[(&sweep, 0.7), (&hiss, 0.3)]), 5.0)
            }
            Recipe::GameOver => apply_exponential_decay(
                &melody(&[440.0, 415.0, 392.0, 370.0], duration, sample_rate)?,
                2.0,
            ),
            Recipe::Start => apply_exponential_decay(
                &melody(&[440.0, 554.0, 659.0, 880.0], duration, sample_rate)?,
                1.0,
            ),
            Recipe::Click => apply_exponential_decay(&sq(1500.0)?, 20.0),
            Recipe::Tone {
                waveform,
                frequency,
                envelope,
            } => envelope.apply(&generate(*frequency, duration, *waveform, sample_rate)?),
        }
    }
}

// ── Presets ─────────────────────────────────────────────────

fn default_bits() -> u32 {
    DEFAULT_BITS
}

/// A named effect: recipe plus its duration and bit depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectPreset {
    /// Output file stem, e.g. `"paddle_hit"`.
    pub name: String,
    pub recipe: Recipe,
    /// Seconds; falls back to the recipe default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default = "default_bits")]
    pub bits: u32,
}

impl EffectPreset {
    pub fn new(name: impl Into<String>, recipe: Recipe, duration: f64, bits: u32) -> Self {
        EffectPreset {
            name: name.into(),
            recipe,
            duration: Some(duration),
            bits,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
            .unwrap_or_else(|| self.recipe.default_duration())
    }

    /// Synthesize, bit-crush, clip and encode to 16-bit PCM.
    pub fn render(&self, sample_rate: u32, noise: &mut Noise) -> Result<Vec<i16>> {
        let wave = self.recipe.synthesize(self.duration(), sample_rate, noise)?;
        let crushed = crush(&wave, self.bits)?;
        Ok(pcm::encode(&clip(&crushed)))
    }
}

/// The six stock arcade effects.
pub fn default_effects() -> Vec<EffectPreset> {
    vec![
        EffectPreset::new("paddle_hit", Recipe::ArcadeHit, 0.1, DEFAULT_BITS),
        EffectPreset::new("wall_hit", Recipe::Bounce, 0.08, DEFAULT_BITS),
        EffectPreset::new("brick_break", Recipe::Break, 0.15, DEFAULT_BITS),
        EffectPreset::new("game_over", Recipe::GameOver, 0.6, DEFAULT_BITS),
        EffectPreset::new("game_start", Recipe::Start, 0.5, DEFAULT_BITS),
        EffectPreset::new("button_click", Recipe::Click, 0.05, DEFAULT_BITS),
    ]
}

// ── Catalog ─────────────────────────────────────────────────

fn default_sample_rate() -> u32 {
    SAMPLE_RATE
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Seed for every noise stream; each effect starts a fresh stream.
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_effects")]
    pub effects: Vec<EffectPreset>,
    #[serde(default)]
    pub track: BackgroundTrack,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            sample_rate: SAMPLE_RATE,
            seed: DEFAULT_SEED,
            effects: default_effects(),
            track: BackgroundTrack::default(),
        }
    }
}

impl Catalog {
    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| SfxError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Catalog::from_json(&text).map_err(|source| SfxError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path`, or fall back to the stock catalog when it is missing
    /// or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no catalog file, using defaults");
            return Catalog::default();
        }
        match Catalog::load(path) {
            Ok(catalog) => catalog,
            Err(err) => {
                tracing::warn!("{err}; using default catalog");
                Catalog::default()
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&EffectPreset> {
        self.effects.iter().find(|p| p.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.effects.iter().map(|p| p.name.as_str())
    }

    /// Render one effect to PCM with a fresh noise stream.
    pub fn render_effect(&self, preset: &EffectPreset) -> Result<Vec<i16>> {
        let mut noise = Noise::new_with_seed(self.seed);
        preset.render(self.sample_rate, &mut noise)
    }

    /// Render an effect by name.
    pub fn render_named(&self, name: &str) -> Result<Vec<i16>> {
        let preset = self
            .get(name)
            .ok_or_else(|| SfxError::UnknownEffect(name.to_string()))?;
        self.render_effect(preset)
    }

    pub fn render_track(&self) -> Result<Vec<i16>> {
        self.track.render(self.sample_rate)
    }
}
