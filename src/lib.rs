pub mod catalog;
#[cfg(feature = "download")]
pub mod download;
pub mod dsp;
pub mod error;
pub mod generator;
pub mod track;

use crate::catalog::Catalog;
use crate::error::SfxError;
use crate::track::BackgroundTrack;
use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the retro_sfx version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// Render a stock catalog effect to WAV bytes.
pub fn effect_wav(name: &str) -> error::Result<Vec<u8>> {
    let catalog = Catalog::default();
    let pcm = catalog.render_named(name)?;
    dsp::renderer::encode_wav(&pcm, catalog.sample_rate)
}

/// Render the background track to WAV bytes at the default sample rate.
pub fn background_wav(duration: f64, tempo: f64) -> error::Result<Vec<u8>> {
    let track = BackgroundTrack {
        duration,
        tempo,
        ..BackgroundTrack::default()
    };
    let pcm = track.render(dsp::SAMPLE_RATE)?;
    dsp::renderer::encode_wav(&pcm, dsp::SAMPLE_RATE)
}

fn to_js(e: SfxError) -> JsValue {
    JsValue::from_str(&format!("{e}"))
}

/// WASM-exposed: names of the stock effects, as a JS array of strings.
#[wasm_bindgen]
pub fn effect_names() -> Result<JsValue, JsValue> {
    let catalog = Catalog::default();
    let names: Vec<&str> = catalog.names().collect();
    serde_wasm_bindgen::to_value(&names).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: render a stock effect (e.g. `"paddle_hit"`) to a WAV byte array.
#[wasm_bindgen]
pub fn render_effect_wav(name: &str) -> Result<Vec<u8>, JsValue> {
    effect_wav(name).map_err(to_js)
}

/// WASM-exposed: render the looping background track to a WAV byte array.
#[wasm_bindgen]
pub fn render_background_wav(duration: f64, tempo: f64) -> Result<Vec<u8>, JsValue> {
    background_wav(duration, tempo).map_err(to_js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_wav_has_mono_header_and_samples() {
        let wav = effect_wav("button_click").unwrap();
        assert_eq!(&wav[0..4], b"RIFF");
        let reader = hound::WavReader::new(std::io::Cursor::new(wav)).unwrap();
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.len(), 1103);
    }

    #[test]
    fn unknown_effect_is_an_error() {
        assert!(matches!(effect_wav("blip"), Err(SfxError::UnknownEffect(_))));
    }

    #[test]
    fn background_wav_length() {
        let wav = background_wav(2.0, 120.0).unwrap();
        let reader = hound::WavReader::new(std::io::Cursor::new(wav)).unwrap();
        assert_eq!(reader.len(), 44_100);
    }
}
