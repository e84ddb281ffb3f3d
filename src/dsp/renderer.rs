//! WAV renderer: wraps encoded PCM in a mono 16-bit RIFF/WAVE container.

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use crate::error::{Result, SfxError};

fn wav_spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

fn write_samples<W: Write + Seek>(
    writer: W,
    samples: &[i16],
    sample_rate: u32,
) -> std::result::Result<(), hound::Error> {
    let mut wav = hound::WavWriter::new(writer, wav_spec(sample_rate))?;
    for &sample in samples {
        wav.write_sample(sample)?;
    }
    wav.finalize()
}

/// Encode PCM samples to an in-memory WAV file.
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(44 + samples.len() * 2);
    write_samples(Cursor::new(&mut bytes), samples, sample_rate)?;
    Ok(bytes)
}

/// Write PCM samples to a WAV file at `path`, replacing any existing file.
pub fn write_wav(path: &Path, samples: &[i16], sample_rate: u32) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| SfxError::Sink {
        path: path.to_path_buf(),
        source: hound::Error::IoError(e),
    })?;
    write_samples(std::io::BufWriter::new(file), samples, sample_rate).map_err(|source| {
        SfxError::Sink {
            path: path.to_path_buf(),
            source,
        }
    })
}
