//! Batch generation of every catalog entry into an output directory.
//!
//! Items are independent: a failure to render or write one file is
//! recorded in its [`ItemReport`] and the batch carries on.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, EffectPreset};
use crate::dsp::renderer::write_wav;
use crate::error::{Result, SfxError};

/// Extension of every generated file.
pub const WAV_EXTENSION: &str = "wav";

/// Outcome for one generated file.
#[derive(Debug)]
pub struct ItemReport {
    pub name: String,
    pub path: PathBuf,
    /// Number of samples written.
    pub outcome: Result<usize>,
}

impl ItemReport {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

pub fn output_path(out_dir: &Path, name: &str) -> PathBuf {
    out_dir.join(format!("{name}.{WAV_EXTENSION}"))
}

/// Create `out_dir` (and parents) if it does not exist yet.
pub fn ensure_output_dir(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir).map_err(|source| SfxError::OutputDir {
        path: out_dir.to_path_buf(),
        source,
    })
}

fn write_item(
    out_dir: &Path,
    name: &str,
    sample_rate: u32,
    render: impl FnOnce() -> Result<Vec<i16>>,
) -> ItemReport {
    let path = output_path(out_dir, name);
    let outcome = render().and_then(|pcm| {
        write_wav(&path, &pcm, sample_rate)?;
        Ok(pcm.len())
    });
    match &outcome {
        Ok(samples) => tracing::info!(path = %path.display(), samples, "generated {name}"),
        Err(err) => tracing::warn!("failed to generate {name}: {err}"),
    }
    ItemReport {
        name: name.to_string(),
        path,
        outcome,
    }
}

/// Render one effect to `<out_dir>/<name>.wav`.
pub fn generate_effect(catalog: &Catalog, preset: &EffectPreset, out_dir: &Path) -> ItemReport {
    write_item(out_dir, &preset.name, catalog.sample_rate, || {
        catalog.render_effect(preset)
    })
}

/// Render the background track to `<out_dir>/<track name>.wav`.
pub fn generate_track(catalog: &Catalog, out_dir: &Path) -> ItemReport {
    write_item(out_dir, &catalog.track.name, catalog.sample_rate, || {
        catalog.render_track()
    })
}

/// Render every effect and then the background track.
///
/// Returns one report per effect plus one for the track. When the output
/// directory cannot be created nothing is rendered and every report carries
/// the [`SfxError::OutputDir`] failure.
pub fn generate_all(catalog: &Catalog, out_dir: &Path) -> Vec<ItemReport> {
    if let Err(err) = fs::create_dir_all(out_dir) {
        tracing::warn!("cannot create {}: {err}", out_dir.display());
        return catalog
            .names()
            .chain([catalog.track.name.as_str()])
            .map(|name| ItemReport {
                name: name.to_string(),
                path: output_path(out_dir, name),
                outcome: Err(SfxError::OutputDir {
                    path: out_dir.to_path_buf(),
                    source: io::Error::new(err.kind(), err.to_string()),
                }),
            })
            .collect();
    }
    let mut reports: Vec<ItemReport> = catalog
        .effects
        .iter()
        .map(|preset| generate_effect(catalog, preset, out_dir))
        .collect();
    reports.push(generate_track(catalog, out_dir));
    reports
}
