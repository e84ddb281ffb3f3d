//! Fetch-and-save for pre-recorded sounds (CC0 clips from freesound.org).
//!
//! Each source is downloaded and written verbatim to `<name>.mp3`. A
//! transport error or non-success status fails that item only.

use std::path::{Path, PathBuf};

use crate::error::{Result, SfxError};
use crate::generator::ensure_output_dir;

pub const SOUND_EXTENSION: &str = "mp3";

/// A named remote sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundSource {
    pub name: &'static str,
    pub url: &'static str,
}

/// Recorded counterparts of the stock catalog effects.
pub const DEFAULT_SOURCES: &[SoundSource] = &[
    SoundSource {
        name: "paddle_hit",
        url: "https://cdn.freesound.org/sounds/415/415912-4929185a-7836-4793-9c47-e6e502a4bfdb?filename=415912__michorvath__ping-pong-ball-hit.mp3",
    },
    SoundSource {
        name: "wall_hit",
        url: "https://cdn.freesound.org/sounds/4/4359-7-98047534-e943-4df0-a0a4-67b76864e1e6?filename=4359__noisecollector__pongblipf4.mp3",
    },
    SoundSource {
        name: "brick_break",
        url: "https://cdn.freesound.org/sounds/446/446115-783df607-aa61-4a7c-93bd-b366c3982e84?filename=446115__justinvoke__bricks-break.mp3",
    },
    SoundSource {
        name: "game_over",
        url: "https://cdn.freesound.org/sounds/277/277403-3615eb64-5a43-4a8a-b671-a2bc161227d7?filename=277403__landlucky__game-over-sfx.mp3",
    },
    SoundSource {
        name: "game_start",
        url: "https://cdn.freesound.org/sounds/142/142608-8b4e663c-46c4-4a5c-a613-1a7531f5c849?filename=142608__autistic-lucario__start.mp3",
    },
    SoundSource {
        name: "button_click",
        url: "https://cdn.freesound.org/sounds/522/522640-76268032-f6e2-4886-a534-7c9aa90a4800?filename=522640__colorscrimsontears__bleep-button.mp3",
    },
];

#[derive(Debug)]
pub struct DownloadReport {
    pub name: String,
    pub path: PathBuf,
    /// Bytes written.
    pub outcome: Result<usize>,
}

pub fn download_path(out_dir: &Path, name: &str) -> PathBuf {
    out_dir.join(format!("{name}.{SOUND_EXTENSION}"))
}

/// Fetch `url` and write the body to `path`.
pub async fn download_file(client: &reqwest::Client, url: &str, path: &Path) -> Result<usize> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SfxError::DownloadStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let body = response.bytes().await?;
    tokio::fs::write(path, &body)
        .await
        .map_err(|source| SfxError::Save {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(body.len())
}

/// Download every source into `out_dir`, one after another.
pub async fn download_all(sources: &[SoundSource], out_dir: &Path) -> Result<Vec<DownloadReport>> {
    ensure_output_dir(out_dir)?;
    let client = reqwest::Client::new();
    let mut reports = Vec::with_capacity(sources.len());
    for source in sources {
        let path = download_path(out_dir, source.name);
        let outcome = download_file(&client, source.url, &path).await;
        match &outcome {
            Ok(bytes) => tracing::info!(path = %path.display(), bytes, "downloaded {}", source.name),
            Err(err) => tracing::warn!("failed to download {}: {err}", source.name),
        }
        reports.push(DownloadReport {
            name: source.name.to_string(),
            path,
            outcome,
        });
    }
    Ok(reports)
}
