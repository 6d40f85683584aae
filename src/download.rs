//! Audio acquisition through `yt-dlp`.
//!
//! The bot doesn't stream from Spotify. Instead it searches for the track by
//! title and artists and lets `yt-dlp` extract the best match as mp3 into a
//! fixed local file, together with a thumbnail converted to jpg. Both files
//! are temporary and removed by the poller after each cycle.

use std::{
    fmt,
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
};

use tokio::process::Command;

use crate::{Res, config::DownloadConfig, poller::AudioSource, utils};

/// Extensions probed for the thumbnail, in order of preference.
pub const THUMBNAIL_EXTENSIONS: [&str; 3] = ["jpg", "webp", "png"];

#[derive(Debug)]
pub enum DownloadError {
    SpawnError { bin: String, source: std::io::Error },
    ExitError { status: ExitStatus, stderr: String },
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::SpawnError { bin, source } => {
                write!(f, "failed to start {}: {}", bin, source)
            }
            DownloadError::ExitError { status, stderr } => {
                write!(f, "downloader exited with {}: {}", status, stderr)
            }
        }
    }
}

impl std::error::Error for DownloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DownloadError::SpawnError { source, .. } => Some(source),
            DownloadError::ExitError { .. } => None,
        }
    }
}

/// `yt-dlp` invocation writing into a fixed output file.
pub struct YtDlp {
    bin: String,
    output: PathBuf,
}

impl YtDlp {
    pub fn new(config: &DownloadConfig) -> Self {
        Self {
            bin: config.bin.clone(),
            output: config.audio_file.clone(),
        }
    }

    /// Searches for `query` and extracts the first hit as mp3.
    ///
    /// The process is awaited to completion without a deadline. Its output is
    /// captured so that a failure can report the tail of stderr.
    pub async fn download(&self, query: &str) -> Result<(), DownloadError> {
        let output = Command::new(&self.bin)
            .args(ytdlp_args(query, &self.output))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| DownloadError::SpawnError {
                bin: self.bin.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DownloadError::ExitError {
                status: output.status,
                stderr: utils::truncate_tail(stderr.trim(), 2000).to_string(),
            });
        }

        Ok(())
    }
}

impl AudioSource for YtDlp {
    async fn fetch(&self, query: &str) -> Res<()> {
        Ok(self.download(query).await?)
    }

    fn audio_path(&self) -> &Path {
        &self.output
    }

    fn thumbnail_candidates(&self) -> Vec<PathBuf> {
        thumbnail_candidates(&self.output)
    }
}

/// Command line for a single search-and-extract run.
pub fn ytdlp_args(query: &str, output: &Path) -> Vec<String> {
    vec![
        "-x".to_string(),
        "--audio-format".to_string(),
        "mp3".to_string(),
        "--no-playlist".to_string(),
        "--write-thumbnail".to_string(),
        "--convert-thumbnails".to_string(),
        "jpg".to_string(),
        "-o".to_string(),
        output.to_string_lossy().into_owned(),
        format!("ytsearch1:{}", query),
    ]
}

/// Files the thumbnail may have been written to, in probe order.
///
/// Depending on the version `yt-dlp` either appends the thumbnail extension
/// to the output name (`audio.mp3.jpg`) or replaces it (`audio.jpg`).
pub fn thumbnail_candidates(audio: &Path) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = THUMBNAIL_EXTENSIONS
        .iter()
        .map(|ext| {
            let mut name = audio.as_os_str().to_os_string();
            name.push(".");
            name.push(ext);
            PathBuf::from(name)
        })
        .collect();

    if audio.extension().is_some() {
        candidates.extend(THUMBNAIL_EXTENSIONS.iter().map(|ext| audio.with_extension(ext)));
    }

    candidates
}

/// First candidate that exists on disk.
pub fn find_thumbnail(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|path| path.is_file()).cloned()
}
