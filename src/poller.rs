//! The poll, download and publish cycle.
//!
//! A [`Poller`] wires a now-playing source, an audio source and a publisher
//! together with the optional track history. Each cycle runs to completion
//! before the next one may start:
//!
//! ```text
//! now playing? ──no──> done
//!      │
//!   in history? ──yes──> done
//!      │
//!   download ──> thumbnail ──> publish ──> mark + persist
//!      └──────────── cleanup temp files ───────────┘
//! ```
//!
//! The collaborators sit behind small traits so the cycle can be driven
//! without network access or an installed `yt-dlp`.

use std::{
    future::Future,
    path::{Path, PathBuf},
    time::Duration,
};

use tokio::time::{self, MissedTickBehavior};

use crate::{
    Res, download, failure, info, management::HistoryManager, success,
    types::{AudioUpload, Track},
    utils, warning,
};

/// Source of the track currently playing.
pub trait NowPlaying {
    fn current_track(&self) -> impl Future<Output = Res<Option<Track>>>;
}

/// Fetches audio for a search query into a fixed local file.
pub trait AudioSource {
    fn fetch(&self, query: &str) -> impl Future<Output = Res<()>>;

    /// Where `fetch` writes the audio.
    fn audio_path(&self) -> &Path;

    /// Files the thumbnail may end up in, in probe order.
    fn thumbnail_candidates(&self) -> Vec<PathBuf>;
}

/// Posts audio to the chat.
pub trait Publisher {
    /// Sends `upload`, or edits `message_id` in place when given. Returns the
    /// id of the message now holding the audio.
    fn publish(
        &self,
        upload: &AudioUpload,
        message_id: Option<i64>,
    ) -> impl Future<Output = Res<i64>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    NothingPlaying,
    AlreadyProcessed(String),
    Published { key: String, message_id: i64 },
}

pub struct Poller<N, A, P> {
    now_playing: N,
    audio: A,
    publisher: P,
    history: Option<HistoryManager>,
}

impl<N, A, P> Poller<N, A, P>
where
    N: NowPlaying,
    A: AudioSource,
    P: Publisher,
{
    /// `history` is `None` when deduplication is disabled, in which case every
    /// detected track is published again on every cycle.
    pub fn new(now_playing: N, audio: A, publisher: P, history: Option<HistoryManager>) -> Self {
        Self {
            now_playing,
            audio,
            publisher,
            history,
        }
    }

    pub fn history(&self) -> Option<&HistoryManager> {
        self.history.as_ref()
    }

    /// Runs cycles every `every` until Ctrl-C.
    ///
    /// The first cycle starts right away. A cycle that outlasts the interval
    /// delays the next tick instead of queueing extra ones. A Ctrl-C received
    /// while a cycle is running stops the loop once that cycle is done.
    pub async fn run(&mut self, every: Duration, edit_message: bool) {
        let mut ticker = time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_message: Option<i64> = None;

        // lives across cycles, a signal received mid-cycle stays pending
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Shutting down");
                    return;
                }
                _ = ticker.tick() => {}
            }

            self.tick(&mut last_message, edit_message).await;
        }
    }

    /// One iteration of [`Poller::run`].
    ///
    /// In edit mode `last_message` holds the id of the last published message
    /// and is handed to the cycle, which then edits it instead of sending a
    /// new one. Outside edit mode every cycle sends. The id lives only as long
    /// as the caller keeps it, so it is lost when the process exits.
    pub async fn tick(&mut self, last_message: &mut Option<i64>, edit_message: bool) {
        let message_id = if edit_message { *last_message } else { None };
        match self.run_cycle(message_id).await {
            Ok(CycleOutcome::Published { message_id, .. }) => *last_message = Some(message_id),
            Ok(_) => {}
            Err(e) => failure!("{}", e),
        }
    }

    /// Runs a single cycle.
    ///
    /// # Errors
    ///
    /// Fails when the now-playing query, the download or the publish fails.
    /// The history is left untouched in all of these cases so the track is
    /// attempted again on a later cycle. A failure to persist the history is
    /// only logged.
    pub async fn run_cycle(&mut self, message_id: Option<i64>) -> Res<CycleOutcome> {
        let Some(track) = self
            .now_playing
            .current_track()
            .await
            .map_err(|e| format!("failed to get current playing: {}", e))?
        else {
            info!("Not listening to music");
            return Ok(CycleOutcome::NothingPlaying);
        };

        let key = utils::track_key(&track);
        info!("{}", key);

        if let Some(history) = &self.history {
            if history.has(&key) {
                info!("'{}' already exists in the history. Skipping download.", key);
                return Ok(CycleOutcome::AlreadyProcessed(key));
            }
        }

        let published = self.acquire_and_publish(&track, &key, message_id).await;
        self.cleanup().await;
        let message_id = published?;

        if let Some(history) = &mut self.history {
            history.mark(&key);
            if let Err(e) = history.persist().await {
                warning!("Failed to save history: {}", e);
            }
        }

        success!("Published: {}", key);
        Ok(CycleOutcome::Published { key, message_id })
    }

    async fn acquire_and_publish(
        &self,
        track: &Track,
        key: &str,
        message_id: Option<i64>,
    ) -> Res<i64> {
        info!("Downloading: {}", key);
        self.audio
            .fetch(&utils::search_query(track))
            .await
            .map_err(|e| format!("failed to download '{}': {}", key, e))?;

        let thumbnail = download::find_thumbnail(&self.audio.thumbnail_candidates());
        if thumbnail.is_none() {
            warning!("No thumbnail found for '{}'", key);
        }

        let upload = AudioUpload {
            audio: self.audio.audio_path().to_path_buf(),
            title: track.name.clone(),
            performer: utils::join_artists(&track.artists),
            thumbnail,
        };

        info!("Uploading to Telegram: {}", key);
        let id = self
            .publisher
            .publish(&upload, message_id)
            .await
            .map_err(|e| {
                if let Some(id) = message_id {
                    warning!("Editing message {} failed, it is retried on the next cycle", id);
                }
                format!("failed to upload '{}' to Telegram: {}", key, e)
            })?;

        Ok(id)
    }

    async fn cleanup(&self) {
        let mut paths = vec![self.audio.audio_path().to_path_buf()];
        paths.extend(self.audio.thumbnail_candidates());

        for path in paths {
            if let Err(e) = async_fs::remove_file(&path).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warning!("Failed to remove {}: {}", path.display(), e);
                }
            }
        }
    }
}
