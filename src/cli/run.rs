use std::time::Duration;

use crate::{
    config::Config,
    download::YtDlp,
    error, info,
    management::HistoryManager,
    poller::{CycleOutcome, Poller},
    spotify::SpotifyClient,
    success,
    telegram::TelegramPublisher,
};

type BotPoller = Poller<SpotifyClient, YtDlp, TelegramPublisher>;

/// Runs the poll loop until Ctrl-C.
///
/// `interval` overrides the configured `POLL_INTERVAL` (seconds).
pub async fn run(config: &Config, interval: Option<u64>) {
    let mut poller = build_poller(config).await;
    let every = interval
        .map(Duration::from_secs)
        .unwrap_or(config.poll_interval);

    info!(
        "Polling every {}s (history: {}, edit message: {})",
        every.as_secs(),
        if config.upload { "on" } else { "off" },
        if config.edit_message { "on" } else { "off" }
    );
    poller.run(every, config.edit_message).await;
}

/// Runs a single cycle and exits non-zero when it fails.
pub async fn once(config: &Config) {
    let mut poller = build_poller(config).await;

    match poller.run_cycle(None).await {
        Ok(CycleOutcome::NothingPlaying) => info!("Nothing to do"),
        Ok(CycleOutcome::AlreadyProcessed(key)) => info!("Already posted: {}", key),
        Ok(CycleOutcome::Published { key, message_id }) => {
            success!("Posted '{}' as message {}", key, message_id)
        }
        Err(e) => error!("{}", e),
    }
}

async fn build_poller(config: &Config) -> BotPoller {
    let spotify = match SpotifyClient::new(config.spotify.clone()) {
        Ok(client) => client,
        Err(e) => error!("Cannot create Spotify client: {}", e),
    };

    let publisher = match TelegramPublisher::new(config.telegram.clone()) {
        Ok(publisher) => publisher,
        Err(e) => error!("Cannot create Telegram client: {}", e),
    };

    let history = if config.upload {
        match HistoryManager::load(config.history_file.clone()).await {
            Ok(history) => {
                info!(
                    "Loaded {} tracks from {}",
                    history.len(),
                    history.path().display()
                );
                Some(history)
            }
            Err(e) => error!(
                "Failed to load history from {}: {}",
                config.history_file.display(),
                e
            ),
        }
    } else {
        None
    };

    Poller::new(spotify, YtDlp::new(&config.download), publisher, history)
}
