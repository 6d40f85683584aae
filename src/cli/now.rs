use crate::{config::SpotifyConfig, error, info, spotify::SpotifyClient, success, utils};

pub async fn now(config: SpotifyConfig) {
    let client = match SpotifyClient::new(config) {
        Ok(client) => client,
        Err(e) => error!("Cannot create Spotify client: {}", e),
    };

    match client.currently_playing().await {
        Ok(Some(track)) => {
            success!("{}", utils::track_key(&track));
            info!("Search query: {}", utils::search_query(&track));
        }
        Ok(None) => info!("Not listening to music"),
        Err(e) => error!("Failed to get current playing: {}", e),
    }
}
