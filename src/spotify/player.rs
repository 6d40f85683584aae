use reqwest::{Client, StatusCode};

use crate::{
    spotify::SpotifyError,
    types::{CurrentlyPlayingResponse, Track},
};

/// Reads the track currently playing on the user's account.
///
/// Calls `GET {api_url}/me/player/currently-playing` with the given bearer
/// token. The artist order of the response is preserved since it feeds both
/// the track key and the performer shown in the chat.
///
/// # Returns
///
/// - `Ok(Some(Track))` - something is playing
/// - `Ok(None)` - nothing is playing (204), or the item is hidden (ads)
/// - `Err(SpotifyError)` - transport error, unexpected status, bad JSON
pub async fn currently_playing(
    client: &Client,
    api_url: &str,
    token: &str,
) -> Result<Option<Track>, SpotifyError> {
    let api_url = format!("{uri}/me/player/currently-playing", uri = api_url);

    let response = client.get(&api_url).bearer_auth(token).send().await?;
    let status = response.status();
    let body = response.text().await?;

    parse_currently_playing(status, &body)
}

/// Interprets a currently-playing response.
pub fn parse_currently_playing(status: StatusCode, body: &str) -> Result<Option<Track>, SpotifyError> {
    match status {
        StatusCode::NO_CONTENT => Ok(None),
        StatusCode::OK => {
            // no body, no item
            if body.trim().is_empty() {
                return Ok(None);
            }
            let res = serde_json::from_str::<CurrentlyPlayingResponse>(body)?;
            Ok(res.item.map(Track::from))
        }
        _ => Err(SpotifyError::StatusError {
            status,
            body: body.to_string(),
        }),
    }
}
