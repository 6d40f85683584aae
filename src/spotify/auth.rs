use reqwest::{Client, StatusCode, header};

use crate::{config::SpotifyConfig, spotify::SpotifyError, types::Token, utils};

/// Exchanges the refresh token for a short-lived access token.
///
/// Sends the `refresh_token` grant form-encoded to the token endpoint,
/// authenticating the application with HTTP Basic auth of
/// `client_id:client_secret`. The returned access token is not cached; the
/// caller asks for a new one on every query.
///
/// # Arguments
///
/// * `client` - HTTP client carrying the request timeout
/// * `config` - Spotify credentials and token endpoint
///
/// # Errors
///
/// - [`SpotifyError::HttpError`] on transport failures or timeouts
/// - [`SpotifyError::StatusError`] when the endpoint does not answer 200
/// - [`SpotifyError::SerdeError`] when the body is not a token response
pub async fn access_token(client: &Client, config: &SpotifyConfig) -> Result<String, SpotifyError> {
    let res = client
        .post(&config.token_url)
        .header(
            header::AUTHORIZATION,
            utils::basic_credentials(&config.client_id, &config.client_secret),
        )
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", config.refresh_token.as_str()),
        ])
        .send()
        .await?;

    let status = res.status();
    let body = res.text().await?;
    let token = parse_token_response(status, &body)?;

    Ok(token.access_token)
}

/// Interprets a token endpoint response.
pub fn parse_token_response(status: StatusCode, body: &str) -> Result<Token, SpotifyError> {
    if status != StatusCode::OK {
        return Err(SpotifyError::StatusError {
            status,
            body: body.to_string(),
        });
    }

    Ok(serde_json::from_str::<Token>(body)?)
}
