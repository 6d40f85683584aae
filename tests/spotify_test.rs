mod common;

use reqwest::StatusCode;
use spotgram::{
    config::SpotifyConfig,
    spotify::{SpotifyClient, SpotifyError, auth::parse_token_response, player::parse_currently_playing},
};

const PLAYING_BODY: &str = r#"{
    "timestamp": 1700000000000,
    "is_playing": true,
    "currently_playing_type": "track",
    "item": {
        "id": "abc",
        "name": "Song A",
        "artists": [
            { "id": "1", "name": "Artist Y" },
            { "id": "2", "name": "Artist X" }
        ]
    }
}"#;

#[test]
fn test_currently_playing_track() {
    let track = parse_currently_playing(StatusCode::OK, PLAYING_BODY)
        .unwrap()
        .unwrap();

    assert_eq!(track.name, "Song A");
    // Artist order from the response is preserved
    assert_eq!(track.artists, vec!["Artist Y", "Artist X"]);
}

#[test]
fn test_currently_playing_nothing() {
    let result = parse_currently_playing(StatusCode::NO_CONTENT, "").unwrap();
    assert!(result.is_none());
}

#[test]
fn test_currently_playing_without_item() {
    // Ads come back as 200 with a null item
    let body = r#"{"is_playing": true, "currently_playing_type": "ad", "item": null}"#;
    let result = parse_currently_playing(StatusCode::OK, body).unwrap();
    assert!(result.is_none());
}

#[test]
fn test_currently_playing_error_status() {
    let body = r#"{"error": {"status": 401, "message": "The access token expired"}}"#;
    let err = parse_currently_playing(StatusCode::UNAUTHORIZED, body).unwrap_err();

    match &err {
        SpotifyError::StatusError { status, body } => {
            assert_eq!(*status, StatusCode::UNAUTHORIZED);
            assert!(body.contains("The access token expired"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.to_string().contains("status code 401"));
}

#[test]
fn test_currently_playing_malformed_body() {
    let result = parse_currently_playing(StatusCode::OK, "{not json");
    assert!(matches!(result, Err(SpotifyError::SerdeError(_))));
}

#[test]
fn test_token_response() {
    let body = r#"{
        "access_token": "BQC-token",
        "token_type": "Bearer",
        "expires_in": 3600,
        "scope": "user-read-currently-playing"
    }"#;

    let token = parse_token_response(StatusCode::OK, body).unwrap();
    assert_eq!(token.access_token, "BQC-token");
    assert_eq!(token.token_type, "Bearer");
    assert_eq!(token.expires_in, 3600);
}

#[test]
fn test_token_response_error_status() {
    let body = r#"{"error": "invalid_grant", "error_description": "Invalid refresh token"}"#;
    let err = parse_token_response(StatusCode::BAD_REQUEST, body).unwrap_err();

    assert!(matches!(
        &err,
        SpotifyError::StatusError { status, .. } if *status == StatusCode::BAD_REQUEST
    ));
    assert!(err.to_string().contains("Invalid refresh token"));
}

#[test]
fn test_token_response_malformed() {
    let result = parse_token_response(StatusCode::OK, r#"{"token_type": "Bearer"}"#);
    assert!(matches!(result, Err(SpotifyError::SerdeError(_))));
}

#[tokio::test]
async fn test_currently_playing_requests() {
    let (url, server) = common::serve(vec![
        r#"{"access_token": "BQC-token", "token_type": "Bearer", "expires_in": 3600}"#,
        PLAYING_BODY,
    ])
    .await;

    let client = SpotifyClient::new(SpotifyConfig {
        client_id: "client".to_string(),
        client_secret: "secret".to_string(),
        refresh_token: "r3fr3sh-value".to_string(),
        api_url: url.clone(),
        token_url: format!("{}/api/token", url),
    })
    .unwrap();

    let track = client.currently_playing().await.unwrap().unwrap();
    assert_eq!(track.name, "Song A");

    let requests = server.await.unwrap();
    assert_eq!(requests.len(), 2);

    // Refresh token grant, form-encoded, with the app's Basic credentials
    let token_request = requests[0].to_ascii_lowercase();
    assert!(token_request.starts_with("post /api/token "));
    assert!(token_request.contains("authorization: basic "));
    assert!(requests[0].contains("Basic Y2xpZW50OnNlY3JldA=="));
    assert!(token_request.contains("application/x-www-form-urlencoded"));
    assert!(requests[0].contains("grant_type=refresh_token"));
    assert!(requests[0].contains("refresh_token=r3fr3sh-value"));

    // Now-playing query with the fresh bearer token
    let player_request = requests[1].to_ascii_lowercase();
    assert!(player_request.starts_with("get /me/player/currently-playing "));
    assert!(requests[1].contains("Bearer BQC-token"));
}
