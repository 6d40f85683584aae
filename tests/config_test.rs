use std::{collections::HashMap, path::PathBuf, time::Duration};

use spotgram::config::*;

// Helper building a lookup with every required variable set
fn required_vars() -> HashMap<String, String> {
    [
        ("SPOTIFY_CLIENT_ID", "client"),
        ("SPOTIFY_CLIENT_SECRET", "s3cr3t-value"),
        ("SPOTIFY_REFRESH_TOKEN", "r3fr3sh-value"),
        ("BOT_TOKEN", "123:abc"),
        ("CHAT_ID", "-10042"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn build(vars: &HashMap<String, String>) -> Result<Config, ConfigError> {
    Config::from_lookup(&|key: &str| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = build(&required_vars()).unwrap();

    assert_eq!(config.spotify.client_id, "client");
    assert_eq!(config.spotify.client_secret, "s3cr3t-value");
    assert_eq!(config.spotify.refresh_token, "r3fr3sh-value");
    assert_eq!(config.spotify.api_url, DEFAULT_SPOTIFY_API_URL);
    assert_eq!(config.spotify.token_url, DEFAULT_SPOTIFY_TOKEN_URL);
    assert_eq!(config.telegram.bot_token, "123:abc");
    assert_eq!(config.telegram.chat_id, "-10042");
    assert_eq!(config.telegram.api_url, DEFAULT_TELEGRAM_API_URL);
    assert_eq!(config.download.bin, "yt-dlp");
    assert_eq!(config.download.audio_file, PathBuf::from("audio.mp3"));
    assert_eq!(config.poll_interval, Duration::from_secs(60));
    assert_eq!(config.history_file, PathBuf::from("data.json"));
    assert!(!config.upload);
    assert!(!config.edit_message);
}

#[test]
fn test_overrides() {
    let mut vars = required_vars();
    vars.insert("POLL_INTERVAL".to_string(), "15".to_string());
    vars.insert("UPLOAD".to_string(), "true".to_string());
    vars.insert("EDIT_MESSAGE".to_string(), "1".to_string());
    vars.insert("HISTORY_FILE".to_string(), "/tmp/history.json".to_string());
    vars.insert("AUDIO_FILE".to_string(), "track.mp3".to_string());
    vars.insert("YTDLP_BIN".to_string(), "/usr/local/bin/yt-dlp".to_string());
    vars.insert(
        "TELEGRAM_API_URL".to_string(),
        "http://localhost:8081/".to_string(),
    );

    let config = build(&vars).unwrap();

    assert_eq!(config.poll_interval, Duration::from_secs(15));
    assert!(config.upload);
    assert!(config.edit_message);
    assert_eq!(config.history_file, PathBuf::from("/tmp/history.json"));
    assert_eq!(config.download.audio_file, PathBuf::from("track.mp3"));
    assert_eq!(config.download.bin, "/usr/local/bin/yt-dlp");
    // Trailing slash is dropped so method URLs don't get a double slash
    assert_eq!(config.telegram.api_url, "http://localhost:8081");
}

#[test]
fn test_missing_required_variables() {
    for key in [
        "SPOTIFY_CLIENT_ID",
        "SPOTIFY_CLIENT_SECRET",
        "SPOTIFY_REFRESH_TOKEN",
        "BOT_TOKEN",
        "CHAT_ID",
    ] {
        let mut vars = required_vars();
        vars.remove(key);
        let err = build(&vars).unwrap_err();
        assert_eq!(err, ConfigError::Missing(key.to_string()));
        assert_eq!(err.to_string(), format!("{} must be set", key));
    }
}

#[test]
fn test_empty_required_variable_counts_as_missing() {
    let mut vars = required_vars();
    vars.insert("CHAT_ID".to_string(), "  ".to_string());
    assert_eq!(
        build(&vars).unwrap_err(),
        ConfigError::Missing("CHAT_ID".to_string())
    );
}

#[test]
fn test_invalid_poll_interval() {
    let mut vars = required_vars();
    vars.insert("POLL_INTERVAL".to_string(), "0".to_string());
    assert!(matches!(
        build(&vars).unwrap_err(),
        ConfigError::Invalid { key, .. } if key == "POLL_INTERVAL"
    ));

    vars.insert("POLL_INTERVAL".to_string(), "soon".to_string());
    assert!(matches!(
        build(&vars).unwrap_err(),
        ConfigError::Invalid { key, .. } if key == "POLL_INTERVAL"
    ));
}

#[test]
fn test_invalid_flag() {
    let mut vars = required_vars();
    vars.insert("UPLOAD".to_string(), "maybe".to_string());
    assert!(matches!(
        build(&vars).unwrap_err(),
        ConfigError::Invalid { key, .. } if key == "UPLOAD"
    ));
}

#[test]
fn test_history_file_lookup() {
    let vars: HashMap<String, String> = HashMap::new();
    assert_eq!(
        history_file(&|key: &str| vars.get(key).cloned()),
        PathBuf::from(DEFAULT_HISTORY_FILE)
    );
}

#[test]
fn test_debug_output_hides_secrets() {
    let config = build(&required_vars()).unwrap();
    let debug = format!("{:?}", config);
    assert!(!debug.contains("s3cr3t-value"));
    assert!(!debug.contains("r3fr3sh-value"));
    assert!(!debug.contains("123:abc"));
    assert!(debug.contains("client"));
}
