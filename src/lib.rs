//! Spotify to Telegram Now-Playing Bot Library
//!
//! This library polls the Spotify "currently playing" endpoint and, whenever a
//! new track shows up, downloads a matching audio file with `yt-dlp` and posts
//! it as an audio message to a Telegram chat. Already handled tracks can be
//! remembered in a small JSON history file so they are only posted once.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `download` - Audio acquisition through the external `yt-dlp` tool
//! - `management` - Persisted track history
//! - `poller` - The poll, download and publish cycle and its timer loop
//! - `spotify` - Spotify Web API client implementation
//! - `telegram` - Telegram Bot API audio publisher
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotgram::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> spotgram::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     cli::once(&config).await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod download;
pub mod management;
pub mod poller;
pub mod spotify;
pub mod telegram;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. The module-level error types
/// (`SpotifyError`, `TelegramError`, ...) all convert into it with `?`.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Local wall-clock timestamp used as prefix for every log line.
///
/// The bot is a long-running process whose only user-visible surface is its
/// console output, so every line carries the time it was written.
#[doc(hidden)]
pub fn log_time() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a timestamp and a distinctive blue
/// "o" indicator followed by the provided message. Used for general
/// information and status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Polling every {} seconds", 60);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("{} [{}] {}", $crate::log_time(), "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used to provide positive feedback when a track was published or a
/// command completed successfully.
///
/// # Example
///
/// ```
/// success!("Published: {}", key);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("{} [{}] {}", $crate::log_time(), "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the program with exit code 1 right after printing. It should
/// only be used for fatal errors where recovery is not possible, such as a
/// missing configuration value at startup.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("{} [{}] {}", $crate::log_time(), "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints an error message with a red cross without exiting.
///
/// Used for failures the process recovers from on its own, most notably a
/// poll cycle that failed and will be retried on the next tick.
///
/// # Example
///
/// ```
/// failure!("Cycle failed: {}", e);
/// ```
#[macro_export]
macro_rules! failure {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("{} [{}] {}", $crate::log_time(), "x".red().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Highlights issues that don't require program termination, e.g. a missing
/// thumbnail or a history file that could not be written.
///
/// # Example
///
/// ```
/// warning!("No thumbnail found for {}", key);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("{} [{}] {}", $crate::log_time(), "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
