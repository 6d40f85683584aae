//! # CLI Module
//!
//! This module provides the command-line layer of the bot. Each function backs
//! one subcommand, takes its configuration explicitly, and reports through the
//! crate's logging macros. Fatal problems (bad configuration, unreadable
//! history) terminate the process via `error!`.
//!
//! ## Commands
//!
//! - [`run`] - The poll loop: query Spotify, download, post, remember
//! - [`once`] - A single cycle of the loop, for cron jobs and debugging
//! - [`now`] - Show what is playing without downloading anything
//! - [`list_history`] - Print the tracks that were already posted
//! - [`forget_history`] - Drop one track so it is posted again
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotgram run                      # poll every POLL_INTERVAL seconds
//! spotgram run --interval 30        # override the interval
//! spotgram history --search daft    # look up posted tracks
//! spotgram history forget "Song - Artist"
//! ```

mod history;
mod now;
mod run;

pub use history::forget_history;
pub use history::list_history;
pub use now::now;
pub use run::once;
pub use run::run;
