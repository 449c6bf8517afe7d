//! difftext - sequence matching, line deltas and diff-backed undo history.
//!
//! This crate compares sequences the way people read them: it aligns the
//! longest shared runs first and never lets a stray one-token match hundreds
//! of lines away win over real structure. On top of that it builds a
//! compact, linear undo/redo history for plain text.
//!
//! # Features
//!
//! - **Sequence matching**: [`SequenceMatcher`] with junk filtering and the
//!   popular-token heuristic, producing matching blocks, opcodes and ratios
//! - **Deltas**: [`ndiff`] transcripts with intraline hints, reversible with
//!   [`restore`]
//! - **Listings**: [`unified_diff`] and [`context_diff`]
//! - **Close matches**: [`get_close_matches`] ranks candidates by similarity
//! - **History**: [`HistoryManager`] stores each step as a delta, with branch
//!   truncation and bounded retention
//! - **Configuration**: serde-backed [`HistoryConfig`] with environment
//!   overrides
//!
//! # Example
//!
//! ```rust
//! use difftext::{HistoryConfig, HistoryManager, Metadata, RECOMMENDED_MAX_STEPS};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HistoryConfig::builder()
//!     .max_steps(RECOMMENDED_MAX_STEPS)
//!     .build()?;
//!
//! let mut history = HistoryManager::with_config(config);
//! history
//!     .add("Hallo!")
//!     .add_with_metadata("Hallo!\nHallo Welt", Metadata::with_caret(17));
//!
//! let restored = history.undo().ok_or("nothing to undo")?;
//! assert_eq!(restored.text, "Hallo!");
//! assert_eq!(restored.metadata.caret_position, Some(17));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]

pub mod close;
pub mod config;
pub mod differ;
pub mod error;
pub mod format;
pub mod heap;
pub mod history;
pub mod junk;
pub mod matcher;

// Re-export commonly used types
pub use close::get_close_matches;
pub use config::{HistoryConfig, HistoryConfigBuilder, RECOMMENDED_MAX_STEPS};
pub use differ::{Delta, Differ, Direction, LineTag, ndiff, ndiff_with, restore};
pub use error::{ConfigError, DiffError};
pub use format::{DiffOptions, context_diff, unified_diff};
pub use heap::{PriorityQueue, nlargest, nsmallest};
pub use history::{HistoryEntry, HistoryManager, Metadata, Restored, Snapshot};
pub use junk::{Junk, is_character_junk, is_line_junk};
pub use matcher::{Match, OpTag, Opcode, SequenceMatcher};

/// Version of the difftext crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes logging for difftext.
///
/// Installs a formatting subscriber filtered by `RUST_LOG`, falling back to
/// `info`. This should be called once at the start of the application.
///
/// # Errors
///
/// Returns an error if the tracing subscriber has already been set.
pub fn init_logging() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
}
