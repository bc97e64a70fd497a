//! rundown-core: response normalizer for generated event rundowns.
//!
//! A generative text service is asked for a rundown (a timed list of
//! events). What comes back may be a bare JSON array, JSON wrapped in a
//! fenced code block with commentary around it, or a Markdown table whose
//! header wording and column order vary. This crate turns any of those into
//! one strict, ordered [`Sequence`] of [`Record`]s, or reports that it could
//! not.
//!
//! # Pipeline
//!
//! ```text
//! raw text ──► direct JSON ──► fenced JSON ──► table ──► Unrecognized
//!                  │               │             │
//!                  └───────────────┴─────────────┴──► Parsed(Sequence)
//! ```
//!
//! The normalizer is pure and synchronous; fetching the text, retries and
//! persistence belong to the caller.

pub mod config;
pub mod normalizer;
pub mod types;

pub use normalizer::{normalize, Normalizer};
pub use types::{FailureReason, Outcome, Record, Role, Sequence, Strategy, Unrecognized};
