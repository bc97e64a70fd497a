//! Normalizer: turns a raw generated response into a strict [`Sequence`].
//!
//! Extraction is attempted in a fixed order: direct JSON → fenced JSON →
//! delimited table. The first strategy that yields a non-empty, fully valid
//! sequence wins and later strategies are not run. If every strategy fails
//! the caller gets [`Outcome::Unrecognized`] with the last conclusive reason.
//!
//! A [`Normalizer`] holds only immutable lookup data compiled from a
//! [`Config`], so one instance can be shared freely across threads.

mod structured;
mod table;

use std::sync::OnceLock;

use crate::config::Config;
use crate::types::{FailureReason, Outcome, Sequence, Strategy, Unrecognized};

pub use structured::KeyScheme;
pub use table::{Columns, RoleTable};

/// Invalid normalizer configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("no key schemes configured")]
    NoKeySchemes,

    #[error("key scheme {index} must list exactly three distinct, non-empty keys")]
    InvalidKeyScheme { index: usize },

    #[error("role '{role}' has no header words")]
    EmptyRole { role: crate::types::Role },

    #[error("no table separators configured")]
    NoSeparators,

    #[error("table separator {value:?} must be a single character")]
    InvalidSeparator { value: String },
}

/// Strategies in priority order.
const PIPELINE: [Strategy; 3] = [Strategy::Direct, Strategy::Fenced, Strategy::Tabular];

/// Compiled normalizer.
#[derive(Debug, Clone)]
pub struct Normalizer {
    schemes: Vec<KeyScheme>,
    roles: RoleTable,
    separators: Vec<char>,
}

impl Normalizer {
    /// Compile a normalizer from configuration.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        if config.keys.schemes.is_empty() {
            return Err(ConfigError::NoKeySchemes);
        }
        let schemes = config
            .keys
            .schemes
            .iter()
            .enumerate()
            .map(|(index, keys)| {
                KeyScheme::from_keys(keys).ok_or(ConfigError::InvalidKeyScheme { index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let roles = RoleTable::from_config(&config.roles)?;

        if config.table.separators.is_empty() {
            return Err(ConfigError::NoSeparators);
        }
        let separators = config
            .table
            .separators
            .iter()
            .map(|value| {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(ConfigError::InvalidSeparator { value: value.clone() }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { schemes, roles, separators })
    }

    /// Normalizer built from the embedded defaults, compiled once.
    pub fn shared() -> &'static Normalizer {
        static DEFAULT: OnceLock<Normalizer> = OnceLock::new();
        DEFAULT.get_or_init(|| {
            Normalizer::new(&Config::defaults()).expect("built-in default config must compile")
        })
    }

    /// Normalize `raw` into a sequence of records.
    ///
    /// Pure: the same input always yields the same outcome. A leading byte
    /// order mark is ignored along with surrounding whitespace.
    pub fn normalize(&self, raw: &str) -> Outcome {
        let text = raw.trim_start_matches('\u{feff}').trim();
        if text.is_empty() {
            tracing::warn!("empty response; keep the raw text for manual entry");
            return Outcome::Unrecognized(Unrecognized::new(FailureReason::EmptyInput));
        }

        let mut failures = Vec::with_capacity(PIPELINE.len());
        for strategy in PIPELINE {
            match self.run(strategy, text) {
                Ok(sequence) => {
                    tracing::info!(strategy = %strategy, records = sequence.len(), "response normalized");
                    return Outcome::Parsed { sequence, strategy };
                }
                Err(reason) => {
                    tracing::debug!(strategy = %strategy, %reason, "strategy failed");
                    failures.push(reason);
                }
            }
        }

        let reason = last_conclusive(failures);
        tracing::warn!(%reason, "response not recognized; keep the raw text for manual correction");
        Outcome::Unrecognized(Unrecognized::new(reason))
    }

    /// Run a single strategy against already-trimmed text.
    pub fn run(&self, strategy: Strategy, text: &str) -> Result<Sequence, FailureReason> {
        match strategy {
            Strategy::Direct => structured::decode_direct(text, &self.schemes),
            Strategy::Fenced => structured::decode_fenced(text, &self.schemes),
            Strategy::Tabular => table::decode_table(text, &self.roles, &self.separators),
        }
    }
}

/// Normalize `raw` with the default configuration.
pub fn normalize(raw: &str) -> Outcome {
    Normalizer::shared().normalize(raw)
}

/// Pick the reason to surface: the last one that says something about the
/// input, or the last one overall when none do.
fn last_conclusive(failures: Vec<FailureReason>) -> FailureReason {
    let fallback = failures.last().cloned().unwrap_or(FailureReason::EmptyInput);
    failures
        .into_iter()
        .rev()
        .find(FailureReason::is_conclusive)
        .unwrap_or(fallback)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
