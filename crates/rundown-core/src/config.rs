//! Configuration types for rundown.
//!
//! The normalizer's vocabulary lives here rather than in control flow: which
//! JSON key names the producer may use, which header wording maps to which
//! column [`Role`](crate::types::Role), and which characters delimit table
//! columns.
//!
//! [`Config::defaults`] returns the embedded defaults. [`Config::load`] layers
//! `~/.config/rundown/config.toml` on top of them when that file exists, and
//! [`Config::load_from`] layers an explicit file.

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[keys]
schemes = [
    ["時間", "事件", "備註"],
    ["time", "event", "note"],
]

[roles]
time  = ["時間", "时间", "時段", "时段", "time"]
event = ["事件", "流程", "活動", "活动", "event", "process", "activity"]
note  = ["備註", "备注", "內容", "内容", "建議", "建议", "說明", "说明", "note", "content", "suggestion", "remark"]

[table]
separators = ["|", "｜"]
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level normalizer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub keys: KeysConfig,
    #[serde(default)]
    pub roles: RolesConfig,
    #[serde(default)]
    pub table: TableConfig,
}

/// `[keys]` section: accepted `[time, event, note]` key triples for
/// structured records. Matching is exact and case-sensitive.
#[derive(Debug, Clone, Deserialize)]
pub struct KeysConfig {
    #[serde(default = "default_schemes")]
    pub schemes: Vec<Vec<String>>,
}

fn default_schemes() -> Vec<Vec<String>> {
    vec![words(&["時間", "事件", "備註"]), words(&["time", "event", "note"])]
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self { schemes: default_schemes() }
    }
}

/// `[roles]` section: substrings that identify each header column.
/// Matching is case-insensitive.
#[derive(Debug, Clone, Deserialize)]
pub struct RolesConfig {
    #[serde(default = "default_time_words")]
    pub time: Vec<String>,
    #[serde(default = "default_event_words")]
    pub event: Vec<String>,
    #[serde(default = "default_note_words")]
    pub note: Vec<String>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

fn default_time_words() -> Vec<String> {
    words(&["時間", "时间", "時段", "时段", "time"])
}
fn default_event_words() -> Vec<String> {
    words(&["事件", "流程", "活動", "活动", "event", "process", "activity"])
}
fn default_note_words() -> Vec<String> {
    words(&[
        "備註", "备注", "內容", "内容", "建議", "建议", "說明", "说明", "note", "content",
        "suggestion", "remark",
    ])
}

impl Default for RolesConfig {
    fn default() -> Self {
        Self {
            time: default_time_words(),
            event: default_event_words(),
            note: default_note_words(),
        }
    }
}

/// `[table]` section. Each separator must be a single character.
#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    #[serde(default = "default_separators")]
    pub separators: Vec<String>,
}

fn default_separators() -> Vec<String> {
    words(&["|", "｜"])
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { separators: default_separators() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the built-in defaults layered with `~/.config/rundown/config.toml`
    /// if it exists. The file is never created.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Load the built-in defaults layered with `path`, which must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(true))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("rundown")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
