//! Settings for the `revparse` binary.
//!
//! [`Settings::load`] layers the built-in defaults, an optional TOML file and `REVPARSE_*`
//! environment variables, in that order.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::{dispatcher::DEFAULT_SEPARATOR, location::DEFAULT_STATE};

const DEFAULT_CONFIG: &str = r#"
separator     = "\n\n"
default_state = "ma"
"#;

const ENV_PREFIX: &str = "REVPARSE";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Text between two review blocks.
    #[serde(default = "default_separator")]
    pub separator: String,
    /// State appended to locations that name none.
    #[serde(default = "default_state")]
    pub default_state: String,
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn default_state() -> String {
    DEFAULT_STATE.to_string()
}

impl Settings {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).format(config::FileFormat::Toml));
        }
        let mut settings: Settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .with_context(|| "failed to load settings")?
            .try_deserialize()
            .with_context(|| "invalid settings")?;
        // Environment variables cannot easily carry raw newlines. TOML values are already
        // unescaped by the parser and must not be expanded twice.
        if let Ok(raw) = std::env::var(format!("{ENV_PREFIX}_SEPARATOR")) {
            settings.separator = unescape(&raw);
        }
        Ok(settings)
    }
}

/// Expand `\n`, `\r`, `\t` and `\\` escape sequences.
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
