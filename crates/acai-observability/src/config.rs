// Copyright (C) 2026  ACAI Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Logging configuration.
//!
//! Events always go to stderr; stdout belongs to the progress text.

use std::io::{self, IsTerminal};
use std::str::FromStr;
use thiserror::Error;

/// Level used when neither the caller nor `RUST_LOG` picks one.
pub const DEFAULT_LEVEL: &str = "warn";

/// Errors raised while setting up logging
#[derive(Error, Debug)]
pub enum LogError {
    #[error("Invalid log format: {0}")]
    InvalidFormat(String),

    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("Failed to install subscriber: {0}")]
    Init(String),
}

/// Event format on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line, human-readable
    Pretty,

    /// One line per event
    #[default]
    Compact,

    /// One JSON object per line, for log shippers
    Json,
}

impl FromStr for LogFormat {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LogError::InvalidFormat(format!(
                "Unknown format: {}. Expected one of: pretty, compact, json",
                s
            ))),
        }
    }
}

/// How the subscriber renders events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Event format
    pub format: LogFormat,

    /// Filter directive such as `debug` or `warn,acai_installer=trace`.
    /// `None` defers to `RUST_LOG`.
    pub level: Option<String>,

    /// ANSI colours. Never applied to `Json`.
    pub use_color: bool,

    /// Prefix each event with the module that emitted it.
    pub include_targets: bool,
}

impl Default for LogConfig {
    /// Compact, uncoloured unless stderr is a terminal.
    fn default() -> Self {
        LogConfig {
            format: LogFormat::Compact,
            level: None,
            use_color: io::stderr().is_terminal(),
            include_targets: false,
        }
    }
}

impl LogConfig {
    /// Defaults; see [`LogConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the event format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the filter directive
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Enable or disable ANSI colours
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// Enable or disable module targets
    pub fn with_targets(mut self, include_targets: bool) -> Self {
        self.include_targets = include_targets;
        self
    }

    /// Filter directive in effect: explicit level, then `RUST_LOG`, then
    /// [`DEFAULT_LEVEL`].
    pub fn effective_level(&self) -> String {
        self.level
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
    }
}
