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

//! Global subscriber installation.

use crate::config::{LogConfig, LogError, LogFormat};
use std::io;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Install the global tracing subscriber, writing to stderr.
///
/// Fails with [`LogError::Init`] if a subscriber is already installed.
///
/// # Example
///
/// ```ignore
/// use acai_observability::{init_tracing, LogConfig};
///
/// init_tracing(&LogConfig::new().with_level("debug").with_color(false))?;
/// tracing::debug!("resolving profile");
/// ```
pub fn init_tracing(config: &LogConfig) -> Result<(), LogError> {
    let registry = Registry::default().with(build_env_filter(config)?);
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(config.include_targets);

    let result = match config.format {
        LogFormat::Pretty => registry
            .with(layer.with_ansi(config.use_color).pretty())
            .try_init(),
        LogFormat::Compact => registry
            .with(layer.with_ansi(config.use_color).compact())
            .try_init(),
        LogFormat::Json => registry.with(layer.with_ansi(false).json()).try_init(),
    };

    result.map_err(|e| LogError::Init(e.to_string()))
}

fn build_env_filter(config: &LogConfig) -> Result<EnvFilter, LogError> {
    let filter = config.effective_level();
    EnvFilter::try_new(&filter).map_err(|e| LogError::InvalidFilter {
        reason: e.to_string(),
        filter,
    })
}
