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

//! Subscriber installation
//!
//! A process holds one global subscriber, so this binary installs exactly one.

use acai_observability::{init_tracing, LogConfig, LogError, LogFormat};

#[test]
fn test_second_installation_is_refused() {
    let config = LogConfig::new()
        .with_format(LogFormat::Compact)
        .with_level("info")
        .with_color(false);

    assert!(init_tracing(&config).is_ok());
    tracing::info!("subscriber installed");
    assert!(matches!(init_tracing(&config), Err(LogError::Init(_))));
}

#[test]
fn test_invalid_filter_is_reported_before_installation() {
    let config = LogConfig::new().with_level("[[[not a filter");
    assert!(matches!(
        init_tracing(&config),
        Err(LogError::InvalidFilter { .. })
    ));
}
