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

//! ACAI Observability
//!
//! Logging setup for the certificate installer.
//!
//! Events go to stderr in a pretty, compact or JSON format. The level comes
//! from the caller or `RUST_LOG`, and colour is decided once by the caller.
//!
//! # Example
//!
//! ```ignore
//! use acai_observability::{init_tracing, LogConfig, LogFormat};
//!
//! init_tracing(&LogConfig::new().with_format(LogFormat::Json))?;
//! tracing::info!("installer started");
//! ```

pub mod config;
pub mod initialization;

pub use config::{LogConfig, LogError, LogFormat, DEFAULT_LEVEL};
pub use initialization::init_tracing;
