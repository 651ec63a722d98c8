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

//! # ACAI Test Utilities
//!
//! Shared test utilities for ACAI crates providing:
//! - An in-memory [`FakePlatform`] that records every remote call
//! - Certificate directory fixtures
//! - CLI command helpers for testing the `acai` binary

pub mod cli;
pub mod fixtures;
pub mod platform;

pub use cli::acai;
pub use fixtures::{CertFixture, TEST_CERT_PEM, TEST_CHAIN_PEM, TEST_KEY_PEM};
pub use platform::{Call, FakePlatform};
