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

//! CLI command helpers for testing the `acai` binary.

use assert_cmd::Command;

/// Creates a new `acai` Command with a scrubbed environment.
///
/// All `ACAI_*` variables are cleared so the developer's own overrides never
/// leak into a test; point `HOME` at a temporary directory as well.
///
/// # Example
/// ```ignore
/// use acai_test_utils::acai;
///
/// acai().arg("--help").assert().success();
/// ```
#[allow(deprecated)] // cargo_bin is deprecated but still works for our use case
pub fn acai() -> Command {
    let mut cmd = Command::cargo_bin("acai").expect("acai binary not found");
    cmd.env_remove("ACAI_API_KEY")
        .env_remove("ACAI_API_SECRET")
        .env_remove("ACAI_LE_ROOT")
        .env_remove("ACAI_API_BASE_URL")
        .env_remove("ACAI_AUTH_URL")
        .env_remove("RUST_LOG");
    cmd
}
