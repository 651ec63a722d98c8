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

//! Common helpers for `acai` binary tests.
//!
//! Each test gets a temporary Let's Encrypt root, a config file and a mock
//! Acquia API; the command is pointed at all three through its environment.

#![allow(dead_code)]

pub use acai_test_utils::{acai, CertFixture};

use assert_cmd::Command;
use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};

pub const APPLICATION_ID: &str = "app-uuid";
pub const ENVIRONMENT_ID: &str = "3-prod";

pub const PROD_PROFILE: &str = r#"
[prod]
api_key = key
api_secret = secret
application = app-uuid
acquia_environment = prod
"#;

/// Label the binary computes for the `prod` profile today.
pub fn todays_label() -> String {
    format!(
        "LetsEncrypt prod {}",
        chrono::Local::now().date_naive().format("%Y-%m-%d")
    )
}

/// `acai` wired to `fixture` and `server`, with colour disabled.
pub fn acai_against(fixture: &CertFixture, config: &str, server: &MockServer) -> Command {
    acai_with_color(fixture, config, server, "never")
}

/// `acai` wired to `fixture` and `server` with an explicit `--color` choice.
pub fn acai_with_color(
    fixture: &CertFixture,
    config: &str,
    server: &MockServer,
    color: &str,
) -> Command {
    let config_path = fixture.write_config(config);
    let mut cmd = acai();
    cmd.env("HOME", fixture.root())
        .env("ACAI_LE_ROOT", fixture.root())
        .env("ACAI_API_BASE_URL", server.url("/api"))
        .env("ACAI_AUTH_URL", server.url("/oauth/token"))
        .arg("--color")
        .arg(color)
        .arg("--config")
        .arg(config_path);
    cmd
}

pub fn mock_token(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(POST).path("/oauth/token");
        then.status(200)
            .json_body(json!({"access_token": "token", "token_type": "bearer", "expires_in": 300}));
    })
}

pub fn mock_application(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path(format!("/api/applications/{}", APPLICATION_ID));
        then.status(200)
            .json_body(json!({"uuid": APPLICATION_ID, "name": "Example Site"}));
    })
}

pub fn mock_environments(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/api/applications/{}/environments", APPLICATION_ID));
        then.status(200).json_body(json!({
            "_embedded": {"items": [
                {"id": "1-dev", "name": "dev"},
                {"id": ENVIRONMENT_ID, "name": "prod"}
            ]}
        }));
    })
}

pub fn mock_certificates(server: &MockServer, items: Value) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/api/environments/{}/ssl/certificates", ENVIRONMENT_ID));
        then.status(200).json_body(json!({"_embedded": {"items": items}}));
    })
}

pub fn mock_install(server: &MockServer, status: u16) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(POST)
            .path(format!("/api/environments/{}/ssl/certificates", ENVIRONMENT_ID));
        then.status(status)
            .json_body(json!({"message": "Installing the certificate."}));
    })
}

pub fn mock_any_action(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(POST).path_contains("/actions/");
        then.status(202);
    })
}

/// Token, application and environment lookups.
pub fn mock_session(server: &MockServer) {
    let _ = mock_token(server);
    let _ = mock_application(server);
    let _ = mock_environments(server);
}
