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

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// An application as returned by `GET /applications/{uuid}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub uuid: String,
    /// Display name, used in operator-facing messages
    pub name: String,
}

/// One entry of `GET /applications/{uuid}/environments`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Opaque environment id (e.g. `"24-a47ac10b-..."`)
    pub id: String,
    /// Machine name such as `dev`, `test` or `prod`
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// Identifier of an SSL certificate within an environment.
///
/// The API returns integers; strings are accepted too so the client keeps
/// working if that ever changes.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CertificateId(pub String);

impl<'de> Deserialize<'de> for CertificateId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => CertificateId(n.to_string()),
            Raw::Text(s) => CertificateId(s),
        })
    }
}

impl fmt::Display for CertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CertificateId {
    fn from(value: &str) -> Self {
        CertificateId(value.to_string())
    }
}

/// State flags of an installed certificate.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CertificateFlags {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub legacy: bool,
}

/// One entry of `GET /environments/{id}/ssl/certificates`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SslCertificate {
    pub id: CertificateId,
    /// Empty when the API reports no label.
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub flags: CertificateFlags,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl SslCertificate {
    /// Currently served for its variant
    pub fn is_active(&self) -> bool {
        self.flags.active
    }

    /// Legacy (non-SNI) variant
    pub fn is_legacy(&self) -> bool {
        self.flags.legacy
    }
}

/// Body of `POST /environments/{id}/ssl/certificates`.
#[derive(Serialize, Clone, PartialEq, Eq)]
pub struct InstallCertificate {
    pub legacy: bool,
    pub certificate: String,
    pub private_key: String,
    pub ca_certificates: String,
    pub label: String,
}

impl fmt::Debug for InstallCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstallCertificate")
            .field("label", &self.label)
            .field("legacy", &self.legacy)
            .field("certificate_len", &self.certificate.len())
            .field("private_key", &"<redacted>")
            .field("ca_certificates_len", &self.ca_certificates.len())
            .finish()
    }
}

/// HAL collection wrapper used by list endpoints.
#[derive(Deserialize, Debug)]
pub(crate) struct Collection<T> {
    #[serde(rename = "_embedded")]
    pub embedded: Embedded<T>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct Embedded<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// OAuth2 token response.
#[derive(Deserialize)]
pub(crate) struct AccessToken {
    pub access_token: String,
}

/// Error body; both fields are optional in practice.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct ApiMessage {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl ApiMessage {
    pub fn describe(&self) -> Option<String> {
        match (&self.message, &self.error) {
            (Some(serde_json::Value::String(m)), _) => Some(m.clone()),
            (Some(other), _) => Some(other.to_string()),
            (None, Some(e)) => Some(e.clone()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_certificate_list_parsing() {
        let body = json!({
            "total": 2,
            "_embedded": {
                "items": [
                    {
                        "id": 7,
                        "label": "LetsEncrypt prod 2024-01-01",
                        "expires_at": "2024-03-31T00:00:00+00:00",
                        "flags": {"active": true, "csr": false, "legacy": false}
                    },
                    {
                        "id": "8",
                        "label": "old-cert",
                        "flags": {"active": false, "legacy": true}
                    }
                ]
            }
        });

        let list: Collection<SslCertificate> = serde_json::from_value(body).unwrap();
        let certs = list.embedded.items;

        assert_eq!(certs.len(), 2);
        assert_eq!(certs[0].id, CertificateId::from("7"));
        assert!(certs[0].is_active());
        assert!(!certs[0].is_legacy());
        assert_eq!(certs[1].id.to_string(), "8");
        assert!(certs[1].is_legacy());
        assert_eq!(certs[1].expires_at, None);
    }

    #[test]
    fn test_null_label_and_flags_parse_as_empty() {
        let body = json!({
            "_embedded": {
                "items": [
                    {"id": 1, "label": null, "expires_at": null, "flags": null},
                    {"id": 2, "label": "old-cert", "flags": {"active": true, "legacy": false}}
                ]
            }
        });

        let list: Collection<SslCertificate> = serde_json::from_value(body).unwrap();
        let certs = list.embedded.items;

        assert_eq!(certs.len(), 2);
        assert_eq!(certs[0].label, "");
        assert_eq!(certs[0].flags, CertificateFlags::default());
        assert_eq!(certs[1].label, "old-cert");
        assert!(certs[1].is_active());
    }

    #[test]
    fn test_install_body_field_names() {
        let body = InstallCertificate {
            legacy: true,
            certificate: "CERT".into(),
            private_key: "KEY".into(),
            ca_certificates: "CHAIN".into(),
            label: "LetsEncrypt prod 2024-01-01".into(),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "legacy": true,
                "certificate": "CERT",
                "private_key": "KEY",
                "ca_certificates": "CHAIN",
                "label": "LetsEncrypt prod 2024-01-01"
            })
        );
        assert!(!format!("{:?}", body).contains("KEY\""));
    }

    #[test]
    fn test_api_message_prefers_message() {
        let msg: ApiMessage =
            serde_json::from_value(json!({"error": "validation_failed", "message": "Bad cert"}))
                .unwrap();
        assert_eq!(msg.describe().as_deref(), Some("Bad cert"));

        let msg: ApiMessage = serde_json::from_value(json!({"error": "forbidden"})).unwrap();
        assert_eq!(msg.describe().as_deref(), Some("forbidden"));
    }
}
