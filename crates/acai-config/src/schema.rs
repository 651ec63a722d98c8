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

//! Configuration data types.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Directory holding one sub-directory of PEM files per certificate name.
pub const DEFAULT_LE_ROOT: &str = "/etc/letsencrypt/live";

/// Acquia Cloud API v2 base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://cloud.acquia.com/api";

/// OAuth2 token endpoint used for client-credentials authentication.
pub const DEFAULT_AUTH_URL: &str = "https://accounts.acquia.com/api/auth/oauth/token";

/// Section whose keys every profile inherits unless it sets them itself.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// A parsed configuration file: profile name to section.
pub type ConfigFile = BTreeMap<String, ProfileSection>;

/// One `[name]` section as written in a configuration file.
///
/// Every key is optional at parse time; required keys are checked once the
/// layers are merged and environment overrides applied.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProfileSection {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    /// Application UUID.
    pub application: Option<String>,
    /// Display name of the environment inside the application.
    pub acquia_environment: Option<String>,
    /// Directory name under the Let's Encrypt live root.
    pub cert_name: Option<String>,
}

impl ProfileSection {
    /// Store one `key = value` line. Key names are case-insensitive.
    ///
    /// Returns `false` for keys this tool does not read.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let slot = match key.to_ascii_lowercase().as_str() {
            "api_key" => &mut self.api_key,
            "api_secret" => &mut self.api_secret,
            "application" => &mut self.application,
            "acquia_environment" => &mut self.acquia_environment,
            "cert_name" => &mut self.cert_name,
            _ => return false,
        };
        *slot = Some(value.to_string());
        true
    }

    /// Overlay `other` on top of `self`, key by key.
    pub fn merge_from(&mut self, other: &ProfileSection) {
        if other.api_key.is_some() {
            self.api_key.clone_from(&other.api_key);
        }
        if other.api_secret.is_some() {
            self.api_secret.clone_from(&other.api_secret);
        }
        if other.application.is_some() {
            self.application.clone_from(&other.application);
        }
        if other.acquia_environment.is_some() {
            self.acquia_environment.clone_from(&other.acquia_environment);
        }
        if other.cert_name.is_some() {
            self.cert_name.clone_from(&other.cert_name);
        }
    }
}

impl fmt::Debug for ProfileSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileSection")
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .field("application", &self.application)
            .field("acquia_environment", &self.acquia_environment)
            .field("cert_name", &self.cert_name)
            .finish()
    }
}

/// A validated profile: everything needed to talk to one environment.
#[derive(Clone, PartialEq, Eq)]
pub struct Profile {
    /// Section name chosen on the command line.
    pub name: String,
    pub api_key: String,
    pub api_secret: String,
    pub application_id: String,
    pub environment_name: String,
    pub cert_name: String,
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("name", &self.name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("application_id", &self.application_id)
            .field("environment_name", &self.environment_name)
            .field("cert_name", &self.cert_name)
            .finish()
    }
}

/// Remote platform endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub api_base_url: String,
    pub auth_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
        }
    }
}

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub profile: Profile,
    pub le_root: PathBuf,
    pub endpoints: Endpoints,
}

impl Settings {
    /// Directory holding `cert.pem`, `privkey.pem` and `chain.pem`.
    pub fn cert_dir(&self) -> PathBuf {
        self.le_root.join(&self.profile.cert_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overrides_only_present_keys() {
        let mut base = ProfileSection {
            api_key: Some("system-key".into()),
            api_secret: Some("system-secret".into()),
            application: Some("app-1".into()),
            ..Default::default()
        };
        let overlay = ProfileSection {
            api_key: Some("user-key".into()),
            cert_name: Some("www.example.gov".into()),
            ..Default::default()
        };

        base.merge_from(&overlay);

        assert_eq!(base.api_key.as_deref(), Some("user-key"));
        assert_eq!(base.api_secret.as_deref(), Some("system-secret"));
        assert_eq!(base.application.as_deref(), Some("app-1"));
        assert_eq!(base.cert_name.as_deref(), Some("www.example.gov"));
    }

    #[test]
    fn test_set_ignores_key_case() {
        let mut section = ProfileSection::default();
        assert!(section.set("API_Key", "k"));
        assert!(section.set("cert_name", "www.example.gov"));
        assert!(!section.set("email", "ops@example.gov"));

        assert_eq!(section.api_key.as_deref(), Some("k"));
        assert_eq!(section.cert_name.as_deref(), Some("www.example.gov"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let section = ProfileSection {
            api_secret: Some("hunter2".into()),
            ..Default::default()
        };
        let rendered = format!("{:?}", section);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_cert_dir_joins_cert_name() {
        let settings = Settings {
            profile: Profile {
                name: "prod".into(),
                api_key: "k".into(),
                api_secret: "s".into(),
                application_id: "app".into(),
                environment_name: "prod".into(),
                cert_name: "www.example.gov".into(),
            },
            le_root: PathBuf::from(DEFAULT_LE_ROOT),
            endpoints: Endpoints::default(),
        };
        assert_eq!(
            settings.cert_dir(),
            PathBuf::from("/etc/letsencrypt/live/www.example.gov")
        );
    }
}
