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

use crate::error::{ConfigError, ConfigResult};
use crate::schema::{Endpoints, Profile, ProfileSection};

/// Validator for configuration settings
pub trait Validator {
    fn validate(&self) -> ConfigResult<()>;
}

impl Validator for ProfileSection {
    /// Required keys, checked in the order an operator fixes them.
    fn validate(&self) -> ConfigResult<()> {
        if is_blank(&self.application) {
            return Err(ConfigError::missing("application"));
        }

        if is_blank(&self.api_key) || is_blank(&self.api_secret) {
            return Err(ConfigError::missing("API key or secret"));
        }

        if is_blank(&self.acquia_environment) {
            return Err(ConfigError::missing("acquia_environment"));
        }

        if let Some(cert_name) = &self.cert_name {
            if cert_name.is_empty() || cert_name.contains('/') || cert_name == ".." {
                return Err(ConfigError::invalid_value(
                    "cert_name",
                    format!("must be a single directory name, got '{}'", cert_name),
                ));
            }
        }

        Ok(())
    }
}

impl Validator for Profile {
    fn validate(&self) -> ConfigResult<()> {
        if self.application_id.is_empty() {
            return Err(ConfigError::missing("application"));
        }
        if self.api_key.is_empty() || self.api_secret.is_empty() {
            return Err(ConfigError::missing("API key or secret"));
        }
        if self.environment_name.is_empty() {
            return Err(ConfigError::missing("acquia_environment"));
        }
        Ok(())
    }
}

impl Validator for Endpoints {
    fn validate(&self) -> ConfigResult<()> {
        for (field, url) in [("api_base_url", &self.api_base_url), ("auth_url", &self.auth_url)] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ConfigError::invalid_value(
                    field,
                    format!("expected an http(s) URL, got '{}'", url),
                ));
            }
        }
        Ok(())
    }
}

fn is_blank(value: &Option<String>) -> bool {
    !matches!(value.as_deref(), Some(v) if !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ProfileSection {
        ProfileSection {
            api_key: Some("key".into()),
            api_secret: Some("secret".into()),
            application: Some("app-uuid".into()),
            acquia_environment: Some("prod".into()),
            cert_name: None,
        }
    }

    #[test]
    fn test_complete_section_is_valid() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_missing_application_reported_first() {
        let section = ProfileSection {
            application: None,
            api_key: None,
            ..complete()
        };
        match section.validate() {
            Err(ConfigError::MissingRequired(field)) => assert_eq!(field, "application"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_key_or_secret() {
        for section in [
            ProfileSection { api_key: None, ..complete() },
            ProfileSection { api_secret: None, ..complete() },
            ProfileSection { api_secret: Some("  ".into()), ..complete() },
        ] {
            match section.validate() {
                Err(ConfigError::MissingRequired(field)) => assert_eq!(field, "API key or secret"),
                other => panic!("unexpected result: {:?}", other),
            }
        }
    }

    #[test]
    fn test_missing_environment() {
        let section = ProfileSection { acquia_environment: None, ..complete() };
        assert!(matches!(section.validate(), Err(ConfigError::MissingRequired(_))));
    }

    #[test]
    fn test_cert_name_must_be_single_component() {
        let section = ProfileSection {
            cert_name: Some("../../etc".into()),
            ..complete()
        };
        assert!(matches!(section.validate(), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_endpoints_require_http_scheme() {
        let endpoints = Endpoints {
            api_base_url: "cloud.acquia.com/api".into(),
            ..Endpoints::default()
        };
        assert!(endpoints.validate().is_err());
        assert!(Endpoints::default().validate().is_ok());
    }
}
