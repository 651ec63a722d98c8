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
use crate::schema::{
    ConfigFile, Endpoints, Profile, ProfileSection, Settings, DEFAULT_LE_ROOT, DEFAULT_SECTION,
};
use crate::validation::Validator;
use ini::{Ini, ParseOption};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// System-wide configuration, read first.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/acai.conf";

/// Per-user configuration file name, relative to the home directory.
pub const USER_CONFIG_FILE: &str = ".acai.conf";

/// One configuration file in the layering order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLayer {
    pub path: PathBuf,
    /// Required layers must exist; optional ones are skipped when absent.
    pub required: bool,
}

impl ConfigLayer {
    /// Layer that is skipped when the file does not exist.
    pub fn optional(path: impl Into<PathBuf>) -> Self {
        ConfigLayer { path: path.into(), required: false }
    }

    /// Layer whose absence is an error.
    pub fn required(path: impl Into<PathBuf>) -> Self {
        ConfigLayer { path: path.into(), required: true }
    }
}

/// Configuration loader
pub struct ConfigLoader {
    layers: Vec<ConfigLayer>,
}

impl ConfigLoader {
    /// Loader over the standard layers: `/etc/acai.conf`, then `~/.acai.conf`.
    pub fn new() -> Self {
        let mut layers = vec![ConfigLayer::optional(SYSTEM_CONFIG_PATH)];
        if let Some(home) = dirs::home_dir() {
            layers.push(ConfigLayer::optional(home.join(USER_CONFIG_FILE)));
        }
        ConfigLoader { layers }
    }

    /// Loader over an explicit list of layers, earliest first.
    pub fn with_layers(layers: Vec<ConfigLayer>) -> Self {
        ConfigLoader { layers }
    }

    /// Append a layer that overrides everything before it.
    pub fn push_layer(mut self, layer: ConfigLayer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Layers in read order
    pub fn layers(&self) -> &[ConfigLayer] {
        &self.layers
    }

    /// Read and merge every layer.
    pub async fn load(&self) -> ConfigResult<ConfigFile> {
        let mut merged = ConfigFile::new();

        for layer in &self.layers {
            let Some(file) = self.load_layer(layer).await? else {
                continue;
            };
            merge_files(&mut merged, file);
        }

        Ok(merged)
    }

    /// Resolve one profile into validated settings, applying `ACAI_*`
    /// environment overrides.
    pub async fn resolve(&self, name: &str) -> ConfigResult<Settings> {
        let file = self.load().await?;
        resolve_profile(&file, name, |var| std::env::var(var).ok())
    }

    async fn load_layer(&self, layer: &ConfigLayer) -> ConfigResult<Option<ConfigFile>> {
        debug!("Loading configuration from: {}", layer.path.display());

        let content = match fs::read_to_string(&layer.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound && !layer.required => {
                debug!("Skipping absent configuration file: {}", layer.path.display());
                return Ok(None);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ConfigError::FileNotFound(layer.path.clone()));
            }
            Err(source) => {
                return Err(ConfigError::IoError {
                    path: layer.path.clone(),
                    source,
                });
            }
        };

        let file = parse_config(&content, &layer.path)?;
        info!(
            "Loaded configuration file {} ({} sections)",
            layer.path.display(),
            file.len()
        );
        Ok(Some(file))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse one INI configuration file. `origin` is only used in errors.
///
/// Values are taken literally, without quote stripping or backslash escapes,
/// so secrets survive as written.
pub fn parse_config(content: &str, origin: &Path) -> ConfigResult<ConfigFile> {
    let option = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(content, option)
        .map_err(|e| ConfigError::parse(origin, e.to_string()))?;

    let mut file = ConfigFile::new();
    for (name, properties) in ini.iter() {
        let Some(name) = name else {
            if let Some((key, _)) = properties.iter().next() {
                return Err(ConfigError::parse(
                    origin,
                    format!("key '{}' appears before any [section] header", key),
                ));
            }
            continue;
        };

        let section = file.entry(name.to_string()).or_default();
        for (key, value) in properties.iter() {
            if !section.set(key, value) {
                debug!(section = name, key, "Ignoring unknown configuration key");
            }
        }
    }

    Ok(file)
}

/// Merge `overlay` into `base` (overlay takes precedence, key by key).
pub fn merge_files(base: &mut ConfigFile, overlay: ConfigFile) {
    for (name, section) in overlay {
        base.entry(name).or_default().merge_from(&section);
    }
}

/// Turn a merged file into settings for profile `name`.
///
/// Keys missing from `[name]` fall back to `[DEFAULT]`.
///
/// `env` looks up override variables; it is a parameter so callers other
/// than [`ConfigLoader::resolve`] can supply their own environment.
pub fn resolve_profile<F>(file: &ConfigFile, name: &str, env: F) -> ConfigResult<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let named = file
        .get(name)
        .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))?;

    let mut section = file.get(DEFAULT_SECTION).cloned().unwrap_or_default();
    section.merge_from(named);

    if let Some(value) = env("ACAI_API_KEY") {
        section.api_key = Some(value);
    }
    if let Some(value) = env("ACAI_API_SECRET") {
        section.api_secret = Some(value);
    }

    section.validate()?;

    let profile = into_profile(name, section)?;
    profile.validate()?;

    let le_root = env("ACAI_LE_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LE_ROOT));

    let mut endpoints = Endpoints::default();
    if let Some(value) = env("ACAI_API_BASE_URL") {
        endpoints.api_base_url = value.trim_end_matches('/').to_string();
    }
    if let Some(value) = env("ACAI_AUTH_URL") {
        endpoints.auth_url = value;
    }
    endpoints.validate()?;

    debug!(profile = name, cert_name = %profile.cert_name, "Resolved profile");

    Ok(Settings {
        profile,
        le_root,
        endpoints,
    })
}

fn into_profile(name: &str, section: ProfileSection) -> ConfigResult<Profile> {
    let required = |value: Option<String>, field: &str| {
        value.ok_or_else(|| ConfigError::missing(field))
    };

    Ok(Profile {
        name: name.to_string(),
        api_key: required(section.api_key, "API key or secret")?,
        api_secret: required(section.api_secret, "API key or secret")?,
        application_id: required(section.application, "application")?,
        environment_name: required(section.acquia_environment, "acquia_environment")?,
        cert_name: section.cert_name.unwrap_or_else(|| name.to_string()),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const PROD: &str = "
[prod]
api_key = key
api_secret = secret
application = app-uuid
acquia_environment = prod
";

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_cert_name_defaults_to_profile_name() {
        let file = parse_config(PROD, Path::new("test.conf")).unwrap();
        let settings = resolve_profile(&file, "prod", no_env).unwrap();
        assert_eq!(settings.profile.cert_name, "prod");
        assert_eq!(settings.profile.environment_name, "prod");
        assert_eq!(settings.le_root, PathBuf::from(DEFAULT_LE_ROOT));
    }

    #[test]
    fn test_unknown_profile() {
        let file = parse_config(PROD, Path::new("test.conf")).unwrap();
        let err = resolve_profile(&file, "stage", no_env).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile(ref name) if name == "stage"));
    }

    #[test]
    fn test_env_overrides() {
        let file = parse_config(PROD, Path::new("test.conf")).unwrap();
        let vars: HashMap<&str, &str> = [
            ("ACAI_API_SECRET", "from-env"),
            ("ACAI_LE_ROOT", "/tmp/live"),
            ("ACAI_API_BASE_URL", "http://127.0.0.1:9000/api/"),
        ]
        .into_iter()
        .collect();

        let settings =
            resolve_profile(&file, "prod", |k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(settings.profile.api_secret, "from-env");
        assert_eq!(settings.profile.api_key, "key");
        assert_eq!(settings.le_root, PathBuf::from("/tmp/live"));
        assert_eq!(settings.endpoints.api_base_url, "http://127.0.0.1:9000/api");
    }

    #[test]
    fn test_env_can_supply_missing_credentials() {
        let file = parse_config(
            "[dev]\napplication = app\nacquia_environment = dev\n",
            Path::new("test.conf"),
        )
        .unwrap();
        assert!(resolve_profile(&file, "dev", no_env).is_err());

        let settings = resolve_profile(&file, "dev", |k| match k {
            "ACAI_API_KEY" => Some("k".into()),
            "ACAI_API_SECRET" => Some("s".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(settings.profile.api_key, "k");
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = parse_config("[prod\napi_key = k\n", Path::new("/etc/acai.conf")).unwrap_err();
        assert!(err.to_string().contains("/etc/acai.conf"));
    }

    #[test]
    fn test_merge_files_keeps_other_sections() {
        let mut base = parse_config(PROD, Path::new("a")).unwrap();
        let overlay = parse_config(
            "[prod]\napi_key = user\n[dev]\ncert_name = dev.example.gov\n",
            Path::new("b"),
        )
        .unwrap();

        merge_files(&mut base, overlay);

        assert_eq!(base.len(), 2);
        assert_eq!(base["prod"].api_key.as_deref(), Some("user"));
        assert_eq!(base["prod"].api_secret.as_deref(), Some("secret"));
        assert_eq!(base["dev"].cert_name.as_deref(), Some("dev.example.gov"));
    }

    #[test]
    fn test_unquoted_values_are_read_verbatim() {
        let file = parse_config(
            "# managed by ops\n\
             [prod]\n\
             api_key = 1a2b3c\n\
             api_secret = s3cr3t+/==\n\
             application = a47ac10b-58cc-4372-a567-0e02b2c3d479\n\
             acquia_environment = prod\n\
             cert_name = www.example.gov\n",
            Path::new("/etc/acai.conf"),
        )
        .unwrap();

        let settings = resolve_profile(&file, "prod", no_env).unwrap();
        assert_eq!(settings.profile.api_key, "1a2b3c");
        assert_eq!(settings.profile.api_secret, "s3cr3t+/==");
        assert_eq!(
            settings.profile.application_id,
            "a47ac10b-58cc-4372-a567-0e02b2c3d479"
        );
        assert_eq!(settings.profile.cert_name, "www.example.gov");
    }

    #[test]
    fn test_default_section_fills_missing_keys() {
        let file = parse_config(
            "[DEFAULT]\n\
             api_key = shared-key\n\
             api_secret = shared-secret\n\
             application = app-uuid\n\
             [prod]\n\
             acquia_environment = prod\n\
             [test]\n\
             api_key = test-key\n\
             acquia_environment = test\n",
            Path::new("test.conf"),
        )
        .unwrap();

        let prod = resolve_profile(&file, "prod", no_env).unwrap();
        assert_eq!(prod.profile.api_key, "shared-key");
        assert_eq!(prod.profile.application_id, "app-uuid");

        let test = resolve_profile(&file, "test", no_env).unwrap();
        assert_eq!(test.profile.api_key, "test-key");
        assert_eq!(test.profile.api_secret, "shared-secret");
        assert_eq!(test.profile.cert_name, "test");
    }

    #[test]
    fn test_default_section_alone_does_not_create_profiles() {
        let file = parse_config("[DEFAULT]\napplication = app\n", Path::new("test.conf")).unwrap();
        let err = resolve_profile(&file, "prod", no_env).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile(_)));
    }

    #[test]
    fn test_key_before_section_is_rejected() {
        let err = parse_config("api_key = k\n[prod]\n", Path::new("/etc/acai.conf")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("api_key"));
    }
}
