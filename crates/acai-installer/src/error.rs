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

use acai_cloud::{CertificateId, CloudError};
use acai_config::ConfigError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can end a run.
///
/// All variants except [`InstallError::Activation`] are fatal; activation
/// problems are collected per certificate in the report instead.
#[derive(Error, Debug)]
pub enum InstallError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(
        "Could not open the cert files in {}.\nVerify they exist and permissions are correct.\n{}: {source}",
        .dir.display(),
        .path.display()
    )]
    FileAccess {
        dir: PathBuf,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Zero length {0}.")]
    Validation(&'static str),

    #[error("Could not connect to the Acquia environment: {0}")]
    Connection(#[source] CloudError),

    #[error("Could not find environment {environment} in {application}.")]
    NotFound {
        environment: String,
        application: String,
    },

    #[error("Cert «{label}» is already installed.")]
    AlreadyInstalled { label: String },

    #[error("Failed to install {} cert «{label}» with error {source}", variant(.legacy))]
    Upload {
        label: String,
        legacy: bool,
        #[source]
        source: CloudError,
    },

    #[error("Certificate activation incomplete: {0}")]
    Activation(String),
}

impl InstallError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            InstallError::Config(_) => 3,
            InstallError::FileAccess { .. } => 4,
            InstallError::Validation(_) => 5,
            InstallError::Connection(_) => 6,
            InstallError::NotFound { .. } => 7,
            InstallError::AlreadyInstalled { .. } => 8,
            InstallError::Upload { .. } => 9,
            InstallError::Activation(_) => 10,
        }
    }
}

pub type InstallResult<T> = Result<T, InstallError>;

fn variant(legacy: &bool) -> &'static str {
    if *legacy {
        "legacy"
    } else {
        "normal"
    }
}

/// Which step of the activation pass went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationAction {
    /// Re-reading the certificate list before a pass
    List,
    Activate,
    Deactivate,
}

impl fmt::Display for ActivationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActivationAction::List => "list",
            ActivationAction::Activate => "activate",
            ActivationAction::Deactivate => "deactivate",
        })
    }
}

/// A single failed activation-pass call. Not fatal on its own.
#[derive(Debug)]
pub struct ActivationFailure {
    pub action: ActivationAction,
    /// None for listing failures
    pub certificate: Option<(CertificateId, String)>,
    pub error: CloudError,
}

impl fmt::Display for ActivationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.certificate {
            Some((id, label)) => write!(
                f,
                "failed to {} cert «{}» (id {}): {}",
                self.action, label, id, self.error
            ),
            None => write!(f, "failed to {} certificates: {}", self.action, self.error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_errors_have_distinct_nonzero_codes() {
        let errors = [
            InstallError::Config(ConfigError::missing("application")),
            InstallError::FileAccess {
                dir: PathBuf::from("/etc/letsencrypt/live/prod"),
                path: PathBuf::from("/etc/letsencrypt/live/prod/cert.pem"),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            },
            InstallError::Validation("cert"),
            InstallError::Connection(CloudError::Auth("denied".into())),
            InstallError::NotFound {
                environment: "prod".into(),
                application: "Example".into(),
            },
            InstallError::AlreadyInstalled { label: "x".into() },
            InstallError::Upload {
                label: "x".into(),
                legacy: false,
                source: CloudError::Auth("denied".into()),
            },
            InstallError::Activation("1 failure".into()),
        ];

        let mut codes: Vec<i32> = errors.iter().map(InstallError::exit_code).collect();
        assert!(codes.iter().all(|c| *c != 0));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_messages() {
        assert_eq!(InstallError::Validation("key").to_string(), "Zero length key.");
        assert_eq!(
            InstallError::AlreadyInstalled { label: "LetsEncrypt prod 2024-01-01".into() }
                .to_string(),
            "Cert «LetsEncrypt prod 2024-01-01» is already installed."
        );
        let not_found = InstallError::NotFound {
            environment: "stage".into(),
            application: "Example Site".into(),
        };
        assert_eq!(
            not_found.to_string(),
            "Could not find environment stage in Example Site."
        );
    }

    #[test]
    fn test_file_access_message_names_directory() {
        let err = InstallError::FileAccess {
            dir: PathBuf::from("/etc/letsencrypt/live/prod"),
            path: PathBuf::from("/etc/letsencrypt/live/prod/privkey.pem"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        let message = err.to_string();
        assert!(message.contains("Could not open the cert files in /etc/letsencrypt/live/prod."));
        assert!(message.contains("privkey.pem"));
    }

    #[test]
    fn test_activation_failure_display() {
        let failure = ActivationFailure {
            action: ActivationAction::Deactivate,
            certificate: Some((CertificateId::from("11"), "old-cert".into())),
            error: CloudError::Auth("expired".into()),
        };
        let text = failure.to_string();
        assert!(text.starts_with("failed to deactivate cert «old-cert» (id 11)"));
    }
}
