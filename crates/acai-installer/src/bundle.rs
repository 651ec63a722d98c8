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

//! Local certificate material.

use crate::error::{InstallError, InstallResult};
use std::fmt;
use std::path::Path;
use tokio::fs;
use tracing::debug;

pub const CERT_FILE: &str = "cert.pem";
pub const KEY_FILE: &str = "privkey.pem";
pub const CHAIN_FILE: &str = "chain.pem";

/// PEM payloads for one certificate name.
#[derive(Clone, PartialEq, Eq)]
pub struct CertificateBundle {
    /// Leaf certificate, PEM
    pub certificate: String,
    /// Private key, PEM
    pub private_key: String,
    /// Passed through as-is; may be empty.
    pub chain: String,
}

impl CertificateBundle {
    /// Bundle from PEM text already in memory.
    pub fn new(
        certificate: impl Into<String>,
        private_key: impl Into<String>,
        chain: impl Into<String>,
    ) -> Self {
        CertificateBundle {
            certificate: certificate.into(),
            private_key: private_key.into(),
            chain: chain.into(),
        }
    }

    /// Read `cert.pem`, `privkey.pem` and `chain.pem` from `dir` and validate.
    pub async fn load(dir: &Path) -> InstallResult<Self> {
        debug!("Reading certificate files from {}", dir.display());

        let bundle = CertificateBundle {
            certificate: read_pem(dir, CERT_FILE).await?,
            private_key: read_pem(dir, KEY_FILE).await?,
            chain: read_pem(dir, CHAIN_FILE).await?,
        };
        bundle.validate()?;

        debug!(
            cert_bytes = bundle.certificate.len(),
            chain_bytes = bundle.chain.len(),
            "Certificate bundle loaded"
        );
        Ok(bundle)
    }

    /// Certificate and key must be non-empty. The chain is not checked.
    pub fn validate(&self) -> InstallResult<()> {
        if self.certificate.is_empty() {
            return Err(InstallError::Validation("cert"));
        }
        if self.private_key.is_empty() {
            return Err(InstallError::Validation("key"));
        }
        Ok(())
    }
}

impl fmt::Debug for CertificateBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateBundle")
            .field("certificate_len", &self.certificate.len())
            .field("private_key", &"<redacted>")
            .field("chain_len", &self.chain.len())
            .finish()
    }
}

async fn read_pem(dir: &Path, file: &str) -> InstallResult<String> {
    let path = dir.join(file);
    fs::read_to_string(&path)
        .await
        .map_err(|source| InstallError::FileAccess {
            dir: dir.to_path_buf(),
            path,
            source,
        })
}
