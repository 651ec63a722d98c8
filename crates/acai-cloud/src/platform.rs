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

use async_trait::async_trait;

use crate::error::CloudResult;
use crate::types::{Application, CertificateId, Environment, InstallCertificate, SslCertificate};

/// Remote operations the installer consumes.
///
/// Implemented by [`crate::AcquiaClient`] over HTTP, and by in-memory fakes
/// in tests.
#[async_trait]
pub trait CloudPlatform: Send + Sync {
    /// Look up an application by UUID.
    async fn application(&self, uuid: &str) -> CloudResult<Application>;

    /// List the environments of an application.
    async fn environments(&self, application_uuid: &str) -> CloudResult<Vec<Environment>>;

    /// List the SSL certificates installed on an environment.
    async fn ssl_certificates(&self, environment_id: &str) -> CloudResult<Vec<SslCertificate>>;

    /// Upload a certificate. The new certificate starts out inactive.
    async fn install_ssl_certificate(
        &self,
        environment_id: &str,
        request: &InstallCertificate,
    ) -> CloudResult<()>;

    async fn activate_ssl_certificate(
        &self,
        environment_id: &str,
        certificate_id: &CertificateId,
    ) -> CloudResult<()>;

    async fn deactivate_ssl_certificate(
        &self,
        environment_id: &str,
        certificate_id: &CertificateId,
    ) -> CloudResult<()>;
}
