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

//! Acquia Cloud API v2 client
//!
//! Only the calls the certificate installer needs: OAuth2 client-credentials
//! authentication, application and environment lookup, and the SSL
//! certificate list/install/activate/deactivate endpoints.
//!
//! [`CloudPlatform`] is the seam the installer is written against;
//! [`AcquiaClient`] is the HTTP implementation.

pub mod client;
pub mod error;
pub mod platform;
pub mod types;

pub use client::AcquiaClient;
pub use error::{CloudError, CloudResult};
pub use platform::CloudPlatform;
pub use types::{
    Application, CertificateFlags, CertificateId, Environment, InstallCertificate,
    SslCertificate,
};
