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

//! Progress hooks for the installer.

use crate::error::ActivationFailure;
use crate::session::RemoteEnvironment;
use acai_cloud::SslCertificate;

/// Receives progress events as a run advances. Every method defaults to a
/// no-op so front ends implement only what they display.
pub trait InstallObserver {
    fn environment_resolved(&self, _remote: &RemoteEnvironment) {}

    /// One existing certificate seen during the preflight listing.
    fn certificate_found(&self, _cert: &SslCertificate) {}

    fn uploading(&self, _label: &str, _legacy: bool) {}

    fn uploaded(&self, _label: &str, _legacy: bool) {}

    fn activating(&self, _cert: &SslCertificate) {}

    fn activated(&self, _cert: &SslCertificate) {}

    fn deactivating(&self, _cert: &SslCertificate) {}

    fn deactivated(&self, _cert: &SslCertificate) {}

    fn activation_failed(&self, _failure: &ActivationFailure) {}

    /// Old certificates were left active because no active replacement
    /// could be confirmed.
    fn deactivation_withheld(&self, _label: &str) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl InstallObserver for NoopObserver {}
