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

//! Certificate installation for Acquia Cloud environments
//!
//! The pieces of a run, in order:
//!
//! 1. [`bundle::CertificateBundle::load`] reads `cert.pem`, `privkey.pem`
//!    and `chain.pem` and rejects empty certificate or key material.
//! 2. [`session::connect`] authenticates; [`session::resolve_environment`]
//!    finds the target environment inside the application.
//! 3. [`installer::CertificateInstaller`] checks for a same-day upload,
//!    uploads, then activates the new certificate before deactivating the
//!    old ones.
//!
//! [`install_certificate`] chains steps 2 (minus authentication) and 3.

pub mod bundle;
pub mod error;
pub mod filters;
pub mod installer;
pub mod label;
pub mod observer;
pub mod session;

pub use bundle::CertificateBundle;
pub use error::{ActivationAction, ActivationFailure, InstallError, InstallResult};
pub use installer::{CertificateInstaller, InstallOptions, InstallReport};
pub use label::certificate_label;
pub use observer::{InstallObserver, NoopObserver};
pub use session::RemoteEnvironment;

use acai_cloud::CloudPlatform;
use acai_config::Profile;
use chrono::NaiveDate;

/// Resolve the profile's environment on `platform` and install `bundle`
/// under the label for `today`.
pub async fn install_certificate<P>(
    platform: &P,
    profile: &Profile,
    bundle: &CertificateBundle,
    options: InstallOptions,
    today: NaiveDate,
    observer: &dyn InstallObserver,
) -> InstallResult<InstallReport>
where
    P: CloudPlatform + ?Sized,
{
    let remote =
        session::resolve_environment(platform, &profile.application_id, &profile.environment_name)
            .await?;
    observer.environment_resolved(&remote);

    let label = certificate_label(&profile.name, today);
    CertificateInstaller::new(platform, &remote.environment.id, label)
        .with_observer(observer)
        .run(bundle, options)
        .await
}
