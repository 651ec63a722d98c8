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

//! In-memory stand-in for the remote platform.

use acai_cloud::{
    Application, CertificateFlags, CertificateId, CloudError, CloudPlatform, CloudResult,
    Environment, InstallCertificate, SslCertificate,
};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// One remote call, as observed by [`FakePlatform`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Application,
    Environments,
    ListCertificates,
    Install { label: String, legacy: bool },
    Activate(CertificateId),
    Deactivate(CertificateId),
}

#[derive(Default)]
struct State {
    certificates: Vec<SslCertificate>,
    calls: Vec<Call>,
    uploads: Vec<InstallCertificate>,
    next_id: u64,
    fail_install_number: Option<usize>,
    fail_activate: HashSet<CertificateId>,
    fail_deactivate: HashSet<CertificateId>,
    fail_listing_after: Option<usize>,
    activation_is_noop: bool,
    auto_activate: bool,
    drop_uploads: bool,
}

/// A platform with one application holding `dev`, `test` and `prod`
/// environments. Certificates live on `prod`.
///
/// Installed certificates start inactive, like the real API. Every call is
/// recorded in order so tests can assert on sequencing.
pub struct FakePlatform {
    state: Mutex<State>,
}

impl FakePlatform {
    pub const APPLICATION_ID: &'static str = "a47ac10b-58cc-4372-a567-0e02b2c3d479";
    pub const APPLICATION_NAME: &'static str = "Example Site";
    pub const PROD_ENVIRONMENT_ID: &'static str = "24-a47ac10b-58cc-4372-a567-0e02b2c3d479";

    pub fn new() -> Self {
        FakePlatform {
            state: Mutex::new(State {
                next_id: 100,
                ..State::default()
            }),
        }
    }

    /// Seed an existing certificate.
    pub fn with_certificate(self, id: &str, label: &str, active: bool, legacy: bool) -> Self {
        self.lock().certificates.push(SslCertificate {
            id: CertificateId::from(id),
            label: label.to_string(),
            expires_at: Some("2030-01-01T00:00:00+00:00".to_string()),
            flags: CertificateFlags { active, legacy },
        });
        self
    }

    /// Make the n-th install call (1-based) fail.
    pub fn failing_install(self, number: usize) -> Self {
        self.lock().fail_install_number = Some(number);
        self
    }

    pub fn failing_activate(self, id: &str) -> Self {
        self.lock().fail_activate.insert(CertificateId::from(id));
        self
    }

    pub fn failing_deactivate(self, id: &str) -> Self {
        self.lock().fail_deactivate.insert(CertificateId::from(id));
        self
    }

    /// Fail every certificate listing after the first `n`.
    pub fn failing_listing_after(self, n: usize) -> Self {
        self.lock().fail_listing_after = Some(n);
        self
    }

    /// Accept activate calls without flipping the active flag.
    pub fn with_noop_activation(self) -> Self {
        self.lock().activation_is_noop = true;
        self
    }

    /// Installed normal certificates come up already active.
    pub fn with_auto_activation(self) -> Self {
        self.lock().auto_activate = true;
        self
    }

    /// Accept install calls without creating a record.
    pub fn dropping_uploads(self) -> Self {
        self.lock().drop_uploads = true;
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Bodies of every install call, in order.
    pub fn uploads(&self) -> Vec<InstallCertificate> {
        self.lock().uploads.clone()
    }

    /// Current certificate records.
    pub fn certificates(&self) -> Vec<SslCertificate> {
        self.lock().certificates.clone()
    }

    /// Labels of the non-legacy certificates currently active.
    pub fn active_normal_labels(&self) -> Vec<String> {
        self.lock()
            .certificates
            .iter()
            .filter(|c| c.flags.active && !c.flags.legacy)
            .map(|c| c.label.clone())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn refused(path: &str) -> CloudError {
        CloudError::Api {
            method: "POST",
            path: path.to_string(),
            status: 500,
            message: "simulated failure".to_string(),
        }
    }

    fn set_active(&self, id: &CertificateId, active: bool, fail: bool) -> CloudResult<()> {
        let mut state = self.lock();
        if fail {
            return Err(Self::refused(&format!("/ssl/certificates/{}", id)));
        }
        let noop = active && state.activation_is_noop;
        let cert = state
            .certificates
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| CloudError::Api {
                method: "POST",
                path: format!("/ssl/certificates/{}", id),
                status: 404,
                message: "not found".to_string(),
            })?;
        if !noop {
            cert.flags.active = active;
        }
        Ok(())
    }
}

impl Default for FakePlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CloudPlatform for FakePlatform {
    async fn application(&self, uuid: &str) -> CloudResult<Application> {
        self.lock().calls.push(Call::Application);
        if uuid != Self::APPLICATION_ID {
            return Err(CloudError::Api {
                method: "GET",
                path: format!("/applications/{}", uuid),
                status: 404,
                message: "The application you are trying to access does not exist".to_string(),
            });
        }
        Ok(Application {
            uuid: uuid.to_string(),
            name: Self::APPLICATION_NAME.to_string(),
        })
    }

    async fn environments(&self, _application_uuid: &str) -> CloudResult<Vec<Environment>> {
        self.lock().calls.push(Call::Environments);
        Ok(["dev", "test", "prod"]
            .iter()
            .enumerate()
            .map(|(i, name)| Environment {
                id: if *name == "prod" {
                    Self::PROD_ENVIRONMENT_ID.to_string()
                } else {
                    format!("{}-{}", i, Self::APPLICATION_ID)
                },
                name: name.to_string(),
                label: None,
            })
            .collect())
    }

    async fn ssl_certificates(&self, _environment_id: &str) -> CloudResult<Vec<SslCertificate>> {
        let mut state = self.lock();
        state.calls.push(Call::ListCertificates);
        let listings = state
            .calls
            .iter()
            .filter(|c| **c == Call::ListCertificates)
            .count();
        if matches!(state.fail_listing_after, Some(n) if listings > n) {
            return Err(CloudError::Api {
                method: "GET",
                path: "/ssl/certificates".to_string(),
                status: 503,
                message: "simulated outage".to_string(),
            });
        }
        Ok(state.certificates.clone())
    }

    async fn install_ssl_certificate(
        &self,
        _environment_id: &str,
        request: &InstallCertificate,
    ) -> CloudResult<()> {
        let mut state = self.lock();
        state.calls.push(Call::Install {
            label: request.label.clone(),
            legacy: request.legacy,
        });
        state.uploads.push(request.clone());
        if state.fail_install_number == Some(state.uploads.len()) {
            return Err(Self::refused("/ssl/certificates"));
        }
        if state.drop_uploads {
            return Ok(());
        }
        let active = state.auto_activate && !request.legacy;
        let id = CertificateId(state.next_id.to_string());
        state.next_id += 1;
        state.certificates.push(SslCertificate {
            id,
            label: request.label.clone(),
            expires_at: Some("2030-04-01T00:00:00+00:00".to_string()),
            flags: CertificateFlags {
                active,
                legacy: request.legacy,
            },
        });
        Ok(())
    }

    async fn activate_ssl_certificate(
        &self,
        _environment_id: &str,
        certificate_id: &CertificateId,
    ) -> CloudResult<()> {
        let fail = {
            let mut state = self.lock();
            state.calls.push(Call::Activate(certificate_id.clone()));
            state.fail_activate.contains(certificate_id)
        };
        self.set_active(certificate_id, true, fail)
    }

    async fn deactivate_ssl_certificate(
        &self,
        _environment_id: &str,
        certificate_id: &CertificateId,
    ) -> CloudResult<()> {
        let fail = {
            let mut state = self.lock();
            state.calls.push(Call::Deactivate(certificate_id.clone()));
            state.fail_deactivate.contains(certificate_id)
        };
        self.set_active(certificate_id, false, fail)
    }
}
