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

//! Upload and activation sequencing.
//!
//! A run moves through `PREFLIGHT → UPLOAD → ACTIVATE_NEW → DEACTIVATE_OTHERS`
//! (or stops after UPLOAD for legacy-only installs). The certificate list
//! is re-read before each activation phase since other actors may change
//! it at any time.
//!
//! The new certificate is activated before any old one is deactivated, so
//! the environment never has zero active normal certificates; two may be
//! active for a short time.

use crate::bundle::CertificateBundle;
use crate::error::{ActivationAction, ActivationFailure, InstallError, InstallResult};
use crate::filters::{has_label, is_active_replacement, needs_activation, needs_deactivation};
use crate::observer::{InstallObserver, NoopObserver};
use acai_cloud::{CertificateId, CloudPlatform, InstallCertificate, SslCertificate};
use tracing::{debug, info, warn};

/// Which variants to upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Upload as a legacy certificate only and skip activation.
    pub legacy: bool,
    /// Also upload a legacy copy after the first upload.
    pub both: bool,
}

impl InstallOptions {
    /// Legacy flag of each upload, in order.
    ///
    /// `legacy` together with `both` yields two legacy uploads. The command
    /// line rejects that combination; library callers get what they asked for.
    pub fn upload_variants(&self) -> Vec<bool> {
        let mut variants = vec![self.legacy];
        if self.both {
            variants.push(true);
        }
        variants
    }
}

/// What a completed run did.
#[derive(Debug, Default)]
pub struct InstallReport {
    /// Label given to every upload of this run
    pub label: String,
    /// Legacy flag of each successful upload, in order
    pub uploads: Vec<bool>,
    /// True when the legacy flag suppressed the activation pass
    pub activation_skipped: bool,
    /// Certificates activated by this run
    pub activated: Vec<CertificateId>,
    /// Certificates deactivated by this run
    pub deactivated: Vec<CertificateId>,
    /// Calls that failed during the activation pass, in order
    pub failures: Vec<ActivationFailure>,
    /// Old certificates left active because no replacement was confirmed
    pub deactivation_withheld: bool,
}

impl InstallReport {
    /// True when every activation-pass call succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && !self.deactivation_withheld
    }

    /// Fold activation-pass problems into a single error, if any.
    pub fn into_result(self) -> InstallResult<InstallReport> {
        if self.is_complete() {
            return Ok(self);
        }

        let mut problems: Vec<String> = self.failures.iter().map(|f| f.to_string()).collect();
        if self.deactivation_withheld {
            problems.push(format!(
                "no active certificate labelled «{}» was confirmed, previous certificates left active",
                self.label
            ));
        }
        Err(InstallError::Activation(problems.join("; ")))
    }
}

/// Installs one certificate bundle on one environment.
pub struct CertificateInstaller<'a, P: CloudPlatform + ?Sized> {
    platform: &'a P,
    environment_id: String,
    label: String,
    observer: &'a dyn InstallObserver,
}

impl<'a, P: CloudPlatform + ?Sized> CertificateInstaller<'a, P> {
    /// Installer for one environment. `label` names the uploads and is the
    /// key for the same-day duplicate check.
    pub fn new(platform: &'a P, environment_id: impl Into<String>, label: impl Into<String>) -> Self {
        CertificateInstaller {
            platform,
            environment_id: environment_id.into(),
            label: label.into(),
            observer: &NoopObserver,
        }
    }

    /// Report progress to `observer` instead of discarding it.
    pub fn with_observer(mut self, observer: &'a dyn InstallObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Label given to the uploads
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Run the full sequence.
    ///
    /// Fatal errors abort immediately with nothing rolled back. Activation
    /// failures are collected in the returned report.
    pub async fn run(
        &self,
        bundle: &CertificateBundle,
        options: InstallOptions,
    ) -> InstallResult<InstallReport> {
        self.preflight().await?;

        let mut report = InstallReport {
            label: self.label.clone(),
            ..InstallReport::default()
        };
        report.uploads = self.upload(bundle, options).await?;

        if options.legacy {
            info!(label = %self.label, "Legacy install, skipping activation");
            report.activation_skipped = true;
            return Ok(report);
        }

        self.activate_new(&mut report).await;
        if report.failures.is_empty() {
            self.deactivate_others(&mut report).await;
        } else {
            warn!(
                failures = report.failures.len(),
                "Activation failed, leaving previous certificates active"
            );
            report.deactivation_withheld = true;
            self.observer.deactivation_withheld(&self.label);
        }

        Ok(report)
    }

    /// List existing certificates and refuse to continue if one already
    /// carries today's label.
    pub async fn preflight(&self) -> InstallResult<Vec<SslCertificate>> {
        let certs = self
            .platform
            .ssl_certificates(&self.environment_id)
            .await
            .map_err(InstallError::Connection)?;

        for cert in &certs {
            debug!(
                id = %cert.id,
                label = %cert.label,
                active = cert.flags.active,
                legacy = cert.flags.legacy,
                "Existing certificate"
            );
            self.observer.certificate_found(cert);
        }

        if certs.iter().any(|c| has_label(c, &self.label)) {
            return Err(InstallError::AlreadyInstalled {
                label: self.label.clone(),
            });
        }

        Ok(certs)
    }

    /// Upload every requested variant; returns their legacy flags.
    pub async fn upload(
        &self,
        bundle: &CertificateBundle,
        options: InstallOptions,
    ) -> InstallResult<Vec<bool>> {
        if options.legacy && options.both {
            warn!("Both legacy and both flags set, uploading two legacy certificates");
        }

        let mut uploaded = Vec::new();
        for legacy in options.upload_variants() {
            let request = InstallCertificate {
                legacy,
                certificate: bundle.certificate.clone(),
                private_key: bundle.private_key.clone(),
                ca_certificates: bundle.chain.clone(),
                label: self.label.clone(),
            };

            self.observer.uploading(&self.label, legacy);
            self.platform
                .install_ssl_certificate(&self.environment_id, &request)
                .await
                .map_err(|source| InstallError::Upload {
                    label: self.label.clone(),
                    legacy,
                    source,
                })?;
            info!(label = %self.label, legacy, "Certificate uploaded");
            self.observer.uploaded(&self.label, legacy);
            uploaded.push(legacy);
        }

        Ok(uploaded)
    }

    /// Activate every inactive normal certificate carrying the label.
    async fn activate_new(&self, report: &mut InstallReport) {
        let Some(certs) = self.fresh_listing(report).await else {
            return;
        };

        for cert in certs.iter().filter(|c| needs_activation(c, &self.label)) {
            self.observer.activating(cert);
            match self
                .platform
                .activate_ssl_certificate(&self.environment_id, &cert.id)
                .await
            {
                Ok(()) => {
                    info!(id = %cert.id, label = %cert.label, "Certificate activated");
                    self.observer.activated(cert);
                    report.activated.push(cert.id.clone());
                }
                Err(error) => {
                    self.record_failure(report, ActivationAction::Activate, Some(cert), error)
                }
            }
        }
    }

    /// Deactivate every other active normal certificate, provided the new
    /// one is confirmed active.
    async fn deactivate_others(&self, report: &mut InstallReport) {
        let Some(certs) = self.fresh_listing(report).await else {
            report.deactivation_withheld = true;
            self.observer.deactivation_withheld(&self.label);
            return;
        };

        let replacement_ready = !report.activated.is_empty()
            || certs.iter().any(|c| is_active_replacement(c, &self.label));
        if !replacement_ready {
            warn!(label = %self.label, "No active replacement found, not deactivating");
            report.deactivation_withheld = true;
            self.observer.deactivation_withheld(&self.label);
            return;
        }

        for cert in certs.iter().filter(|c| needs_deactivation(c, &self.label)) {
            self.observer.deactivating(cert);
            match self
                .platform
                .deactivate_ssl_certificate(&self.environment_id, &cert.id)
                .await
            {
                Ok(()) => {
                    info!(id = %cert.id, label = %cert.label, "Certificate deactivated");
                    self.observer.deactivated(cert);
                    report.deactivated.push(cert.id.clone());
                }
                Err(error) => {
                    self.record_failure(report, ActivationAction::Deactivate, Some(cert), error)
                }
            }
        }
    }

    async fn fresh_listing(&self, report: &mut InstallReport) -> Option<Vec<SslCertificate>> {
        match self.platform.ssl_certificates(&self.environment_id).await {
            Ok(certs) => Some(certs),
            Err(error) => {
                self.record_failure(report, ActivationAction::List, None, error);
                None
            }
        }
    }

    fn record_failure(
        &self,
        report: &mut InstallReport,
        action: ActivationAction,
        cert: Option<&SslCertificate>,
        error: acai_cloud::CloudError,
    ) {
        let failure = ActivationFailure {
            action,
            certificate: cert.map(|c| (c.id.clone(), c.label.clone())),
            error,
        };
        warn!("{}", failure);
        self.observer.activation_failed(&failure);
        report.failures.push(failure);
    }
}
