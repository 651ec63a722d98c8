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

//! Console rendering of installer progress.

use crate::output;
use acai_cloud::SslCertificate;
use acai_installer::{ActivationFailure, InstallObserver, InstallReport, RemoteEnvironment};

/// Prints installer events as human-readable lines.
pub struct ConsoleObserver {
    quiet: bool,
}

impl ConsoleObserver {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn connecting(&self) {
        if !self.quiet {
            output::progress("Connecting to Acquia...");
        }
    }

    pub fn finished(&self, report: &InstallReport) {
        if self.quiet {
            return;
        }
        if report.activation_skipped {
            output::info("Legacy certificate uploaded; activate it through the Acquia Cloud UI.");
        }
        if report.is_complete() {
            output::success(&format!("Certificate «{}» installed.", report.label));
        }
    }
}

impl InstallObserver for ConsoleObserver {
    fn environment_resolved(&self, remote: &RemoteEnvironment) {
        if self.quiet {
            return;
        }
        output::detail("Application", &remote.application.name);
        output::detail("Environment", &remote.environment.name);
    }

    fn certificate_found(&self, cert: &SslCertificate) {
        if self.quiet {
            return;
        }
        let state = if cert.flags.active { "Active" } else { "Inactive" };
        let legacy = if cert.flags.legacy { ", legacy" } else { "" };
        output::info(&format!(
            "Found «{}» expires {} ({}{})",
            cert.label,
            cert.expires_at.as_deref().unwrap_or("unknown"),
            state,
            legacy
        ));
    }

    fn uploading(&self, label: &str, legacy: bool) {
        if self.quiet {
            return;
        }
        let variant = if legacy { "legacy " } else { "" };
        output::progress(&format!("Installing {}cert named «{}»...", variant, label));
    }

    fn activating(&self, cert: &SslCertificate) {
        if !self.quiet {
            output::progress(&format!("Activating cert «{}»...", cert.label));
        }
    }

    fn deactivating(&self, cert: &SslCertificate) {
        if !self.quiet {
            output::progress(&format!("Deactivating cert «{}»...", cert.label));
        }
    }

    fn activation_failed(&self, failure: &ActivationFailure) {
        output::error(&format!("ERROR: {}", failure));
    }

    fn deactivation_withheld(&self, label: &str) {
        output::warning(&format!(
            "No active certificate «{}» confirmed; previous certificates were left active.",
            label
        ));
    }
}
