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

//! Selection rules for the activation pass.
//!
//! Legacy certificates are never touched by these rules.

use acai_cloud::SslCertificate;

/// Any record already carrying `label`, legacy or not.
pub fn has_label(cert: &SslCertificate, label: &str) -> bool {
    cert.label == label
}

/// The newly uploaded normal certificate, still inactive.
pub fn needs_activation(cert: &SslCertificate, label: &str) -> bool {
    cert.label == label && !cert.flags.active && !cert.flags.legacy
}

/// An older normal certificate that is still active.
pub fn needs_deactivation(cert: &SslCertificate, label: &str) -> bool {
    cert.label != label && cert.flags.active && !cert.flags.legacy
}

/// The new normal certificate, already serving traffic.
pub fn is_active_replacement(cert: &SslCertificate, label: &str) -> bool {
    cert.label == label && cert.flags.active && !cert.flags.legacy
}
