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

//! Remote session establishment.

use crate::error::{InstallError, InstallResult};
use acai_cloud::{AcquiaClient, Application, CloudPlatform, Environment};
use acai_config::Settings;
use tracing::{debug, info};

/// The application and environment a run operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEnvironment {
    pub application: Application,
    pub environment: Environment,
}

/// Authenticate against the platform using the profile's credentials.
pub async fn connect(settings: &Settings) -> InstallResult<AcquiaClient> {
    debug!(api = %settings.endpoints.api_base_url, "Authenticating");
    AcquiaClient::connect(
        settings.endpoints.api_base_url.clone(),
        &settings.endpoints.auth_url,
        &settings.profile.api_key,
        &settings.profile.api_secret,
    )
    .await
    .map_err(InstallError::Connection)
}

/// Look up `application_id`, then the environment named `environment_name`
/// within it.
pub async fn resolve_environment<P>(
    platform: &P,
    application_id: &str,
    environment_name: &str,
) -> InstallResult<RemoteEnvironment>
where
    P: CloudPlatform + ?Sized,
{
    let application = platform
        .application(application_id)
        .await
        .map_err(InstallError::Connection)?;

    let environments = platform
        .environments(application_id)
        .await
        .map_err(InstallError::Connection)?;

    let environment = environments
        .into_iter()
        .find(|env| env.name == environment_name)
        .ok_or_else(|| InstallError::NotFound {
            environment: environment_name.to_string(),
            application: application.name.clone(),
        })?;

    info!(
        application = %application.name,
        environment = %environment.name,
        environment_id = %environment.id,
        "Resolved environment"
    );

    Ok(RemoteEnvironment {
        application,
        environment,
    })
}
