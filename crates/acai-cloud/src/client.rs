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
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::debug;

use crate::error::{CloudError, CloudResult};
use crate::platform::CloudPlatform;
use crate::types::{
    AccessToken, ApiMessage, Application, CertificateId, Collection, Environment,
    InstallCertificate, SslCertificate,
};

const USER_AGENT: &str = concat!("acai/", env!("CARGO_PKG_VERSION"));

fn http_client() -> CloudResult<reqwest::Client> {
    Ok(reqwest::Client::builder().user_agent(USER_AGENT).build()?)
}

/// HTTP client for the Acquia Cloud API v2
pub struct AcquiaClient {
    base_url: String,
    client: reqwest::Client,
    token: String,
}

impl AcquiaClient {
    /// Authenticate with an API key/secret pair and return a ready client.
    ///
    /// # Arguments
    /// * `base_url` - API root, e.g. `https://cloud.acquia.com/api`
    /// * `auth_url` - OAuth2 token endpoint
    pub async fn connect(
        base_url: impl Into<String>,
        auth_url: &str,
        api_key: &str,
        api_secret: &str,
    ) -> CloudResult<Self> {
        let client = http_client()?;

        debug!("POST {}", auth_url);
        let response = client
            .post(auth_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", api_key),
                ("client_secret", api_secret),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = error_detail(response).await;
            return Err(CloudError::Auth(format!("{} ({})", detail, status)));
        }

        let token: AccessToken = response.json().await.map_err(|e| CloudError::Decode {
            path: auth_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self::from_parts(base_url.into(), client, token.access_token))
    }

    /// Build a client around an already issued bearer token.
    pub fn with_token(
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> CloudResult<Self> {
        Ok(Self::from_parts(base_url.into(), http_client()?, token.into()))
    }

    fn from_parts(base_url: String, client: reqwest::Client, token: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token,
        }
    }

    /// API root without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Accept", "application/hal+json, application/json")
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> CloudResult<T> {
        let response = self.request(Method::GET, path).send().await?;
        let response = check_status("GET", path, response).await?;
        response.json::<T>().await.map_err(|e| CloudError::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    async fn post(&self, path: &str, builder: RequestBuilder) -> CloudResult<()> {
        let response = builder.send().await?;
        check_status("POST", path, response).await?;
        Ok(())
    }
}

impl fmt::Debug for AcquiaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcquiaClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CloudPlatform for AcquiaClient {
    async fn application(&self, uuid: &str) -> CloudResult<Application> {
        self.get_json(&format!("/applications/{}", uuid)).await
    }

    async fn environments(&self, application_uuid: &str) -> CloudResult<Vec<Environment>> {
        let list: Collection<Environment> = self
            .get_json(&format!("/applications/{}/environments", application_uuid))
            .await?;
        Ok(list.embedded.items)
    }

    async fn ssl_certificates(&self, environment_id: &str) -> CloudResult<Vec<SslCertificate>> {
        let list: Collection<SslCertificate> = self
            .get_json(&format!("/environments/{}/ssl/certificates", environment_id))
            .await?;
        Ok(list.embedded.items)
    }

    async fn install_ssl_certificate(
        &self,
        environment_id: &str,
        request: &InstallCertificate,
    ) -> CloudResult<()> {
        let path = format!("/environments/{}/ssl/certificates", environment_id);
        let builder = self.request(Method::POST, &path).json(request);
        self.post(&path, builder).await
    }

    async fn activate_ssl_certificate(
        &self,
        environment_id: &str,
        certificate_id: &CertificateId,
    ) -> CloudResult<()> {
        let path = format!(
            "/environments/{}/ssl/certificates/{}/actions/activate",
            environment_id, certificate_id
        );
        let builder = self.request(Method::POST, &path);
        self.post(&path, builder).await
    }

    async fn deactivate_ssl_certificate(
        &self,
        environment_id: &str,
        certificate_id: &CertificateId,
    ) -> CloudResult<()> {
        let path = format!(
            "/environments/{}/ssl/certificates/{}/actions/deactivate",
            environment_id, certificate_id
        );
        let builder = self.request(Method::POST, &path);
        self.post(&path, builder).await
    }
}

async fn check_status(method: &'static str, path: &str, response: Response) -> CloudResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let message = error_detail(response).await;
    Err(CloudError::Api {
        method,
        path: path.to_string(),
        status,
        message,
    })
}

/// Best-effort human-readable description of an error response.
async fn error_detail(response: Response) -> String {
    let reason = response
        .status()
        .canonical_reason()
        .unwrap_or("unknown status")
        .to_string();

    match response.text().await {
        Ok(body) => serde_json::from_str::<ApiMessage>(&body)
            .ok()
            .and_then(|m| m.describe())
            .unwrap_or(reason),
        Err(_) => reason,
    }
}
