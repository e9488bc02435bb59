// (C) Copyright IBM Corp. 2025.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use url::Url;

use super::serialization::{FetchLatestRequestJson, SnapshotJson};
use super::{NetworkError, NetworkResult};
use crate::Credentials;

const USER_AGENT: &str = concat!("flagsense-rust-sdk/", env!("CARGO_PKG_VERSION"));

pub(crate) trait ServerClient: Send + 'static {
    /// Asks the SDK service for the snapshot following `last_updated_on`.
    ///
    /// `Ok(None)` means the server answered without a body.
    fn fetch_latest(&self, last_updated_on: f64) -> NetworkResult<Option<SnapshotJson>>;
}

pub(crate) fn build_http_client(timeout: Duration) -> NetworkResult<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?)
}

/// Joins `path` to a service base URL, tolerating a trailing slash on `base`.
pub(crate) fn endpoint_url(base: &str, path: &str) -> NetworkResult<Url> {
    let url = format!("{}/{path}", base.trim_end_matches('/'));
    Url::parse(&url).map_err(|_| NetworkError::UrlParseError(url))
}

/// A POST request carrying the SDK credentials as headers.
pub(crate) fn sdk_post(client: &Client, url: Url, credentials: &Credentials) -> RequestBuilder {
    client
        .post(url)
        .header("content-type", "application/json")
        .header("authType", "sdk")
        .header("sdkId", &credentials.sdk_id)
        .header("sdkSecret", &credentials.sdk_secret)
}

#[derive(Debug)]
pub(crate) struct ServerClientImpl {
    client: Client,
    fetch_url: Url,
    credentials: Credentials,
}

impl ServerClientImpl {
    pub fn new(client: Client, sdk_service: &str, credentials: Credentials) -> NetworkResult<Self> {
        Ok(Self {
            client,
            fetch_url: endpoint_url(sdk_service, "fetchLatest")?,
            credentials,
        })
    }
}

impl ServerClient for ServerClientImpl {
    fn fetch_latest(&self, last_updated_on: f64) -> NetworkResult<Option<SnapshotJson>> {
        let body = FetchLatestRequestJson {
            last_updated_on,
            environment: &self.credentials.environment,
        };
        let response = sdk_post(&self.client, self.fetch_url.clone(), &self.credentials)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::UnexpectedStatus(status.to_string()));
        }

        let text = response.text()?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&text)?))
    }
}
