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

use reqwest::blocking::Client;
use url::Url;

use super::client::TelemetryClient;
use super::serialization::TelemetryRequestJson;
use super::{TelemetryError, TelemetryResult};
use crate::network::http_client::{endpoint_url, sdk_post};
use crate::network::{NetworkError, NetworkResult};
use crate::Credentials;

#[derive(Debug)]
pub(crate) struct TelemetryClientHttp {
    client: Client,
    url: Url,
    credentials: Credentials,
}

impl TelemetryClientHttp {
    pub(crate) fn new(client: Client, events_service: &str, credentials: Credentials) -> NetworkResult<Self> {
        Ok(Self {
            client,
            url: endpoint_url(events_service, "variantsData")?,
            credentials,
        })
    }
}

impl TelemetryClient for TelemetryClientHttp {
    fn push_telemetry(&self, request: &TelemetryRequestJson) -> TelemetryResult<()> {
        let r = sdk_post(&self.client, self.url.clone(), &self.credentials)
            .json(request)
            .send();

        match r {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    Ok(())
                } else {
                    Err(TelemetryError::DataNotAccepted(status.to_string()))
                }
            }
            Err(e) => Err(NetworkError::ReqwestError(e).into()),
        }
    }
}
