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

//! Client construction without network access, for integration tests.

use std::sync::mpsc;

use crate::errors::Result;
use crate::network::serialization::SnapshotJson;
use crate::network::{NetworkResult, ServerClient};
use crate::telemetry::{TelemetryClient, TelemetryRequestJson, TelemetryResult};
use crate::{ClientConfig, Credentials, FlagsenseClient};

struct StaticServerClient {
    payload: serde_json::Value,
}

impl ServerClient for StaticServerClient {
    fn fetch_latest(&self, _last_updated_on: f64) -> NetworkResult<Option<SnapshotJson>> {
        Ok(Some(serde_json::from_value(self.payload.clone())?))
    }
}

struct RecordingTelemetryClient {
    sender: mpsc::Sender<serde_json::Value>,
}

impl TelemetryClient for RecordingTelemetryClient {
    fn push_telemetry(&self, request: &TelemetryRequestJson) -> TelemetryResult<()> {
        if let Ok(json) = serde_json::to_value(request) {
            // The receiving end may be gone already; the request is dropped then.
            let _ = self.sender.send(json);
        }
        Ok(())
    }
}

/// Creates a [`FlagsenseClient`] whose server always answers with `payload`.
///
/// Telemetry requests the client would send are delivered, in their JSON wire
/// form, to the returned receiver instead.
pub fn create_client_with_payload(
    payload: serde_json::Value,
    config: ClientConfig,
) -> Result<(FlagsenseClient, mpsc::Receiver<serde_json::Value>)> {
    let (sender, receiver) = mpsc::channel();
    let client = FlagsenseClient::with_transports(
        Credentials::new("test-sdk-id", "test-sdk-secret", "test"),
        &config,
        StaticServerClient { payload },
        RecordingTelemetryClient { sender },
    )?;
    Ok((client, receiver))
}
