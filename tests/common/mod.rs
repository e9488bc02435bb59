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

use std::path::PathBuf;
use std::time::Duration;

use flagsense::{ClientConfig, Credentials, ServiceEndpoints};
use httpmock::Method::POST;
use httpmock::{Mock, MockServer};

pub const SDK_PATH: &str = "/v1/sdk-service";
pub const EVENTS_PATH: &str = "/v1/event-service";

pub fn example_snapshot() -> serde_json::Value {
    let mut mocked_data = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    mocked_data.push("data/flag-snapshot-example.json");
    let json_payload = std::fs::read_to_string(mocked_data).unwrap();
    serde_json::from_str(&json_payload).unwrap()
}

pub fn credentials() -> Credentials {
    Credentials::new("sdk-id", "sdk-secret", "dev")
}

/// Points both services at `server`. Polling and telemetry are slow enough
/// that only the initial fetch and the shutdown flush hit the server.
pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(ServiceEndpoints::new(
        server.url(SDK_PATH),
        server.url(EVENTS_PATH),
    ))
    .with_polling_interval(Duration::from_secs(3600))
    .with_telemetry_initial_delay(Duration::from_secs(3600))
    .with_telemetry_flush_interval(Duration::from_secs(3600))
    .with_telemetry_window(Duration::from_secs(24 * 3600))
}

pub fn mock_fetch_latest<'a>(server: &'a MockServer, status: u16, body: &str) -> Mock<'a> {
    let body = body.to_string();
    server.mock(|when, then| {
        when.method(POST)
            .path(format!("{SDK_PATH}/fetchLatest"))
            .header("content-type", "application/json")
            .header("authType", "sdk")
            .header("sdkId", "sdk-id")
            .header("sdkSecret", "sdk-secret");
        then.status(status).body(body);
    })
}

pub fn mock_variants_data(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(POST)
            .path(format!("{EVENTS_PATH}/variantsData"))
            .header("authType", "sdk")
            .header("sdkId", "sdk-id")
            .header("sdkSecret", "sdk-secret");
        then.status(200);
    })
}
