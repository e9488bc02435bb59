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

use crate::{Error, Result};

/// Identifies the SDK key pair and the environment whose flags are served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub sdk_id: String,
    pub sdk_secret: String,
    pub environment: String,
}

impl Credentials {
    pub fn new(
        sdk_id: impl Into<String>,
        sdk_secret: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            sdk_id: sdk_id.into(),
            sdk_secret: sdk_secret.into(),
            environment: environment.into(),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.sdk_id.trim().is_empty() {
            return Err(Error::InvalidCredentials("sdk id is blank".to_string()));
        }
        if self.sdk_secret.trim().is_empty() {
            return Err(Error::InvalidCredentials("sdk secret is blank".to_string()));
        }
        Ok(())
    }
}

/// Base URLs of the two remote services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
    /// Serves flag and segment snapshots (`{sdk_service}/fetchLatest`).
    pub sdk_service: String,
    /// Receives telemetry windows (`{events_service}/variantsData`).
    pub events_service: String,
}

impl ServiceEndpoints {
    pub fn new(sdk_service: impl Into<String>, events_service: impl Into<String>) -> Self {
        Self {
            sdk_service: sdk_service.into(),
            events_service: events_service.into(),
        }
    }
}

/// Configuration for [`crate::FlagsenseClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub service_endpoints: ServiceEndpoints,
    /// Time between two snapshot requests.
    ///
    /// Defaults to [`ClientConfig::DEFAULT_POLLING_INTERVAL`].
    pub polling_interval: Duration,
    /// When `false`, no telemetry is recorded nor sent.
    pub capture_events: bool,
    /// Time between two telemetry transmissions.
    pub telemetry_flush_interval: Duration,
    /// Time before the first telemetry transmission.
    pub telemetry_initial_delay: Duration,
    /// Width of a telemetry window.
    pub telemetry_window: Duration,
    /// Timeout applied to every HTTP request.
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_secs(5 * 60);
    pub const DEFAULT_TELEMETRY_FLUSH_INTERVAL: Duration = Duration::from_secs(5 * 60);
    pub const DEFAULT_TELEMETRY_INITIAL_DELAY: Duration = Duration::from_secs(2 * 60);
    pub const DEFAULT_TELEMETRY_WINDOW: Duration = Duration::from_secs(5 * 60);
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

    /// Create a new `ClientConfig` for the given services using default values
    /// for everything else.
    pub fn new(service_endpoints: ServiceEndpoints) -> Self {
        Self {
            service_endpoints,
            polling_interval: Self::DEFAULT_POLLING_INTERVAL,
            capture_events: true,
            telemetry_flush_interval: Self::DEFAULT_TELEMETRY_FLUSH_INTERVAL,
            telemetry_initial_delay: Self::DEFAULT_TELEMETRY_INITIAL_DELAY,
            telemetry_window: Self::DEFAULT_TELEMETRY_WINDOW,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_polling_interval(mut self, interval: Duration) -> Self {
        self.polling_interval = interval;
        self
    }

    pub fn with_capture_events(mut self, capture_events: bool) -> Self {
        self.capture_events = capture_events;
        self
    }

    pub fn with_telemetry_flush_interval(mut self, interval: Duration) -> Self {
        self.telemetry_flush_interval = interval;
        self
    }

    pub fn with_telemetry_initial_delay(mut self, delay: Duration) -> Self {
        self.telemetry_initial_delay = delay;
        self
    }

    pub fn with_telemetry_window(mut self, window: Duration) -> Self {
        self.telemetry_window = window;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
