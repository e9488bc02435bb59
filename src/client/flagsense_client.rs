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

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use log::{debug, warn};

use super::evaluator::Evaluator;
use super::flag_descriptor::{FlagDescriptor, Variation};
use crate::errors::Result;
use crate::models::VariantType;
use crate::network::configuration_sync::LiveSnapshot;
use crate::network::http_client::build_http_client;
use crate::network::{ServerClient, ServerClientImpl};
use crate::telemetry::{
    start_telemetry, TelemetryAggregator, TelemetryClient, TelemetryClientHttp, TelemetryMetadata,
};
use crate::utils::ThreadHandle;
use crate::{ClientConfig, Credentials, Entity};

/// Evaluates feature flags locally against definitions synchronized from the SDK service.
///
/// Creating the client starts two background threads: one polls the SDK service for
/// new flag and segment definitions, the other periodically sends evaluation
/// telemetry to the events service. Both stop on [`FlagsenseClient::close`] or when
/// the client is dropped.
///
/// Evaluations never fail. Until the first snapshot arrives, and whenever a flag
/// cannot be evaluated, the default variation of the [`FlagDescriptor`] is returned.
#[derive(Debug)]
pub struct FlagsenseClient {
    evaluator: Evaluator,
    live_snapshot: LiveSnapshot,
    telemetry_thread: Mutex<Option<ThreadHandle<()>>>,
}

impl FlagsenseClient {
    /// Creates a new client and starts synchronizing with the server.
    ///
    /// # Arguments
    ///
    /// * `credentials` - SDK credentials and the environment whose flags are evaluated.
    /// * `config` - Service endpoints, polling and telemetry settings.
    ///
    /// Fails if the credentials are blank, an endpoint is not a valid URL or a
    /// background thread cannot be spawned. Network failures while polling are
    /// not reported here: they are logged and retried on the next poll.
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        credentials.validate()?;

        let http_client = build_http_client(config.request_timeout)?;
        let server_client = ServerClientImpl::new(
            http_client.clone(),
            &config.service_endpoints.sdk_service,
            credentials.clone(),
        )?;
        let telemetry_client = TelemetryClientHttp::new(
            http_client,
            &config.service_endpoints.events_service,
            credentials.clone(),
        )?;

        Self::with_transports(credentials, &config, server_client, telemetry_client)
    }

    pub(crate) fn with_transports<S: ServerClient, T: TelemetryClient>(
        credentials: Credentials,
        config: &ClientConfig,
        server_client: S,
        telemetry_client: T,
    ) -> Result<Self> {
        credentials.validate()?;

        let aggregator = Arc::new(TelemetryAggregator::new(
            config.capture_events,
            config.telemetry_window,
        ));

        let telemetry_thread = if config.capture_events {
            let metadata = TelemetryMetadata {
                machine_id: uuid::Uuid::new_v4().to_string(),
                environment: credentials.environment,
            };
            Some(start_telemetry(
                aggregator.clone(),
                telemetry_client,
                metadata,
                config.telemetry_initial_delay,
                config.telemetry_flush_interval,
            )?)
        } else {
            None
        };

        let live_snapshot = LiveSnapshot::new(server_client, config.polling_interval)?;
        let evaluator = Evaluator::new(live_snapshot.store().clone(), aggregator);

        Ok(Self {
            evaluator,
            live_snapshot,
            telemetry_thread: Mutex::new(telemetry_thread),
        })
    }

    pub fn boolean_variation(&self, flag: &FlagDescriptor, entity: &impl Entity) -> Variation {
        self.evaluate(flag, entity, VariantType::Bool)
    }

    pub fn integer_variation(&self, flag: &FlagDescriptor, entity: &impl Entity) -> Variation {
        self.evaluate(flag, entity, VariantType::Int)
    }

    pub fn decimal_variation(&self, flag: &FlagDescriptor, entity: &impl Entity) -> Variation {
        self.evaluate(flag, entity, VariantType::Double)
    }

    pub fn string_variation(&self, flag: &FlagDescriptor, entity: &impl Entity) -> Variation {
        self.evaluate(flag, entity, VariantType::String)
    }

    pub fn json_variation(&self, flag: &FlagDescriptor, entity: &impl Entity) -> Variation {
        self.evaluate(flag, entity, VariantType::Json)
    }

    /// Evaluates `flag` for `entity`, requiring the flag to be of type `expected`.
    ///
    /// A flag of any other type serves the descriptor's default.
    pub fn evaluate(&self, flag: &FlagDescriptor, entity: &impl Entity, expected: VariantType) -> Variation {
        self.evaluator.evaluate(flag, entity, expected)
    }

    /// Blocks until the first snapshot has been received from the server.
    pub fn wait_for_initialization_complete(&self) {
        self.live_snapshot.store().wait_for_initial_load();
    }

    /// Like [`Self::wait_for_initialization_complete`], giving up after `timeout`.
    ///
    /// Returns whether a snapshot is available.
    pub fn wait_for_initialization_complete_timeout(&self, timeout: Duration) -> bool {
        self.live_snapshot.store().wait_for_initial_load_timeout(timeout)
    }

    /// Whether a snapshot has been received from the server.
    pub fn initialization_complete(&self) -> bool {
        self.live_snapshot.store().is_initialized()
    }

    /// Stops the background threads.
    ///
    /// Pending telemetry is sent one last time before this returns. Evaluations
    /// keep working afterwards against the last received snapshot, but are no
    /// longer reported. Calling it again does nothing.
    pub fn close(&self) {
        self.live_snapshot.stop();

        let thread = self
            .telemetry_thread
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(mut thread) = thread {
            debug!("Stopping telemetry");
            if let Some(Err(e)) = thread.stop() {
                warn!("Telemetry thread failed: {e}");
            }
        }
    }
}

impl Drop for FlagsenseClient {
    fn drop(&mut self) {
        self.close();
    }
}
