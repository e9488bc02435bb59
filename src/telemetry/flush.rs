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

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use super::aggregator::TelemetryAggregator;
use super::client::TelemetryClient;
use super::serialization::TelemetryRequestJson;
use crate::utils::ThreadHandle;

/// Attached to every telemetry request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TelemetryMetadata {
    pub machine_id: String,
    pub environment: String,
}

/// Starts periodic telemetry transmission to the server.
///
/// # Arguments
///
/// * `aggregator` - Where evaluations are recorded. Its closed windows are sent and dropped.
/// * `client` - Used for push access to the server
/// * `initial_delay` - Time before the first transmission
/// * `flush_interval` - Time between transmissions
///
/// Stopping the returned thread performs one last transmission before it exits.
pub(crate) fn start_telemetry<T: TelemetryClient>(
    aggregator: Arc<TelemetryAggregator>,
    client: T,
    metadata: TelemetryMetadata,
    initial_delay: Duration,
    flush_interval: Duration,
) -> std::io::Result<ThreadHandle<()>> {
    ThreadHandle::new("flagsense-telemetry", move |terminator: mpsc::Receiver<()>| {
        let flusher = TelemetryFlusher {
            aggregator,
            client,
            metadata,
        };
        debug!("Starting telemetry transmitting thread");
        let mut wait = initial_delay;
        loop {
            match terminator.recv_timeout(wait) {
                Err(RecvTimeoutError::Timeout) => flusher.flush(),
                // Stop requested or the owner is gone: flush what is left and exit.
                _ => {
                    flusher.flush();
                    break;
                }
            }
            wait = flush_interval;
        }
        debug!("Telemetry transmitting thread finished");
    })
}

struct TelemetryFlusher<T: TelemetryClient> {
    aggregator: Arc<TelemetryAggregator>,
    client: T,
    metadata: TelemetryMetadata,
}

impl<T: TelemetryClient> TelemetryFlusher<T> {
    /// Closes the current window and sends every closed window once.
    fn flush(&self) {
        self.aggregator.force_rotate();
        for window in self.aggregator.drain() {
            let request = TelemetryRequestJson::new(&self.metadata, window);
            debug!("Sending telemetry for time slot {}", request.time);
            if let Err(err) = self.client.push_telemetry(&request) {
                warn!("Sending telemetry failed: {err}");
            }
        }
    }
}
