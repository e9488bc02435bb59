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

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use crate::network::ServerClient;
use crate::snapshot_store::{RejectedPayload, SnapshotStore};

pub(crate) struct SyncThreadWorker<T: ServerClient> {
    server_client: T,
    store: Arc<SnapshotStore>,
    polling_interval: Duration,
}

impl<T: ServerClient> SyncThreadWorker<T> {
    pub(crate) fn new(server_client: T, store: Arc<SnapshotStore>, polling_interval: Duration) -> Self {
        Self {
            server_client,
            store,
            polling_interval,
        }
    }

    /// Fetches a snapshot right away and then once per polling interval,
    /// until the termination channel reports anything but a timeout.
    pub(crate) fn run(&self, thread_termination_receiver: Receiver<()>) {
        debug!("Starting snapshot synchronization thread");
        loop {
            self.update_snapshot_from_server();

            match thread_termination_receiver.recv_timeout(self.polling_interval) {
                Err(RecvTimeoutError::Timeout) => {}
                // Stop requested or the owner is gone.
                _ => break,
            }
        }
        debug!("Snapshot synchronization thread finished");
    }

    /// Failures are only logged: the next tick tries again.
    fn update_snapshot_from_server(&self) {
        let installed = self.store.version();
        match self.server_client.fetch_latest(installed) {
            Ok(Some(payload)) => match self.store.install(payload) {
                Ok(version) => debug!("Installed snapshot version {version}"),
                Err(e @ RejectedPayload::Stale { .. }) => debug!("Discarding snapshot: {e}"),
                Err(e) => warn!("Discarding snapshot: {e}"),
            },
            Ok(None) => debug!("No snapshot received"),
            Err(e) => warn!("Failed to fetch snapshot: {e}"),
        }
    }
}
