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

use log::warn;

use super::thread::SyncThreadWorker;
use crate::network::ServerClient;
use crate::snapshot_store::SnapshotStore;
use crate::utils::ThreadHandle;

/// A [`SnapshotStore`] kept up to date by a background thread.
#[derive(Debug)]
pub(crate) struct LiveSnapshot {
    store: Arc<SnapshotStore>,
    sync_thread: Mutex<Option<ThreadHandle<()>>>,
}

impl LiveSnapshot {
    pub(crate) fn new<T: ServerClient>(server_client: T, polling_interval: Duration) -> std::io::Result<Self> {
        let store = Arc::new(SnapshotStore::new());
        let worker = SyncThreadWorker::new(server_client, store.clone(), polling_interval);
        let sync_thread = ThreadHandle::new("flagsense-sync", move |terminator| worker.run(terminator))?;

        Ok(Self {
            store,
            sync_thread: Mutex::new(Some(sync_thread)),
        })
    }

    pub(crate) fn store(&self) -> &Arc<SnapshotStore> {
        &self.store
    }

    /// Stops the synchronization thread and waits for it. Later calls do nothing.
    pub(crate) fn stop(&self) {
        let thread = self
            .sync_thread
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(mut thread) = thread {
            if let Some(Err(e)) = thread.stop() {
                warn!("Snapshot synchronization thread failed: {e}");
            }
        }
    }
}
