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

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use log::warn;
use thiserror::Error;

use crate::models::{Flag, Segment, Snapshot};
use crate::network::serialization::SnapshotJson;
use crate::utils::Waitable;

/// Why a payload received from the server was not installed.
#[derive(Debug, Error, Clone, PartialEq)]
pub(crate) enum RejectedPayload {
    #[error("Payload version {0} is not positive")]
    VersionNotPositive(f64),

    #[error("Payload lacks flags or segments")]
    MissingCollections,

    #[error("Payload version {received} is not newer than installed version {installed}")]
    Stale { installed: f64, received: f64 },
}

/// Holds the current [`Snapshot`].
///
/// Readers get the snapshot that is current at the time of the call and keep
/// it for as long as they need; installing a new one never affects them.
#[derive(Debug)]
pub(crate) struct SnapshotStore {
    snapshot: RwLock<Arc<Snapshot>>,
    version: Waitable<f64>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    pub(crate) fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(Snapshot::new(HashMap::new(), HashMap::new(), 0.0))),
            version: Waitable::new(0.0),
        }
    }

    pub(crate) fn get_snapshot(&self) -> Arc<Snapshot> {
        // A poisoned lock still guards a complete snapshot.
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn version(&self) -> f64 {
        self.get_snapshot().version()
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.get_snapshot().is_loaded()
    }

    /// Installs `payload` as the new current snapshot.
    ///
    /// Returns the installed version.
    pub(crate) fn install(&self, payload: SnapshotJson) -> Result<f64, RejectedPayload> {
        let received = payload.last_updated_on;
        if received <= 0.0 {
            return Err(RejectedPayload::VersionNotPositive(received));
        }
        let (Some(flags), Some(segments)) = (payload.flags, payload.segments) else {
            return Err(RejectedPayload::MissingCollections);
        };

        let flags: HashMap<String, Flag> = flags
            .into_iter()
            .map(|(id, flag)| (id, Flag::from(flag)))
            .collect();
        let segments: HashMap<String, Segment> = segments
            .into_iter()
            .map(|(id, segment)| (id, Segment::from(segment)))
            .collect();

        {
            let mut current = self
                .snapshot
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let installed = current.version();
            if received <= installed {
                return Err(RejectedPayload::Stale {
                    installed,
                    received,
                });
            }
            *current = Arc::new(current.successor(flags, segments, received));
        }

        if let Err(e) = self.version.set(received) {
            warn!("Cannot publish snapshot version {received}: {e}");
        }
        Ok(received)
    }

    /// Blocks until a first snapshot has been installed.
    pub(crate) fn wait_for_initial_load(&self) {
        if let Err(e) = self.version.wait_until(|v| *v > 0.0) {
            warn!("Stopped waiting for the initial snapshot: {e}");
        }
    }

    /// Like [`SnapshotStore::wait_for_initial_load`], giving up after `timeout`.
    ///
    /// Returns whether a snapshot is installed.
    pub(crate) fn wait_for_initial_load_timeout(&self, timeout: Duration) -> bool {
        match self.version.wait_until_timeout(timeout, |v| *v > 0.0) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!("Stopped waiting for the initial snapshot: {e}");
                self.is_initialized()
            }
        }
    }
}
