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
use std::sync::Arc;

use super::{Flag, Segment};

/// An immutable view of all flags and segments at a given version.
///
/// Collections are shared between consecutive snapshots when an update
/// leaves them untouched.
#[derive(Debug, Clone, Default)]
pub(crate) struct Snapshot {
    flags: Arc<HashMap<String, Flag>>,
    segments: Arc<HashMap<String, Segment>>,
    version: f64,
}

impl Snapshot {
    pub(crate) fn new(
        flags: HashMap<String, Flag>,
        segments: HashMap<String, Segment>,
        version: f64,
    ) -> Self {
        Self {
            flags: Arc::new(flags),
            segments: Arc::new(segments),
            version,
        }
    }

    pub(crate) fn version(&self) -> f64 {
        self.version
    }

    pub(crate) fn is_loaded(&self) -> bool {
        self.version > 0.0
    }

    pub(crate) fn get_flag(&self, flag_id: &str) -> Option<&Flag> {
        self.flags.get(flag_id)
    }

    pub(crate) fn segments(&self) -> &HashMap<String, Segment> {
        &self.segments
    }

    /// Builds the successor of this snapshot.
    ///
    /// An empty collection in the update keeps the current one; the version
    /// always moves to `version`.
    pub(crate) fn successor(
        &self,
        flags: HashMap<String, Flag>,
        segments: HashMap<String, Segment>,
        version: f64,
    ) -> Snapshot {
        Snapshot {
            flags: if flags.is_empty() {
                self.flags.clone()
            } else {
                Arc::new(flags)
            },
            segments: if segments.is_empty() {
                self.segments.clone()
            } else {
                Arc::new(segments)
            },
            version,
        }
    }
}
