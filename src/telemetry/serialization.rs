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

use serde::Serialize;

use super::aggregator::{Counts, TelemetryWindow};
use super::TelemetryMetadata;

pub(crate) const SDK_TYPE: &str = "rust";

/// Body of a `variantsData` request: the counters of one closed window.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TelemetryRequestJson {
    pub machine_id: String,
    pub sdk_type: String,
    pub environment: String,
    pub data: HashMap<String, Counts>,
    pub code_bugs: HashMap<String, Counts>,
    pub errors: Counts,
    pub time: i64,
}

impl TelemetryRequestJson {
    pub(crate) fn new(metadata: &TelemetryMetadata, window: TelemetryWindow) -> Self {
        Self {
            machine_id: metadata.machine_id.clone(),
            sdk_type: SDK_TYPE.to_string(),
            environment: metadata.environment.clone(),
            data: window.evaluation_counts,
            code_bugs: window.code_bug_counts,
            errors: window.error_counts,
            time: window.time_slot_start,
        }
    }
}
