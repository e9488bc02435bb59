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

use serde::{Deserialize, Serialize};

use super::{FlagJson, SegmentJson};

/// Body of a `fetchLatest` response.
///
/// `flags` and `segments` stay optional: a payload missing either of them is
/// rejected as a whole when installed.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SnapshotJson {
    #[serde(default)]
    pub segments: Option<HashMap<String, SegmentJson>>,
    #[serde(default)]
    pub flags: Option<HashMap<String, FlagJson>>,
    #[serde(default)]
    pub last_updated_on: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FetchLatestRequestJson<'a> {
    pub last_updated_on: f64,
    pub environment: &'a str,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use rstest::fixture;
    use serde_json::json;

    use super::SnapshotJson;

    /// A bool flag `F` split evenly between `on` and `off`, a string flag
    /// `greeting` and a flag `beta` restricted to members of segment `adults`.
    pub(crate) fn snapshot_payload(version: f64) -> serde_json::Value {
        json!({
            "lastUpdatedOn": version,
            "segments": {
                "adults": {
                    "id": "adults",
                    "rules": [[
                        {"key": "age", "match": true, "operator": "GTE", "type": "INT", "values": [18]}
                    ]]
                }
            },
            "flags": {
                "F": {
                    "id": "F",
                    "seed": 42,
                    "variants": {"on": {"value": true}, "off": {"value": false}},
                    "variantsOrder": ["on", "off"],
                    "type": "BOOL",
                    "envData": {
                        "offVariant": "off",
                        "traffic": {"on": 50000, "off": 50000},
                        "status": "ACTIVE"
                    }
                },
                "greeting": {
                    "id": "greeting",
                    "seed": 7,
                    "variants": {"hello": {"value": "hello"}, "hi": {"value": "hi"}},
                    "variantsOrder": ["hello", "hi"],
                    "type": "STRING",
                    "envData": {
                        "offVariant": "hello",
                        "targetUsers": {"bob": "hi"},
                        "traffic": {"hello": 100000},
                        "status": "ACTIVE"
                    }
                },
                "beta": {
                    "id": "beta",
                    "seed": 0,
                    "variants": {"yes": {"value": true}, "no": {"value": false}},
                    "variantsOrder": ["yes", "no"],
                    "type": "BOOL",
                    "envData": {
                        "preRequisites": ["adults"],
                        "offVariant": "no",
                        "traffic": {"yes": 100000},
                        "status": "ACTIVE"
                    }
                }
            }
        })
    }

    #[fixture]
    pub(crate) fn snapshot_json() -> SnapshotJson {
        serde_json::from_value(snapshot_payload(1000.0)).unwrap()
    }
}
