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

use serde::Deserialize;

use super::null_as_default;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub(crate) struct SegmentJson {
    #[serde(default)]
    pub id: String,
    /// Outer list is a conjunction, inner lists are disjunctions.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: Vec<Vec<RuleJson>>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub(crate) struct RuleJson {
    pub key: String,
    #[serde(rename = "match", default)]
    pub matches: bool,
    pub operator: RuleOperator,
    #[serde(rename = "type")]
    pub kind: RuleType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RuleOperator {
    #[serde(rename = "LT")]
    LessThan,
    #[serde(rename = "LTE")]
    LessThanOrEqual,
    #[serde(rename = "EQ")]
    Equal,
    #[serde(rename = "GT")]
    GreaterThan,
    #[serde(rename = "GTE")]
    GreaterThanOrEqual,
    #[serde(rename = "IOF")]
    OneOf,
    #[serde(rename = "HAS")]
    Contains,
    #[serde(rename = "SW")]
    StartsWith,
    #[serde(rename = "EW")]
    EndsWith,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RuleType {
    #[serde(rename = "INT", alias = "INT32", alias = "INT64")]
    Int,
    #[serde(rename = "BOOL")]
    Bool,
    #[serde(rename = "DOUBLE", alias = "FLOAT", alias = "FLOAT32", alias = "FLOAT64")]
    Double,
    #[serde(rename = "STRING")]
    String,
    #[serde(rename = "VERSION")]
    Version,
    #[serde(other)]
    Unknown,
}
