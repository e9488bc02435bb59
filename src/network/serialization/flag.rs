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
use std::fmt::Display;
use std::str::FromStr;

use serde::Deserialize;

use super::null_as_default;

/// Declared type of a flag's variant values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantType {
    Bool,
    Int,
    Double,
    String,
    Json,
}

impl Display for VariantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            VariantType::Bool => "BOOL",
            VariantType::Int => "INT",
            VariantType::Double => "DOUBLE",
            VariantType::String => "STRING",
            VariantType::Json => "JSON",
        };
        write!(f, "{label}")
    }
}

impl FromStr for VariantType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BOOL" => Ok(VariantType::Bool),
            "INT" => Ok(VariantType::Int),
            "DOUBLE" => Ok(VariantType::Double),
            "STRING" => Ok(VariantType::String),
            "JSON" => Ok(VariantType::Json),
            other => Err(format!("Unknown variant type '{other}'")),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub(crate) enum FlagStatus {
    #[default]
    Active,
    Inactive,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FlagJson {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub seed: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variants: HashMap<String, VariantJson>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variants_order: Vec<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub env_data: EnvDataJson,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub(crate) struct VariantJson {
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EnvDataJson {
    #[serde(default, deserialize_with = "null_as_default")]
    pub pre_requisites: Vec<String>,
    #[serde(default)]
    pub off_variant: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_users: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_segments: HashMap<String, HashMap<String, u32>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_segments_order: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub traffic: HashMap<String, u32>,
    #[serde(default)]
    pub status: FlagStatus,
}
