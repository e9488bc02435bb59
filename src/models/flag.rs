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

use crate::network::serialization::{EnvDataJson, FlagJson, FlagStatus, VariantType};

pub(crate) type EnvData = EnvDataJson;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Flag {
    pub id: String,
    pub seed: u32,
    /// Raw variant payloads, coerced to the requested type on evaluation.
    pub variants: HashMap<String, serde_json::Value>,
    /// Order in which weights are accumulated during bucketing.
    pub variants_order: Vec<String>,
    /// `None` for types this SDK doesn't know; such flags never evaluate.
    pub kind: Option<VariantType>,
    pub env_data: EnvData,
}

impl Flag {
    pub(crate) fn is_inactive(&self) -> bool {
        self.env_data.status == FlagStatus::Inactive
    }
}

impl From<FlagJson> for Flag {
    fn from(value: FlagJson) -> Self {
        Self {
            kind: value.kind.parse().ok(),
            id: value.id,
            seed: value.seed,
            variants: value
                .variants
                .into_iter()
                .map(|(key, variant)| (key, variant.value))
                .collect(),
            variants_order: value.variants_order,
            env_data: value.env_data,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// An active bool flag without prerequisites nor targeting.
    pub(crate) fn bool_flag(id: &str, variants_order: &[&str], traffic: &[(&str, u32)]) -> Flag {
        Flag {
            id: id.to_string(),
            seed: 0,
            variants: variants_order
                .iter()
                .enumerate()
                .map(|(i, key)| (key.to_string(), serde_json::Value::Bool(i == 0)))
                .collect(),
            variants_order: variants_order.iter().map(|k| k.to_string()).collect(),
            kind: Some(VariantType::Bool),
            env_data: EnvData {
                off_variant: variants_order.last().map(|k| k.to_string()).unwrap_or_default(),
                traffic: traffic.iter().map(|(k, w)| (k.to_string(), *w)).collect(),
                ..Default::default()
            },
        }
    }
}
