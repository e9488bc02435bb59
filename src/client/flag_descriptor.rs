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

use serde_json::Map;

use crate::Value;

/// Names a flag and the variation to serve whenever it cannot be evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagDescriptor {
    pub flag_id: String,
    pub default_key: String,
    pub default_value: Value,
}

impl FlagDescriptor {
    fn new(flag_id: impl Into<String>, default_key: impl Into<String>, default_value: Value) -> Self {
        Self {
            flag_id: flag_id.into(),
            default_key: default_key.into(),
            default_value,
        }
    }

    pub fn boolean(flag_id: impl Into<String>, default_key: impl Into<String>, default_value: bool) -> Self {
        Self::new(flag_id, default_key, Value::Boolean(default_value))
    }

    pub fn integer(flag_id: impl Into<String>, default_key: impl Into<String>, default_value: i32) -> Self {
        Self::new(flag_id, default_key, Value::Int32(default_value))
    }

    pub fn decimal(flag_id: impl Into<String>, default_key: impl Into<String>, default_value: f64) -> Self {
        Self::new(flag_id, default_key, Value::Float64(default_value))
    }

    pub fn string(
        flag_id: impl Into<String>,
        default_key: impl Into<String>,
        default_value: impl Into<String>,
    ) -> Self {
        Self::new(flag_id, default_key, Value::String(default_value.into()))
    }

    pub fn json(
        flag_id: impl Into<String>,
        default_key: impl Into<String>,
        default_value: Map<String, serde_json::Value>,
    ) -> Self {
        Self::new(flag_id, default_key, Value::Json(default_value))
    }

    pub(crate) fn default_variation(&self) -> Variation {
        Variation {
            key: self.default_key.clone(),
            value: self.default_value.clone(),
        }
    }
}

/// The variant a user received: its key and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Variation {
    pub key: String,
    pub value: Value,
}
