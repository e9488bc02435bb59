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

use crate::Value;

/// Anything flags can be evaluated for.
///
/// The attribute named `"id"` is reserved: segment rules referring to it
/// always see the value returned by [`Entity::get_id`].
pub trait Entity {
    fn get_id(&self) -> String;

    fn get_attributes(&self) -> HashMap<String, Value> {
        HashMap::new()
    }
}

/// The default [`Entity`]: an identifier plus free-form attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub id: String,
    pub attributes: HashMap<String, Value>,
}

impl User {
    pub fn new(id: impl Into<String>, attributes: HashMap<String, Value>) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl Entity for User {
    fn get_id(&self) -> String {
        self.id.clone()
    }

    fn get_attributes(&self) -> HashMap<String, Value> {
        self.attributes.clone()
    }
}
