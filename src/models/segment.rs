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

use log::warn;

use crate::network::serialization::{RuleJson, RuleOperator, RuleType, SegmentJson};
use crate::Value;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Segment {
    pub id: String,
    pub rules: Vec<Vec<Rule>>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Rule {
    /// Name of the user attribute. `"id"` refers to the user id.
    pub key: String,
    /// `false` negates the operator result.
    pub matches: bool,
    pub operator: RuleOperator,
    pub kind: RuleType,
    /// Literals, already normalized for `kind`.
    pub values: Vec<Value>,
}

impl From<SegmentJson> for Segment {
    fn from(value: SegmentJson) -> Self {
        Self {
            id: value.id,
            rules: value
                .rules
                .into_iter()
                .map(|group| group.into_iter().map(Rule::from).collect())
                .collect(),
        }
    }
}

impl From<RuleJson> for Rule {
    fn from(value: RuleJson) -> Self {
        let literals = value
            .values
            .into_iter()
            .filter_map(|literal| match Value::try_from(literal) {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!("Ignoring literal of rule on attribute '{}': {e}", value.key);
                    None
                }
            })
            .collect();
        Self {
            values: normalize_literals(value.kind, literals),
            key: value.key,
            matches: value.matches,
            operator: value.operator,
            kind: value.kind,
        }
    }
}

/// Brings numeric literals to the representation the rule type compares with:
/// `Int32` for integer rules (fractions truncate) and `Float64` for decimal
/// rules. Non-numeric literals and literals of other rule types are kept as is.
pub(crate) fn normalize_literals(kind: RuleType, values: Vec<Value>) -> Vec<Value> {
    match kind {
        RuleType::Int => values
            .into_iter()
            .map(|v| match v {
                Value::Float64(f) => Value::Int32(f as i32),
                other => other,
            })
            .collect(),
        RuleType::Double => values
            .into_iter()
            .map(|v| match v {
                Value::Int32(i) => Value::Float64(f64::from(i)),
                other => other,
            })
            .collect(),
        _ => values,
    }
}
