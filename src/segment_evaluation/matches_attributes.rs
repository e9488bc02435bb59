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

use std::borrow::Cow;
use std::collections::HashMap;

use log::debug;

use super::rule_operator::RuleOperand;
use crate::models::{Rule, Segment};
use crate::Value;

/// Name of the attribute that always resolves to the user id.
pub(crate) const ID_ATTRIBUTE: &str = "id";

pub(crate) trait MatchesAttributes {
    fn matches_attributes(&self, user_id: &str, attributes: &HashMap<String, Value>) -> bool;
}

impl MatchesAttributes for Segment {
    /// A [`Segment`] matches iif every group of rules has at least one
    /// matching rule. A segment without groups matches everybody, a
    /// segment with an empty group matches nobody.
    fn matches_attributes(&self, user_id: &str, attributes: &HashMap<String, Value>) -> bool {
        self.rules.iter().all(|group| {
            group
                .iter()
                .any(|rule| rule.matches_attributes(user_id, attributes))
        })
    }
}

impl MatchesAttributes for Rule {
    /// A [`Rule`] matches iif:
    /// * the attribute is present and has a type the rule can compare, AND
    /// * the operator result equals the rule's `match` flag.
    fn matches_attributes(&self, user_id: &str, attributes: &HashMap<String, Value>) -> bool {
        let attribute = if self.key == ID_ATTRIBUTE {
            Cow::Owned(Value::String(user_id.to_string()))
        } else {
            match attributes.get(&self.key) {
                Some(value) => Cow::Borrowed(value),
                None => return false,
            }
        };

        match attribute.operate(self.kind, self.operator, &self.values) {
            Ok(result) => result == self.matches,
            Err(e) => {
                debug!("Rule on attribute '{}' does not apply: {e}", self.key);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{rule, segment};
    use crate::models::{RuleOperator, RuleType};
    use rstest::rstest;

    fn attributes(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_id_attribute_resolves_to_user_id() {
        let r = rule("id", RuleOperator::Equal, RuleType::String, vec![Value::from("alice")]);
        let attrs = attributes(&[("id", Value::from("mallory"))]);
        assert!(r.matches_attributes("alice", &attrs));
        assert!(!r.matches_attributes("bob", &attrs));
    }

    #[rstest]
    #[case(Value::Int32(30), true, true)]
    #[case(Value::Int32(30), false, false)]
    #[case(Value::Int32(10), true, false)]
    #[case(Value::Int32(10), false, true)]
    fn test_negation(#[case] age: Value, #[case] matches: bool, #[case] expected: bool) {
        let mut r = rule("age", RuleOperator::GreaterThanOrEqual, RuleType::Int, vec![Value::Int32(18)]);
        r.matches = matches;
        assert_eq!(r.matches_attributes("u", &attributes(&[("age", age)])), expected);
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn test_missing_or_mistyped_attribute_never_matches(#[case] matches: bool) {
        let mut r = rule("age", RuleOperator::GreaterThanOrEqual, RuleType::Int, vec![Value::Int32(18)]);
        r.matches = matches;
        assert!(!r.matches_attributes("u", &HashMap::new()));
        assert!(!r.matches_attributes("u", &attributes(&[("age", Value::from("30"))])));
    }

    #[test]
    fn test_unknown_operator_is_negatable() {
        let mut r = rule("plan", RuleOperator::Unknown, RuleType::String, vec![Value::from("pro")]);
        let attrs = attributes(&[("plan", Value::from("pro"))]);
        assert!(!r.matches_attributes("u", &attrs));
        r.matches = false;
        assert!(r.matches_attributes("u", &attrs));
    }

    #[test]
    fn test_and_of_ors() {
        let is_adult = rule("age", RuleOperator::GreaterThanOrEqual, RuleType::Int, vec![Value::Int32(18)]);
        let in_nl = rule("country", RuleOperator::Equal, RuleType::String, vec![Value::from("NL")]);
        let in_de = rule("country", RuleOperator::Equal, RuleType::String, vec![Value::from("DE")]);
        let s = segment("S", vec![vec![is_adult], vec![in_nl, in_de]]);

        let adult_de = attributes(&[("age", Value::Int32(40)), ("country", Value::from("DE"))]);
        let adult_fr = attributes(&[("age", Value::Int32(40)), ("country", Value::from("FR"))]);
        let minor_nl = attributes(&[("age", Value::Int32(12)), ("country", Value::from("NL"))]);
        assert!(s.matches_attributes("u", &adult_de));
        assert!(!s.matches_attributes("u", &adult_fr));
        assert!(!s.matches_attributes("u", &minor_nl));
    }

    #[test]
    fn test_empty_groups() {
        assert!(segment("S", vec![]).matches_attributes("u", &HashMap::new()));
        assert!(!segment("S", vec![vec![]]).matches_attributes("u", &HashMap::new()));
    }
}
