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

use semver::{BuildMetadata, Version};

use super::errors::CheckOperatorErrorDetail;
use crate::models::{RuleOperator, RuleType};
use crate::Value;

type CheckResult<T> = std::result::Result<T, CheckOperatorErrorDetail>;

pub(crate) trait RuleOperand {
    /// Applies `operator` to `self` and the rule literals, interpreting both
    /// as `kind`.
    ///
    /// `Ok(false)` is returned for operators that don't exist for `kind` and
    /// for unknown rule types.
    fn operate(
        &self,
        kind: RuleType,
        operator: RuleOperator,
        values: &[Value],
    ) -> CheckResult<bool>;
}

impl RuleOperand for Value {
    fn operate(
        &self,
        kind: RuleType,
        operator: RuleOperator,
        values: &[Value],
    ) -> CheckResult<bool> {
        match kind {
            RuleType::Int => {
                let attribute = match self {
                    Value::Int32(i) => *i,
                    Value::Float64(f) => *f as i32,
                    _ => return Err(CheckOperatorErrorDetail::AttributeTypeMismatch(kind)),
                };
                compare(operator, attribute, values, |literal| match literal {
                    Value::Int32(i) => Ok(Some(*i)),
                    _ => Err(CheckOperatorErrorDetail::LiteralTypeMismatch(kind)),
                })
            }
            RuleType::Double => {
                let attribute = match self {
                    Value::Int32(i) => f64::from(*i),
                    Value::Float64(f) => *f,
                    _ => return Err(CheckOperatorErrorDetail::AttributeTypeMismatch(kind)),
                };
                compare(operator, attribute, values, |literal| match literal {
                    Value::Float64(f) => Ok(Some(*f)),
                    Value::Int32(i) => Ok(Some(f64::from(*i))),
                    _ => Err(CheckOperatorErrorDetail::LiteralTypeMismatch(kind)),
                })
            }
            RuleType::Version => {
                let Value::String(raw) = self else {
                    return Err(CheckOperatorErrorDetail::AttributeTypeMismatch(kind));
                };
                let attribute = parse_version(raw).unwrap_or(Version::new(0, 0, 0));
                compare(operator, attribute, values, |literal| match literal {
                    Value::String(s) => Ok(parse_version(s)),
                    _ => Err(CheckOperatorErrorDetail::LiteralTypeMismatch(kind)),
                })
            }
            RuleType::String => {
                let Value::String(attribute) = self else {
                    return Err(CheckOperatorErrorDetail::AttributeTypeMismatch(kind));
                };
                let reference = || match values.first() {
                    Some(Value::String(s)) => Ok(s.as_str()),
                    Some(_) => Err(CheckOperatorErrorDetail::LiteralTypeMismatch(kind)),
                    None => Err(CheckOperatorErrorDetail::MissingReferenceValue),
                };
                Ok(match operator {
                    RuleOperator::Equal => attribute == reference()?,
                    RuleOperator::Contains => attribute.contains(reference()?),
                    RuleOperator::StartsWith => attribute.starts_with(reference()?),
                    RuleOperator::EndsWith => attribute.ends_with(reference()?),
                    RuleOperator::OneOf => values
                        .iter()
                        .any(|v| matches!(v, Value::String(s) if s == attribute)),
                    _ => false,
                })
            }
            RuleType::Bool => {
                let Value::Boolean(attribute) = self else {
                    return Err(CheckOperatorErrorDetail::AttributeTypeMismatch(kind));
                };
                match operator {
                    RuleOperator::Equal => match values.first() {
                        Some(Value::Boolean(b)) => Ok(attribute == b),
                        Some(_) => Err(CheckOperatorErrorDetail::LiteralTypeMismatch(kind)),
                        None => Err(CheckOperatorErrorDetail::MissingReferenceValue),
                    },
                    _ => Ok(false),
                }
            }
            RuleType::Unknown => Ok(false),
        }
    }
}

/// Ordered comparisons against the first literal, plus `IOF` membership.
///
/// `literal` converts a rule literal to the attribute's representation. It
/// yields `Ok(None)` for literals of the right type that still cannot be
/// compared (unparsable versions); those literals never match.
fn compare<T, F>(operator: RuleOperator, attribute: T, values: &[Value], literal: F) -> CheckResult<bool>
where
    T: PartialOrd,
    F: Fn(&Value) -> CheckResult<Option<T>>,
{
    let reference = || {
        values
            .first()
            .ok_or(CheckOperatorErrorDetail::MissingReferenceValue)
            .and_then(&literal)
    };
    let ordered = |cmp: fn(&T, &T) -> bool| -> CheckResult<bool> {
        Ok(reference()?.is_some_and(|r| cmp(&attribute, &r)))
    };
    match operator {
        RuleOperator::LessThan => ordered(T::lt),
        RuleOperator::LessThanOrEqual => ordered(T::le),
        RuleOperator::Equal => ordered(T::eq),
        RuleOperator::GreaterThan => ordered(T::gt),
        RuleOperator::GreaterThanOrEqual => ordered(T::ge),
        RuleOperator::OneOf => Ok(values
            .iter()
            .filter_map(|v| literal(v).ok().flatten())
            .any(|v| v == attribute)),
        _ => Ok(false),
    }
}

/// Parses a version leniently: a leading `v` is accepted and missing minor
/// or patch components are padded with zeros (`"1.2"` is `1.2.0`). Build
/// metadata is discarded as it doesn't take part in precedence.
pub(crate) fn parse_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim().trim_start_matches(|c: char| c == 'v' || c == 'V');
    let mut version = match Version::parse(trimmed) {
        Ok(version) => version,
        Err(_) => {
            let (core, suffix) = match trimmed.find(|c: char| c == '-' || c == '+') {
                Some(i) => trimmed.split_at(i),
                None => (trimmed, ""),
            };
            let mut parts = core
                .split('.')
                .map(|p| p.parse::<u64>().ok())
                .collect::<Option<Vec<u64>>>()?;
            if parts.is_empty() || parts.len() > 3 {
                return None;
            }
            parts.resize(3, 0);
            Version::parse(&format!("{}.{}.{}{suffix}", parts[0], parts[1], parts[2])).ok()?
        }
    };
    version.build = BuildMetadata::EMPTY;
    Some(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.2.3", Some(Version::new(1, 2, 3)))]
    #[case("1.2", Some(Version::new(1, 2, 0)))]
    #[case("v2", Some(Version::new(2, 0, 0)))]
    #[case("01.002.3", Some(Version::new(1, 2, 3)))]
    #[case("1.2.3+build.5", Some(Version::new(1, 2, 3)))]
    #[case("1.2.3.4", None)]
    #[case("one", None)]
    #[case("", None)]
    fn test_parse_version(#[case] raw: &str, #[case] expected: Option<Version>) {
        assert_eq!(parse_version(raw), expected);
    }

    #[test]
    fn test_parse_prerelease_version() {
        let version = parse_version("1.2-beta.1").unwrap();
        assert_eq!(version.to_string(), "1.2.0-beta.1");
        assert!(version < Version::new(1, 2, 0));
    }

    #[rstest]
    #[case(Value::Int32(20), RuleOperator::GreaterThanOrEqual, vec![Value::Int32(18)], true)]
    #[case(Value::Int32(17), RuleOperator::GreaterThanOrEqual, vec![Value::Int32(18)], false)]
    #[case(Value::Float64(18.7), RuleOperator::Equal, vec![Value::Int32(18)], true)]
    #[case(Value::Int32(3), RuleOperator::OneOf, vec![Value::Int32(1), Value::Int32(3)], true)]
    #[case(Value::Int32(3), RuleOperator::OneOf, vec![], false)]
    #[case(Value::Int32(3), RuleOperator::Contains, vec![Value::Int32(3)], false)]
    #[case(Value::Int32(3), RuleOperator::Unknown, vec![Value::Int32(3)], false)]
    fn test_int_operators(
        #[case] attribute: Value,
        #[case] operator: RuleOperator,
        #[case] values: Vec<Value>,
        #[case] expected: bool,
    ) {
        assert_eq!(attribute.operate(RuleType::Int, operator, &values), Ok(expected));
    }

    #[rstest]
    #[case(Value::Float64(0.5), RuleOperator::LessThan, vec![Value::Float64(0.75)], true)]
    #[case(Value::Int32(1), RuleOperator::LessThanOrEqual, vec![Value::Float64(1.0)], true)]
    #[case(Value::Float64(2.5), RuleOperator::GreaterThan, vec![Value::Float64(2.5)], false)]
    #[case(Value::Float64(2.5), RuleOperator::OneOf, vec![Value::Float64(1.0), Value::Float64(2.5)], true)]
    fn test_double_operators(
        #[case] attribute: Value,
        #[case] operator: RuleOperator,
        #[case] values: Vec<Value>,
        #[case] expected: bool,
    ) {
        assert_eq!(attribute.operate(RuleType::Double, operator, &values), Ok(expected));
    }

    #[rstest]
    #[case("alice@example.com", RuleOperator::Equal, "alice@example.com", true)]
    #[case("alice@example.com", RuleOperator::Contains, "@example", true)]
    #[case("alice@example.com", RuleOperator::StartsWith, "bob", false)]
    #[case("alice@example.com", RuleOperator::EndsWith, ".com", true)]
    #[case("alice@example.com", RuleOperator::LessThan, "b", false)]
    fn test_string_operators(
        #[case] attribute: &str,
        #[case] operator: RuleOperator,
        #[case] value: &str,
        #[case] expected: bool,
    ) {
        let attribute = Value::from(attribute);
        assert_eq!(
            attribute.operate(RuleType::String, operator, &[Value::from(value)]),
            Ok(expected)
        );
    }

    #[test]
    fn test_string_one_of() {
        let values = vec![Value::from("NL"), Value::Int32(3), Value::from("DE")];
        assert_eq!(Value::from("DE").operate(RuleType::String, RuleOperator::OneOf, &values), Ok(true));
        assert_eq!(Value::from("FR").operate(RuleType::String, RuleOperator::OneOf, &values), Ok(false));
    }

    #[rstest]
    #[case("1.10.0", RuleOperator::GreaterThan, "1.9", true)]
    #[case("1.2", RuleOperator::Equal, "1.2.0", true)]
    #[case("garbage", RuleOperator::LessThan, "0.0.1", true)]
    #[case("2.0.0", RuleOperator::LessThanOrEqual, "not-a-version", false)]
    #[case("2.0.0", RuleOperator::GreaterThanOrEqual, "not-a-version", false)]
    fn test_version_operators(
        #[case] attribute: &str,
        #[case] operator: RuleOperator,
        #[case] value: &str,
        #[case] expected: bool,
    ) {
        let attribute = Value::from(attribute);
        assert_eq!(
            attribute.operate(RuleType::Version, operator, &[Value::from(value)]),
            Ok(expected)
        );
    }

    #[test]
    fn test_version_one_of_skips_unparsable_literals() {
        let values = vec![Value::from("x.y"), Value::from("3.1")];
        assert_eq!(
            Value::from("3.1.0").operate(RuleType::Version, RuleOperator::OneOf, &values),
            Ok(true)
        );
    }

    #[test]
    fn test_bool_operators() {
        let values = [Value::Boolean(true)];
        assert_eq!(Value::Boolean(true).operate(RuleType::Bool, RuleOperator::Equal, &values), Ok(true));
        assert_eq!(Value::Boolean(false).operate(RuleType::Bool, RuleOperator::Equal, &values), Ok(false));
        assert_eq!(Value::Boolean(true).operate(RuleType::Bool, RuleOperator::OneOf, &values), Ok(false));
    }

    #[rstest]
    #[case(RuleType::Int, Value::from("18"))]
    #[case(RuleType::Double, Value::Boolean(true))]
    #[case(RuleType::String, Value::Int32(1))]
    #[case(RuleType::Version, Value::Float64(1.2))]
    #[case(RuleType::Bool, Value::from("true"))]
    fn test_attribute_type_mismatch(#[case] kind: RuleType, #[case] attribute: Value) {
        assert_eq!(
            attribute.operate(kind, RuleOperator::Equal, &[]),
            Err(CheckOperatorErrorDetail::AttributeTypeMismatch(kind))
        );
    }

    #[test]
    fn test_missing_or_mistyped_reference_value() {
        assert_eq!(
            Value::Int32(1).operate(RuleType::Int, RuleOperator::Equal, &[]),
            Err(CheckOperatorErrorDetail::MissingReferenceValue)
        );
        assert_eq!(
            Value::Int32(1).operate(RuleType::Int, RuleOperator::Equal, &[Value::from("1")]),
            Err(CheckOperatorErrorDetail::LiteralTypeMismatch(RuleType::Int))
        );
    }

    #[test]
    fn test_unknown_rule_type() {
        assert_eq!(
            Value::Json(Default::default()).operate(RuleType::Unknown, RuleOperator::Equal, &[]),
            Ok(false)
        );
    }
}
