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
use thiserror::Error;

use crate::models::VariantType;

/// Values handled by the SDK: user attributes, rule literals and the
/// payload of every returned variation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Int32(i32),
    Float64(f64),
    String(String),
    Json(Map<String, serde_json::Value>),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueCoercionError {
    #[error("Expected a value of type {expected}, found '{found}'")]
    MismatchType {
        expected: VariantType,
        found: String,
    },

    #[error("JSON value '{0}' cannot be represented as a Value")]
    Unrepresentable(String),
}

impl Value {
    /// Converts a variant payload as stored in the snapshot into a [`Value`]
    /// of the requested type.
    ///
    /// Integer flags accept any JSON number. Fractional numbers are
    /// truncated and out of range numbers saturate at the `i32` bounds.
    pub(crate) fn coerce(
        kind: VariantType,
        raw: &serde_json::Value,
    ) -> std::result::Result<Value, ValueCoercionError> {
        let coerced = match kind {
            VariantType::Bool => raw.as_bool().map(Value::Boolean),
            VariantType::Int => raw
                .as_i64()
                .map(saturate_i32)
                .or_else(|| raw.as_f64().map(|f| f as i32))
                .map(Value::Int32),
            VariantType::Double => raw.as_f64().map(Value::Float64),
            VariantType::String => raw.as_str().map(|s| Value::String(s.to_string())),
            VariantType::Json => raw.as_object().cloned().map(Value::Json),
        };
        coerced.ok_or_else(|| ValueCoercionError::MismatchType {
            expected: kind,
            found: raw.to_string(),
        })
    }
}

fn saturate_i32(n: i64) -> i32 {
    n.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl TryFrom<serde_json::Value> for Value {
    type Error = ValueCoercionError;

    fn try_from(value: serde_json::Value) -> std::result::Result<Self, Self::Error> {
        match value {
            serde_json::Value::Bool(b) => Ok(Value::Boolean(b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) if i32::try_from(i).is_ok() => Ok(Value::Int32(i as i32)),
                _ => n
                    .as_f64()
                    .map(Value::Float64)
                    .ok_or_else(|| ValueCoercionError::Unrepresentable(n.to_string())),
            },
            serde_json::Value::String(s) => Ok(Value::String(s)),
            serde_json::Value::Object(map) => Ok(Value::Json(map)),
            other => Err(ValueCoercionError::Unrepresentable(other.to_string())),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float64(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Map<String, serde_json::Value>> for Value {
    fn from(value: Map<String, serde_json::Value>) -> Self {
        Value::Json(value)
    }
}

macro_rules! impl_try_from_value {
    ($target:ty, $variant:ident, $kind:expr) => {
        impl TryFrom<Value> for $target {
            type Error = ValueCoercionError;

            fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(ValueCoercionError::MismatchType {
                        expected: $kind,
                        found: format!("{other:?}"),
                    }),
                }
            }
        }
    };
}

impl_try_from_value!(bool, Boolean, VariantType::Bool);
impl_try_from_value!(i32, Int32, VariantType::Int);
impl_try_from_value!(f64, Float64, VariantType::Double);
impl_try_from_value!(String, String, VariantType::String);
impl_try_from_value!(Map<String, serde_json::Value>, Json, VariantType::Json);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(VariantType::Bool, json!(true), Value::Boolean(true))]
    #[case(VariantType::Int, json!(12), Value::Int32(12))]
    #[case(VariantType::Int, json!(12.9), Value::Int32(12))]
    #[case(VariantType::Int, json!(10_000_000_000_i64), Value::Int32(i32::MAX))]
    #[case(VariantType::Double, json!(3), Value::Float64(3.0))]
    #[case(VariantType::Double, json!(0.25), Value::Float64(0.25))]
    #[case(VariantType::String, json!("blue"), Value::String("blue".to_string()))]
    fn test_coerce(#[case] kind: VariantType, #[case] raw: serde_json::Value, #[case] expected: Value) {
        assert_eq!(Value::coerce(kind, &raw).unwrap(), expected);
    }

    #[test]
    fn test_coerce_json_object() {
        let raw = json!({"color": "blue", "size": 3});
        let value = Value::coerce(VariantType::Json, &raw).unwrap();
        let Value::Json(map) = value else {
            panic!("Expected a JSON map");
        };
        assert_eq!(map["color"], json!("blue"));
    }

    #[rstest]
    #[case(VariantType::Bool, json!("true"))]
    #[case(VariantType::Int, json!("1"))]
    #[case(VariantType::Double, json!(null))]
    #[case(VariantType::String, json!(1))]
    #[case(VariantType::Json, json!([1, 2]))]
    fn test_coerce_mismatch(#[case] kind: VariantType, #[case] raw: serde_json::Value) {
        let err = Value::coerce(kind, &raw).unwrap_err();
        assert!(matches!(err, ValueCoercionError::MismatchType { expected, .. } if expected == kind));
    }

    #[test]
    fn test_from_json_literal() {
        assert_eq!(Value::try_from(json!(5)).unwrap(), Value::Int32(5));
        assert_eq!(
            Value::try_from(json!(5_000_000_000_i64)).unwrap(),
            Value::Float64(5_000_000_000.0)
        );
        assert_eq!(Value::try_from(json!(1.5)).unwrap(), Value::Float64(1.5));
        assert!(Value::try_from(json!(null)).is_err());
        assert!(Value::try_from(json!([1])).is_err());
    }

    #[test]
    fn test_typed_extraction() {
        let b: bool = Value::Boolean(true).try_into().unwrap();
        assert!(b);
        let r: std::result::Result<i32, _> = Value::String("1".into()).try_into();
        assert!(r.is_err());
    }
}
