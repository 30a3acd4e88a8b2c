// Copyright 2025 Taglog Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Keys and values attached to log records.

use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

/// An untyped value carried by a log field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(Cow<'static, str>),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Rendered in human-readable form, e.g. `1.5s`.
    Duration(Duration),
    /// An arbitrary structured value.
    Json(serde_json::Value),
}

impl Value {
    pub(crate) fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Str(s) => serde_json::Value::String(s.clone().into_owned()),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Duration(d) => serde_json::Value::String(format!("{d:?}")),
            Value::Json(v) => v.clone(),
        }
    }

    fn into_key(self) -> Cow<'static, str> {
        match self {
            Value::Str(s) => s,
            other => Cow::Owned(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Duration(d) => write!(f, "{d:?}"),
            Value::Json(v) => write!(f, "{v}"),
        }
    }
}

impl From<&'static str> for Value {
    fn from(value: &'static str) -> Self {
        Value::Str(Cow::Borrowed(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(Cow::Owned(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        Value::Duration(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::Json(value)
    }
}

/// A typed key-value pair attached to one log record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: Cow<'static, str>,
    pub value: Value,
}

impl Field {
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn str(key: impl Into<Cow<'static, str>>, value: impl Into<Cow<'static, str>>) -> Self {
        Self::new(key, Value::Str(value.into()))
    }

    pub fn int(key: impl Into<Cow<'static, str>>, value: i64) -> Self {
        Self::new(key, Value::Int(value))
    }

    pub fn float(key: impl Into<Cow<'static, str>>, value: f64) -> Self {
        Self::new(key, Value::Float(value))
    }

    pub fn bool(key: impl Into<Cow<'static, str>>, value: bool) -> Self {
        Self::new(key, Value::Bool(value))
    }

    pub fn duration(key: impl Into<Cow<'static, str>>, value: Duration) -> Self {
        Self::new(key, Value::Duration(value))
    }

    /// A field holding any serializable value. Values that cannot be
    /// serialized degrade to `null`.
    pub fn any(key: impl Into<Cow<'static, str>>, value: impl serde::Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
        Self::new(key, Value::Json(value))
    }
}

/// Pairs an alternating key/value sequence into fields.
///
/// A trailing unmatched key is silently dropped. Non-string keys are rendered
/// through their display form.
pub(crate) fn pair_fields(pairs: &[Value]) -> Vec<Field> {
    pairs
        .chunks_exact(2)
        .map(|kv| Field {
            key: kv[0].clone().into_key(),
            value: kv[1].clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Field;
    use super::Value;
    use super::pair_fields;

    #[test]
    fn test_pairing() {
        let fields = pair_fields(&["msg".into(), "hello".into(), "code".into(), 500.into()]);
        assert_eq!(
            fields,
            vec![Field::str("msg", "hello"), Field::int("code", 500)]
        );
    }

    #[test]
    fn test_trailing_key_is_dropped() {
        let fields = pair_fields(&["msg".into(), "hello".into(), "dangling".into()]);
        assert_eq!(fields, vec![Field::str("msg", "hello")]);
    }

    #[test]
    fn test_non_string_key_is_rendered() {
        let fields = pair_fields(&[42.into(), true.into()]);
        assert_eq!(fields, vec![Field::bool("42", true)]);
    }

    #[test]
    fn test_duration_renders_humanized() {
        let value = Value::Duration(Duration::from_millis(1500));
        assert_eq!(value.to_json(), serde_json::json!("1.5s"));
    }

    #[test]
    fn test_non_finite_float_degrades_to_null() {
        assert_eq!(Value::Float(f64::NAN).to_json(), serde_json::Value::Null);
    }
}
