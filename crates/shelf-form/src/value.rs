use std::fmt;

use serde::Serialize;
use serde_json::{Number, Value};

use crate::error::FormResult;

/// A leaf of a [`FormValue`] tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
}

impl Scalar {
    /// Text posted for this scalar. `Null` posts as the empty string, which
    /// form binders read back as "no value".
    pub fn to_form_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_form_text())
    }
}

/// A structured value to be flattened into form fields.
///
/// Object fields keep their order; flattening visits them in that order.
#[derive(Clone, Debug, PartialEq)]
pub enum FormValue {
    Scalar(Scalar),
    Object(Vec<(String, FormValue)>),
    Sequence(Vec<FormValue>),
}

impl FormValue {
    pub fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    /// Build an object from `(name, value)` pairs, keeping their order.
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, FormValue)>,
    {
        Self::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn sequence<I: IntoIterator<Item = FormValue>>(items: I) -> Self {
        Self::Sequence(items.into_iter().collect())
    }

    /// Convert a JSON tree. Object field order follows the JSON map's order.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::null(),
            Value::Bool(b) => Self::Scalar(Scalar::Bool(*b)),
            Value::Number(n) => Self::Scalar(Scalar::Number(n.clone())),
            Value::String(s) => Self::Scalar(Scalar::Text(s.clone())),
            Value::Array(items) => Self::Sequence(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => Self::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert any serializable value through its JSON form. Struct fields
    /// keep their declaration order.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> FormResult<Self> {
        let json = serde_json::to_value(value)?;
        Ok(Self::from_json(&json))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// If this is an object holding exactly one field and that field is a
    /// scalar, return the scalar.
    pub fn as_leaf_object(&self) -> Option<&Scalar> {
        match self {
            Self::Object(fields) => match fields.as_slice() {
                [(_, Self::Scalar(scalar))] => Some(scalar),
                _ => None,
            },
            _ => None,
        }
    }

    /// Number of scalar leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Object(fields) => fields.iter().map(|(_, v)| v.leaf_count()).sum(),
            Self::Sequence(items) => items.iter().map(Self::leaf_count).sum(),
        }
    }
}

impl From<Scalar> for FormValue {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<&str> for FormValue {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::Text(s.to_string()))
    }
}

impl From<String> for FormValue {
    fn from(s: String) -> Self {
        Self::Scalar(Scalar::Text(s))
    }
}

impl From<bool> for FormValue {
    fn from(b: bool) -> Self {
        Self::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for FormValue {
    fn from(n: i64) -> Self {
        Self::Scalar(Scalar::Number(n.into()))
    }
}

impl From<i32> for FormValue {
    fn from(n: i32) -> Self {
        Self::Scalar(Scalar::Number(n.into()))
    }
}

impl From<u64> for FormValue {
    fn from(n: u64) -> Self {
        Self::Scalar(Scalar::Number(n.into()))
    }
}

impl From<Value> for FormValue {
    fn from(value: Value) -> Self {
        Self::from_json(&value)
    }
}
