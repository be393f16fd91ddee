//! Concrete style values.
//!
//! [`StyleValue`] is both what authors write as literals and what the
//! resolver hands to the rendering layer. It mirrors the value shapes a
//! native style object accepts: numbers, strings, booleans, lists (for
//! `transform`) and nested objects (for `shadowOffset`).

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A concrete, theme-independent style value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<StyleValue>),
    Object(BTreeMap<String, StyleValue>),
}

impl StyleValue {
    /// Returns the string slice, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as `f64`, if numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StyleValue::Int(n) => Some(*n as f64),
            StyleValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns `true` for `Int` and `Float`.
    pub fn is_number(&self) -> bool {
        matches!(self, StyleValue::Int(_) | StyleValue::Float(_))
    }

    /// The key under which this literal could name a token.
    ///
    /// Strings name tokens directly; integers address array scales by index.
    /// Every other shape can never be a token reference.
    pub fn token_key(&self) -> Option<Cow<'_, str>> {
        match self {
            StyleValue::Str(s) => Some(Cow::Borrowed(s)),
            StyleValue::Int(n) => Some(Cow::Owned(n.to_string())),
            _ => None,
        }
    }

    /// Converts a YAML node into a style value.
    ///
    /// Returns `None` for `null` (an unset value). Tagged nodes are unwrapped.
    pub fn from_yaml(value: &serde_yaml::Value) -> Option<StyleValue> {
        match value {
            serde_yaml::Value::Null => None,
            serde_yaml::Value::Bool(b) => Some(StyleValue::Bool(*b)),
            serde_yaml::Value::Number(n) => Some(match n.as_i64() {
                Some(i) => StyleValue::Int(i),
                None => StyleValue::Float(n.as_f64().unwrap_or_default()),
            }),
            serde_yaml::Value::String(s) => Some(StyleValue::Str(s.clone())),
            serde_yaml::Value::Sequence(seq) => Some(StyleValue::List(
                seq.iter().filter_map(StyleValue::from_yaml).collect(),
            )),
            serde_yaml::Value::Mapping(map) => Some(StyleValue::Object(
                map.iter()
                    .filter_map(|(k, v)| {
                        let key = yaml_key(k)?;
                        StyleValue::from_yaml(v).map(|v| (key, v))
                    })
                    .collect(),
            )),
            serde_yaml::Value::Tagged(tagged) => StyleValue::from_yaml(&tagged.value),
        }
    }
}

/// Renders a YAML mapping key as a string, accepting scalar keys.
pub(crate) fn yaml_key(key: &serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Bool(b) => write!(f, "{}", b),
            StyleValue::Int(n) => write!(f, "{}", n),
            StyleValue::Float(n) => write!(f, "{}", n),
            StyleValue::Str(s) => write!(f, "{}", s),
            StyleValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            StyleValue::Object(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for StyleValue {
    fn from(b: bool) -> Self {
        StyleValue::Bool(b)
    }
}

impl From<i32> for StyleValue {
    fn from(n: i32) -> Self {
        StyleValue::Int(n as i64)
    }
}

impl From<i64> for StyleValue {
    fn from(n: i64) -> Self {
        StyleValue::Int(n)
    }
}

impl From<u32> for StyleValue {
    fn from(n: u32) -> Self {
        StyleValue::Int(n as i64)
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Float(n)
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Str(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Str(s)
    }
}

impl From<Vec<StyleValue>> for StyleValue {
    fn from(items: Vec<StyleValue>) -> Self {
        StyleValue::List(items)
    }
}

impl From<BTreeMap<String, StyleValue>> for StyleValue {
    fn from(map: BTreeMap<String, StyleValue>) -> Self {
        StyleValue::Object(map)
    }
}
