//! Scales: named trees of design tokens.
//!
//! A scale maps token names to either a concrete value or a nested group.
//! Nested groups are addressed with dotted paths (`primary.100`), and
//! sequence scales (`space: [0, 4, 8]`) name their tokens by index.

use std::collections::BTreeMap;

use crate::value::{yaml_key, StyleValue};

/// A node in a scale: a concrete value or a nested group of tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Value(StyleValue),
    Group(Scale),
}

impl Token {
    /// Returns the concrete value, if this token is a leaf.
    pub fn as_value(&self) -> Option<&StyleValue> {
        match self {
            Token::Value(v) => Some(v),
            Token::Group(_) => None,
        }
    }

    /// Returns the nested group, if this token is not a leaf.
    pub fn as_group(&self) -> Option<&Scale> {
        match self {
            Token::Group(g) => Some(g),
            Token::Value(_) => None,
        }
    }
}

impl From<StyleValue> for Token {
    fn from(value: StyleValue) -> Self {
        Token::Value(value)
    }
}

macro_rules! token_from_literal {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Token {
                fn from(value: $ty) -> Self {
                    Token::Value(StyleValue::from(value))
                }
            }
        )*
    };
}

token_from_literal!(bool, i32, i64, u32, f64, &str, String);

impl From<Scale> for Token {
    fn from(scale: Scale) -> Self {
        Token::Group(scale)
    }
}

/// A named collection of design tokens.
///
/// # Example
///
/// ```rust
/// use swatch::{Scale, StyleValue};
///
/// let colors = Scale::new()
///     .with("text", "#000")
///     .with("primary", Scale::new().with("100", "#eef").with("900", "#003"));
///
/// assert_eq!(colors.value("text"), Some(&StyleValue::from("#000")));
/// assert_eq!(colors.value("primary.900"), Some(&StyleValue::from("#003")));
///
/// let space = Scale::from_values([0, 4, 8]);
/// assert_eq!(space.value("2"), Some(&StyleValue::from(8)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scale {
    tokens: BTreeMap<String, Token>,
}

impl Scale {
    /// Creates an empty scale.
    pub fn new() -> Self {
        Self {
            tokens: BTreeMap::new(),
        }
    }

    /// Creates a sequence scale whose tokens are named by index.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<StyleValue>,
    {
        let tokens = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), Token::Value(v.into())))
            .collect();
        Self { tokens }
    }

    /// Adds a token, returning the scale for chaining.
    pub fn with(mut self, name: impl Into<String>, token: impl Into<Token>) -> Self {
        self.insert(name, token);
        self
    }

    /// Adds or replaces a token.
    pub fn insert(&mut self, name: impl Into<String>, token: impl Into<Token>) {
        self.tokens.insert(name.into(), token.into());
    }

    /// Removes a top-level token.
    pub fn remove(&mut self, name: &str) -> Option<Token> {
        self.tokens.remove(name)
    }

    /// Looks up a token by exact name, then by dotted path.
    ///
    /// An exact key always wins, so a token literally named `"1.5"` is found
    /// before `"1"` → `"5"` is tried.
    pub fn get(&self, name: &str) -> Option<&Token> {
        if let Some(token) = self.tokens.get(name) {
            return Some(token);
        }
        for (i, _) in name.match_indices('.') {
            let (head, tail) = (&name[..i], &name[i + 1..]);
            if let Some(Token::Group(group)) = self.tokens.get(head) {
                if let Some(token) = group.get(tail) {
                    return Some(token);
                }
            }
        }
        None
    }

    /// Looks up a leaf value. Groups are not values.
    pub fn value(&self, name: &str) -> Option<&StyleValue> {
        self.get(name).and_then(Token::as_value)
    }

    /// Returns `true` if `name` resolves to any token.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over top-level tokens in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Token)> {
        self.tokens.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Dotted paths of every leaf token, in name order.
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_paths("", &mut paths);
        paths
    }

    fn collect_paths(&self, prefix: &str, out: &mut Vec<String>) {
        for (name, token) in &self.tokens {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", prefix, name)
            };
            match token {
                Token::Value(_) => out.push(path),
                Token::Group(group) => group.collect_paths(&path, out),
            }
        }
    }

    /// Converts the scale into a nested object value.
    pub fn to_object(&self) -> BTreeMap<String, StyleValue> {
        self.tokens
            .iter()
            .map(|(name, token)| {
                let value = match token {
                    Token::Value(v) => v.clone(),
                    Token::Group(g) => StyleValue::Object(g.to_object()),
                };
                (name.clone(), value)
            })
            .collect()
    }

    /// Deep-merges `other` into this scale. Tokens from `other` win;
    /// groups present on both sides are merged recursively.
    pub fn merge(&mut self, other: Scale) {
        for (name, token) in other.tokens {
            match (self.tokens.get_mut(&name), token) {
                (Some(Token::Group(mine)), Token::Group(theirs)) => mine.merge(theirs),
                (_, token) => {
                    self.tokens.insert(name, token);
                }
            }
        }
    }

    /// Returns the number of top-level tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the scale has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Builds a scale from a YAML mapping or sequence.
    ///
    /// Mappings and sequences nest as groups; scalars become leaves and
    /// `null` entries are skipped.
    pub(crate) fn from_yaml(value: &serde_yaml::Value) -> Option<Scale> {
        match value {
            serde_yaml::Value::Mapping(map) => {
                let mut scale = Scale::new();
                for (key, value) in map {
                    let Some(name) = yaml_key(key) else { continue };
                    if let Some(token) = Token::from_yaml(value) {
                        scale.insert(name, token);
                    }
                }
                Some(scale)
            }
            serde_yaml::Value::Sequence(seq) => {
                let mut scale = Scale::new();
                for (i, value) in seq.iter().enumerate() {
                    if let Some(token) = Token::from_yaml(value) {
                        scale.insert(i.to_string(), token);
                    }
                }
                Some(scale)
            }
            serde_yaml::Value::Tagged(tagged) => Scale::from_yaml(&tagged.value),
            _ => None,
        }
    }
}

impl Token {
    fn from_yaml(value: &serde_yaml::Value) -> Option<Token> {
        match value {
            serde_yaml::Value::Mapping(_) | serde_yaml::Value::Sequence(_) => {
                Scale::from_yaml(value).map(Token::Group)
            }
            other => StyleValue::from_yaml(other).map(Token::Value),
        }
    }
}

impl<K: Into<String>, T: Into<Token>> FromIterator<(K, T)> for Scale {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut scale = Scale::new();
        for (name, token) in iter {
            scale.insert(name, token);
        }
        scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> Scale {
        Scale::new()
            .with("$text", "#000")
            .with("primary", Scale::new().with("100", "#eef").with("900", "#003"))
    }

    #[test]
    fn test_exact_lookup() {
        assert_eq!(colors().value("$text"), Some(&StyleValue::from("#000")));
    }

    #[test]
    fn test_dotted_lookup() {
        assert_eq!(colors().value("primary.100"), Some(&StyleValue::from("#eef")));
        assert_eq!(colors().value("primary.500"), None);
    }

    #[test]
    fn test_exact_key_beats_dotted_path() {
        let scale = Scale::new()
            .with("a.b", "exact")
            .with("a", Scale::new().with("b", "nested"));
        assert_eq!(scale.value("a.b"), Some(&StyleValue::from("exact")));
    }

    #[test]
    fn test_group_is_not_a_value() {
        assert!(colors().contains("primary"));
        assert_eq!(colors().value("primary"), None);
    }

    #[test]
    fn test_sequence_scale_by_index() {
        let space = Scale::from_values([0, 4, 8, 16]);
        assert_eq!(space.value("3"), Some(&StyleValue::from(16)));
        assert_eq!(space.len(), 4);
    }

    #[test]
    fn test_leaf_paths() {
        assert_eq!(
            colors().leaf_paths(),
            vec!["$text", "primary.100", "primary.900"]
        );
    }

    #[test]
    fn test_merge_deep() {
        let mut base = colors();
        base.merge(
            Scale::new()
                .with("$text", "#111")
                .with("primary", Scale::new().with("500", "#00a")),
        );
        assert_eq!(base.value("$text"), Some(&StyleValue::from("#111")));
        assert_eq!(base.value("primary.100"), Some(&StyleValue::from("#eef")));
        assert_eq!(base.value("primary.500"), Some(&StyleValue::from("#00a")));
    }

    #[test]
    fn test_from_yaml_nested_and_sequence() {
        let yaml: serde_yaml::Value = serde_yaml::from_str(
            r##"
            text: "#000"
            gray: ["#111", "#222"]
            "##,
        )
        .unwrap();
        let scale = Scale::from_yaml(&yaml).unwrap();
        assert_eq!(scale.value("gray.1"), Some(&StyleValue::from("#222")));
        assert_eq!(scale.value("text"), Some(&StyleValue::from("#000")));
    }

    #[test]
    fn test_to_object() {
        let shadow = Scale::new()
            .with("shadowOpacity", 0.25)
            .with("shadowOffset", Scale::new().with("width", 0).with("height", 2));
        let object = shadow.to_object();
        assert!(matches!(object.get("shadowOffset"), Some(StyleValue::Object(_))));
    }
}
