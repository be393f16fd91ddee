//! Resolved output.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ResolveError;
use crate::value::StyleValue;

/// A concrete style object for one breakpoint: canonical property → value.
///
/// Serializes as a plain map, ready to hand to a rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedStyle(BTreeMap<String, StyleValue>);

impl ResolvedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.0.get(property)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.0.contains_key(property)
    }

    pub fn insert(&mut self, property: impl Into<String>, value: StyleValue) {
        self.0.insert(property.into(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn remove(&mut self, property: &str) -> Option<StyleValue> {
        self.0.remove(property)
    }

    /// Overlays `top` on this style; `top` wins per property.
    pub(crate) fn overlay(&mut self, top: ResolvedStyle) {
        self.0.extend(top.0);
    }

    pub fn into_inner(self) -> BTreeMap<String, StyleValue> {
        self.0
    }
}

impl<K: Into<String>> FromIterator<(K, StyleValue)> for ResolvedStyle {
    fn from_iter<I: IntoIterator<Item = (K, StyleValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// The result of resolving a style description at every breakpoint.
///
/// Per-property errors never abort resolution: the offending property is
/// omitted from the affected slots and the error is collected here, once.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub(crate) styles: Vec<ResolvedStyle>,
    pub(crate) errors: Vec<ResolveError>,
}

impl Resolution {
    /// One style per breakpoint slot, base first.
    pub fn styles(&self) -> &[ResolvedStyle] {
        &self.styles
    }

    /// The style at slot `index`. Indices past the end clamp to the widest slot.
    pub fn at(&self, index: usize) -> Option<&ResolvedStyle> {
        self.styles.get(index).or_else(|| self.styles.last())
    }

    /// The base (smallest viewport) style.
    pub fn base(&self) -> Option<&ResolvedStyle> {
        self.styles.first()
    }

    pub fn errors(&self) -> &[ResolveError] {
        &self.errors
    }

    /// Returns `true` if every property resolved.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_parts(self) -> (Vec<ResolvedStyle>, Vec<ResolveError>) {
        (self.styles, self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_plain_map() {
        let style: ResolvedStyle = [("padding", StyleValue::from(8)), ("color", "red".into())]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&style).unwrap();
        assert_eq!(json, r#"{"color":"red","padding":8}"#);
    }

    #[test]
    fn test_overlay_top_wins() {
        let mut base: ResolvedStyle = [("a", StyleValue::from(1)), ("b", 1.into())]
            .into_iter()
            .collect();
        base.overlay([("b", StyleValue::from(2))].into_iter().collect());
        assert_eq!(base.get("a"), Some(&StyleValue::from(1)));
        assert_eq!(base.get("b"), Some(&StyleValue::from(2)));
    }

    #[test]
    fn test_at_clamps() {
        let resolution = Resolution {
            styles: vec![ResolvedStyle::new(), [("p", StyleValue::from(1))].into_iter().collect()],
            errors: vec![],
        };
        assert_eq!(resolution.at(9), resolution.styles().last());
        assert!(resolution.is_ok());
    }
}
