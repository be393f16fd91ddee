//! Theme-level behavior flags (the `types` section of a theme literal).

use std::collections::BTreeSet;

use crate::error::ThemeError;

/// Where literal values are forbidden in favour of theme tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ThemeValuesOnly {
    /// Literals are accepted everywhere.
    #[default]
    Never,
    /// Every property must resolve through the theme.
    Always,
    /// Properties backed by one of these scales must resolve through the theme.
    Scales(BTreeSet<String>),
}

impl ThemeValuesOnly {
    /// Returns `true` if a property backed by `scale` only accepts tokens.
    ///
    /// `scale` is `None` for properties without a scale; only the global
    /// [`Always`](ThemeValuesOnly::Always) setting covers those.
    pub fn applies_to(&self, scale: Option<&str>) -> bool {
        match self {
            ThemeValuesOnly::Never => false,
            ThemeValuesOnly::Always => true,
            ThemeValuesOnly::Scales(scales) => scale.is_some_and(|s| scales.contains(s)),
        }
    }

    /// Restricts a single scale, keeping any scales already restricted.
    pub fn with_scale(self, scale: impl Into<String>) -> Self {
        match self {
            ThemeValuesOnly::Always => ThemeValuesOnly::Always,
            ThemeValuesOnly::Never => ThemeValuesOnly::Scales(BTreeSet::from([scale.into()])),
            ThemeValuesOnly::Scales(mut scales) => {
                scales.insert(scale.into());
                ThemeValuesOnly::Scales(scales)
            }
        }
    }

    /// Parses `onlyAllowThemeValues`: either `"always"` or a mapping of
    /// scale names to `"always"`.
    pub(crate) fn from_yaml(value: &serde_yaml::Value) -> Result<Self, ThemeError> {
        let invalid = |message: String| ThemeError::InvalidDefinition {
            key: "types.onlyAllowThemeValues".to_string(),
            message,
        };
        match value {
            serde_yaml::Value::Null => Ok(ThemeValuesOnly::Never),
            serde_yaml::Value::String(s) if s == "always" => Ok(ThemeValuesOnly::Always),
            serde_yaml::Value::Mapping(map) => {
                let mut scales = BTreeSet::new();
                for (key, setting) in map {
                    let scale = key
                        .as_str()
                        .ok_or_else(|| invalid(format!("scale name must be a string, got {:?}", key)))?;
                    match setting.as_str() {
                        Some("always") => {
                            scales.insert(scale.to_string());
                        }
                        _ => {
                            return Err(invalid(format!(
                                "expected 'always' for scale '{}', got {:?}",
                                scale, setting
                            )))
                        }
                    }
                }
                if scales.is_empty() {
                    Ok(ThemeValuesOnly::Never)
                } else {
                    Ok(ThemeValuesOnly::Scales(scales))
                }
            }
            other => Err(invalid(format!(
                "expected 'always' or a mapping, got {:?}",
                other
            ))),
        }
    }
}

/// Global behavior flags of a theme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeFlags {
    /// Which properties are restricted to theme tokens.
    pub only_allow_theme_values: ThemeValuesOnly,
    /// Accept only native value types (no web-only CSS strings).
    pub react_native_types_only: bool,
}

impl ThemeFlags {
    pub(crate) fn from_yaml(value: &serde_yaml::Value) -> Result<Self, ThemeError> {
        let map = value
            .as_mapping()
            .ok_or_else(|| ThemeError::InvalidDefinition {
                key: "types".to_string(),
                message: "'types' must be a mapping".to_string(),
            })?;

        let mut flags = ThemeFlags::default();
        if let Some(only) = map.get("onlyAllowThemeValues") {
            flags.only_allow_theme_values = ThemeValuesOnly::from_yaml(only)?;
        }
        if let Some(native) = map.get("reactNativeTypesOnly") {
            flags.react_native_types_only =
                native
                    .as_bool()
                    .ok_or_else(|| ThemeError::InvalidDefinition {
                        key: "types.reactNativeTypesOnly".to_string(),
                        message: format!("expected a boolean, got {:?}", native),
                    })?;
        }
        Ok(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> serde_yaml::Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn test_applies_to() {
        let only = ThemeValuesOnly::Never.with_scale("colors");
        assert!(only.applies_to(Some("colors")));
        assert!(!only.applies_to(Some("space")));
        assert!(!only.applies_to(None));

        assert!(ThemeValuesOnly::Always.applies_to(None));
        assert!(!ThemeValuesOnly::Never.applies_to(Some("colors")));
    }

    #[test]
    fn test_parse_always() {
        assert_eq!(
            ThemeValuesOnly::from_yaml(&yaml("always")).unwrap(),
            ThemeValuesOnly::Always
        );
    }

    #[test]
    fn test_parse_per_scale() {
        let only = ThemeValuesOnly::from_yaml(&yaml("{ colors: always }")).unwrap();
        assert!(only.applies_to(Some("colors")));
    }

    #[test]
    fn test_parse_rejects_unknown_setting() {
        assert!(ThemeValuesOnly::from_yaml(&yaml("{ colors: sometimes }")).is_err());
        assert!(ThemeValuesOnly::from_yaml(&yaml("sometimes")).is_err());
    }

    #[test]
    fn test_flags_from_yaml() {
        let flags = ThemeFlags::from_yaml(&yaml(
            "{ reactNativeTypesOnly: true, onlyAllowThemeValues: { space: always } }",
        ))
        .unwrap();
        assert!(flags.react_native_types_only);
        assert!(flags.only_allow_theme_values.applies_to(Some("space")));
    }
}
