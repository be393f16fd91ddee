//! Token resolution for one property value.
//!
//! Given a property and one breakpoint's raw value:
//!
//! 1. canonicalize the property through the theme's aliases
//! 2. find the scale backing the canonical property
//! 3. substitute the token when the value names one in that scale
//! 4. otherwise pass the literal through, unless the scale (or the whole
//!    theme) only accepts theme values
//!
//! Token lookup wins over literal interpretation: a string that exactly
//! names a token is always substituted. A substituted value is final and is
//! never looked up again.

use std::collections::BTreeMap;

use crate::error::ResolveError;
use crate::style::{Descriptor, Entry, ThemeFn};
use crate::theme::{Scale, Theme, Token};
use crate::value::StyleValue;

/// The outcome of resolving one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// A concrete value for the canonical property.
    Value(StyleValue),
    /// A style fragment (a shadow token) to spread into the output.
    ///
    /// Entries are still raw: each is resolved against its own property.
    Fragment(BTreeMap<String, StyleValue>),
}

/// Where a value came from, which decides whether theme-only mode applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Origin {
    /// Written by the author: theme-only mode applies.
    Author,
    /// Produced by a theme function or taken from the theme itself.
    Theme,
}

/// A successful token lookup.
pub(crate) enum Hit<'t> {
    Value(&'t StyleValue),
    Fragment(&'t Scale),
}

impl Hit<'_> {
    fn into_resolved(self) -> Resolved {
        match self {
            Hit::Value(v) => Resolved::Value(v.clone()),
            Hit::Fragment(scale) => Resolved::Fragment(scale.to_object()),
        }
    }
}

/// Looks up `key` in `scale`. Groups only count as hits in fragment scales.
pub(crate) fn lookup<'t>(theme: &'t Theme, scale: &str, key: &str) -> Option<Hit<'t>> {
    match theme.tokens_in(scale)?.get(key)? {
        Token::Value(v) => Some(Hit::Value(v)),
        Token::Group(group) if theme.is_fragment_scale(scale) => Some(Hit::Fragment(group)),
        Token::Group(_) => None,
    }
}

/// Resolves one authored value for `property`.
///
/// # Errors
///
/// - [`ResolveError::UnknownToken`]: an explicit token reference misses
/// - [`ResolveError::ThemeValueRequired`]: the property's scale only accepts
///   theme values and the literal names no token
/// - [`ResolveError::ThemeValueRequiredNoScale`]: theme-only mode is global
///   and the property has no scale
///
/// # Example
///
/// ```rust
/// use swatch::{resolve, Entry, Resolved, Scale, StyleValue, Theme};
///
/// let theme = Theme::builder()
///     .scale("colors", Scale::new().with("primary", "#07c"))
///     .build()
///     .unwrap();
///
/// let value = resolve("bg", &Entry::from("primary"), &theme).unwrap();
/// assert_eq!(value, Resolved::Value(StyleValue::from("#07c")));
///
/// let value = resolve("alignItems", &Entry::from("center"), &theme).unwrap();
/// assert_eq!(value, Resolved::Value(StyleValue::from("center")));
/// ```
pub fn resolve(property: &str, value: &Entry, theme: &Theme) -> Result<Resolved, ResolveError> {
    resolve_entry(property, value, theme, Origin::Author)
}

/// Invokes a theme function for `property`.
///
/// The result may be any descriptor except another theme function.
pub fn evaluate(property: &str, f: &ThemeFn, theme: &Theme) -> Result<Descriptor, ResolveError> {
    match f(theme) {
        Descriptor::ThemeFn(_) => Err(ResolveError::NestedThemeFn {
            property: property.to_string(),
        }),
        descriptor => Ok(descriptor),
    }
}

pub(crate) fn resolve_entry(
    property: &str,
    value: &Entry,
    theme: &Theme,
    origin: Origin,
) -> Result<Resolved, ResolveError> {
    let scale = theme.scale_for(property);

    match value {
        Entry::Token(name) => match scale.and_then(|s| lookup(theme, s, name)) {
            Some(hit) => {
                tracing::trace!(property, token = name.as_str(), "Substituted token");
                Ok(hit.into_resolved())
            }
            None => {
                tracing::warn!(property, token = name.as_str(), "Unknown token");
                Err(unknown_token(property, scale, name))
            }
        },
        Entry::Literal(literal) => {
            if let (Some(s), Some(key)) = (scale, literal.token_key()) {
                if let Some(hit) = lookup(theme, s, &key) {
                    tracing::trace!(property, token = &*key, "Substituted token");
                    return Ok(hit.into_resolved());
                }
            }

            if origin == Origin::Author && theme.theme_values_only(scale) {
                tracing::warn!(property, value = %literal, "Literal rejected in theme-only mode");
                return Err(theme_value_required(property, scale, literal));
            }

            Ok(Resolved::Value(literal.clone()))
        }
    }
}

/// The error for a literal where only theme values are allowed.
pub(crate) fn theme_value_required(
    property: &str,
    scale: Option<&str>,
    literal: &StyleValue,
) -> ResolveError {
    match scale {
        Some(scale) => ResolveError::ThemeValueRequired {
            property: property.to_string(),
            scale: scale.to_string(),
            value: literal.to_string(),
        },
        None => ResolveError::ThemeValueRequiredNoScale {
            property: property.to_string(),
            value: literal.to_string(),
        },
    }
}

/// The error for an explicit token reference that names nothing.
pub(crate) fn unknown_token(property: &str, scale: Option<&str>, token: &str) -> ResolveError {
    ResolveError::UnknownToken {
        property: property.to_string(),
        scale: scale.unwrap_or("<none>").to_string(),
        token: token.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeValuesOnly;
    use std::sync::Arc;

    fn theme() -> Theme {
        Theme::builder()
            .scale(
                "colors",
                Scale::new()
                    .with("$text", "#000")
                    .with("primary", Scale::new().with("100", "#eef")),
            )
            .scale("space", Scale::from_values([0, 4, 8]))
            .scale(
                "shadows",
                Scale::new().with("md", Scale::new().with("shadowColor", "$text")),
            )
            .build()
            .unwrap()
    }

    fn strict_colors() -> Theme {
        Theme::builder()
            .scale("colors", Scale::new().with("$text", "#000"))
            .only_allow_theme_values(ThemeValuesOnly::Never.with_scale("colors"))
            .build()
            .unwrap()
    }

    fn value(v: impl Into<StyleValue>) -> Resolved {
        Resolved::Value(v.into())
    }

    #[test]
    fn test_token_substitution() {
        assert_eq!(resolve("color", &"$text".into(), &theme()).unwrap(), value("#000"));
    }

    #[test]
    fn test_alias_resolves_like_canonical() {
        let t = theme();
        assert_eq!(
            resolve("bg", &"$text".into(), &t).unwrap(),
            resolve("backgroundColor", &"$text".into(), &t).unwrap()
        );
    }

    #[test]
    fn test_dotted_token() {
        assert_eq!(resolve("color", &"primary.100".into(), &theme()).unwrap(), value("#eef"));
    }

    #[test]
    fn test_group_is_a_miss() {
        assert_eq!(resolve("color", &"primary".into(), &theme()).unwrap(), value("primary"));
    }

    #[test]
    fn test_integer_indexes_array_scale() {
        assert_eq!(resolve("p", &2.into(), &theme()).unwrap(), value(8));
        assert_eq!(resolve("p", &7.into(), &theme()).unwrap(), value(7));
    }

    #[test]
    fn test_unscaled_literal_passes_through() {
        assert_eq!(
            resolve("alignItems", &"center".into(), &theme()).unwrap(),
            value("center")
        );
    }

    #[test]
    fn test_unknown_property_passes_through() {
        assert_eq!(resolve("someFutureProp", &3.into(), &theme()).unwrap(), value(3));
    }

    #[test]
    fn test_no_double_substitution() {
        // "#000" is a token value, not a token name
        assert_eq!(resolve("color", &"#000".into(), &theme()).unwrap(), value("#000"));
    }

    #[test]
    fn test_explicit_token_miss() {
        let err = resolve("color", &Entry::Token("nope".into()), &theme()).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnknownToken {
                property: "color".into(),
                scale: "colors".into(),
                token: "nope".into(),
            }
        );
    }

    #[test]
    fn test_fragment_scale_returns_fragment() {
        let resolved = resolve("boxShadow", &"md".into(), &theme()).unwrap();
        let mut expected = BTreeMap::new();
        expected.insert("shadowColor".to_string(), StyleValue::from("$text"));
        assert_eq!(resolved, Resolved::Fragment(expected));
    }

    #[test]
    fn test_strict_miss_is_an_error() {
        let err = resolve("color", &"notAToken".into(), &strict_colors()).unwrap_err();
        assert!(matches!(err, ResolveError::ThemeValueRequired { .. }));
    }

    #[test]
    fn test_strict_hit_resolves() {
        assert_eq!(
            resolve("color", &"$text".into(), &strict_colors()).unwrap(),
            value("#000")
        );
    }

    #[test]
    fn test_strict_scale_does_not_cover_other_properties() {
        assert_eq!(
            resolve("padding", &"10%".into(), &strict_colors()).unwrap(),
            value("10%")
        );
    }

    #[test]
    fn test_global_strict_without_scale() {
        let t = Theme::builder()
            .only_allow_theme_values(ThemeValuesOnly::Always)
            .build()
            .unwrap();
        let err = resolve("alignItems", &"center".into(), &t).unwrap_err();
        assert!(matches!(err, ResolveError::ThemeValueRequiredNoScale { .. }));
    }

    #[test]
    fn test_theme_origin_bypasses_strict() {
        let t = strict_colors();
        assert_eq!(
            resolve_entry("color", &"#123".into(), &t, Origin::Theme).unwrap(),
            value("#123")
        );
    }

    #[test]
    fn test_evaluate_rejects_nested_fn() {
        let f: ThemeFn = Arc::new(|_: &Theme| Descriptor::theme_fn(|_| Descriptor::from(1)));
        let err = evaluate("color", &f, &theme()).unwrap_err();
        assert!(matches!(err, ResolveError::NestedThemeFn { .. }));
    }

    #[test]
    fn test_evaluate_reads_theme() {
        let f: ThemeFn = Arc::new(|theme: &Theme| {
            let colors = theme.tokens_in("colors").unwrap();
            Descriptor::Literal(colors.value("$text").unwrap().clone())
        });
        assert_eq!(evaluate("color", &f, &theme()).unwrap(), Descriptor::from("#000"));
    }
}
