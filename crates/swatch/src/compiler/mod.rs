//! Style checking: which values each property accepts under a theme.
//!
//! For a property the accepted values are:
//!
//! - a literal of the property's platform type, unless theme-only mode
//!   covers the property's scale
//! - any token name of that scale (aliases are canonicalized first)
//! - a theme function whose result is itself accepted, with theme-only mode
//!   lifted
//!
//! The checker shares its token lookup, its theme-only predicate and its
//! `variant` key expansion with the resolver, so a description that passes [`StyleCompiler::check`] never
//! fails resolution with a theme-only error, and every theme-only error the
//! resolver reports is reported here too.
//!
//! ```rust
//! use swatch::{Scale, StyleCompiler, Sx, Theme, ThemeValuesOnly};
//!
//! let theme = Theme::builder()
//!     .scale("colors", Scale::new().with("primary", "#07c"))
//!     .only_allow_theme_values(ThemeValuesOnly::Never.with_scale("colors"))
//!     .build()
//!     .unwrap();
//! let compiler = StyleCompiler::new(&theme);
//!
//! let rule = compiler.rule_for("bg");
//! assert_eq!(rule.canonical, "backgroundColor");
//! assert!(rule.tokens.contains("primary"));
//! assert!(!rule.literals_allowed());
//!
//! let errors = compiler.check(&Sx::new().set("bg", "#fff").set("p", 2));
//! assert_eq!(errors.len(), 1);
//! ```

mod platform;

pub use platform::{platform_type, PlatformType};

use std::collections::BTreeSet;

use crate::error::ResolveError;
use crate::resolve::{
    evaluate, expand_variant_key, lookup, theme_value_required, unknown_token,
};
use crate::style::{Descriptor, Entry, Sx};
use crate::theme::{Theme, Token};
use crate::value::StyleValue;

/// What one property accepts under a theme.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRule {
    /// The property as written (possibly an alias).
    pub property: String,
    pub canonical: String,
    pub scale: Option<String>,
    /// Every token name valid for the property, as dotted paths.
    pub tokens: BTreeSet<String>,
    /// Theme-only mode covers this property.
    pub theme_values_only: bool,
    pub platform: PlatformType,
    /// Literals are narrowed to native value types.
    pub native_only: bool,
}

impl PropertyRule {
    /// Whether literals that name no token are accepted.
    pub fn literals_allowed(&self) -> bool {
        !self.theme_values_only
    }

    /// Checks a descriptor against this rule without resolving it.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: the same theme-only and unknown-token
    /// errors resolution would report, [`ResolveError::NestedThemeFn`], or
    /// [`ResolveError::LiteralNotAllowed`] for a literal of the wrong
    /// platform type.
    pub fn accepts(&self, descriptor: &Descriptor, theme: &Theme) -> Result<(), ResolveError> {
        match descriptor {
            Descriptor::Literal(value) => self.check_literal(value, theme, self.theme_values_only),
            Descriptor::Token(name) => self.check_token(name, theme),
            Descriptor::Responsive(entries) => entries
                .iter()
                .flatten()
                .try_for_each(|entry| self.check_entry(entry, theme, self.theme_values_only)),
            Descriptor::ThemeFn(f) => match evaluate(&self.property, f, theme)? {
                Descriptor::Responsive(entries) => entries
                    .iter()
                    .flatten()
                    .try_for_each(|entry| self.check_entry(entry, theme, false)),
                Descriptor::Literal(value) => self.check_literal(&value, theme, false),
                Descriptor::Token(name) => self.check_token(&name, theme),
                Descriptor::ThemeFn(_) => Err(ResolveError::NestedThemeFn {
                    property: self.property.clone(),
                }),
            },
        }
    }

    fn check_entry(&self, entry: &Entry, theme: &Theme, strict: bool) -> Result<(), ResolveError> {
        match entry {
            Entry::Literal(value) => self.check_literal(value, theme, strict),
            Entry::Token(name) => self.check_token(name, theme),
        }
    }

    fn check_token(&self, name: &str, theme: &Theme) -> Result<(), ResolveError> {
        let scale = self.scale.as_deref();
        match scale.and_then(|s| lookup(theme, s, name)) {
            Some(_) => Ok(()),
            None => Err(unknown_token(&self.property, scale, name)),
        }
    }

    fn check_literal(
        &self,
        value: &StyleValue,
        theme: &Theme,
        strict: bool,
    ) -> Result<(), ResolveError> {
        let scale = self.scale.as_deref();
        if let (Some(s), Some(key)) = (scale, value.token_key()) {
            if lookup(theme, s, &key).is_some() {
                return Ok(());
            }
        }
        if strict {
            return Err(theme_value_required(&self.property, scale, value));
        }
        if self.platform.accepts(value, self.native_only) {
            Ok(())
        } else {
            Err(ResolveError::LiteralNotAllowed {
                property: self.property.clone(),
                expected: self.platform.name(),
                value: value.to_string(),
            })
        }
    }
}

/// Derives property rules from a theme and checks style descriptions.
#[derive(Debug, Clone, Copy)]
pub struct StyleCompiler<'t> {
    theme: &'t Theme,
}

impl<'t> StyleCompiler<'t> {
    pub fn new(theme: &'t Theme) -> Self {
        Self { theme }
    }

    /// Derives the rule for a property (or alias).
    pub fn rule_for(&self, property: &str) -> PropertyRule {
        let canonical = self.theme.alias_of(property);
        let scale = self.theme.scale_for(property);
        let tokens = scale
            .map(|name| self.tokens_for(name))
            .unwrap_or_default();

        PropertyRule {
            property: property.to_string(),
            canonical: canonical.to_string(),
            scale: scale.map(str::to_string),
            tokens,
            theme_values_only: self.theme.theme_values_only(scale),
            platform: platform_type(canonical),
            native_only: self.theme.flags().react_native_types_only,
        }
    }

    fn tokens_for(&self, scale: &str) -> BTreeSet<String> {
        let Some(tokens) = self.theme.tokens_in(scale) else {
            return BTreeSet::new();
        };
        let mut names: BTreeSet<String> = tokens.leaf_paths().into_iter().collect();
        if self.theme.is_fragment_scale(scale) {
            names.extend(
                tokens
                    .iter()
                    .filter(|(_, token)| matches!(token, Token::Group(_)))
                    .map(|(name, _)| name.to_string()),
            );
        }
        names
    }

    /// Checks one property.
    pub fn check_property(&self, property: &str, descriptor: &Descriptor) -> Result<(), ResolveError> {
        self.rule_for(property).accepts(descriptor, self.theme)
    }

    /// Checks every property of a style description; one error per property
    /// at most.
    ///
    /// The `variant` key is expanded first, exactly as resolution expands it,
    /// so properties coming from the variant fragment are checked too. A
    /// missing variant is not an error.
    pub fn check(&self, sx: &Sx) -> Vec<ResolveError> {
        let sx = expand_variant_key(sx, self.theme);
        let errors: Vec<_> = sx
            .iter()
            .filter_map(|(property, descriptor)| self.check_property(property, descriptor).err())
            .collect();
        for error in &errors {
            tracing::debug!(property = error.property(), %error, "Style check failed");
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::token;
    use crate::theme::{Scale, ThemeValuesOnly};

    fn theme(only: ThemeValuesOnly, native_only: bool) -> Theme {
        Theme::builder()
            .scale(
                "colors",
                Scale::new()
                    .with("text", "#111")
                    .with("primary", Scale::new().with("100", "#eef").with("900", "#003")),
            )
            .scale("space", Scale::from_values([0, 4, 8]))
            .scale(
                "shadows",
                Scale::new()
                    .with("md", Scale::new().with("shadowOpacity", 0.2))
                    .with("flat", "none"),
            )
            .only_allow_theme_values(only)
            .react_native_types_only(native_only)
            .build()
            .unwrap()
    }

    #[test]
    fn test_rule_tokens_follow_alias() {
        let theme = theme(ThemeValuesOnly::Never, false);
        let rule = StyleCompiler::new(&theme).rule_for("bg");
        assert_eq!(rule.scale.as_deref(), Some("colors"));
        let tokens: Vec<_> = rule.tokens.iter().map(String::as_str).collect();
        assert_eq!(tokens, vec!["primary.100", "primary.900", "text"]);
        assert_eq!(rule.platform, PlatformType::Color);
    }

    #[test]
    fn test_rule_lists_fragment_groups() {
        let theme = theme(ThemeValuesOnly::Never, false);
        let rule = StyleCompiler::new(&theme).rule_for("boxShadow");
        assert!(rule.tokens.contains("md"));
        assert!(rule.tokens.contains("flat"));
    }

    #[test]
    fn test_unscaled_property_has_no_tokens() {
        let theme = theme(ThemeValuesOnly::Always, false);
        let rule = StyleCompiler::new(&theme).rule_for("alignItems");
        assert!(rule.scale.is_none());
        assert!(rule.tokens.is_empty());
        assert!(!rule.literals_allowed());
    }

    #[test]
    fn test_strict_scale_rejects_literals() {
        let theme = theme(ThemeValuesOnly::Never.with_scale("colors"), false);
        let compiler = StyleCompiler::new(&theme);
        assert!(compiler.check_property("color", &"primary.100".into()).is_ok());
        assert!(matches!(
            compiler.check_property("color", &"#fff".into()),
            Err(ResolveError::ThemeValueRequired { .. })
        ));
        assert!(compiler.check_property("padding", &"10%".into()).is_ok());
    }

    #[test]
    fn test_theme_fn_lifts_strict_mode() {
        let theme = theme(ThemeValuesOnly::Never.with_scale("colors"), false);
        let compiler = StyleCompiler::new(&theme);
        let f = Descriptor::theme_fn(|_| Descriptor::from("#fff"));
        assert!(compiler.check_property("color", &f).is_ok());
        let nested = Descriptor::theme_fn(|_| Descriptor::theme_fn(|_| Descriptor::from(1)));
        assert!(matches!(
            compiler.check_property("color", &nested),
            Err(ResolveError::NestedThemeFn { .. })
        ));
    }

    #[test]
    fn test_explicit_token_must_exist() {
        let theme = theme(ThemeValuesOnly::Never, false);
        let compiler = StyleCompiler::new(&theme);
        assert!(compiler.check_property("color", &token("text")).is_ok());
        assert!(matches!(
            compiler.check_property("color", &token("nope")),
            Err(ResolveError::UnknownToken { .. })
        ));
    }

    #[test]
    fn test_native_only_narrows_literals() {
        let web = theme(ThemeValuesOnly::Never, false);
        let native = theme(ThemeValuesOnly::Never, true);
        let width = Descriptor::from("10vh");
        assert!(StyleCompiler::new(&web).check_property("width", &width).is_ok());
        assert!(matches!(
            StyleCompiler::new(&native).check_property("width", &width),
            Err(ResolveError::LiteralNotAllowed { expected: "dimension", .. })
        ));
    }

    #[test]
    fn test_responsive_entries_are_each_checked() {
        let theme = theme(ThemeValuesOnly::Never.with_scale("colors"), false);
        let compiler = StyleCompiler::new(&theme);
        let ok = Descriptor::responsive_sparse([Some("text"), None, Some("primary.900")]);
        assert!(compiler.check_property("color", &ok).is_ok());
        let bad = Descriptor::responsive(["text", "red"]);
        assert!(compiler.check_property("color", &bad).is_err());
    }

    #[test]
    fn test_check_collects_per_property() {
        let theme = theme(ThemeValuesOnly::Never.with_scale("colors"), true);
        let sx = Sx::new()
            .set("color", "red")
            .set("flexDirection", "sideways")
            .set("p", 2)
            .variant("text.nope");
        let errors = StyleCompiler::new(&theme).check(&sx);
        let properties: Vec<_> = errors.iter().map(ResolveError::property).collect();
        assert_eq!(properties, vec!["color", "flexDirection"]);
    }

    #[test]
    fn test_variant_fragment_is_checked() {
        let theme = Theme::builder()
            .scale("colors", Scale::new().with("text", "#111"))
            .variant("text", "loud", Sx::new().set("color", "red"))
            .variant("text", "quiet", Sx::new().set("color", "text"))
            .only_allow_theme_values(ThemeValuesOnly::Never.with_scale("colors"))
            .build()
            .unwrap();
        let compiler = StyleCompiler::new(&theme);

        let loud = Sx::new().variant("text.loud");
        let errors = compiler.check(&loud);
        assert_eq!(errors, crate::resolve::resolve_sx(&loud, &theme).errors());
        assert!(matches!(
            errors.as_slice(),
            [ResolveError::ThemeValueRequired { property, .. }] if property == "color"
        ));

        // An explicit sibling overrides the fragment's bad value.
        assert!(compiler.check(&loud.clone().set("color", "text")).is_empty());
        assert!(compiler.check(&Sx::new().variant("text.quiet")).is_empty());
    }
}
