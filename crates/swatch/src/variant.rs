//! Variant lookup and merging.
//!
//! Variants are named style fragments kept in the theme's variant groups.
//! A component names the group it draws from (its theme key) and a list of
//! variant names; the fragments are merged left to right and the author's
//! inline style goes on top.
//!
//! Precedence, lowest to highest:
//!
//! 1. the component's default style
//! 2. the explicit `variant`, or the default variant when none is given
//! 3. the explicit `variants`, or the default variants, in list order
//! 4. the inline `sx`
//!
//! Merging is per property: a later value replaces an earlier one whole.
//! A missing variant contributes nothing.
//!
//! ```rust
//! use swatch::{merge_variants, Sx, Theme};
//!
//! let theme = Theme::builder()
//!     .variant("buttons", "primary", Sx::new().set("color", "white").set("p", 2))
//!     .variant("buttons", "large", Sx::new().set("p", 4))
//!     .build()
//!     .unwrap();
//!
//! let inline = Sx::new().set("color", "black");
//! let merged = merge_variants(&theme, Some("buttons"), &["primary", "large"], &inline);
//! assert_eq!(merged, Sx::new().set("color", "black").set("p", 4));
//! ```

use crate::style::{Sx, SxProp};
use crate::theme::Theme;

/// Finds a variant by name.
///
/// With a theme key the name is looked up inside that group first. A dotted
/// name (`text.heading`) is then tried as a path from the theme root.
pub fn lookup_variant<'t>(theme: &'t Theme, theme_key: Option<&str>, name: &str) -> Option<&'t Sx> {
    theme_key
        .and_then(|group| theme.variant(group, name))
        .or_else(|| lookup_path(theme, name))
}

/// Looks up `group.name` from the theme root.
pub(crate) fn lookup_path<'t>(theme: &'t Theme, path: &str) -> Option<&'t Sx> {
    let (group, name) = path.split_once('.')?;
    theme.variant(group, name)
}

/// Merges the named variants in order, then `inline` on top.
pub fn merge_variants<S: AsRef<str>>(
    theme: &Theme,
    theme_key: Option<&str>,
    names: &[S],
    inline: &Sx,
) -> Sx {
    let mut merged = Sx::new();
    for name in names {
        let name = name.as_ref();
        match lookup_variant(theme, theme_key, name) {
            Some(fragment) => merged = merged.merge(fragment),
            None => {
                tracing::debug!(theme_key, variant = name, "Variant not found, skipping");
            }
        }
    }
    merged.merge(inline)
}

/// Styling declared once per component.
#[derive(Debug, Clone, Default)]
pub struct StyledOptions {
    pub theme_key: Option<String>,
    pub default_style: Option<SxProp>,
    pub default_variant: Option<String>,
    pub default_variants: Option<Vec<String>>,
}

impl StyledOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme_key(mut self, key: impl Into<String>) -> Self {
        self.theme_key = Some(key.into());
        self
    }

    pub fn default_style(mut self, style: impl Into<SxProp>) -> Self {
        self.default_style = Some(style.into());
        self
    }

    pub fn default_variant(mut self, name: impl Into<String>) -> Self {
        self.default_variant = Some(name.into());
        self
    }

    pub fn default_variants<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_variants = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Builds the style description for one use of the component.
    pub fn compose(&self, theme: &Theme, props: &StyledProps) -> Sx {
        let theme_key = props.theme_key.as_deref().or(self.theme_key.as_deref());

        let mut names: Vec<&str> = Vec::new();
        if let Some(name) = props.variant.as_deref().or(self.default_variant.as_deref()) {
            names.push(name);
        }
        if let Some(list) = props.variants.as_ref().or(self.default_variants.as_ref()) {
            names.extend(list.iter().map(String::as_str));
        }

        let base = self
            .default_style
            .as_ref()
            .map(|style| style.evaluate(theme))
            .unwrap_or_default();
        let inline = props
            .sx
            .as_ref()
            .map(|sx| sx.evaluate(theme))
            .unwrap_or_default();

        base.merge(&merge_variants(theme, theme_key, &names, &inline))
    }
}

/// Styling passed at each use of a component.
#[derive(Debug, Clone, Default)]
pub struct StyledProps {
    pub variant: Option<String>,
    pub variants: Option<Vec<String>>,
    pub sx: Option<SxProp>,
    pub theme_key: Option<String>,
}

impl StyledProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variant(mut self, name: impl Into<String>) -> Self {
        self.variant = Some(name.into());
        self
    }

    pub fn variants<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variants = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn sx(mut self, sx: impl Into<SxProp>) -> Self {
        self.sx = Some(sx.into());
        self
    }

    pub fn theme_key(mut self, key: impl Into<String>) -> Self {
        self.theme_key = Some(key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Descriptor;
    use crate::theme::Scale;

    fn theme() -> Theme {
        Theme::builder()
            .scale("colors", Scale::new().with("primary", "#07c"))
            .variant("buttons", "base", Sx::new().set("color", "b").set("margin", 1))
            .variant("buttons", "c", Sx::new().set("color", "c"))
            .variant("buttons", "outline", Sx::new().set("borderWidth", 1))
            .variant("text", "heading", Sx::new().set("fontSize", 24))
            .build()
            .unwrap()
    }

    #[test]
    fn test_precedence() {
        let options = StyledOptions::new()
            .theme_key("buttons")
            .default_style(Sx::new().set("color", "a"))
            .default_variant("base");
        let props = StyledProps::new()
            .variants(["c"])
            .sx(Sx::new().set("margin", 2));

        let composed = options.compose(&theme(), &props);
        assert_eq!(composed, Sx::new().set("color", "c").set("margin", 2));
    }

    #[test]
    fn test_explicit_variant_replaces_default() {
        let options = StyledOptions::new().theme_key("buttons").default_variant("base");
        let composed = options.compose(&theme(), &StyledProps::new().variant("outline"));
        assert_eq!(composed, Sx::new().set("borderWidth", 1));
    }

    #[test]
    fn test_explicit_variants_replace_defaults() {
        let options = StyledOptions::new()
            .theme_key("buttons")
            .default_variants(["outline"]);
        let composed = options.compose(&theme(), &StyledProps::new().variants(["c"]));
        assert_eq!(composed, Sx::new().set("color", "c"));
    }

    #[test]
    fn test_props_theme_key_overrides() {
        let options = StyledOptions::new().theme_key("buttons");
        let props = StyledProps::new().theme_key("text").variant("heading");
        assert_eq!(
            options.compose(&theme(), &props),
            Sx::new().set("fontSize", 24)
        );
    }

    #[test]
    fn test_missing_variant_is_empty() {
        let inline = Sx::new().set("p", 1);
        let merged = merge_variants(&theme(), Some("buttons"), &["nope", "c"], &inline);
        assert_eq!(merged, Sx::new().set("color", "c").set("p", 1));
        let merged = merge_variants(&theme(), Some("missingGroup"), &["c"], &inline);
        assert_eq!(merged, inline);
    }

    #[test]
    fn test_dotted_name_from_root() {
        assert!(lookup_variant(&theme(), None, "text.heading").is_some());
        assert!(lookup_variant(&theme(), Some("buttons"), "text.heading").is_some());
        assert!(lookup_variant(&theme(), None, "heading").is_none());
    }

    #[test]
    fn test_theme_fn_style_props() {
        let options = StyledOptions::new().default_style(SxProp::from_fn(|theme: &Theme| {
            let primary = theme.tokens_in("colors").unwrap().value("primary").unwrap();
            Sx::new().set("borderColor", Descriptor::Literal(primary.clone()))
        }));
        let composed = options.compose(&theme(), &StyledProps::new());
        assert_eq!(composed, Sx::new().set("borderColor", "#07c"));
    }
}
