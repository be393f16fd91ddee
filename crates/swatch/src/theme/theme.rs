//! The immutable theme and its builder.
//!
//! A [`Theme`] is constructed once, validated, and then only read. All
//! lookups take `&self`; there is no way to mutate a theme short of
//! building a new one (or reloading it from its source file).
//!
//! # Construction
//!
//! ```rust
//! use swatch::{Scale, Sx, Theme};
//!
//! let theme = Theme::builder()
//!     .scale("colors", Scale::new().with("text", "#111").with("primary", "#07c"))
//!     .scale("space", Scale::from_values([0, 4, 8, 16]))
//!     .variant("buttons", "primary", Sx::new().set("bg", "primary").set("p", 2))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(theme.scale_for("bg"), Some("colors"));
//! assert_eq!(theme.alias_of("p"), "padding");
//! assert!(theme.variant_group("buttons").is_some());
//! ```
//!
//! ```rust
//! use swatch::Theme;
//!
//! let theme = Theme::from_yaml(r##"
//! breakpoints: [480, 960]
//! colors:
//!   text: "#111"
//!   modes:
//!     dark:
//!       text: "#eee"
//! space: [0, 4, 8]
//! text:
//!   heading: { fontSize: 24, fontWeight: bold }
//! types:
//!   onlyAllowThemeValues: { colors: always }
//! "##).unwrap();
//!
//! assert_eq!(theme.breakpoint_count(), 3);
//! assert_eq!(theme.modes(), vec!["dark"]);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::error::{Result, ThemeError};
use crate::style::{Sx, VARIANT_KEY};

use super::defaults::{DEFAULT_ALIASES, DEFAULT_BREAKPOINTS, DEFAULT_SCALES, FRAGMENT_SCALES};
use super::flags::{ThemeFlags, ThemeValuesOnly};
use super::parse::parse_theme;
use super::scale::{Scale, Token};

/// A named group of variants: variant name → style fragment.
pub type VariantGroup = BTreeMap<String, Sx>;

/// Key of the nested color-mode table inside the `colors` scale.
const MODES_KEY: &str = "modes";

/// A validated, immutable design theme.
#[derive(Debug, Clone)]
pub struct Theme {
    name: Option<String>,
    source_path: Option<PathBuf>,
    scales: BTreeMap<String, Scale>,
    variants: BTreeMap<String, VariantGroup>,
    aliases: HashMap<String, String>,
    scale_map: HashMap<String, String>,
    breakpoints: Option<Vec<f64>>,
    flags: ThemeFlags,
    color_modes: BTreeMap<String, Scale>,
}

impl Theme {
    /// Starts building a theme.
    pub fn builder() -> ThemeBuilder {
        ThemeBuilder::new()
    }

    /// Creates a theme from a YAML theme literal.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Parse`] for malformed YAML, and any validation
    /// error raised by [`ThemeBuilder::build`].
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let root: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| ThemeError::Parse {
                path: None,
                message: e.to_string(),
            })?;
        Self::from_value(&root)
    }

    /// Creates a theme from a JSON theme literal.
    pub fn from_json(json: &str) -> Result<Self> {
        let root: serde_yaml::Value =
            serde_json::from_str(json).map_err(|e| ThemeError::Parse {
                path: None,
                message: e.to_string(),
            })?;
        Self::from_value(&root)
    }

    /// Creates a theme from an already-parsed theme literal.
    pub fn from_value(root: &serde_yaml::Value) -> Result<Self> {
        parse_theme(root)?.build()
    }

    /// Loads a theme from a `.yaml`, `.yml` or `.json` file.
    ///
    /// The theme name defaults to the file stem when the literal has no
    /// `name` key. The path is kept for [`refresh`](Theme::refresh).
    ///
    /// ```rust,ignore
    /// let theme = swatch::Theme::from_file("./themes/base.yaml")?;
    /// assert_eq!(theme.name(), Some("base"));
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ThemeError::Load {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let root: serde_yaml::Value = if is_json {
            serde_json::from_str(&content).map_err(|e| ThemeError::Parse {
                path: Some(path.to_path_buf()),
                message: e.to_string(),
            })?
        } else {
            serde_yaml::from_str(&content).map_err(|e| ThemeError::Parse {
                path: Some(path.to_path_buf()),
                message: e.to_string(),
            })?
        };

        let mut builder = parse_theme(&root)?;
        if builder.name.is_none() {
            builder.name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string());
        }
        let mut theme = builder.build()?;
        theme.source_path = Some(path.to_path_buf());
        Ok(theme)
    }

    /// Reloads the theme from its source file.
    ///
    /// # Errors
    ///
    /// Fails if the theme was not loaded with [`from_file`](Theme::from_file),
    /// or if the file no longer parses or validates. On error the theme is
    /// left unchanged.
    pub fn refresh(&mut self) -> Result<()> {
        let path = self.source_path.clone().ok_or_else(|| ThemeError::Load {
            message: "Cannot refresh: theme has no source file".to_string(),
        })?;
        *self = Theme::from_file(path)?;
        Ok(())
    }

    /// Returns the theme name, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the source file path, if loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Canonicalizes a property name. Identity when `name` is not an alias.
    pub fn alias_of<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Returns the scale backing a property (aliases are canonicalized first).
    pub fn scale_for(&self, property: &str) -> Option<&str> {
        self.scale_map
            .get(self.alias_of(property))
            .map(String::as_str)
    }

    /// Returns the tokens of a scale.
    pub fn tokens_in(&self, scale: &str) -> Option<&Scale> {
        self.scales.get(scale)
    }

    /// Returns a variant group by name.
    pub fn variant_group(&self, group: &str) -> Option<&VariantGroup> {
        self.variants.get(group)
    }

    /// Returns one variant fragment.
    pub fn variant(&self, group: &str, name: &str) -> Option<&Sx> {
        self.variants.get(group).and_then(|g| g.get(name))
    }

    /// Iterates over scales in name order.
    pub fn scales(&self) -> impl Iterator<Item = (&str, &Scale)> {
        self.scales.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over variant group names in order.
    pub fn variant_groups(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    /// Returns `true` if tokens of `scale` are style fragments (shadows).
    pub fn is_fragment_scale(&self, scale: &str) -> bool {
        FRAGMENT_SCALES.contains(&scale)
    }

    /// Returns the breakpoint widths, in pixels.
    pub fn breakpoints(&self) -> &[f64] {
        self.breakpoints.as_deref().unwrap_or(DEFAULT_BREAKPOINTS)
    }

    /// Number of responsive slots: one base slot plus one per breakpoint.
    pub fn breakpoint_count(&self) -> usize {
        self.breakpoints().len() + 1
    }

    /// Returns the responsive slot active at a viewport `width`.
    ///
    /// Slot `n` applies from the `n`-th breakpoint width upward; slot 0 is
    /// everything below the first breakpoint.
    pub fn breakpoint_index(&self, width: f64) -> usize {
        self.breakpoints().iter().filter(|bp| **bp <= width).count()
    }

    /// Returns the behavior flags.
    pub fn flags(&self) -> &ThemeFlags {
        &self.flags
    }

    /// Whether a property backed by `scale` only accepts theme tokens.
    ///
    /// Shared by the resolver and the [`StyleCompiler`](crate::StyleCompiler)
    /// so the two always agree.
    pub fn theme_values_only(&self, scale: Option<&str>) -> bool {
        self.flags.only_allow_theme_values.applies_to(scale)
    }

    /// Names of the color modes declared under `colors.modes`.
    pub fn modes(&self) -> Vec<&str> {
        self.color_modes.keys().map(String::as_str).collect()
    }

    /// Returns a copy of the theme with a color mode applied.
    ///
    /// The mode's tokens are deep-merged over the base `colors` scale.
    /// Returns `None` for an unknown mode.
    pub fn with_color_mode(&self, mode: &str) -> Option<Theme> {
        let overrides = self.color_modes.get(mode)?;
        let mut theme = self.clone();
        theme
            .scales
            .entry("colors".to_string())
            .or_default()
            .merge(overrides.clone());
        Some(theme)
    }

    /// Layers `other` over this theme and revalidates.
    ///
    /// Scales and color modes are deep-merged, variants replaced per
    /// variant, aliases and the property-scale map overridden per entry.
    /// Breakpoints, flags and name come from `other` when it sets them.
    pub fn merge(mut self, other: Theme) -> Result<Theme> {
        for (name, scale) in other.scales {
            self.scales.entry(name).or_default().merge(scale);
        }
        for (name, group) in other.variants {
            self.variants.entry(name).or_default().extend(group);
        }
        for (name, scale) in other.color_modes {
            self.color_modes.entry(name).or_default().merge(scale);
        }
        self.aliases.extend(other.aliases);
        self.scale_map.extend(other.scale_map);
        if other.breakpoints.is_some() {
            self.breakpoints = other.breakpoints;
        }
        if other.flags != ThemeFlags::default() {
            self.flags = other.flags;
        }
        if other.name.is_some() {
            self.name = other.name;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        let mut previous = f64::NEG_INFINITY;
        for (index, width) in self.breakpoints().iter().copied().enumerate() {
            if !width.is_finite() || width <= previous {
                return Err(ThemeError::UnorderedBreakpoints {
                    index,
                    width: width.to_string(),
                });
            }
            previous = width;
        }

        let mut aliases: Vec<_> = self.aliases.iter().collect();
        aliases.sort();
        for (alias, target) in aliases {
            if target.is_empty() {
                return Err(ThemeError::EmptyAlias {
                    alias: alias.clone(),
                });
            }
            if self.aliases.contains_key(target) {
                return Err(ThemeError::AliasChain {
                    alias: alias.clone(),
                    target: target.clone(),
                });
            }
            if self.scale_map.contains_key(alias) {
                return Err(ThemeError::AliasShadowsProperty {
                    alias: alias.clone(),
                });
            }
        }

        for (group, variants) in &self.variants {
            for (variant, fragment) in variants {
                for (property, descriptor) in fragment.iter() {
                    if property == VARIANT_KEY || !descriptor.has_token_ref() {
                        continue;
                    }
                    match self.scale_for(property) {
                        None => {
                            return Err(ThemeError::UnscaledToken {
                                group: group.clone(),
                                variant: variant.clone(),
                                property: property.to_string(),
                            })
                        }
                        Some(scale) if !self.scales.contains_key(scale) => {
                            return Err(ThemeError::MissingScale {
                                group: group.clone(),
                                variant: variant.clone(),
                                property: property.to_string(),
                                scale: scale.to_string(),
                            })
                        }
                        Some(_) => {}
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for Theme {
    /// A theme with the default alias and scale tables and no tokens.
    fn default() -> Self {
        Self {
            name: None,
            source_path: None,
            scales: BTreeMap::new(),
            variants: BTreeMap::new(),
            aliases: default_aliases(),
            scale_map: default_scale_map(),
            breakpoints: None,
            flags: ThemeFlags::default(),
            color_modes: BTreeMap::new(),
        }
    }
}

fn default_aliases() -> HashMap<String, String> {
    DEFAULT_ALIASES
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn default_scale_map() -> HashMap<String, String> {
    DEFAULT_SCALES
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Assembles a [`Theme`]; [`build`](ThemeBuilder::build) validates it.
#[derive(Debug, Clone, Default)]
pub struct ThemeBuilder {
    pub(crate) name: Option<String>,
    scales: BTreeMap<String, Scale>,
    variants: BTreeMap<String, VariantGroup>,
    aliases: HashMap<String, String>,
    scale_map: HashMap<String, String>,
    breakpoints: Option<Vec<f64>>,
    flags: ThemeFlags,
}

impl ThemeBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the theme name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a scale, deep-merging into an existing scale of the same name.
    pub fn scale(mut self, name: impl Into<String>, scale: Scale) -> Self {
        self.scales.entry(name.into()).or_default().merge(scale);
        self
    }

    /// Adds a single variant to a group.
    pub fn variant(
        mut self,
        group: impl Into<String>,
        name: impl Into<String>,
        fragment: Sx,
    ) -> Self {
        self.variants
            .entry(group.into())
            .or_default()
            .insert(name.into(), fragment);
        self
    }

    /// Adds every variant of a group.
    pub fn variant_group(mut self, group: impl Into<String>, variants: VariantGroup) -> Self {
        self.variants.entry(group.into()).or_default().extend(variants);
        self
    }

    /// Declares an alias on top of the defaults.
    pub fn alias(mut self, alias: impl Into<String>, property: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), property.into());
        self
    }

    /// Maps a property to a scale on top of the defaults.
    pub fn map_property(mut self, property: impl Into<String>, scale: impl Into<String>) -> Self {
        self.scale_map.insert(property.into(), scale.into());
        self
    }

    /// Sets the breakpoint widths, in pixels.
    pub fn breakpoints(mut self, widths: impl IntoIterator<Item = f64>) -> Self {
        self.breakpoints = Some(widths.into_iter().collect());
        self
    }

    /// Sets all behavior flags.
    pub fn flags(mut self, flags: ThemeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets where literal values are forbidden.
    pub fn only_allow_theme_values(mut self, only: ThemeValuesOnly) -> Self {
        self.flags.only_allow_theme_values = only;
        self
    }

    /// Restricts literals to native value types.
    pub fn react_native_types_only(mut self, native_only: bool) -> Self {
        self.flags.react_native_types_only = native_only;
        self
    }

    /// Validates and builds the theme.
    ///
    /// # Errors
    ///
    /// - [`ThemeError::UnorderedBreakpoints`]: widths are not strictly ascending
    /// - [`ThemeError::AliasChain`]: an alias targets another alias
    /// - [`ThemeError::EmptyAlias`]: an alias has no target
    /// - [`ThemeError::AliasShadowsProperty`]: an alias reuses a scaled property name
    /// - [`ThemeError::MissingScale`] / [`ThemeError::UnscaledToken`]: a variant
    ///   references a token the theme cannot supply a scale for
    pub fn build(self) -> Result<Theme> {
        let mut scales = self.scales;
        let mut color_modes = BTreeMap::new();
        if let Some(colors) = scales.get_mut("colors") {
            if let Some(Token::Group(modes)) = colors.remove(MODES_KEY) {
                for (mode, token) in modes.iter() {
                    match token {
                        Token::Group(overrides) => {
                            color_modes.insert(mode.to_string(), overrides.clone());
                        }
                        Token::Value(_) => {
                            return Err(ThemeError::InvalidDefinition {
                                key: format!("colors.modes.{}", mode),
                                message: "color mode must be a mapping".to_string(),
                            })
                        }
                    }
                }
            }
        }

        let mut aliases = default_aliases();
        aliases.extend(self.aliases);
        let mut scale_map = default_scale_map();
        scale_map.extend(self.scale_map);

        let theme = Theme {
            name: self.name,
            source_path: None,
            scales,
            variants: self.variants,
            aliases,
            scale_map,
            breakpoints: self.breakpoints,
            flags: self.flags,
            color_modes,
        };
        theme.validate()?;
        tracing::debug!(
            name = theme.name().unwrap_or("<unnamed>"),
            scales = theme.scales.len(),
            variant_groups = theme.variants.len(),
            "Built theme"
        );
        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::token;
    use crate::value::StyleValue;

    fn colors() -> Scale {
        Scale::new().with("text", "#111").with("primary", "#07c")
    }

    #[test]
    fn test_default_theme_is_valid() {
        let theme = Theme::builder().build().unwrap();
        assert_eq!(theme.alias_of("bg"), "backgroundColor");
        assert_eq!(theme.scale_for("bg"), Some("colors"));
        assert_eq!(theme.scale_for("alignItems"), None);
        assert!(theme.tokens_in("colors").is_none());
    }

    #[test]
    fn test_alias_of_is_identity_for_non_alias() {
        let theme = Theme::default();
        assert_eq!(theme.alias_of("alignItems"), "alignItems");
    }

    #[test]
    fn test_custom_alias_and_property_map() {
        let theme = Theme::builder()
            .alias("tc", "textDecorationColor")
            .map_property("borderCurve", "radii")
            .build()
            .unwrap();
        assert_eq!(theme.scale_for("tc"), Some("colors"));
        assert_eq!(theme.scale_for("borderCurve"), Some("radii"));
    }

    #[test]
    fn test_alias_chain_is_rejected() {
        let err = Theme::builder().alias("bgc", "bg").build().unwrap_err();
        assert_eq!(
            err,
            ThemeError::AliasChain {
                alias: "bgc".to_string(),
                target: "bg".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_alias_is_rejected() {
        let err = Theme::builder().alias("x", "").build().unwrap_err();
        assert!(matches!(err, ThemeError::EmptyAlias { .. }));
    }

    #[test]
    fn test_alias_shadowing_property_is_rejected() {
        let err = Theme::builder().alias("color", "backgroundColor").build().unwrap_err();
        assert!(matches!(err, ThemeError::AliasShadowsProperty { .. }));
    }

    #[test]
    fn test_variant_with_token_for_missing_scale_is_rejected() {
        let err = Theme::builder()
            .variant("buttons", "primary", Sx::new().set("bg", token("primary")))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ThemeError::MissingScale {
                group: "buttons".to_string(),
                variant: "primary".to_string(),
                property: "bg".to_string(),
                scale: "colors".to_string(),
            }
        );
    }

    #[test]
    fn test_variant_with_token_for_unscaled_property_is_rejected() {
        let err = Theme::builder()
            .variant("layout", "row", Sx::new().set("flexDirection", token("row")))
            .build()
            .unwrap_err();
        assert!(matches!(err, ThemeError::UnscaledToken { .. }));
    }

    #[test]
    fn test_variant_with_token_for_defined_scale_is_accepted() {
        let theme = Theme::builder()
            .scale("colors", colors())
            .variant("buttons", "primary", Sx::new().set("bg", token("primary")))
            .build()
            .unwrap();
        assert!(theme.variant("buttons", "primary").is_some());
    }

    #[test]
    fn test_breakpoints() {
        let theme = Theme::builder().breakpoints([480.0, 960.0]).build().unwrap();
        assert_eq!(theme.breakpoint_count(), 3);
        assert_eq!(theme.breakpoint_index(0.0), 0);
        assert_eq!(theme.breakpoint_index(480.0), 1);
        assert_eq!(theme.breakpoint_index(1200.0), 2);
    }

    #[test]
    fn test_breakpoints_must_ascend() {
        let err = Theme::builder().breakpoints([992.0, 480.0]).build().unwrap_err();
        assert_eq!(
            err,
            ThemeError::UnorderedBreakpoints {
                index: 1,
                width: "480".to_string()
            }
        );
        assert!(Theme::builder().breakpoints([480.0, 480.0]).build().is_err());
        assert!(matches!(
            Theme::builder().breakpoints([f64::NAN]).build(),
            Err(ThemeError::UnorderedBreakpoints { index: 0, .. })
        ));

        let base = Theme::builder().breakpoints([480.0]).build().unwrap();
        let bad = Theme { breakpoints: Some(vec![768.0, 0.0]), ..Theme::default() };
        assert!(base.merge(bad).is_err());
    }

    #[test]
    fn test_default_breakpoints() {
        let theme = Theme::default();
        assert_eq!(theme.breakpoints(), DEFAULT_BREAKPOINTS);
        assert_eq!(theme.breakpoint_count(), 5);
    }

    #[test]
    fn test_color_modes() {
        let theme = Theme::builder()
            .scale(
                "colors",
                colors().with("modes", Scale::new().with("dark", Scale::new().with("text", "#eee"))),
            )
            .build()
            .unwrap();

        assert_eq!(theme.modes(), vec!["dark"]);
        assert!(!theme.tokens_in("colors").unwrap().contains("modes"));

        let dark = theme.with_color_mode("dark").unwrap();
        let colors = dark.tokens_in("colors").unwrap();
        assert_eq!(colors.value("text"), Some(&StyleValue::from("#eee")));
        assert_eq!(colors.value("primary"), Some(&StyleValue::from("#07c")));
        assert!(theme.with_color_mode("sepia").is_none());
    }

    #[test]
    fn test_theme_values_only_predicate() {
        let theme = Theme::builder()
            .only_allow_theme_values(ThemeValuesOnly::Never.with_scale("colors"))
            .build()
            .unwrap();
        assert!(theme.theme_values_only(Some("colors")));
        assert!(!theme.theme_values_only(Some("space")));
        assert!(!theme.theme_values_only(None));
    }

    #[test]
    fn test_merge_layers_other_on_top() {
        let base = Theme::builder()
            .name("base")
            .scale("colors", colors())
            .breakpoints([480.0])
            .build()
            .unwrap();
        let user = Theme::builder()
            .scale("colors", Scale::new().with("primary", "#f0f"))
            .variant("text", "body", Sx::new().set("fontSize", 14))
            .build()
            .unwrap();

        let merged = base.merge(user).unwrap();
        let colors = merged.tokens_in("colors").unwrap();
        assert_eq!(colors.value("primary"), Some(&StyleValue::from("#f0f")));
        assert_eq!(colors.value("text"), Some(&StyleValue::from("#111")));
        assert_eq!(merged.breakpoints(), &[480.0]);
        assert_eq!(merged.name(), Some("base"));
        assert!(merged.variant("text", "body").is_some());
    }

    #[test]
    fn test_theme_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Theme>();
    }
}
