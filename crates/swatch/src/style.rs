//! Style descriptions ("sx") as authored.
//!
//! An [`Sx`] maps style properties (or their aliases) to a [`Descriptor`].
//! A descriptor is one of four cases, dispatched exhaustively by the
//! resolver:
//!
//! - [`Descriptor::Literal`]: a concrete value, substituted if it happens to
//!   name a token in the property's scale
//! - [`Descriptor::Token`]: an explicit token reference, written `!token name`
//!   in YAML
//! - [`Descriptor::Responsive`]: one entry per breakpoint, `None` inherits
//! - [`Descriptor::ThemeFn`]: computed from the theme at resolution time
//!
//! The reserved key `variant` names a variant by dotted path from the theme
//! root (`text.heading`); its fragment sits below the sibling properties.
//!
//! ```rust
//! use swatch::{sx, token, Descriptor, Sx};
//!
//! let card = sx! {
//!     "bg" => "background",
//!     "p" => 2,
//!     "color" => token("text"),
//!     "width" => Descriptor::responsive(["100%", "50%"]),
//! };
//! assert_eq!(card.len(), 4);
//!
//! let same = Sx::new()
//!     .set("bg", "background")
//!     .set("p", 2)
//!     .token("color", "text")
//!     .responsive("width", ["100%", "50%"]);
//! assert_eq!(card, same);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::theme::Theme;
use crate::value::{yaml_key, StyleValue};

/// The reserved property naming a variant from the theme root.
pub const VARIANT_KEY: &str = "variant";

/// A theme function: computes a descriptor from the theme.
pub type ThemeFn = Arc<dyn Fn(&Theme) -> Descriptor + Send + Sync>;

/// One breakpoint slot of a responsive value.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Literal(StyleValue),
    Token(String),
}

macro_rules! from_literal {
    ($target:ident: $($ty:ty),*) => {
        $(
            impl From<$ty> for $target {
                fn from(value: $ty) -> Self {
                    $target::Literal(StyleValue::from(value))
                }
            }
        )*
    };
}

from_literal!(Entry: StyleValue, bool, i32, i64, u32, f64, &str, String);

/// The value of one property in a style description.
#[derive(Clone)]
pub enum Descriptor {
    Literal(StyleValue),
    Token(String),
    Responsive(Vec<Option<Entry>>),
    ThemeFn(ThemeFn),
}

impl Descriptor {
    /// Builds a responsive descriptor with every slot set.
    pub fn responsive<I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry>,
    {
        Descriptor::Responsive(entries.into_iter().map(|e| Some(e.into())).collect())
    }

    /// Builds a responsive descriptor where `None` slots inherit.
    pub fn responsive_sparse<I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = Option<E>>,
        E: Into<Entry>,
    {
        Descriptor::Responsive(entries.into_iter().map(|e| e.map(Into::into)).collect())
    }

    /// Builds a theme-function descriptor.
    pub fn theme_fn<F>(f: F) -> Self
    where
        F: Fn(&Theme) -> Descriptor + Send + Sync + 'static,
    {
        Descriptor::ThemeFn(Arc::new(f))
    }

    /// Returns `true` if any part of this descriptor is an explicit token reference.
    pub fn has_token_ref(&self) -> bool {
        match self {
            Descriptor::Token(_) => true,
            Descriptor::Responsive(entries) => entries
                .iter()
                .any(|e| matches!(e, Some(Entry::Token(_)))),
            Descriptor::Literal(_) | Descriptor::ThemeFn(_) => false,
        }
    }

    /// Converts a YAML node. Sequences become responsive values, `null`
    /// yields `None`, and a `!token` tag marks an explicit token reference.
    pub(crate) fn from_yaml(value: &serde_yaml::Value) -> Option<Descriptor> {
        match value {
            serde_yaml::Value::Sequence(seq) => Some(Descriptor::Responsive(
                seq.iter().map(Entry::from_yaml).collect(),
            )),
            other => Entry::from_yaml(other).map(Descriptor::from),
        }
    }
}

impl Entry {
    fn from_yaml(value: &serde_yaml::Value) -> Option<Entry> {
        match value {
            serde_yaml::Value::Tagged(tagged) if tagged.tag == TOKEN_TAG => {
                let name = StyleValue::from_yaml(&tagged.value)?;
                name.token_key().map(|key| Entry::Token(key.into_owned()))
            }
            other => StyleValue::from_yaml(other).map(Entry::Literal),
        }
    }
}

/// YAML tag for an explicit token reference: `color: !token text`.
const TOKEN_TAG: &str = "token";

/// Builds an explicit token reference.
pub fn token(name: impl Into<String>) -> Descriptor {
    Descriptor::Token(name.into())
}

from_literal!(Descriptor: StyleValue, bool, i32, i64, u32, f64, &str, String);

impl From<Entry> for Descriptor {
    fn from(entry: Entry) -> Self {
        match entry {
            Entry::Literal(value) => Descriptor::Literal(value),
            Entry::Token(name) => Descriptor::Token(name),
        }
    }
}

impl From<Vec<Option<Entry>>> for Descriptor {
    fn from(entries: Vec<Option<Entry>>) -> Self {
        Descriptor::Responsive(entries)
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            Descriptor::Token(t) => f.debug_tuple("Token").field(t).finish(),
            Descriptor::Responsive(entries) => {
                f.debug_tuple("Responsive").field(entries).finish()
            }
            Descriptor::ThemeFn(_) => f.write_str("ThemeFn(..)"),
        }
    }
}

impl PartialEq for Descriptor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Descriptor::Literal(a), Descriptor::Literal(b)) => a == b,
            (Descriptor::Token(a), Descriptor::Token(b)) => a == b,
            (Descriptor::Responsive(a), Descriptor::Responsive(b)) => a == b,
            (Descriptor::ThemeFn(a), Descriptor::ThemeFn(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// A style description: property (or alias) → descriptor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sx {
    props: BTreeMap<String, Descriptor>,
}

impl Sx {
    /// Creates an empty style description.
    pub fn new() -> Self {
        Self {
            props: BTreeMap::new(),
        }
    }

    /// Sets a property, returning `self` for chaining.
    pub fn set(mut self, property: impl Into<String>, value: impl Into<Descriptor>) -> Self {
        self.insert(property, value);
        self
    }

    /// Sets a property to an explicit token reference.
    pub fn token(self, property: impl Into<String>, name: impl Into<String>) -> Self {
        self.set(property, Descriptor::Token(name.into()))
    }

    /// Sets a responsive property with every slot filled.
    pub fn responsive<I, E>(self, property: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry>,
    {
        self.set(property, Descriptor::responsive(entries))
    }

    /// Sets a property computed from the theme.
    pub fn theme_fn<F>(self, property: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Theme) -> Descriptor + Send + Sync + 'static,
    {
        self.set(property, Descriptor::theme_fn(f))
    }

    /// Sets the `variant` key to a dotted variant path.
    pub fn variant(self, path: impl Into<String>) -> Self {
        self.set(VARIANT_KEY, StyleValue::Str(path.into()))
    }

    /// Adds or replaces a property.
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<Descriptor>) {
        self.props.insert(property.into(), value.into());
    }

    /// Removes a property.
    pub fn remove(&mut self, property: &str) -> Option<Descriptor> {
        self.props.remove(property)
    }

    /// Returns the descriptor of a property.
    pub fn get(&self, property: &str) -> Option<&Descriptor> {
        self.props.get(property)
    }

    /// Returns the dotted variant path set through the `variant` key.
    pub fn variant_path(&self) -> Option<&str> {
        match self.props.get(VARIANT_KEY) {
            Some(Descriptor::Literal(StyleValue::Str(path))) => Some(path),
            _ => None,
        }
    }

    /// Overlays `other` on top of `self`; `other` wins per property.
    ///
    /// A property's descriptor is replaced whole, never merged.
    pub fn merge(mut self, other: &Sx) -> Self {
        for (property, descriptor) in &other.props {
            self.props.insert(property.clone(), descriptor.clone());
        }
        self
    }

    /// Iterates over properties in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Descriptor)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of properties.
    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Returns `true` if no properties are set.
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Parses a style description from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Sx, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Builds a style description from a YAML mapping; `None` for other shapes.
    ///
    /// `null` values are dropped: an unset property is an absent property.
    pub(crate) fn from_yaml_value(value: &serde_yaml::Value) -> Option<Sx> {
        let map = value.as_mapping()?;
        let mut sx = Sx::new();
        for (key, value) in map {
            let Some(property) = yaml_key(key) else { continue };
            if let Some(descriptor) = Descriptor::from_yaml(value) {
                sx.insert(property, descriptor);
            }
        }
        Some(sx)
    }
}

impl<'de> Deserialize<'de> for Sx {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_yaml::Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(Sx::new());
        }
        Sx::from_yaml_value(&value)
            .ok_or_else(|| serde::de::Error::custom("style description must be a mapping"))
    }
}

impl<K: Into<String>, D: Into<Descriptor>> FromIterator<(K, D)> for Sx {
    fn from_iter<I: IntoIterator<Item = (K, D)>>(iter: I) -> Self {
        let mut sx = Sx::new();
        for (property, descriptor) in iter {
            sx.insert(property, descriptor);
        }
        sx
    }
}

/// A style prop: a fixed description or one computed from the theme.
#[derive(Clone)]
pub enum SxProp {
    Static(Sx),
    ThemeFn(Arc<dyn Fn(&Theme) -> Sx + Send + Sync>),
}

impl SxProp {
    /// Builds a style prop computed from the theme.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Theme) -> Sx + Send + Sync + 'static,
    {
        SxProp::ThemeFn(Arc::new(f))
    }

    /// Produces the style description for `theme`.
    pub fn evaluate(&self, theme: &Theme) -> Sx {
        match self {
            SxProp::Static(sx) => sx.clone(),
            SxProp::ThemeFn(f) => f(theme),
        }
    }
}

impl From<Sx> for SxProp {
    fn from(sx: Sx) -> Self {
        SxProp::Static(sx)
    }
}

impl fmt::Debug for SxProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SxProp::Static(sx) => f.debug_tuple("Static").field(sx).finish(),
            SxProp::ThemeFn(_) => f.write_str("ThemeFn(..)"),
        }
    }
}

/// Builds an [`Sx`] from `"property" => value` pairs.
///
/// Values go through `Into<Descriptor>`, so literals, [`token`] and
/// [`Descriptor`] constructors all work.
#[macro_export]
macro_rules! sx {
    () => {
        $crate::Sx::new()
    };
    ($($property:expr => $value:expr),+ $(,)?) => {
        $crate::Sx::new()$(.set($property, $value))+
    };
}
