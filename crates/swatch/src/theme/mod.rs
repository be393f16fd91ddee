//! Themes: scales of design tokens, aliases, variant groups and flags.
//!
//! A theme is the single source of truth a style description is resolved
//! against. It is built once, validated, and then shared read-only:
//!
//! - **Scales** hold tokens (`colors.primary`, `space.2`). Properties map to
//!   scales through a property table (`padding` → `space`).
//! - **Aliases** are single-hop shorthands (`p` → `padding`).
//! - **Variant groups** hold named style fragments (`buttons.primary`).
//! - **Flags** restrict properties to theme values only, or to native value
//!   types.
//!
//! ## Theme literal
//!
//! ```yaml
//! breakpoints: [576, 768, 992]
//! colors:
//!   text: "#111"
//!   primary: { 100: "#eef", 900: "#003" }
//!   modes:
//!     dark: { text: "#eee" }
//! space: [0, 4, 8, 16]
//! shadows:
//!   md: { shadowColor: text, shadowOpacity: 0.2 }
//! buttons:
//!   primary: { bg: primary.900, p: 2 }
//! aliases: { tc: textDecorationColor }
//! types:
//!   onlyAllowThemeValues: { colors: always }
//! ```
//!
//! ## Failure modes
//!
//! Construction fails fast with a [`ThemeError`](crate::ThemeError) when
//! breakpoint widths are not strictly ascending, when an alias maps to
//! another alias, or when a variant references a token from a scale the
//! theme does not define. A broken theme never reaches resolution.
//!
//! Only explicit token references are checked this way: [`token`](crate::token)
//! in code, or the `!token` tag in YAML (`color: !token text`). JSON has no
//! tags, so a JSON theme's variant values are all plain literals and are
//! looked up at resolution time instead.
//!
//! ## Color modes
//!
//! `colors.modes.<name>` declares overrides per mode. Which mode is active
//! is up to the caller; [`Theme::with_color_mode`] applies one.

mod defaults;
mod flags;
mod parse;
mod scale;
#[allow(clippy::module_inception)]
mod theme;

pub use defaults::{
    DEFAULT_BREAKPOINTS, FRAGMENT_SCALES, IGNORED_KEYS, VARIANT_GROUP_KEYS,
};
pub use flags::{ThemeFlags, ThemeValuesOnly};
pub use scale::{Scale, Token};
pub use theme::{Theme, ThemeBuilder, VariantGroup};
