//! # Swatch - Theme-Aware Style Resolution
//!
//! `swatch` turns authored style descriptions into flat, platform-ready
//! style objects, one per responsive breakpoint, resolved against a
//! centralized design theme.
//!
//! ## Core Concepts
//!
//! - [`Theme`]: scales of design tokens, aliases, variant groups and flags
//! - [`Sx`]: a style description mixing literals, token references,
//!   responsive arrays, aliases and theme functions
//! - [`resolve_sx`]: resolves an [`Sx`] into one [`ResolvedStyle`] per breakpoint
//! - [`merge_variants`] and [`StyledOptions`]: compose variants, defaults and
//!   inline style with a fixed precedence
//! - [`StyleCompiler`]: checks a description against the theme without
//!   resolving it
//!
//! ## Quick Start
//!
//! ```rust
//! use swatch::{resolve_sx, sx, Descriptor, StyleValue, Theme};
//!
//! let theme = Theme::from_yaml(r##"
//! breakpoints: [768]
//! colors:
//!   text: "#111"
//!   primary: "#07c"
//! space: [0, 4, 8, 16, 32]
//! "##).unwrap();
//!
//! let card = sx! {
//!     "bg" => "primary",
//!     "color" => "text",
//!     "p" => Descriptor::responsive([2, 4]),
//!     "alignItems" => "center",
//! };
//!
//! let resolution = resolve_sx(&card, &theme);
//! assert!(resolution.is_ok());
//!
//! let base = &resolution.styles()[0];
//! assert_eq!(base.get("backgroundColor"), Some(&StyleValue::from("#07c")));
//! assert_eq!(base.get("padding"), Some(&StyleValue::from(8)));
//! assert_eq!(base.get("alignItems"), Some(&StyleValue::from("center")));
//! assert_eq!(resolution.styles()[1].get("padding"), Some(&StyleValue::from(32)));
//! ```
//!
//! ## Resolution Rules
//!
//! - Aliases are canonicalized (`bg` → `backgroundColor`) before the scale
//!   is chosen; output always uses canonical names.
//! - A value that exactly names a token in the property's scale is
//!   substituted. Anything else passes through as a literal.
//! - With `onlyAllowThemeValues`, literals that name no token are reported
//!   and left out of the output. Sibling properties are unaffected.
//! - Responsive arrays map entry `i` to breakpoint slot `i`. Empty entries
//!   inherit from the slot below and the last entry carries upward.
//!
//! ## Errors
//!
//! - [`ThemeError`]: the theme is malformed. Returned by theme construction.
//! - [`ResolveError`]: one property could not be resolved. Collected in a
//!   [`Resolution`] alongside the styles.
//!
//! ## Logging
//!
//! Diagnostics go through `tracing`: token misses and skipped variants at
//! `debug`, theme-only rejections at `warn`, substitutions at `trace`.

mod compiler;
mod error;
pub mod prelude;
mod resolve;
mod style;
pub mod theme;
mod value;
mod variant;

// Error types
pub use error::{ResolveError, Result, ThemeError};

// Theme exports
pub use theme::{
    Scale, Theme, ThemeBuilder, ThemeFlags, ThemeValuesOnly, Token, VariantGroup,
    DEFAULT_BREAKPOINTS,
};

// Authoring exports
pub use style::{token, Descriptor, Entry, Sx, SxProp, ThemeFn, VARIANT_KEY};
pub use value::StyleValue;

// Resolution exports
pub use resolve::{
    evaluate, expand, resolve, resolve_at, resolve_prop, resolve_sx, Resolution, Resolved,
    ResolvedStyle,
};

// Variant exports
pub use variant::{lookup_variant, merge_variants, StyledOptions, StyledProps};

// Checking exports
pub use compiler::{platform_type, PlatformType, PropertyRule, StyleCompiler};
