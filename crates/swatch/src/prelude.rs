//! Common imports in one line.
//!
//! ```rust
//! use swatch::prelude::*;
//!
//! let theme = Theme::builder()
//!     .scale("colors", Scale::new().with("primary", "#07c"))
//!     .build()
//!     .unwrap();
//! let resolution = resolve_sx(&sx! { "bg" => "primary" }, &theme);
//! assert_eq!(
//!     resolution.styles()[0].get("backgroundColor"),
//!     Some(&StyleValue::from("#07c"))
//! );
//! ```

pub use crate::sx;
pub use crate::{
    merge_variants, resolve_at, resolve_prop, resolve_sx, token, Descriptor, Resolution,
    ResolveError, ResolvedStyle, Scale, StyleCompiler, StyleValue, StyledOptions, StyledProps,
    Sx, SxProp, Theme, ThemeError, ThemeValuesOnly,
};
