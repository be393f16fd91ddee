//! Error types for theme construction and style resolution.
//!
//! Two families exist, matching the two moments things can go wrong:
//!
//! - [`ThemeError`]: the theme itself is malformed. Raised while building a
//!   [`Theme`](crate::Theme) and fatal to construction.
//! - [`ResolveError`]: one property of a style description could not be
//!   resolved. Local to that property; sibling properties still resolve.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration error raised while constructing a theme.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// An alias points at another alias. Aliases are single-hop.
    #[error("alias '{alias}' maps to '{target}', which is itself an alias")]
    AliasChain { alias: String, target: String },

    /// An alias has an empty target.
    #[error("alias '{alias}' has an empty target")]
    EmptyAlias { alias: String },

    /// An alias name collides with a style property the theme already maps to a scale.
    #[error("alias '{alias}' shadows the style property of the same name")]
    AliasShadowsProperty { alias: String },

    /// A variant fragment references a token in a scale the theme does not define.
    #[error(
        "variant '{group}.{variant}' references scale '{scale}' for '{property}', which is not defined"
    )]
    MissingScale {
        group: String,
        variant: String,
        property: String,
        scale: String,
    },

    /// A variant fragment references a token for a property that has no scale.
    #[error("variant '{group}.{variant}' uses a token for '{property}', which has no scale")]
    UnscaledToken {
        group: String,
        variant: String,
        property: String,
    },

    /// A breakpoint width is not finite or not wider than the one before it.
    #[error("breakpoint {index} ({width}) must be a finite width above the previous breakpoint")]
    UnorderedBreakpoints { index: usize, width: String },

    /// The raw theme literal could not be parsed.
    #[error("{}", parse_message(.path, .message))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    /// A theme key holds a value of the wrong shape.
    #[error("invalid definition for '{key}': {message}")]
    InvalidDefinition { key: String, message: String },

    /// The theme file could not be read.
    #[error("failed to load theme: {message}")]
    Load { message: String },
}

fn parse_message(path: &Option<PathBuf>, message: &str) -> String {
    match path {
        Some(p) => format!("failed to parse theme {}: {}", p.display(), message),
        None => format!("failed to parse theme: {}", message),
    }
}

/// Per-property error raised while resolving or checking a style description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The property only accepts theme values and the literal matches no token.
    #[error("'{property}' only accepts values from the '{scale}' scale, got '{value}'")]
    ThemeValueRequired {
        property: String,
        scale: String,
        value: String,
    },

    /// Theme-only mode is global and the property has no scale to draw from.
    #[error("'{property}' only accepts theme values but has no scale, got '{value}'")]
    ThemeValueRequiredNoScale { property: String, value: String },

    /// An explicit token reference names a token that does not exist.
    #[error("unknown token '{token}' for '{property}' in scale '{scale}'")]
    UnknownToken {
        property: String,
        scale: String,
        token: String,
    },

    /// A theme function returned another theme function.
    #[error("theme function for '{property}' returned another theme function")]
    NestedThemeFn { property: String },

    /// A literal is not a valid value for the property's platform type.
    #[error("'{value}' is not a valid {expected} for '{property}'")]
    LiteralNotAllowed {
        property: String,
        expected: &'static str,
        value: String,
    },
}

impl ResolveError {
    /// Returns the property (as authored) the error belongs to.
    pub fn property(&self) -> &str {
        match self {
            ResolveError::ThemeValueRequired { property, .. }
            | ResolveError::ThemeValueRequiredNoScale { property, .. }
            | ResolveError::UnknownToken { property, .. }
            | ResolveError::NestedThemeFn { property }
            | ResolveError::LiteralNotAllowed { property, .. } => property,
        }
    }
}

/// Result type for theme construction.
pub type Result<T> = std::result::Result<T, ThemeError>;
