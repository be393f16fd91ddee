//! Style resolution: from an authored [`Sx`] to flat per-breakpoint styles.
//!
//! For each property of a style description:
//!
//! 1. the `variant` key is replaced by its fragment, below the siblings
//! 2. theme functions are evaluated
//! 3. the value is expanded to one entry per breakpoint slot
//! 4. each slot is resolved against the theme
//! 5. shadow fragments are spread into the slot, below explicit properties
//!
//! Errors are local to a property. The property is left out of the slots
//! it failed in, siblings resolve normally, and each distinct error is
//! reported once.
//!
//! ```rust
//! use swatch::{resolve_sx, Descriptor, Scale, StyleValue, Sx, Theme};
//!
//! let theme = Theme::builder()
//!     .scale("colors", Scale::new().with("primary", "#07c"))
//!     .scale("space", Scale::from_values([0, 4, 8, 16]))
//!     .breakpoints([768.0])
//!     .build()
//!     .unwrap();
//!
//! let sx = Sx::new()
//!     .set("bg", "primary")
//!     .set("p", Descriptor::responsive([1, 3]));
//!
//! let resolution = resolve_sx(&sx, &theme);
//! assert!(resolution.is_ok());
//!
//! let [small, large] = resolution.styles() else { panic!() };
//! assert_eq!(small.get("backgroundColor"), Some(&StyleValue::from("#07c")));
//! assert_eq!(small.get("padding"), Some(&StyleValue::from(4)));
//! assert_eq!(large.get("padding"), Some(&StyleValue::from(16)));
//! ```

mod responsive;
mod style;
mod token;

pub use responsive::expand;
pub use style::{Resolution, ResolvedStyle};
pub use token::{evaluate, resolve, Resolved};

pub(crate) use token::{lookup, theme_value_required, unknown_token};

use std::borrow::Cow;
use std::ops::Range;

use crate::error::ResolveError;
use crate::style::{Descriptor, Entry, Sx, SxProp, VARIANT_KEY};
use crate::theme::Theme;
use crate::variant::lookup_path;

use token::{resolve_entry, Origin};

/// How deep `variant` keys inside variant fragments are followed.
const MAX_VARIANT_DEPTH: usize = 4;

/// Resolves a style description at every breakpoint slot.
pub fn resolve_sx(sx: &Sx, theme: &Theme) -> Resolution {
    let (styles, errors) = resolve_slots(sx, theme, 0..theme.breakpoint_count());
    Resolution { styles, errors }
}

/// Resolves a style description at one breakpoint slot.
///
/// Indices past the last slot clamp to it.
pub fn resolve_at(sx: &Sx, theme: &Theme, index: usize) -> (ResolvedStyle, Vec<ResolveError>) {
    let index = index.min(theme.breakpoint_count() - 1);
    let (mut styles, errors) = resolve_slots(sx, theme, index..index + 1);
    (styles.pop().unwrap_or_default(), errors)
}

/// Resolves a style prop, evaluating it first if it is a theme function.
pub fn resolve_prop(prop: &SxProp, theme: &Theme) -> Resolution {
    resolve_sx(&prop.evaluate(theme), theme)
}

/// Replaces the `variant` key with its fragment; the fragment sits below.
pub(crate) fn expand_variant_key<'a>(sx: &'a Sx, theme: &Theme) -> Cow<'a, Sx> {
    expand_variant_at(sx, theme, 0)
}

fn expand_variant_at<'a>(sx: &'a Sx, theme: &Theme, depth: usize) -> Cow<'a, Sx> {
    let Some(path) = sx.variant_path() else {
        return Cow::Borrowed(sx);
    };

    let mut own = sx.clone();
    own.remove(VARIANT_KEY);
    if depth >= MAX_VARIANT_DEPTH {
        tracing::debug!(variant = path, "Variant nesting too deep, ignoring");
        return Cow::Owned(own);
    }

    match lookup_path(theme, path) {
        Some(fragment) => {
            let base = expand_variant_at(fragment, theme, depth + 1).into_owned();
            Cow::Owned(base.merge(&own))
        }
        None => {
            tracing::debug!(variant = path, "Variant not found, skipping");
            Cow::Owned(own)
        }
    }
}

/// Per-slot output being assembled: fragments below, explicit values on top.
struct Slots {
    range: Range<usize>,
    spread: Vec<ResolvedStyle>,
    explicit: Vec<ResolvedStyle>,
    errors: Vec<ResolveError>,
}

impl Slots {
    fn new(range: Range<usize>) -> Self {
        let len = range.len();
        Self {
            range,
            spread: vec![ResolvedStyle::new(); len],
            explicit: vec![ResolvedStyle::new(); len],
            errors: Vec::new(),
        }
    }

    fn report(&mut self, error: ResolveError) {
        if !self.errors.contains(&error) {
            self.errors.push(error);
        }
    }

    /// Reports a failed property and clears what an earlier alias wrote for
    /// it in slot `out`, so the failed value omits the property.
    fn fail(&mut self, out: usize, canonical: &str, error: ResolveError) {
        self.explicit[out].remove(canonical);
        self.report(error);
    }

    fn finish(self) -> (Vec<ResolvedStyle>, Vec<ResolveError>) {
        let styles = self
            .spread
            .into_iter()
            .zip(self.explicit)
            .map(|(mut base, top)| {
                base.overlay(top);
                base
            })
            .collect();
        (styles, self.errors)
    }
}

fn resolve_slots(
    sx: &Sx,
    theme: &Theme,
    range: Range<usize>,
) -> (Vec<ResolvedStyle>, Vec<ResolveError>) {
    let sx = expand_variant_key(sx, theme);
    let mut slots = Slots::new(range);

    // Aliases first, so a canonical property written directly wins, even
    // when it fails and leaves the slot without the property.
    let (aliased, canonical): (Vec<_>, Vec<_>) = sx
        .iter()
        .filter(|(property, _)| *property != VARIANT_KEY)
        .partition(|(property, _)| theme.alias_of(property) != *property);

    for (property, descriptor) in aliased.into_iter().chain(canonical) {
        resolve_property(property, descriptor, theme, &mut slots);
    }
    slots.finish()
}

fn resolve_property(property: &str, descriptor: &Descriptor, theme: &Theme, slots: &mut Slots) {
    let (descriptor, origin) = match descriptor {
        Descriptor::ThemeFn(f) => match evaluate(property, f, theme) {
            Ok(d) => (Cow::Owned(d), Origin::Theme),
            Err(e) => {
                let canonical = theme.alias_of(property);
                for out in 0..slots.range.len() {
                    slots.explicit[out].remove(canonical);
                }
                slots.report(e);
                return;
            }
        },
        d => (Cow::Borrowed(d), Origin::Author),
    };

    let canonical = theme.alias_of(property);
    let entries = expand(&descriptor, theme.breakpoint_count());

    for (out, slot) in slots.range.clone().enumerate() {
        let Some(entry) = entries.get(slot).and_then(Option::as_ref) else {
            continue;
        };
        match resolve_entry(property, entry, theme, origin) {
            Ok(Resolved::Value(value)) => slots.explicit[out].insert(canonical, value),
            Ok(Resolved::Fragment(fragment)) => {
                for (inner, raw) in fragment {
                    let entry = Entry::Literal(raw);
                    match resolve_entry(&inner, &entry, theme, Origin::Theme) {
                        Ok(Resolved::Value(value)) => {
                            slots.spread[out].insert(theme.alias_of(&inner), value)
                        }
                        Ok(Resolved::Fragment(_)) => {
                            tracing::debug!(property = inner.as_str(), "Nested style fragment ignored");
                        }
                        Err(e) => slots.report(e),
                    }
                }
            }
            Err(e) => slots.fail(out, canonical, e),
        }
    }
}
