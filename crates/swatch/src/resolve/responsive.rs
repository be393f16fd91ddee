//! Responsive expansion.
//!
//! Turns one descriptor into exactly one entry per breakpoint slot. Slot 0
//! is the base; slot `n` applies from the `n`-th breakpoint width upward.
//!
//! | authored             | count | expanded                    |
//! |----------------------|-------|-----------------------------|
//! | `"red"`              | 3     | `red, red, red`             |
//! | `[red, ~, blue]`     | 4     | `red, red, blue, blue`      |
//! | `[~, blue]`          | 3     | `-, blue, blue`             |
//! | `[a, b, c, d, e]`    | 2     | `a, b`                      |
//!
//! A `None` slot means the property is absent at that breakpoint.

use crate::style::{Descriptor, Entry};

/// Expands `descriptor` to `count` slots.
///
/// Non-responsive values fill every slot. In a responsive value an empty
/// slot inherits the nearest set slot below it, the last entry carries past
/// the end, and entries beyond `count` are ignored. Theme functions must be
/// evaluated first and expand to nothing.
///
/// ```rust
/// use swatch::{expand, Descriptor, Entry};
///
/// let width = Descriptor::responsive_sparse([Some("100%"), None, Some("50%")]);
/// let slots = expand(&width, 4);
/// assert_eq!(slots[1], Some(Entry::from("100%")));
/// assert_eq!(slots[3], Some(Entry::from("50%")));
/// ```
pub fn expand(descriptor: &Descriptor, count: usize) -> Vec<Option<Entry>> {
    match descriptor {
        Descriptor::Literal(value) => vec![Some(Entry::Literal(value.clone())); count],
        Descriptor::Token(name) => vec![Some(Entry::Token(name.clone())); count],
        Descriptor::Responsive(entries) => {
            let mut last: Option<&Entry> = None;
            (0..count)
                .map(|slot| {
                    if let Some(Some(entry)) = entries.get(slot) {
                        last = Some(entry);
                    }
                    last.cloned()
                })
                .collect()
        }
        Descriptor::ThemeFn(_) => {
            tracing::debug!("Theme function reached expansion unevaluated");
            vec![None; count]
        }
    }
}
