//! Raw theme literal parsing.
//!
//! Walks a YAML (or JSON, parsed into the same value model) theme literal
//! and feeds a [`ThemeBuilder`]. Top-level keys are classified as:
//!
//! - reserved: `name`, `breakpoints`, `types`, `aliases`, `scaleMap`, `variants`
//! - ignored: framework settings such as `useBodyStyles`
//! - variant groups: the well-known keys in [`VARIANT_GROUP_KEYS`]
//!   (`shadows` and `textShadows` are also scales)
//! - scales: everything else

use crate::error::{Result, ThemeError};
use crate::style::Sx;
use crate::value::yaml_key;

use super::defaults::{FRAGMENT_SCALES, IGNORED_KEYS, VARIANT_GROUP_KEYS};
use super::flags::ThemeFlags;
use super::scale::Scale;
use super::theme::{ThemeBuilder, VariantGroup};

/// Parses a theme literal into a builder. Validation happens in `build`.
pub(crate) fn parse_theme(root: &serde_yaml::Value) -> Result<ThemeBuilder> {
    let map = root
        .as_mapping()
        .ok_or_else(|| invalid("<root>", "theme must be a mapping"))?;

    let mut builder = ThemeBuilder::new();
    for (key, value) in map {
        let key = key
            .as_str()
            .ok_or_else(|| invalid("<root>", format!("theme keys must be strings, got {:?}", key)))?;

        match key {
            "name" => {
                let name = value
                    .as_str()
                    .ok_or_else(|| invalid(key, "expected a string"))?;
                builder = builder.name(name);
            }
            "breakpoints" => builder = builder.breakpoints(parse_breakpoints(value)?),
            "types" => builder = builder.flags(ThemeFlags::from_yaml(value)?),
            "aliases" => {
                for (alias, property) in parse_string_map(key, value)? {
                    builder = builder.alias(alias, property);
                }
            }
            "scaleMap" => {
                for (property, scale) in parse_string_map(key, value)? {
                    builder = builder.map_property(property, scale);
                }
            }
            "variants" => {
                let groups = value
                    .as_mapping()
                    .ok_or_else(|| invalid(key, "expected a mapping of variant groups"))?;
                for (group, variants) in groups {
                    let group = yaml_key(group)
                        .ok_or_else(|| invalid(key, "variant group names must be strings"))?;
                    let parsed = parse_variant_group(&group, variants, false)?;
                    builder = builder.variant_group(group, parsed);
                }
            }
            k if IGNORED_KEYS.contains(&k) => {
                tracing::debug!(key = k, "Ignoring framework theme key");
            }
            k => {
                let is_group = VARIANT_GROUP_KEYS.contains(&k);
                let is_fragment_scale = FRAGMENT_SCALES.contains(&k);
                if is_group {
                    builder = builder.variant_group(k, parse_variant_group(k, value, is_fragment_scale)?);
                }
                if !is_group || is_fragment_scale {
                    let scale = Scale::from_yaml(value)
                        .ok_or_else(|| invalid(k, "scale must be a mapping or a sequence"))?;
                    builder = builder.scale(k, scale);
                }
            }
        }
    }
    Ok(builder)
}

fn parse_breakpoints(value: &serde_yaml::Value) -> Result<Vec<f64>> {
    let seq = value
        .as_sequence()
        .ok_or_else(|| invalid("breakpoints", "expected a sequence of widths"))?;
    seq.iter()
        .map(|width| {
            parse_width(width).ok_or_else(|| {
                invalid("breakpoints", format!("invalid breakpoint width {:?}", width))
            })
        })
        .collect()
}

/// Parses a width in pixels: a number, or a string with `px`, `em` or `rem`.
///
/// `em` and `rem` assume a 16px root font size.
fn parse_width(value: &serde_yaml::Value) -> Option<f64> {
    match value {
        serde_yaml::Value::Number(n) => n.as_f64(),
        serde_yaml::Value::String(s) => {
            let s = s.trim();
            let (number, factor) = if let Some(n) = s.strip_suffix("rem") {
                (n, 16.0)
            } else if let Some(n) = s.strip_suffix("em") {
                (n, 16.0)
            } else if let Some(n) = s.strip_suffix("px") {
                (n, 1.0)
            } else {
                (s, 1.0)
            };
            number.trim().parse::<f64>().ok().map(|n| n * factor)
        }
        _ => None,
    }
}

fn parse_string_map(key: &str, value: &serde_yaml::Value) -> Result<Vec<(String, String)>> {
    let map = value
        .as_mapping()
        .ok_or_else(|| invalid(key, "expected a mapping of names"))?;
    map.iter()
        .map(|(k, v)| {
            let name = yaml_key(k).ok_or_else(|| invalid(key, "names must be strings"))?;
            let target = v
                .as_str()
                .ok_or_else(|| invalid(key, format!("'{}' must map to a string", name)))?;
            Ok((name, target.to_string()))
        })
        .collect()
}

/// Parses `{ name: Sx }`. With `lenient`, non-mapping entries (string
/// shadows meant only as scale tokens) are skipped instead of rejected.
fn parse_variant_group(
    group: &str,
    value: &serde_yaml::Value,
    lenient: bool,
) -> Result<VariantGroup> {
    let Some(map) = value.as_mapping() else {
        if lenient {
            return Ok(VariantGroup::new());
        }
        return Err(invalid(group, "variant group must be a mapping"));
    };

    let mut variants = VariantGroup::new();
    for (name, fragment) in map {
        let name = yaml_key(name)
            .ok_or_else(|| invalid(group, "variant names must be strings"))?;
        match Sx::from_yaml_value(fragment) {
            Some(sx) => {
                variants.insert(name, sx);
            }
            None if lenient => {}
            None => {
                return Err(invalid(
                    &format!("{}.{}", group, name),
                    "variant must be a mapping of style properties",
                ))
            }
        }
    }
    Ok(variants)
}

fn invalid(key: &str, message: impl Into<String>) -> ThemeError {
    ThemeError::InvalidDefinition {
        key: key.to_string(),
        message: message.into(),
    }
}
