//! Built-in alias and scale tables.
//!
//! Every theme starts from these; a theme literal's `aliases` and `scaleMap`
//! sections are merged on top.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Breakpoint widths used when a theme does not declare its own.
pub const DEFAULT_BREAKPOINTS: &[f64] = &[576.0, 768.0, 992.0, 1200.0];

/// Theme keys that hold variant groups rather than token scales.
pub const VARIANT_GROUP_KEYS: &[&str] = &[
    "alerts",
    "badges",
    "buttons",
    "cards",
    "forms",
    "grids",
    "images",
    "layout",
    "links",
    "messages",
    "shadows",
    "text",
    "textStyles",
    "styles",
    "textShadows",
];

/// Scales whose tokens are style fragments spread into the output.
pub const FRAGMENT_SCALES: &[&str] = &["shadows", "textShadows"];

/// Theme keys that configure the surrounding framework and carry no styles.
pub const IGNORED_KEYS: &[&str] = &[
    "customFonts",
    "useBodyStyles",
    "useLocalStorage",
    "useCustomProperties",
    "useColorSchemeMediaQuery",
];

pub(crate) static DEFAULT_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("bg", "backgroundColor"),
        ("m", "margin"),
        ("mt", "marginTop"),
        ("mr", "marginRight"),
        ("mb", "marginBottom"),
        ("ml", "marginLeft"),
        ("mx", "marginHorizontal"),
        ("my", "marginVertical"),
        ("p", "padding"),
        ("pt", "paddingTop"),
        ("pr", "paddingRight"),
        ("pb", "paddingBottom"),
        ("pl", "paddingLeft"),
        ("px", "paddingHorizontal"),
        ("py", "paddingVertical"),
    ])
});

pub(crate) static DEFAULT_SCALES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    let groups: &[(&str, &[&str])] = &[
        (
            "colors",
            &[
                "color",
                "backgroundColor",
                "borderColor",
                "borderTopColor",
                "borderBottomColor",
                "borderLeftColor",
                "borderRightColor",
                "borderStartColor",
                "borderEndColor",
                "caretColor",
                "columnRuleColor",
                "outlineColor",
                "fill",
                "stroke",
                "shadowColor",
                "textShadowColor",
                "textDecorationColor",
                "tintColor",
                "overlayColor",
                "placeholderTextColor",
                "selectionColor",
                "underlineColorAndroid",
            ],
        ),
        (
            "space",
            &[
                "margin",
                "marginTop",
                "marginRight",
                "marginBottom",
                "marginLeft",
                "marginStart",
                "marginEnd",
                "marginHorizontal",
                "marginVertical",
                "padding",
                "paddingTop",
                "paddingRight",
                "paddingBottom",
                "paddingLeft",
                "paddingStart",
                "paddingEnd",
                "paddingHorizontal",
                "paddingVertical",
                "gap",
                "rowGap",
                "columnGap",
                "gridGap",
                "gridRowGap",
                "gridColumnGap",
                "top",
                "right",
                "bottom",
                "left",
                "start",
                "end",
            ],
        ),
        ("fonts", &["fontFamily"]),
        ("fontSizes", &["fontSize"]),
        ("fontWeights", &["fontWeight"]),
        ("lineHeights", &["lineHeight"]),
        ("letterSpacings", &["letterSpacing"]),
        (
            "sizes",
            &[
                "width",
                "minWidth",
                "maxWidth",
                "height",
                "minHeight",
                "maxHeight",
                "flexBasis",
                "size",
            ],
        ),
        (
            "borders",
            &["border", "borderTop", "borderRight", "borderBottom", "borderLeft"],
        ),
        (
            "borderWidths",
            &[
                "borderWidth",
                "borderTopWidth",
                "borderRightWidth",
                "borderBottomWidth",
                "borderLeftWidth",
                "borderStartWidth",
                "borderEndWidth",
            ],
        ),
        ("borderStyles", &["borderStyle"]),
        (
            "radii",
            &[
                "borderRadius",
                "borderTopLeftRadius",
                "borderTopRightRadius",
                "borderBottomLeftRadius",
                "borderBottomRightRadius",
                "borderTopStartRadius",
                "borderTopEndRadius",
                "borderBottomStartRadius",
                "borderBottomEndRadius",
            ],
        ),
        ("shadows", &["boxShadow"]),
        ("textShadows", &["textShadow"]),
        ("zIndices", &["zIndex"]),
        ("opacities", &["opacity"]),
    ];
    for (scale, properties) in groups {
        for property in *properties {
            map.insert(*property, *scale);
        }
    }
    map
});
