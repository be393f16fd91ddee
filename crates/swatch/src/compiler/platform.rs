//! Native value types of style properties.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::value::StyleValue;

/// The value type a style property takes on the target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformType {
    Number,
    /// A length: a number, or a string such as `"50%"`.
    Dimension,
    Color,
    /// One of a fixed set of keywords.
    Keyword(&'static [&'static str]),
    /// A list of transform objects.
    Transform,
    /// A nested object such as `shadowOffset`.
    Object,
    Text,
    Any,
}

impl PlatformType {
    /// A human-readable name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            PlatformType::Number => "number",
            PlatformType::Dimension => "dimension",
            PlatformType::Color => "color",
            PlatformType::Keyword(_) => "keyword",
            PlatformType::Transform => "transform",
            PlatformType::Object => "object",
            PlatformType::Text => "string",
            PlatformType::Any => "value",
        }
    }

    /// Whether `value` is assignable to this type.
    ///
    /// Without `native_only` the web-compatible forms are allowed as well:
    /// any CSS string for numbers, dimensions and keywords, and transform
    /// strings. With it, dimension strings must be percentages (or `auto`),
    /// keywords must come from the list and transforms must be lists.
    pub fn accepts(&self, value: &StyleValue, native_only: bool) -> bool {
        match (self, value) {
            (PlatformType::Any, _) => true,
            (PlatformType::Number, v) if v.is_number() => true,
            (PlatformType::Number, StyleValue::Str(_)) => !native_only,
            (PlatformType::Dimension, v) if v.is_number() => true,
            (PlatformType::Dimension, StyleValue::Str(s)) => {
                !native_only || s == "auto" || is_percentage(s)
            }
            (PlatformType::Color, StyleValue::Str(_)) => true,
            (PlatformType::Keyword(words), StyleValue::Str(s)) => {
                !native_only || words.contains(&s.as_str())
            }
            (PlatformType::Transform, StyleValue::List(_)) => true,
            (PlatformType::Transform, StyleValue::Str(_)) => !native_only,
            (PlatformType::Object, StyleValue::Object(_)) => true,
            (PlatformType::Text, StyleValue::Str(_)) => true,
            _ => false,
        }
    }
}

fn is_percentage(s: &str) -> bool {
    s.strip_suffix('%')
        .is_some_and(|n| n.trim().parse::<f64>().is_ok())
}

const FLEX_DIRECTION: &[&str] = &["row", "row-reverse", "column", "column-reverse"];
const FLEX_WRAP: &[&str] = &["wrap", "nowrap", "wrap-reverse"];
const JUSTIFY: &[&str] = &[
    "flex-start",
    "flex-end",
    "center",
    "space-between",
    "space-around",
    "space-evenly",
];
const ALIGN: &[&str] = &["auto", "flex-start", "flex-end", "center", "stretch", "baseline"];
const ALIGN_CONTENT: &[&str] = &[
    "flex-start",
    "flex-end",
    "center",
    "stretch",
    "space-between",
    "space-around",
];
const POSITION: &[&str] = &["absolute", "relative"];
const DISPLAY: &[&str] = &["none", "flex"];
const OVERFLOW: &[&str] = &["visible", "hidden", "scroll"];
const DIRECTION: &[&str] = &["inherit", "ltr", "rtl"];
const BORDER_STYLE: &[&str] = &["solid", "dotted", "dashed"];
const FONT_STYLE: &[&str] = &["normal", "italic"];
const FONT_WEIGHT: &[&str] = &[
    "normal", "bold", "100", "200", "300", "400", "500", "600", "700", "800", "900",
];
const TEXT_ALIGN: &[&str] = &["auto", "left", "right", "center", "justify"];
const TEXT_TRANSFORM: &[&str] = &["none", "uppercase", "lowercase", "capitalize"];
const TEXT_DECORATION_LINE: &[&str] = &[
    "none",
    "underline",
    "line-through",
    "underline line-through",
];
const BACKFACE: &[&str] = &["visible", "hidden"];

/// Known native style properties and their value types.
static CATALOG: Lazy<HashMap<&'static str, PlatformType>> = Lazy::new(|| {
    use PlatformType::*;

    let mut map = HashMap::new();
    let dimensions = [
        "width", "height", "minWidth", "maxWidth", "minHeight", "maxHeight", "top", "right",
        "bottom", "left", "start", "end", "flexBasis", "margin", "marginTop", "marginRight",
        "marginBottom", "marginLeft", "marginStart", "marginEnd", "marginHorizontal",
        "marginVertical", "padding", "paddingTop", "paddingRight", "paddingBottom",
        "paddingLeft", "paddingStart", "paddingEnd", "paddingHorizontal", "paddingVertical",
    ];
    for property in dimensions {
        map.insert(property, Dimension);
    }
    let numbers = [
        "flex", "flexGrow", "flexShrink", "aspectRatio", "zIndex", "opacity", "gap", "rowGap",
        "columnGap", "borderWidth", "borderTopWidth", "borderRightWidth", "borderBottomWidth",
        "borderLeftWidth", "borderStartWidth", "borderEndWidth", "borderRadius",
        "borderTopLeftRadius", "borderTopRightRadius", "borderBottomLeftRadius",
        "borderBottomRightRadius", "fontSize", "lineHeight", "letterSpacing", "shadowOpacity",
        "shadowRadius", "elevation", "textShadowRadius",
    ];
    for property in numbers {
        map.insert(property, Number);
    }
    let colors = [
        "color", "backgroundColor", "borderColor", "borderTopColor", "borderRightColor",
        "borderBottomColor", "borderLeftColor", "borderStartColor", "borderEndColor",
        "shadowColor", "textShadowColor", "textDecorationColor", "tintColor", "overlayColor",
    ];
    for property in colors {
        map.insert(property, Color);
    }
    let keywords: [(&str, &'static [&'static str]); 18] = [
        ("flexDirection", FLEX_DIRECTION),
        ("flexWrap", FLEX_WRAP),
        ("justifyContent", JUSTIFY),
        ("alignItems", ALIGN),
        ("alignSelf", ALIGN),
        ("alignContent", ALIGN_CONTENT),
        ("position", POSITION),
        ("display", DISPLAY),
        ("overflow", OVERFLOW),
        ("direction", DIRECTION),
        ("borderStyle", BORDER_STYLE),
        ("fontStyle", FONT_STYLE),
        ("fontWeight", FONT_WEIGHT),
        ("textAlign", TEXT_ALIGN),
        ("textTransform", TEXT_TRANSFORM),
        ("textDecorationLine", TEXT_DECORATION_LINE),
        ("textDecorationStyle", BORDER_STYLE),
        ("backfaceVisibility", BACKFACE),
    ];
    for (property, words) in keywords {
        map.insert(property, Keyword(words));
    }
    map.insert("transform", Transform);
    map.insert("shadowOffset", Object);
    map.insert("textShadowOffset", Object);
    map.insert("fontFamily", Text);
    map
});

/// Returns the platform type of a canonical property. Unknown properties
/// accept anything.
pub fn platform_type(property: &str) -> PlatformType {
    CATALOG.get(property).copied().unwrap_or(PlatformType::Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_catalog_lookup() {
        assert_eq!(platform_type("width"), PlatformType::Dimension);
        assert_eq!(platform_type("color"), PlatformType::Color);
        assert_eq!(platform_type("flexDirection"), PlatformType::Keyword(FLEX_DIRECTION));
        assert_eq!(platform_type("someFutureProp"), PlatformType::Any);
    }

    #[test]
    fn test_dimension_native_only() {
        let t = PlatformType::Dimension;
        assert!(t.accepts(&"50%".into(), true));
        assert!(t.accepts(&"auto".into(), true));
        assert!(t.accepts(&10.into(), true));
        assert!(!t.accepts(&"10vh".into(), true));
        assert!(t.accepts(&"10vh".into(), false));
        assert!(!t.accepts(&true.into(), false));
    }

    #[test]
    fn test_keyword() {
        let t = platform_type("flexDirection");
        assert!(t.accepts(&"row".into(), true));
        assert!(!t.accepts(&"sideways".into(), true));
        assert!(t.accepts(&"sideways".into(), false));
        assert!(!t.accepts(&1.into(), false));
    }

    #[test]
    fn test_transform() {
        let list = StyleValue::List(vec![StyleValue::Object(BTreeMap::from([(
            "rotate".to_string(),
            StyleValue::from("45deg"),
        )]))]);
        assert!(PlatformType::Transform.accepts(&list, true));
        assert!(!PlatformType::Transform.accepts(&"rotate(45deg)".into(), true));
        assert!(PlatformType::Transform.accepts(&"rotate(45deg)".into(), false));
    }

    #[test]
    fn test_number_and_object() {
        assert!(PlatformType::Number.accepts(&1.5.into(), true));
        assert!(!PlatformType::Number.accepts(&"1px".into(), true));
        assert!(PlatformType::Object.accepts(&StyleValue::Object(BTreeMap::new()), true));
        assert!(!PlatformType::Object.accepts(&"x".into(), false));
    }
}
