use crate::context::TransformContext;
use crate::error::GenerateResult;
use dartforge_registry::PropValue;
use std::collections::HashMap;
use std::sync::Arc;

/// A type-tagged transformer converting a raw property value into Dart
/// source text.
///
/// `validate` is invoked before `transform`; a handler may assume it only
/// sees shapes it accepted. Handlers are stateless and shared across
/// concurrent generation runs.
pub trait PropertyHandler: Send + Sync {
    fn transform(&self, value: &PropValue, ctx: &mut TransformContext<'_, '_>)
        -> GenerateResult<String>;

    fn validate(&self, value: &PropValue) -> bool;
}

/// Registry mapping a property type tag to its handler.
///
/// Exactly one entry per tag; re-registration overwrites (last writer wins).
/// `resolve` never fails: unknown tags get the designated raw fallback
/// handler, which renders values by literal interpolation so unfamiliar
/// property shapes still produce output instead of aborting the run.
pub struct PropertyHandlerRegistry {
    handlers: HashMap<String, Arc<dyn PropertyHandler>>,
    raw: Arc<dyn PropertyHandler>,
}

impl PropertyHandlerRegistry {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
            raw: Arc::new(RawPropertyHandler),
        }
    }

    /// Registry pre-populated with the builtin handler set.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register("string", Arc::new(StringPropertyHandler));
        registry.register("int", Arc::new(NumberPropertyHandler { double: false }));
        registry.register("double", Arc::new(NumberPropertyHandler { double: true }));
        registry.register("bool", Arc::new(BoolPropertyHandler));
        registry.register("color", Arc::new(ColorPropertyHandler));
        registry.register("edge_insets", Arc::new(EdgeInsetsPropertyHandler));
        registry.register("alignment", Arc::new(AlignmentPropertyHandler));
        registry.register("enum", Arc::new(EnumPropertyHandler));
        registry.register("text_style", Arc::new(TextStylePropertyHandler));
        registry.register("duration", Arc::new(DurationPropertyHandler));
        registry.register("map", Arc::new(MapPropertyHandler));
        registry.register("widget", Arc::new(WidgetPropertyHandler));
        registry.register("widget_list", Arc::new(WidgetListPropertyHandler));
        registry.register("raw", Arc::new(RawPropertyHandler));
        registry
    }

    pub fn register(&mut self, tag: impl Into<String>, handler: Arc<dyn PropertyHandler>) {
        self.handlers.insert(tag.into(), handler);
    }

    pub fn resolve(&self, tag: &str) -> Arc<dyn PropertyHandler> {
        self.handlers
            .get(tag)
            .cloned()
            .unwrap_or_else(|| self.raw.clone())
    }

    pub fn raw_fallback(&self) -> Arc<dyn PropertyHandler> {
        self.raw.clone()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.handlers.contains_key(tag)
    }
}

// ---------------------------------------------------------------------------
// Shared rendering helpers

/// Dart double literal: integral values get a `.0` suffix.
pub(crate) fn dart_double(value: &PropValue) -> Option<String> {
    match value {
        PropValue::Int(i) => Some(format!("{}.0", i)),
        PropValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(format!("{:.1}", f)),
        PropValue::Float(f) => Some(f.to_string()),
        _ => None,
    }
}

fn dart_int(value: &PropValue) -> Option<String> {
    match value {
        PropValue::Int(i) => Some(i.to_string()),
        PropValue::Float(f) if f.fract() == 0.0 && f.is_finite() => {
            Some((*f as i64).to_string())
        }
        _ => None,
    }
}

fn is_number(value: &PropValue) -> bool {
    matches!(value, PropValue::Int(_) | PropValue::Float(_))
}

/// Single-quoted Dart string literal with embedded quotes escaped.
pub(crate) fn quote_dart_string(s: &str) -> String {
    let escaped = s
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n");
    format!("'{}'", escaped)
}

/// Best-effort literal rendering for values no handler claims. Strings pass
/// through verbatim, nested widgets degrade to an empty constructor call.
fn raw_scalar(value: &PropValue) -> String {
    match value {
        PropValue::Null => "null".to_string(),
        PropValue::Bool(b) => b.to_string(),
        PropValue::Int(i) => i.to_string(),
        PropValue::Float(f) => f.to_string(),
        PropValue::String(s) => s.clone(),
        PropValue::List(items) => {
            let rendered: Vec<String> = items.iter().map(raw_scalar).collect();
            format!("[{}]", rendered.join(", "))
        }
        PropValue::Map(map) => {
            let rendered: Vec<String> = map
                .iter()
                .map(|(k, v)| {
                    let value = match v {
                        PropValue::String(s) => quote_dart_string(s),
                        other => raw_scalar(other),
                    };
                    format!("{}: {}", quote_dart_string(k), value)
                })
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
        PropValue::Widget(w) => format!("{}()", w.widget_type),
    }
}

// ---------------------------------------------------------------------------
// Color

const NAMED_COLORS: &[(&str, &str)] = &[
    ("red", "Colors.red"),
    ("pink", "Colors.pink"),
    ("purple", "Colors.purple"),
    ("deeppurple", "Colors.deepPurple"),
    ("indigo", "Colors.indigo"),
    ("blue", "Colors.blue"),
    ("lightblue", "Colors.lightBlue"),
    ("cyan", "Colors.cyan"),
    ("teal", "Colors.teal"),
    ("green", "Colors.green"),
    ("lightgreen", "Colors.lightGreen"),
    ("lime", "Colors.lime"),
    ("yellow", "Colors.yellow"),
    ("amber", "Colors.amber"),
    ("orange", "Colors.orange"),
    ("deeporange", "Colors.deepOrange"),
    ("brown", "Colors.brown"),
    ("grey", "Colors.grey"),
    ("gray", "Colors.grey"),
    ("bluegrey", "Colors.blueGrey"),
    ("black", "Colors.black"),
    ("white", "Colors.white"),
    ("transparent", "Colors.transparent"),
];

fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .collect()
}

fn named_color(name: &str) -> Option<&'static str> {
    let normalized = normalize_name(name);
    NAMED_COLORS
        .iter()
        .find(|(key, _)| *key == normalized)
        .map(|(_, dart)| *dart)
}

/// Heuristic used for undeclared properties: does this string look like a
/// color value?
pub(crate) fn looks_like_color(s: &str) -> bool {
    s.starts_with('#') || s.starts_with("0x") || named_color(s).is_some()
}

fn color_component(map: &indexmap::IndexMap<String, PropValue>, key: &str) -> Option<String> {
    map.get(key).and_then(dart_int)
}

/// Convert a color value to Dart, shared by the color and text style
/// handlers. Returns `None` for shapes outside the color contract.
pub(crate) fn dart_color(value: &PropValue) -> Option<String> {
    match value {
        PropValue::String(s) => {
            if s.starts_with("Colors.") {
                return Some(s.clone());
            }
            if let Some(named) = named_color(s) {
                return Some(named.to_string());
            }
            if let Some(hex) = s.strip_prefix('#') {
                if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Some(format!("Color(0xFF{})", hex));
                }
                return None;
            }
            if let Some(hex) = s.strip_prefix("0x") {
                if !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Some(format!("Color({})", s));
                }
            }
            None
        }
        PropValue::Map(map) => {
            let (r, g, b, a) = if map.contains_key("r") {
                (
                    color_component(map, "r")?,
                    color_component(map, "g")?,
                    color_component(map, "b")?,
                    color_component(map, "a"),
                )
            } else if map.contains_key("red") {
                (
                    color_component(map, "red")?,
                    color_component(map, "green")?,
                    color_component(map, "blue")?,
                    color_component(map, "alpha"),
                )
            } else {
                return None;
            };
            let a = a.unwrap_or_else(|| "255".to_string());
            Some(format!("Color.fromARGB({}, {}, {}, {})", a, r, g, b))
        }
        _ => None,
    }
}

fn color_map_keys_valid(map: &indexmap::IndexMap<String, PropValue>) -> bool {
    if map.contains_key("r") {
        map.keys().all(|k| matches!(k.as_str(), "r" | "g" | "b" | "a"))
    } else if map.contains_key("red") {
        map.keys()
            .all(|k| matches!(k.as_str(), "red" | "green" | "blue" | "alpha"))
    } else {
        false
    }
}

pub struct ColorPropertyHandler;

impl PropertyHandler for ColorPropertyHandler {
    fn transform(
        &self,
        value: &PropValue,
        _ctx: &mut TransformContext<'_, '_>,
    ) -> GenerateResult<String> {
        Ok(dart_color(value).unwrap_or_else(|| raw_scalar(value)))
    }

    fn validate(&self, value: &PropValue) -> bool {
        match value {
            PropValue::Map(map) => color_map_keys_valid(map) && dart_color(value).is_some(),
            _ => dart_color(value).is_some(),
        }
    }
}

// ---------------------------------------------------------------------------
// EdgeInsets

const EDGE_KEYS: &[&str] = &[
    "all",
    "symmetric",
    "horizontal",
    "vertical",
    "left",
    "top",
    "right",
    "bottom",
];

pub struct EdgeInsetsPropertyHandler;

impl EdgeInsetsPropertyHandler {
    fn symmetric(map: &indexmap::IndexMap<String, PropValue>) -> String {
        let h = map
            .get("horizontal")
            .and_then(dart_double)
            .unwrap_or_else(|| "0.0".to_string());
        let v = map
            .get("vertical")
            .and_then(dart_double)
            .unwrap_or_else(|| "0.0".to_string());
        format!("EdgeInsets.symmetric(horizontal: {}, vertical: {})", h, v)
    }

    fn from_ltrb(map: &indexmap::IndexMap<String, PropValue>) -> String {
        let side = |key: &str| {
            map.get(key)
                .and_then(dart_double)
                .unwrap_or_else(|| "0.0".to_string())
        };
        format!(
            "EdgeInsets.fromLTRB({}, {}, {}, {})",
            side("left"),
            side("top"),
            side("right"),
            side("bottom")
        )
    }
}

impl PropertyHandler for EdgeInsetsPropertyHandler {
    fn transform(
        &self,
        value: &PropValue,
        _ctx: &mut TransformContext<'_, '_>,
    ) -> GenerateResult<String> {
        let rendered = match value {
            PropValue::Int(_) | PropValue::Float(_) => dart_double(value)
                .map(|n| format!("EdgeInsets.all({})", n))
                .unwrap_or_else(|| raw_scalar(value)),
            PropValue::Map(map) => {
                if let Some(all) = map.get("all") {
                    dart_double(all)
                        .map(|n| format!("EdgeInsets.all({})", n))
                        .unwrap_or_else(|| raw_scalar(value))
                } else if let Some(PropValue::Map(symmetric)) = map.get("symmetric") {
                    Self::symmetric(symmetric)
                } else if map.contains_key("horizontal") || map.contains_key("vertical") {
                    Self::symmetric(map)
                } else {
                    Self::from_ltrb(map)
                }
            }
            _ => raw_scalar(value),
        };
        Ok(rendered)
    }

    fn validate(&self, value: &PropValue) -> bool {
        match value {
            PropValue::Int(_) | PropValue::Float(_) => true,
            PropValue::Map(map) => {
                if map.is_empty() || !map.keys().all(|k| EDGE_KEYS.contains(&k.as_str())) {
                    return false;
                }
                if let Some(all) = map.get("all") {
                    return map.len() == 1 && is_number(all);
                }
                if let Some(symmetric) = map.get("symmetric") {
                    let inner_ok = matches!(symmetric, PropValue::Map(inner)
                        if !inner.is_empty()
                            && inner.keys().all(|k| k == "horizontal" || k == "vertical")
                            && inner.values().all(is_number));
                    return map.len() == 1 && inner_ok;
                }
                let symmetric_keys = map.keys().any(|k| k == "horizontal" || k == "vertical");
                let side_keys = map
                    .keys()
                    .any(|k| matches!(k.as_str(), "left" | "top" | "right" | "bottom"));
                // one addressing scheme at a time
                if symmetric_keys && side_keys {
                    return false;
                }
                map.values().all(is_number)
            }
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Scalars

pub struct StringPropertyHandler;

impl PropertyHandler for StringPropertyHandler {
    fn transform(
        &self,
        value: &PropValue,
        _ctx: &mut TransformContext<'_, '_>,
    ) -> GenerateResult<String> {
        Ok(match value {
            PropValue::String(s) => quote_dart_string(s),
            other => raw_scalar(other),
        })
    }

    fn validate(&self, value: &PropValue) -> bool {
        matches!(value, PropValue::String(_))
    }
}

pub struct NumberPropertyHandler {
    pub double: bool,
}

impl PropertyHandler for NumberPropertyHandler {
    fn transform(
        &self,
        value: &PropValue,
        _ctx: &mut TransformContext<'_, '_>,
    ) -> GenerateResult<String> {
        let rendered = if self.double {
            dart_double(value)
        } else {
            dart_int(value)
        };
        Ok(rendered.unwrap_or_else(|| raw_scalar(value)))
    }

    fn validate(&self, value: &PropValue) -> bool {
        if self.double {
            is_number(value)
        } else {
            dart_int(value).is_some()
        }
    }
}

pub struct BoolPropertyHandler;

impl PropertyHandler for BoolPropertyHandler {
    fn transform(
        &self,
        value: &PropValue,
        _ctx: &mut TransformContext<'_, '_>,
    ) -> GenerateResult<String> {
        Ok(match value {
            PropValue::Bool(b) => b.to_string(),
            other => raw_scalar(other),
        })
    }

    fn validate(&self, value: &PropValue) -> bool {
        matches!(value, PropValue::Bool(_))
    }
}

// ---------------------------------------------------------------------------
// Enum

const COMMON_ENUMS: &[(&str, &[&str])] = &[
    (
        "MainAxisAlignment",
        &["start", "end", "center", "spaceBetween", "spaceAround", "spaceEvenly"],
    ),
    (
        "CrossAxisAlignment",
        &["start", "end", "center", "stretch", "baseline"],
    ),
    (
        "TextAlign",
        &["left", "right", "center", "justify", "start", "end"],
    ),
    (
        "BoxFit",
        &["fill", "contain", "cover", "fitWidth", "fitHeight", "none", "scaleDown"],
    ),
    (
        "Alignment",
        &[
            "topLeft",
            "topCenter",
            "topRight",
            "centerLeft",
            "center",
            "centerRight",
            "bottomLeft",
            "bottomCenter",
            "bottomRight",
        ],
    ),
];

pub struct EnumPropertyHandler;

impl PropertyHandler for EnumPropertyHandler {
    fn transform(
        &self,
        value: &PropValue,
        ctx: &mut TransformContext<'_, '_>,
    ) -> GenerateResult<String> {
        let s = match value.as_str() {
            Some(s) => s,
            None => return Ok(raw_scalar(value)),
        };

        // already qualified
        if s.contains('.') {
            return Ok(s.to_string());
        }

        let enum_class = ctx
            .property
            .and_then(|p| p.dart_type.as_deref())
            .map(|t| t.split('.').next().unwrap_or(t).to_string());

        let enum_class = match enum_class {
            Some(class) => class,
            None => return Ok(s.to_string()),
        };

        let declared = ctx.property.and_then(|p| p.allowed_values.as_deref());
        let common = COMMON_ENUMS
            .iter()
            .find(|(class, _)| *class == enum_class)
            .map(|(_, values)| *values);

        if let Some(allowed) = declared {
            if let Some(matched) = allowed.iter().find(|v| v.eq_ignore_ascii_case(s)) {
                return Ok(format!("{}.{}", enum_class, matched));
            }
        } else if let Some(allowed) = common {
            if let Some(matched) = allowed.iter().find(|v| v.eq_ignore_ascii_case(s)) {
                return Ok(format!("{}.{}", enum_class, matched));
            }
        }

        // unrecognized values pass through under the declared class, which
        // keeps camelCase additions working without a registry update
        Ok(format!("{}.{}", enum_class, s))
    }

    fn validate(&self, value: &PropValue) -> bool {
        matches!(value, PropValue::String(_))
    }
}

// ---------------------------------------------------------------------------
// Alignment

const NAMED_ALIGNMENTS: &[(&str, &str)] = &[
    ("topleft", "Alignment.topLeft"),
    ("topcenter", "Alignment.topCenter"),
    ("topright", "Alignment.topRight"),
    ("centerleft", "Alignment.centerLeft"),
    ("center", "Alignment.center"),
    ("centerright", "Alignment.centerRight"),
    ("bottomleft", "Alignment.bottomLeft"),
    ("bottomcenter", "Alignment.bottomCenter"),
    ("bottomright", "Alignment.bottomRight"),
];

fn named_alignment(name: &str) -> Option<&'static str> {
    let normalized = normalize_name(name);
    NAMED_ALIGNMENTS
        .iter()
        .find(|(key, _)| *key == normalized)
        .map(|(_, dart)| *dart)
}

pub struct AlignmentPropertyHandler;

impl PropertyHandler for AlignmentPropertyHandler {
    fn transform(
        &self,
        value: &PropValue,
        _ctx: &mut TransformContext<'_, '_>,
    ) -> GenerateResult<String> {
        let rendered = match value {
            PropValue::String(s) if s.starts_with("Alignment.") => s.clone(),
            PropValue::String(s) => named_alignment(s)
                .map(|a| a.to_string())
                .unwrap_or_else(|| raw_scalar(value)),
            PropValue::Map(map) => {
                let x = map
                    .get("x")
                    .and_then(dart_double)
                    .unwrap_or_else(|| "0.0".to_string());
                let y = map
                    .get("y")
                    .and_then(dart_double)
                    .unwrap_or_else(|| "0.0".to_string());
                format!("Alignment({}, {})", x, y)
            }
            other => raw_scalar(other),
        };
        Ok(rendered)
    }

    fn validate(&self, value: &PropValue) -> bool {
        match value {
            PropValue::String(s) => s.starts_with("Alignment.") || named_alignment(s).is_some(),
            PropValue::Map(map) => {
                !map.is_empty()
                    && map.keys().all(|k| k == "x" || k == "y")
                    && map.values().all(is_number)
            }
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// TextStyle

const TEXT_STYLE_KEYS: &[&str] = &[
    "fontSize",
    "fontWeight",
    "fontStyle",
    "color",
    "letterSpacing",
    "wordSpacing",
    "height",
];

pub struct TextStylePropertyHandler;

impl PropertyHandler for TextStylePropertyHandler {
    fn transform(
        &self,
        value: &PropValue,
        _ctx: &mut TransformContext<'_, '_>,
    ) -> GenerateResult<String> {
        let map = match value {
            PropValue::Map(map) => map,
            other => return Ok(raw_scalar(other)),
        };

        let mut props = Vec::new();
        if let Some(size) = map.get("fontSize").and_then(dart_double) {
            props.push(format!("fontSize: {}", size));
        }
        if let Some(weight) = map.get("fontWeight").and_then(PropValue::as_str) {
            let weight = if weight.starts_with("FontWeight.") {
                weight.to_string()
            } else {
                format!("FontWeight.{}", weight)
            };
            props.push(format!("fontWeight: {}", weight));
        }
        if let Some(style) = map.get("fontStyle").and_then(PropValue::as_str) {
            let style = if style.starts_with("FontStyle.") {
                style.to_string()
            } else {
                format!("FontStyle.{}", style)
            };
            props.push(format!("fontStyle: {}", style));
        }
        if let Some(color) = map.get("color").and_then(dart_color) {
            props.push(format!("color: {}", color));
        }
        for key in ["letterSpacing", "wordSpacing", "height"] {
            if let Some(n) = map.get(key).and_then(dart_double) {
                props.push(format!("{}: {}", key, n));
            }
        }

        if props.is_empty() {
            Ok("TextStyle()".to_string())
        } else {
            Ok(format!("TextStyle({})", props.join(", ")))
        }
    }

    fn validate(&self, value: &PropValue) -> bool {
        let map = match value {
            PropValue::Map(map) => map,
            _ => return false,
        };
        if !map.keys().all(|k| TEXT_STYLE_KEYS.contains(&k.as_str())) {
            return false;
        }
        map.iter().all(|(k, v)| match k.as_str() {
            "fontSize" | "letterSpacing" | "wordSpacing" | "height" => is_number(v),
            "fontWeight" | "fontStyle" => matches!(v, PropValue::String(_)),
            "color" => dart_color(v).is_some(),
            _ => false,
        })
    }
}

// ---------------------------------------------------------------------------
// Duration

pub struct DurationPropertyHandler;

impl PropertyHandler for DurationPropertyHandler {
    fn transform(
        &self,
        value: &PropValue,
        _ctx: &mut TransformContext<'_, '_>,
    ) -> GenerateResult<String> {
        let rendered = match value {
            PropValue::Int(_) | PropValue::Float(_) => dart_int(value)
                .map(|n| format!("Duration(milliseconds: {})", n))
                .unwrap_or_else(|| raw_scalar(value)),
            PropValue::Map(map) => {
                let unit = ["milliseconds", "seconds", "minutes"]
                    .iter()
                    .find_map(|unit| {
                        map.get(*unit)
                            .and_then(dart_int)
                            .map(|n| format!("Duration({}: {})", unit, n))
                    });
                unit.unwrap_or_else(|| raw_scalar(value))
            }
            other => raw_scalar(other),
        };
        Ok(rendered)
    }

    fn validate(&self, value: &PropValue) -> bool {
        match value {
            PropValue::Int(_) => true,
            PropValue::Float(f) => f.fract() == 0.0,
            PropValue::Map(map) => {
                map.len() == 1
                    && map.iter().all(|(k, v)| {
                        matches!(k.as_str(), "milliseconds" | "seconds" | "minutes")
                            && dart_int(v).is_some()
                    })
            }
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Map

pub struct MapPropertyHandler;

impl PropertyHandler for MapPropertyHandler {
    fn transform(
        &self,
        value: &PropValue,
        _ctx: &mut TransformContext<'_, '_>,
    ) -> GenerateResult<String> {
        let map = match value {
            PropValue::Map(map) => map,
            other => return Ok(raw_scalar(other)),
        };

        let entries: Vec<String> = map
            .iter()
            .map(|(k, v)| {
                let rendered = match v {
                    PropValue::String(s) => quote_dart_string(s),
                    other => raw_scalar(other),
                };
                format!("{}: {}", quote_dart_string(k), rendered)
            })
            .collect();
        Ok(format!("{{{}}}", entries.join(", ")))
    }

    fn validate(&self, value: &PropValue) -> bool {
        match value {
            PropValue::Map(map) => map.values().all(|v| {
                matches!(
                    v,
                    PropValue::Null
                        | PropValue::Bool(_)
                        | PropValue::Int(_)
                        | PropValue::Float(_)
                        | PropValue::String(_)
                )
            }),
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Widgets

pub struct WidgetPropertyHandler;

impl PropertyHandler for WidgetPropertyHandler {
    fn transform(
        &self,
        value: &PropValue,
        ctx: &mut TransformContext<'_, '_>,
    ) -> GenerateResult<String> {
        match value {
            PropValue::Widget(description) => ctx.generate_nested(description),
            // direct widget expression reference
            PropValue::String(s) => Ok(s.clone()),
            other => Ok(raw_scalar(other)),
        }
    }

    fn validate(&self, value: &PropValue) -> bool {
        matches!(value, PropValue::Widget(_) | PropValue::String(_))
    }
}

pub struct WidgetListPropertyHandler;

impl PropertyHandler for WidgetListPropertyHandler {
    fn transform(
        &self,
        value: &PropValue,
        ctx: &mut TransformContext<'_, '_>,
    ) -> GenerateResult<String> {
        let items = match value {
            PropValue::List(items) => items,
            other => return Ok(raw_scalar(other)),
        };

        let mut rendered = Vec::with_capacity(items.len());
        for item in items {
            match item {
                PropValue::Widget(description) => rendered.push(ctx.generate_nested(description)?),
                PropValue::String(s) => rendered.push(s.clone()),
                other => rendered.push(raw_scalar(other)),
            }
        }

        let joined = format!("[{}]", rendered.join(", "));
        ctx.record_items(rendered);
        Ok(joined)
    }

    fn validate(&self, value: &PropValue) -> bool {
        match value {
            PropValue::List(items) => items
                .iter()
                .all(|i| matches!(i, PropValue::Widget(_) | PropValue::String(_))),
            _ => false,
        }
    }
}

/// The designated fallback for unknown type tags: literal interpolation by
/// runtime shape. Nested widgets still delegate to the generator so
/// best-effort output stays composable.
pub struct RawPropertyHandler;

impl RawPropertyHandler {
    fn render(
        &self,
        value: &PropValue,
        ctx: &mut TransformContext<'_, '_>,
        quote_strings: bool,
    ) -> GenerateResult<String> {
        match value {
            PropValue::Widget(description) => ctx.generate_nested(description),
            PropValue::String(s) if quote_strings => Ok(quote_dart_string(s)),
            PropValue::List(items) => {
                let mut rendered = Vec::with_capacity(items.len());
                for item in items {
                    rendered.push(self.render(item, ctx, quote_strings)?);
                }
                Ok(format!("[{}]", rendered.join(", ")))
            }
            PropValue::Map(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (k, v) in map {
                    let rendered = self.render(v, ctx, true)?;
                    entries.push(format!("{}: {}", quote_dart_string(k), rendered));
                }
                Ok(format!("{{{}}}", entries.join(", ")))
            }
            other => Ok(raw_scalar(other)),
        }
    }
}

impl PropertyHandler for RawPropertyHandler {
    fn transform(
        &self,
        value: &PropValue,
        ctx: &mut TransformContext<'_, '_>,
    ) -> GenerateResult<String> {
        self.render(value, ctx, false)
    }

    fn validate(&self, _value: &PropValue) -> bool {
        true
    }
}
