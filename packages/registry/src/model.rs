use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// A runtime property value supplied in a widget description.
///
/// Values arrive as JSON; a JSON object carrying a `"type"` key deserializes
/// as a nested [`WidgetDescription`], any other object as a plain map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Widget(Box<WidgetDescription>),
    Map(IndexMap<String, PropValue>),
    List(Vec<PropValue>),
}

impl PropValue {
    /// Short shape name used in diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            PropValue::Null => "null",
            PropValue::Bool(_) => "bool",
            PropValue::Int(_) => "int",
            PropValue::Float(_) => "float",
            PropValue::String(_) => "string",
            PropValue::Widget(_) => "widget",
            PropValue::Map(_) => "map",
            PropValue::List(_) => "list",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PropValue::Null)
    }

    /// Render the value for error messages.
    pub fn render(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        PropValue::Bool(v)
    }
}

impl From<i64> for PropValue {
    fn from(v: i64) -> Self {
        PropValue::Int(v)
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        PropValue::Float(v)
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        PropValue::String(v.to_string())
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        PropValue::String(v)
    }
}

impl From<WidgetDescription> for PropValue {
    fn from(v: WidgetDescription) -> Self {
        PropValue::Widget(Box::new(v))
    }
}

/// Generation input: a widget type name plus its property values.
///
/// Descriptions have no identity beyond their structural position in the
/// tree; children are ordinary property values (`widget` / `widget_list`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetDescription {
    #[serde(rename = "type")]
    pub widget_type: String,

    #[serde(default)]
    pub properties: IndexMap<String, PropValue>,
}

impl WidgetDescription {
    pub fn new(widget_type: impl Into<String>) -> Self {
        Self {
            widget_type: widget_type.into(),
            properties: IndexMap::new(),
        }
    }

    /// Builder-style property insertion, mainly for tests and seeding.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }
}

/// Declared schema entry for one property of a widget type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    pub name: String,

    /// Type tag dispatched against the property handler registry
    /// (`string`, `double`, `color`, `edge_insets`, `widget`, ...).
    pub property_type: String,

    /// Target-side type name, consumed by the enum handler
    /// (e.g. `MainAxisAlignment`).
    #[serde(default)]
    pub dart_type: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub default_value: Option<PropValue>,

    #[serde(default)]
    pub allowed_values: Option<Vec<String>>,
}

impl PropertyDefinition {
    pub fn new(name: impl Into<String>, property_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            property_type: property_type.into(),
            dart_type: None,
            required: false,
            default_value: None,
            allowed_values: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn dart_type(mut self, dart_type: impl Into<String>) -> Self {
        self.dart_type = Some(dart_type.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<PropValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn allowed_values(mut self, values: &[&str]) -> Self {
        self.allowed_values = Some(values.iter().map(|v| v.to_string()).collect());
        self
    }
}

/// A candidate code template for a widget type.
///
/// `code` is plain text with `{{name}}` placeholders. An optional
/// child-iteration region `{{#prop}}...{{/prop}}` renders its body once per
/// generated item of the list property `prop` (the body refers to the current
/// item as `{{item}}`), joined by `separator`. `{{widget_name}}` always
/// resolves to the owning type's Dart class name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDefinition {
    pub template_name: String,

    pub code: String,

    /// Higher wins; ties break by lexical template name.
    #[serde(default)]
    pub priority: i32,

    /// Property name → required raw value. Empty = unconditional.
    #[serde(default)]
    pub conditions: IndexMap<String, PropValue>,

    /// Join separator for the child-iteration region. Defaults to `", "`.
    #[serde(default)]
    pub separator: Option<String>,
}

impl TemplateDefinition {
    pub fn new(template_name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            template_name: template_name.into(),
            code: code.into(),
            priority: 0,
            conditions: IndexMap::new(),
            separator: None,
        }
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn condition(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.conditions.insert(name.into(), value.into());
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }
}

/// A named, reusable widget kind with its schema and candidate templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetTypeDefinition {
    pub name: String,

    pub dart_class_name: String,

    /// Declaration order is preserved verbatim; it governs fallback argument
    /// ordering.
    #[serde(default)]
    pub properties: Vec<PropertyDefinition>,

    #[serde(default)]
    pub templates: Vec<TemplateDefinition>,

    #[serde(default)]
    pub required_imports: Vec<String>,
}

impl WidgetTypeDefinition {
    pub fn new(name: impl Into<String>, dart_class_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dart_class_name: dart_class_name.into(),
            properties: Vec::new(),
            templates: Vec::new(),
            required_imports: Vec::new(),
        }
    }

    pub fn property(mut self, property: PropertyDefinition) -> Self {
        self.properties.push(property);
        self
    }

    pub fn template(mut self, template: TemplateDefinition) -> Self {
        self.templates.push(template);
        self
    }

    pub fn import(mut self, import: impl Into<String>) -> Self {
        self.required_imports.push(import.into());
        self
    }

    pub fn schema_property(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Condition-triggered post-processing action applied to generated output.
///
/// The serialized form carries the action discriminant as `rule_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRule {
    pub name: String,

    /// Context key → required value. Empty = always applies.
    #[serde(default)]
    pub condition: IndexMap<String, PropValue>,

    #[serde(flatten)]
    pub action: RuleAction,

    /// Rules apply high-to-low; same tier is commutative.
    #[serde(default)]
    pub priority: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule_type", rename_all = "snake_case")]
pub enum RuleAction {
    /// Append an import line if absent. Never touches code text.
    AddImport { import: String },
}

/// Generation output: code text plus accumulated imports in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedCode {
    pub code: String,
    pub imports: IndexSet<String>,
}

impl GeneratedCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            imports: IndexSet::new(),
        }
    }

    /// Imports as an ordered list, for callers that want plain `Vec`.
    pub fn import_list(&self) -> Vec<&str> {
        self.imports.iter().map(|s| s.as_str()).collect()
    }
}
