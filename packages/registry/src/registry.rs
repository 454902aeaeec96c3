use crate::model::{GenerationRule, WidgetTypeDefinition};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Read-only lookup of widget type definitions by name.
///
/// Writes belong to the external data layer; during generation the registry
/// is part of an immutable snapshot. Registration is last-writer-wins, which
/// is how the data layer replaces a definition on refresh.
#[derive(Debug, Clone, Default)]
pub struct WidgetTypeRegistry {
    widgets: IndexMap<String, WidgetTypeDefinition>,
}

impl WidgetTypeRegistry {
    pub fn new() -> Self {
        Self {
            widgets: IndexMap::new(),
        }
    }

    pub fn from_definitions(definitions: Vec<WidgetTypeDefinition>) -> Self {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(definition);
        }
        registry
    }

    pub fn register(&mut self, definition: WidgetTypeDefinition) {
        self.widgets.insert(definition.name.clone(), definition);
    }

    pub fn lookup(&self, name: &str) -> Option<&WidgetTypeDefinition> {
        self.widgets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.widgets.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.widgets.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

/// Source of generation rules, implemented by the external data layer.
///
/// The returned sequence is ordered as stored; the rule engine re-orders by
/// priority at application time.
pub trait GenerationRuleSource {
    fn list_rules(&self) -> Vec<GenerationRule>;
}

impl GenerationRuleSource for Vec<GenerationRule> {
    fn list_rules(&self) -> Vec<GenerationRule> {
        self.clone()
    }
}

/// On-disk shape of a definitions file: widget types plus generation rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryFile {
    #[serde(default)]
    pub widgets: Vec<WidgetTypeDefinition>,

    #[serde(default)]
    pub rules: Vec<GenerationRule>,
}

impl RegistryFile {
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_registered_definition() {
        let mut registry = WidgetTypeRegistry::new();
        registry.register(WidgetTypeDefinition::new("Text", "Text"));

        assert!(registry.lookup("Text").is_some());
        assert!(registry.lookup("Missing").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn re_registration_replaces_by_name() {
        let mut registry = WidgetTypeRegistry::new();
        registry.register(WidgetTypeDefinition::new("Text", "Text"));
        registry.register(WidgetTypeDefinition::new("Text", "CustomText"));

        assert_eq!(registry.lookup("Text").unwrap().dart_class_name, "CustomText");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registry_file_preserves_schema_order() {
        let json = r#"{
            "widgets": [{
                "name": "Container",
                "dart_class_name": "Container",
                "properties": [
                    {"name": "width", "property_type": "double"},
                    {"name": "height", "property_type": "double"},
                    {"name": "color", "property_type": "color"}
                ]
            }]
        }"#;

        let file = RegistryFile::from_json(json).unwrap();
        let registry = WidgetTypeRegistry::from_definitions(file.widgets);
        let schema: Vec<&str> = registry
            .lookup("Container")
            .unwrap()
            .properties
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(schema, vec!["width", "height", "color"]);
    }

    #[test]
    fn rule_source_returns_stored_order() {
        let rules = vec![
            GenerationRule {
                name: "b".into(),
                condition: IndexMap::new(),
                action: crate::model::RuleAction::AddImport {
                    import: "import 'b.dart';".into(),
                },
                priority: 1,
            },
            GenerationRule {
                name: "a".into(),
                condition: IndexMap::new(),
                action: crate::model::RuleAction::AddImport {
                    import: "import 'a.dart';".into(),
                },
                priority: 10,
            },
        ];

        let listed = rules.list_rules();
        assert_eq!(listed[0].name, "b");
        assert_eq!(listed[1].name, "a");
    }

    #[test]
    fn default_values_survive_the_file_format() {
        let json = r#"{
            "widgets": [{
                "name": "Text",
                "dart_class_name": "Text",
                "properties": [
                    {"name": "data", "property_type": "string", "required": true},
                    {"name": "maxLines", "property_type": "int", "default_value": 1}
                ]
            }]
        }"#;

        let file = RegistryFile::from_json(json).unwrap();
        let def = &file.widgets[0];
        assert!(def.properties[0].required);
        assert_eq!(
            def.properties[1].default_value,
            Some(crate::model::PropValue::Int(1))
        );
    }
}
