use crate::context::Snapshot;
use dartforge_registry::{PropValue, WidgetDescription};
use serde::Serialize;

/// Outcome of a non-failing validation pass over a description tree.
///
/// Unlike generation this never aborts on the first finding; editors and
/// API layers use it to report everything wrong with a description at once.
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a description tree against a snapshot without generating code.
///
/// Unknown widget types are warnings (generation would fail, but the
/// description may target a registry that is still being seeded); missing
/// required properties and handler-rejected values are errors.
pub fn validate_description(snapshot: &Snapshot, description: &WidgetDescription) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut on_path = Vec::new();
    visit(snapshot, description, &mut Vec::new(), &mut on_path, &mut report);
    report
}

fn visit(
    snapshot: &Snapshot,
    description: &WidgetDescription,
    path: &mut Vec<String>,
    on_path: &mut Vec<usize>,
    report: &mut ValidationReport,
) {
    let identity = description as *const WidgetDescription as usize;
    if on_path.contains(&identity) {
        report.errors.push(format!(
            "cyclic widget reference through '{}' at {}",
            description.widget_type,
            render_path(path)
        ));
        return;
    }
    on_path.push(identity);
    path.push(description.widget_type.clone());

    check_node(snapshot, description, path, on_path, report);

    path.pop();
    on_path.pop();
}

fn check_node(
    snapshot: &Snapshot,
    description: &WidgetDescription,
    path: &mut Vec<String>,
    on_path: &mut Vec<usize>,
    report: &mut ValidationReport,
) {
    let definition = match snapshot.widget_types.lookup(&description.widget_type) {
        Some(definition) => definition,
        None => {
            report.warnings.push(format!(
                "widget type '{}' is not registered at {}",
                description.widget_type,
                render_path(path)
            ));
            descend_into_values(snapshot, description, path, on_path, report);
            return;
        }
    };

    for property in &definition.properties {
        let supplied = description
            .properties
            .get(&property.name)
            .filter(|v| !v.is_null());

        match supplied {
            None => {
                if property.required && property.default_value.is_none() {
                    report.errors.push(format!(
                        "required property '{}' is missing on '{}' at {}",
                        property.name,
                        definition.name,
                        render_path(path)
                    ));
                }
            }
            Some(value) => {
                let handler = snapshot.handlers.resolve(&property.property_type);
                if !handler.validate(value) {
                    report.errors.push(format!(
                        "invalid value for property '{}' on '{}': {} at {}",
                        property.name,
                        definition.name,
                        value.render(),
                        render_path(path)
                    ));
                }
            }
        }
    }

    descend_into_values(snapshot, description, path, on_path, report);
}

fn descend_into_values(
    snapshot: &Snapshot,
    description: &WidgetDescription,
    path: &mut Vec<String>,
    on_path: &mut Vec<usize>,
    report: &mut ValidationReport,
) {
    for (name, value) in &description.properties {
        path.push(name.clone());
        descend_value(snapshot, value, path, on_path, report);
        path.pop();
    }
}

fn descend_value(
    snapshot: &Snapshot,
    value: &PropValue,
    path: &mut Vec<String>,
    on_path: &mut Vec<usize>,
    report: &mut ValidationReport,
) {
    match value {
        PropValue::Widget(nested) => visit(snapshot, nested, path, on_path, report),
        PropValue::List(items) => {
            for item in items {
                descend_value(snapshot, item, path, on_path, report);
            }
        }
        PropValue::Map(map) => {
            for value in map.values() {
                descend_value(snapshot, value, path, on_path, report);
            }
        }
        _ => {}
    }
}

fn render_path(path: &[String]) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.join(" → ")
    }
}
