use crate::context::{CancelToken, GenerateState, Snapshot, TransformContext};
use crate::error::{GenerateError, GenerateResult};
use crate::handlers::looks_like_color;
use crate::rules::{apply_rules, RuleContext};
use crate::template::{render_template, select_template, TemplateContext};
use dartforge_registry::{
    GeneratedCode, PropValue, PropertyDefinition, WidgetDescription, WidgetTypeDefinition,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Resolves widget description trees into generated Dart code against a
/// pinned registry snapshot.
///
/// Generation is a pure, synchronous computation: the snapshot is never
/// mutated, so one generator may serve any number of concurrent calls.
pub struct WidgetGenerator {
    snapshot: Arc<Snapshot>,
}

impl WidgetGenerator {
    pub fn new(snapshot: Arc<Snapshot>) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Generate code for a description tree.
    pub fn generate(&self, description: &WidgetDescription) -> GenerateResult<GeneratedCode> {
        self.generate_with_cancel(description, CancelToken::new())
    }

    /// Generate with a caller-supplied cancellation token, checked at every
    /// recursion boundary.
    #[instrument(skip(self, description), fields(root = %description.widget_type))]
    pub fn generate_with_cancel(
        &self,
        description: &WidgetDescription,
        cancel: CancelToken,
    ) -> GenerateResult<GeneratedCode> {
        let mut state = GenerateState::new(&self.snapshot, cancel);
        let code = generate_node(&mut state, description)?;

        let mut generated = GeneratedCode::new(code);
        generated.imports = state.imports;

        let context = RuleContext {
            root_type: description.widget_type.clone(),
            types_used: state.types_used,
            root_properties: description.properties.clone(),
        };
        apply_rules(&self.snapshot.rules, &mut generated, &context);

        debug!(imports = generated.imports.len(), "generation finished");
        Ok(generated)
    }
}

/// Resolve one description node to code text, accumulating imports and used
/// types into the run state. Recursion entry point for nested widget values.
pub(crate) fn generate_node(
    state: &mut GenerateState<'_>,
    description: &WidgetDescription,
) -> GenerateResult<String> {
    let identity = GenerateState::node_identity(description);
    if state.on_path(identity) {
        return Err(GenerateError::CyclicWidgetReference {
            widget: description.widget_type.clone(),
            path: state.path.clone(),
        });
    }

    if state.cancel.is_cancelled() {
        return Err(GenerateError::Cancelled {
            path: state.path.clone(),
        });
    }

    state.visited.push(identity);
    state.path.push(description.widget_type.clone());
    let result = resolve_node(state, description);
    state.path.pop();
    state.visited.pop();
    result
}

fn resolve_node(
    state: &mut GenerateState<'_>,
    description: &WidgetDescription,
) -> GenerateResult<String> {
    let widget_name = &description.widget_type;
    let definition = match state.snapshot.widget_types.lookup(widget_name) {
        Some(definition) => definition,
        None => {
            return Err(GenerateError::UnknownWidgetType {
                name: widget_name.clone(),
                path: state.path.clone(),
            })
        }
    };
    state.types_used.insert(widget_name.clone());

    let mut context = TemplateContext::new(definition.dart_class_name.clone());

    // declared properties in schema order
    for property in &definition.properties {
        let value = match description.properties.get(&property.name) {
            Some(value) if !value.is_null() => value,
            _ => match &property.default_value {
                Some(default) => default,
                None if property.required => {
                    return Err(GenerateError::MissingRequiredProperty {
                        widget: widget_name.clone(),
                        property: property.name.clone(),
                        path: state.path.clone(),
                    })
                }
                None => continue,
            },
        };

        let (text, items) = transform_declared(state, definition, property, value)?;
        context.values.insert(property.name.clone(), text);
        if let Some(items) = items {
            context.items.insert(property.name.clone(), items);
        }
        context.raw.insert(property.name.clone(), value.clone());
    }

    // undeclared supplied properties keep their insertion order
    for (name, value) in &description.properties {
        if definition.schema_property(name).is_some() {
            continue;
        }
        if let Some((text, items)) = transform_undeclared(state, widget_name, name, value)? {
            context.values.insert(name.clone(), text);
            if let Some(items) = items {
                context.items.insert(name.clone(), items);
            }
            context.raw.insert(name.clone(), value.clone());
        }
    }

    let code = match select_template(&definition.templates, &context) {
        Some(template) => {
            debug!(widget = %widget_name, template = %template.template_name, "template selected");
            render_template(template, &context, widget_name, &state.path)?
        }
        None => {
            if !definition.templates.is_empty() {
                debug!(widget = %widget_name, "no template qualified, using fallback");
            }
            fallback_constructor(definition, &context)
        }
    };

    for import in &definition.required_imports {
        state.imports.insert(import.clone());
    }

    Ok(code)
}

fn transform_declared(
    state: &mut GenerateState<'_>,
    definition: &WidgetTypeDefinition,
    property: &PropertyDefinition,
    value: &PropValue,
) -> GenerateResult<(String, Option<Vec<String>>)> {
    let handler = state.snapshot.handlers.resolve(&property.property_type);

    if !handler.validate(value) {
        return Err(GenerateError::PropertyValidation {
            widget: definition.name.clone(),
            property: property.name.clone(),
            value: value.render(),
            path: state.path.clone(),
        });
    }

    state.path.push(property.name.clone());
    let mut ctx = TransformContext::new(state, Some(property));
    let result = handler.transform(value, &mut ctx);
    let items = ctx.take_items();
    state.path.pop();

    Ok((result?, items))
}

/// Supplied properties outside the schema are processed with a handler
/// inferred from the value's runtime shape. `Ok(None)` means the value
/// contributes nothing (explicit null).
fn transform_undeclared(
    state: &mut GenerateState<'_>,
    widget: &str,
    name: &str,
    value: &PropValue,
) -> GenerateResult<Option<(String, Option<Vec<String>>)>> {
    let tag = match value {
        PropValue::Null => return Ok(None),
        PropValue::Bool(_) => "bool",
        PropValue::Int(_) => "int",
        PropValue::Float(_) => "double",
        PropValue::String(s) => {
            if looks_like_color(s) {
                "color"
            } else {
                "string"
            }
        }
        PropValue::Widget(_) => "widget",
        PropValue::Map(_) => "map",
        PropValue::List(items) => {
            if items.iter().all(|i| matches!(i, PropValue::Widget(_))) {
                "widget_list"
            } else {
                // mixed lists transform element-wise
                let mut parts = Vec::with_capacity(items.len());
                for item in items {
                    if let Some((text, _)) = transform_undeclared(state, widget, name, item)? {
                        parts.push(text);
                    }
                }
                return Ok(Some((format!("[{}]", parts.join(", ")), None)));
            }
        }
    };

    let handler = state.snapshot.handlers.resolve(tag);
    if !handler.validate(value) {
        warn!(%widget, property = %name, %tag, "inferred handler rejected undeclared value");
        return Err(GenerateError::PropertyValidation {
            widget: widget.to_string(),
            property: name.to_string(),
            value: value.render(),
            path: state.path.clone(),
        });
    }

    state.path.push(name.to_string());
    let mut ctx = TransformContext::new(state, None);
    let result = handler.transform(value, &mut ctx);
    let items = ctx.take_items();
    state.path.pop();

    Ok(Some((result?, items)))
}

/// Synthesize a constructor call when no template qualifies, so output
/// always exists for a registered widget type. Declared properties come
/// first in schema order, then undeclared supplied ones in insertion order.
fn fallback_constructor(definition: &WidgetTypeDefinition, context: &TemplateContext) -> String {
    if context.values.is_empty() {
        return format!("{}()", definition.dart_class_name);
    }

    let args: Vec<String> = context
        .values
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect();
    format!("{}({})", definition.dart_class_name, args.join(", "))
}
