use crate::error::{GenerateError, GenerateResult};
use dartforge_registry::{PropValue, TemplateDefinition};
use indexmap::IndexMap;

const DEFAULT_SEPARATOR: &str = ", ";

/// Context a template is rendered against: transformed property texts keyed
/// by name, per-item texts for list properties (driving the child-iteration
/// region), and the raw pre-transform values used for condition matching.
#[derive(Debug, Default)]
pub struct TemplateContext {
    /// Dart class name of the widget type, bound to `{{widget_name}}`.
    pub widget_name: String,
    pub values: IndexMap<String, String>,
    pub items: IndexMap<String, Vec<String>>,
    pub raw: IndexMap<String, PropValue>,
}

impl TemplateContext {
    pub fn new(widget_name: impl Into<String>) -> Self {
        Self {
            widget_name: widget_name.into(),
            values: IndexMap::new(),
            items: IndexMap::new(),
            raw: IndexMap::new(),
        }
    }

    fn placeholder(&self, name: &str) -> Option<&str> {
        if name == "widget_name" {
            Some(&self.widget_name)
        } else {
            self.values.get(name).map(|s| s.as_str())
        }
    }
}

/// Pick one template among candidates, or `None` for the fallback path.
///
/// A template qualifies only if every entry of its `conditions` equals the
/// corresponding raw context value; an absent key disqualifies. Among
/// qualifying templates the highest priority wins, ties break by lexical
/// template name so selection stays deterministic.
pub fn select_template<'a>(
    templates: &'a [TemplateDefinition],
    context: &TemplateContext,
) -> Option<&'a TemplateDefinition> {
    templates
        .iter()
        .filter(|t| qualifies(t, context))
        .min_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| a.template_name.cmp(&b.template_name))
        })
}

fn qualifies(template: &TemplateDefinition, context: &TemplateContext) -> bool {
    template
        .conditions
        .iter()
        .all(|(name, expected)| context.raw.get(name) == Some(expected))
}

/// Render a selected template against the context.
///
/// `{{name}}` substitutes the transformed text for `name`;
/// `{{#prop}}body{{/prop}}` renders `body` once per generated item of list
/// property `prop` (bound to `{{item}}`), joined by the template separator.
/// Unknown placeholders and malformed regions are `TemplateRender` errors.
pub fn render_template(
    template: &TemplateDefinition,
    context: &TemplateContext,
    widget: &str,
    path: &[String],
) -> GenerateResult<String> {
    let error = |detail: String| GenerateError::TemplateRender {
        widget: widget.to_string(),
        template: template.template_name.clone(),
        detail,
        path: path.to_vec(),
    };

    let separator = template.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR);
    let mut out = String::new();
    let mut rest = template.code.as_str();

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        if let Some(region) = after.strip_prefix('#') {
            let name_end = region
                .find("}}")
                .ok_or_else(|| error("unterminated region marker".to_string()))?;
            let name = region[..name_end].trim();
            let body_and_rest = &region[name_end + 2..];
            let close = format!("{{{{/{}}}}}", name);
            let close_at = body_and_rest
                .find(&close)
                .ok_or_else(|| error(format!("region '{}' is never closed", name)))?;
            let body = &body_and_rest[..close_at];

            match context.items.get(name) {
                Some(items) => {
                    let rendered: GenerateResult<Vec<String>> = items
                        .iter()
                        .map(|item| substitute(body, context, Some(item.as_str())).map_err(&error))
                        .collect();
                    out.push_str(&rendered?.join(separator));
                }
                None if context.raw.contains_key(name) => {
                    return Err(error(format!("'{}' is not a list property", name)));
                }
                // absent optional list property renders an empty region
                None => {}
            }

            rest = &body_and_rest[close_at + close.len()..];
        } else {
            let end = after
                .find("}}")
                .ok_or_else(|| error("unterminated placeholder".to_string()))?;
            let name = after[..end].trim();
            match context.placeholder(name) {
                Some(text) => out.push_str(text),
                None => return Err(error(format!("unknown placeholder '{}'", name))),
            }
            rest = &after[end + 2..];
        }
    }

    out.push_str(rest);
    Ok(out)
}

/// Simple placeholder substitution inside a region body; `item` binds the
/// current iteration element.
fn substitute(
    body: &str,
    context: &TemplateContext,
    item: Option<&str>,
) -> Result<String, String> {
    let mut out = String::new();
    let mut rest = body;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .ok_or_else(|| "unterminated placeholder".to_string())?;
        let name = after[..end].trim();

        if name == "item" {
            match item {
                Some(text) => out.push_str(text),
                None => return Err("'item' used outside a region".to_string()),
            }
        } else {
            match context.placeholder(name) {
                Some(text) => out.push_str(text),
                None => return Err(format!("unknown placeholder '{}'", name)),
            }
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}
