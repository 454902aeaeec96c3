use dartforge_registry::{GeneratedCode, GenerationRule, PropValue, RuleAction};
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

/// Generation context a rule condition is evaluated against.
///
/// `root_type` matches the tree's root widget type, `widget_type` matches any
/// type used anywhere in the tree, any other condition key matches a
/// root-level raw property value.
#[derive(Debug, Default)]
pub struct RuleContext {
    pub root_type: String,
    pub types_used: IndexSet<String>,
    pub root_properties: IndexMap<String, PropValue>,
}

/// Apply generation rules to finished output, in descending priority order.
///
/// Rules only touch the import set, never the code text, so application is
/// idempotent: running the same rule set over already-processed output is a
/// no-op.
pub fn apply_rules(rules: &[GenerationRule], generated: &mut GeneratedCode, context: &RuleContext) {
    let mut ordered: Vec<&GenerationRule> = rules.iter().collect();
    ordered.sort_by(|a, b| b.priority.cmp(&a.priority));

    for rule in ordered {
        if !matches(rule, context) {
            continue;
        }
        match &rule.action {
            RuleAction::AddImport { import } => {
                if generated.imports.insert(import.clone()) {
                    debug!(rule = %rule.name, %import, "rule injected import");
                }
            }
        }
    }
}

fn matches(rule: &GenerationRule, context: &RuleContext) -> bool {
    rule.condition.iter().all(|(key, expected)| match key.as_str() {
        "root_type" => expected.as_str() == Some(context.root_type.as_str()),
        "widget_type" => expected
            .as_str()
            .map(|t| context.types_used.contains(t))
            .unwrap_or(false),
        other => context.root_properties.get(other) == Some(expected),
    })
}
