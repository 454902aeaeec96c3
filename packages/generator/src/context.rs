use crate::error::GenerateResult;
use crate::handlers::PropertyHandlerRegistry;
use dartforge_registry::{
    GenerationRule, PropertyDefinition, RegistryFile, WidgetDescription, WidgetTypeRegistry,
};
use indexmap::IndexSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// An immutable bundle of everything one generation run reads: widget types,
/// property handlers, and generation rules.
///
/// The external data layer builds a fresh snapshot on refresh; a generation
/// run pins one snapshot for its entire traversal, so concurrent runs never
/// observe a half-updated registry.
pub struct Snapshot {
    pub widget_types: WidgetTypeRegistry,
    pub handlers: PropertyHandlerRegistry,
    pub rules: Vec<GenerationRule>,
}

impl Snapshot {
    /// Snapshot with the builtin handler set.
    pub fn new(widget_types: WidgetTypeRegistry, rules: Vec<GenerationRule>) -> Self {
        Self {
            widget_types,
            handlers: PropertyHandlerRegistry::with_builtins(),
            rules,
        }
    }

    pub fn with_handlers(
        widget_types: WidgetTypeRegistry,
        handlers: PropertyHandlerRegistry,
        rules: Vec<GenerationRule>,
    ) -> Self {
        Self {
            widget_types,
            handlers,
            rules,
        }
    }

    pub fn from_registry_file(file: RegistryFile) -> Self {
        Self::new(WidgetTypeRegistry::from_definitions(file.widgets), file.rules)
    }
}

/// Cooperative cancellation flag shared between a caller and a generation
/// run. Checked at every recursion boundary; an aborted run has no partial
/// side effects to roll back.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Mutable traversal state for one generation run.
///
/// `visited` holds the structural identity (address) of every description
/// node on the current path; entries are pushed on frame entry and popped on
/// return, so only genuine ancestor references trip cycle detection.
pub struct GenerateState<'snap> {
    pub snapshot: &'snap Snapshot,
    pub cancel: CancelToken,
    pub visited: Vec<usize>,
    pub path: Vec<String>,
    pub imports: IndexSet<String>,
    pub types_used: IndexSet<String>,
}

impl<'snap> GenerateState<'snap> {
    pub fn new(snapshot: &'snap Snapshot, cancel: CancelToken) -> Self {
        Self {
            snapshot,
            cancel,
            visited: Vec::new(),
            path: Vec::new(),
            imports: IndexSet::new(),
            types_used: IndexSet::new(),
        }
    }

    pub fn node_identity(description: &WidgetDescription) -> usize {
        description as *const WidgetDescription as usize
    }

    pub fn on_path(&self, identity: usize) -> bool {
        self.visited.contains(&identity)
    }
}

/// Per-property context handed to a handler's `transform`.
///
/// Carries the schema entry being transformed (when the property is
/// declared) and exposes nested generation for widget-valued properties.
pub struct TransformContext<'g, 'snap> {
    pub state: &'g mut GenerateState<'snap>,
    pub property: Option<&'g PropertyDefinition>,
    items: Option<Vec<String>>,
}

impl<'g, 'snap> TransformContext<'g, 'snap> {
    pub fn new(
        state: &'g mut GenerateState<'snap>,
        property: Option<&'g PropertyDefinition>,
    ) -> Self {
        Self {
            state,
            property,
            items: None,
        }
    }

    /// Resolve a nested widget description through the generator.
    pub fn generate_nested(&mut self, description: &WidgetDescription) -> GenerateResult<String> {
        crate::generator::generate_node(self.state, description)
    }

    /// Record per-item generated texts for a list-valued property, so the
    /// template renderer can drive its child-iteration region.
    pub fn record_items(&mut self, items: Vec<String>) {
        self.items = Some(items);
    }

    pub fn take_items(&mut self) -> Option<Vec<String>> {
        self.items.take()
    }
}
