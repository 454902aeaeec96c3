//! # Dartforge Generator
//!
//! Resolves data-driven widget descriptions into Flutter/Dart source code.
//!
//! ## Purpose
//!
//! The generator walks a [`WidgetDescription`](dartforge_registry::WidgetDescription)
//! tree and, per node, consults the widget type registry for the schema and
//! candidate templates, dispatches each property value to a type-tagged
//! handler, selects a template by condition matching and priority (or
//! synthesizes a constructor-call fallback), and applies generation rules to
//! the finished output.
//!
//! ## Determinism Contract
//!
//! **INVARIANT: Generation is fully deterministic.**
//!
//! For any description tree + snapshot, `generate()` MUST produce identical
//! output on every invocation:
//!
//! - Same tree → byte-identical code text
//! - Same tree → identical import order (first-seen, deduplicated)
//! - Template ties resolve by lexical name, never by iteration order
//! - No time/random/environment dependence
//!
//! ## Recursion Protection
//!
//! Descriptions come from a mutable external store, so cycles are
//! structurally possible (most realistically through schema default values
//! that re-inject their own widget type). Every recursion frame records the
//! node's structural identity in an explicit visited path-set; re-entering a
//! node on the same path is a `CyclicWidgetReference` error rather than a
//! stack overflow.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dartforge_generator::{Snapshot, WidgetGenerator};
//! use dartforge_registry::{WidgetDescription, WidgetTypeRegistry};
//! use std::sync::Arc;
//!
//! let snapshot = Arc::new(Snapshot::new(registry, rules));
//! let generator = WidgetGenerator::new(snapshot);
//! let generated = generator.generate(&description)?;
//! println!("{}", generated.code);
//! ```

mod context;
mod error;
mod generator;
mod handlers;
mod page;
mod rules;
mod template;
mod validator;

pub use context::{CancelToken, GenerateState, Snapshot, TransformContext};
pub use error::{GenerateError, GenerateResult};
pub use generator::WidgetGenerator;
pub use handlers::{
    AlignmentPropertyHandler, BoolPropertyHandler, ColorPropertyHandler, DurationPropertyHandler,
    EdgeInsetsPropertyHandler, EnumPropertyHandler, MapPropertyHandler, NumberPropertyHandler,
    PropertyHandler, PropertyHandlerRegistry, RawPropertyHandler, StringPropertyHandler,
    TextStylePropertyHandler, WidgetListPropertyHandler, WidgetPropertyHandler,
};
pub use page::{assemble_page, assemble_snippet};
pub use rules::{apply_rules, RuleContext};
pub use template::{render_template, select_template, TemplateContext};
pub use validator::{validate_description, ValidationReport};

#[cfg(test)]
mod tests;
