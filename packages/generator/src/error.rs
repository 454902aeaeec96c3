use thiserror::Error;

pub type GenerateResult<T> = Result<T, GenerateError>;

/// Errors raised while resolving a widget description tree.
///
/// All variants are terminal for the generation call that raised them:
/// generation is deterministic and pure, so a retry with unchanged input
/// reproduces the identical error. Each variant carries the widget path
/// (type and property names from the root) for caller diagnostics.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("unknown widget type '{name}' at {}", format_path(path))]
    UnknownWidgetType { name: String, path: Vec<String> },

    #[error("missing required property '{property}' on '{widget}' at {}", format_path(path))]
    MissingRequiredProperty {
        widget: String,
        property: String,
        path: Vec<String>,
    },

    #[error(
        "invalid value for property '{property}' on '{widget}': {value} at {}",
        format_path(path)
    )]
    PropertyValidation {
        widget: String,
        property: String,
        value: String,
        path: Vec<String>,
    },

    #[error("cyclic widget reference through '{widget}'\nPath: {}", format_path(path))]
    CyclicWidgetReference { widget: String, path: Vec<String> },

    #[error(
        "template '{template}' failed to render for '{widget}': {detail} at {}",
        format_path(path)
    )]
    TemplateRender {
        widget: String,
        template: String,
        detail: String,
        path: Vec<String>,
    },

    #[error("generation cancelled at {}", format_path(path))]
    Cancelled { path: Vec<String> },
}

impl GenerateError {
    /// Widget path from the root to the point of failure.
    pub fn path(&self) -> &[String] {
        match self {
            GenerateError::UnknownWidgetType { path, .. }
            | GenerateError::MissingRequiredProperty { path, .. }
            | GenerateError::PropertyValidation { path, .. }
            | GenerateError::CyclicWidgetReference { path, .. }
            | GenerateError::TemplateRender { path, .. }
            | GenerateError::Cancelled { path } => path,
        }
    }
}

fn format_path(path: &[String]) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.join(" → ")
    }
}
