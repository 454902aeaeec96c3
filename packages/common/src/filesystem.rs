use crate::result::CommonResult;
use dartforge_registry::{RegistryFile, WidgetDescription};
use std::fs;
use std::path::Path;

/// Load a definitions file (widget types + generation rules) from disk.
pub fn load_registry_file(path: &Path) -> CommonResult<RegistryFile> {
    let source = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&source)?)
}

/// Load a widget description tree from disk.
pub fn load_description(path: &Path) -> CommonResult<WidgetDescription> {
    let source = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&source)?)
}

/// Write generated output, creating parent directories as needed.
pub fn write_output(path: &Path, contents: &str) -> CommonResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)?;
    Ok(())
}
