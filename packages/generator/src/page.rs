use dartforge_registry::GeneratedCode;
use indexmap::IndexSet;

const MATERIAL_IMPORT: &str = "import 'package:flutter/material.dart';";

/// Assemble a complete Dart page file around a generated widget expression:
/// import block first (material always leading, accumulated imports in
/// first-seen order), then a `StatelessWidget` class whose `build` returns
/// the widget inside the standard page shell.
pub fn assemble_page(page_name: &str, generated: &GeneratedCode) -> String {
    let mut imports = IndexSet::new();
    imports.insert(MATERIAL_IMPORT.to_string());
    for import in &generated.imports {
        imports.insert(import.clone());
    }
    let import_block: Vec<&str> = imports.iter().map(|s| s.as_str()).collect();

    format!(
        "{imports}\n\nclass {page} extends StatelessWidget {{\n  @override\n  Widget build(BuildContext context) {{\n    return Scaffold(\n      appBar: AppBar(\n        title: Text('{page}'),\n        elevation: 2,\n      ),\n      body: Padding(\n        padding: EdgeInsets.all(16.0),\n        child: {child},\n      ),\n    );\n  }}\n}}\n",
        imports = import_block.join("\n"),
        page = page_name,
        child = generated.code,
    )
}

/// Bare widget snippet with its import block, for embedding into an
/// existing file rather than emitting a full page.
pub fn assemble_snippet(generated: &GeneratedCode) -> String {
    if generated.imports.is_empty() {
        return generated.code.clone();
    }
    let imports: Vec<&str> = generated.imports.iter().map(|s| s.as_str()).collect();
    format!("{}\n\n{}", imports.join("\n"), generated.code)
}
