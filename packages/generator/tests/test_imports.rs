use dartforge_generator::{Snapshot, WidgetGenerator};
use dartforge_registry::{PropertyDefinition, WidgetDescription, WidgetTypeDefinition, WidgetTypeRegistry};
use std::sync::Arc;

fn imports_snapshot() -> Arc<Snapshot> {
    let card = WidgetTypeDefinition::new("Card", "Card")
        .property(PropertyDefinition::new("child", "widget"))
        .import("import 'package:flutter/material.dart';");
    let svg = WidgetTypeDefinition::new("SvgPicture", "SvgPicture")
        .property(PropertyDefinition::new("asset", "string"))
        .import("import 'package:flutter_svg/flutter_svg.dart';");
    let chart = WidgetTypeDefinition::new("LineChart", "LineChart")
        .import("import 'package:fl_chart/fl_chart.dart';");

    Arc::new(Snapshot::new(
        WidgetTypeRegistry::from_definitions(vec![card, svg, chart]),
        Vec::new(),
    ))
}

#[test]
fn test_three_types_yield_three_imports_in_first_seen_order() {
    let generator = WidgetGenerator::new(imports_snapshot());

    let description: WidgetDescription = serde_json::from_str(
        r#"{
        "type": "Card",
        "properties": {
            "child": {
                "type": "SvgPicture",
                "properties": {
                    "asset": "logo.svg",
                    "overlay": {"type": "LineChart", "properties": {}}
                }
            }
        }
    }"#,
    )
    .unwrap();

    let generated = generator.generate(&description).unwrap();
    // depth-first accumulation: a node merges its own imports after its
    // children, so the deepest type's import is seen first
    assert_eq!(
        generated.import_list(),
        vec![
            "import 'package:fl_chart/fl_chart.dart';",
            "import 'package:flutter_svg/flutter_svg.dart';",
            "import 'package:flutter/material.dart';",
        ]
    );
}

#[test]
fn test_recurring_type_does_not_duplicate_imports() {
    let generator = WidgetGenerator::new(imports_snapshot());

    let description: WidgetDescription = serde_json::from_str(
        r#"{
        "type": "Card",
        "properties": {
            "child": {
                "type": "Card",
                "properties": {
                    "child": {"type": "SvgPicture", "properties": {"asset": "a.svg"}}
                }
            }
        }
    }"#,
    )
    .unwrap();

    let generated = generator.generate(&description).unwrap();
    assert_eq!(
        generated.import_list(),
        vec![
            "import 'package:flutter_svg/flutter_svg.dart';",
            "import 'package:flutter/material.dart';",
        ]
    );
}
