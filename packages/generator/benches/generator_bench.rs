use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dartforge_generator::{Snapshot, WidgetGenerator};
use dartforge_registry::{PropertyDefinition, WidgetDescription, WidgetTypeDefinition, WidgetTypeRegistry};
use std::sync::Arc;

fn bench_snapshot() -> Arc<Snapshot> {
    let widgets = vec![
        WidgetTypeDefinition::new("Container", "Container")
            .property(PropertyDefinition::new("width", "double"))
            .property(PropertyDefinition::new("color", "color"))
            .property(PropertyDefinition::new("padding", "edge_insets"))
            .property(PropertyDefinition::new("child", "widget")),
        WidgetTypeDefinition::new("Column", "Column")
            .property(PropertyDefinition::new("children", "widget_list")),
        WidgetTypeDefinition::new("Text", "Text")
            .property(PropertyDefinition::new("data", "string").required()),
    ];
    Arc::new(Snapshot::new(
        WidgetTypeRegistry::from_definitions(widgets),
        Vec::new(),
    ))
}

fn generate_flat_column(c: &mut Criterion) {
    let generator = WidgetGenerator::new(bench_snapshot());
    let description: WidgetDescription = serde_json::from_str(
        r#"{
        "type": "Column",
        "properties": {
            "children": [
                {"type": "Text", "properties": {"data": "one"}},
                {"type": "Text", "properties": {"data": "two"}},
                {"type": "Text", "properties": {"data": "three"}},
                {"type": "Text", "properties": {"data": "four"}}
            ]
        }
    }"#,
    )
    .unwrap();

    c.bench_function("generate_flat_column", |b| {
        b.iter(|| generator.generate(black_box(&description)))
    });
}

fn generate_nested_containers(c: &mut Criterion) {
    let generator = WidgetGenerator::new(bench_snapshot());

    let mut description = WidgetDescription::new("Text").with("data", "leaf");
    for _ in 0..32 {
        description = WidgetDescription::new("Container")
            .with("width", 100i64)
            .with("color", "#336699")
            .with("padding", 8i64)
            .with("child", description);
    }

    c.bench_function("generate_nested_containers", |b| {
        b.iter(|| generator.generate(black_box(&description)))
    });
}

criterion_group!(benches, generate_flat_column, generate_nested_containers);
criterion_main!(benches);
