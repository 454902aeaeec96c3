use crate::{
    assemble_page, CancelToken, ColorPropertyHandler, EdgeInsetsPropertyHandler, GenerateError,
    GenerateState, PropertyHandler, PropertyHandlerRegistry, Snapshot, StringPropertyHandler,
    TransformContext, WidgetGenerator,
};
use dartforge_registry::{
    GenerationRule, PropValue, PropertyDefinition, RuleAction, TemplateDefinition,
    WidgetDescription, WidgetTypeDefinition, WidgetTypeRegistry,
};
use indexmap::IndexMap;
use std::sync::Arc;

fn snapshot_of(widgets: Vec<WidgetTypeDefinition>) -> Arc<Snapshot> {
    Arc::new(Snapshot::new(
        WidgetTypeRegistry::from_definitions(widgets),
        Vec::new(),
    ))
}

fn text_type() -> WidgetTypeDefinition {
    WidgetTypeDefinition::new("Text", "Text")
        .property(PropertyDefinition::new("data", "string").required())
        .property(PropertyDefinition::new("style", "text_style"))
        .property(
            PropertyDefinition::new("textAlign", "enum")
                .dart_type("TextAlign")
                .allowed_values(&["left", "right", "center", "justify"]),
        )
}

fn container_type() -> WidgetTypeDefinition {
    WidgetTypeDefinition::new("Container", "Container")
        .property(PropertyDefinition::new("width", "double"))
        .property(PropertyDefinition::new("height", "double"))
        .property(PropertyDefinition::new("color", "color"))
        .property(PropertyDefinition::new("padding", "edge_insets"))
        .property(PropertyDefinition::new("child", "widget"))
}

fn column_type() -> WidgetTypeDefinition {
    WidgetTypeDefinition::new("Column", "Column")
        .property(PropertyDefinition::new("children", "widget_list"))
        .property(
            PropertyDefinition::new("mainAxisAlignment", "enum").dart_type("MainAxisAlignment"),
        )
}

/// Run one handler directly against an empty snapshot.
fn transform_with(
    handler: &dyn PropertyHandler,
    value: &PropValue,
    property: Option<&PropertyDefinition>,
) -> String {
    let snapshot = Snapshot::new(WidgetTypeRegistry::new(), Vec::new());
    let mut state = GenerateState::new(&snapshot, CancelToken::new());
    let mut ctx = TransformContext::new(&mut state, property);
    handler.transform(value, &mut ctx).expect("transform failed")
}

#[test]
fn test_color_named() {
    let handler = ColorPropertyHandler;
    assert_eq!(
        transform_with(&handler, &PropValue::from("red"), None),
        "Colors.red"
    );
    assert_eq!(
        transform_with(&handler, &PropValue::from("deep_purple"), None),
        "Colors.deepPurple"
    );
}

#[test]
fn test_color_hex() {
    let handler = ColorPropertyHandler;
    assert_eq!(
        transform_with(&handler, &PropValue::from("#FF5733"), None),
        "Color(0xFFFF5733)"
    );
}

#[test]
fn test_color_components() {
    let handler = ColorPropertyHandler;
    let value: PropValue =
        serde_json::from_str(r#"{"r": 255, "g": 87, "b": 51}"#).unwrap();
    assert_eq!(
        transform_with(&handler, &value, None),
        "Color.fromARGB(255, 255, 87, 51)"
    );

    let with_alpha: PropValue =
        serde_json::from_str(r#"{"r": 1, "g": 2, "b": 3, "a": 128}"#).unwrap();
    assert_eq!(
        transform_with(&handler, &with_alpha, None),
        "Color.fromARGB(128, 1, 2, 3)"
    );
}

#[test]
fn test_color_validation_rejects_bad_shapes() {
    let handler = ColorPropertyHandler;
    assert!(!handler.validate(&PropValue::from("notacolor")));
    assert!(!handler.validate(&PropValue::from("#XYZ")));

    let missing_b: PropValue = serde_json::from_str(r#"{"r": 1, "g": 2}"#).unwrap();
    assert!(!handler.validate(&missing_b));

    let stray_key: PropValue =
        serde_json::from_str(r#"{"r": 1, "g": 2, "b": 3, "hue": 4}"#).unwrap();
    assert!(!handler.validate(&stray_key));
}

#[test]
fn test_edge_insets_scalar() {
    let handler = EdgeInsetsPropertyHandler;
    assert_eq!(
        transform_with(&handler, &PropValue::Int(16), None),
        "EdgeInsets.all(16.0)"
    );
}

#[test]
fn test_edge_insets_all() {
    let handler = EdgeInsetsPropertyHandler;
    let value: PropValue = serde_json::from_str(r#"{"all": 8}"#).unwrap();
    assert_eq!(transform_with(&handler, &value, None), "EdgeInsets.all(8.0)");
}

#[test]
fn test_edge_insets_symmetric() {
    let handler = EdgeInsetsPropertyHandler;
    let value: PropValue =
        serde_json::from_str(r#"{"horizontal": 12, "vertical": 4}"#).unwrap();
    assert_eq!(
        transform_with(&handler, &value, None),
        "EdgeInsets.symmetric(horizontal: 12.0, vertical: 4.0)"
    );
}

#[test]
fn test_edge_insets_sides_default_to_zero() {
    let handler = EdgeInsetsPropertyHandler;
    let value: PropValue = serde_json::from_str(r#"{"left": 4, "bottom": 2}"#).unwrap();
    assert_eq!(
        transform_with(&handler, &value, None),
        "EdgeInsets.fromLTRB(4.0, 0.0, 0.0, 2.0)"
    );
}

#[test]
fn test_edge_insets_rejects_unknown_keys() {
    let handler = EdgeInsetsPropertyHandler;
    let value: PropValue = serde_json::from_str(r#"{"all": 8, "diagonal": 3}"#).unwrap();
    assert!(!handler.validate(&value));

    let mixed: PropValue =
        serde_json::from_str(r#"{"horizontal": 8, "left": 3}"#).unwrap();
    assert!(!handler.validate(&mixed));
}

#[test]
fn test_string_quoting() {
    let handler = StringPropertyHandler;
    assert_eq!(
        transform_with(&handler, &PropValue::from("hello"), None),
        "'hello'"
    );
    assert_eq!(
        transform_with(&handler, &PropValue::from("it's"), None),
        r"'it\'s'"
    );
}

#[test]
fn test_enum_uses_declared_dart_type() {
    let property = PropertyDefinition::new("textAlign", "enum")
        .dart_type("TextAlign")
        .allowed_values(&["left", "right", "center"]);
    let registry = PropertyHandlerRegistry::with_builtins();
    let handler = registry.resolve("enum");

    let snapshot = Snapshot::new(WidgetTypeRegistry::new(), Vec::new());
    let mut state = GenerateState::new(&snapshot, CancelToken::new());
    let mut ctx = TransformContext::new(&mut state, Some(&property));

    assert_eq!(
        handler
            .transform(&PropValue::from("CENTER"), &mut ctx)
            .unwrap(),
        "TextAlign.center"
    );
    assert_eq!(
        handler
            .transform(&PropValue::from("TextAlign.end"), &mut ctx)
            .unwrap(),
        "TextAlign.end"
    );
}

#[test]
fn test_unknown_tag_falls_back_to_raw() {
    let registry = PropertyHandlerRegistry::with_builtins();
    assert!(!registry.contains("no_such_tag"));
    let handler = registry.resolve("no_such_tag");

    let snapshot = Snapshot::new(WidgetTypeRegistry::new(), Vec::new());
    let mut state = GenerateState::new(&snapshot, CancelToken::new());
    let mut ctx = TransformContext::new(&mut state, None);

    // raw interpolation passes strings through unquoted
    assert_eq!(
        handler
            .transform(&PropValue::from("() => doThing()"), &mut ctx)
            .unwrap(),
        "() => doThing()"
    );
}

#[test]
fn test_handler_registration_overrides_by_tag() {
    struct UppercaseHandler;
    impl PropertyHandler for UppercaseHandler {
        fn transform(
            &self,
            value: &PropValue,
            _ctx: &mut TransformContext<'_, '_>,
        ) -> crate::GenerateResult<String> {
            Ok(value.as_str().unwrap_or_default().to_uppercase())
        }
        fn validate(&self, value: &PropValue) -> bool {
            value.as_str().is_some()
        }
    }

    let mut handlers = PropertyHandlerRegistry::with_builtins();
    handlers.register("color", Arc::new(UppercaseHandler));

    let snapshot = Arc::new(Snapshot::with_handlers(
        WidgetTypeRegistry::from_definitions(vec![container_type()]),
        handlers,
        Vec::new(),
    ));
    let generator = WidgetGenerator::new(snapshot);

    let generated = generator
        .generate(&WidgetDescription::new("Container").with("color", "red"))
        .unwrap();
    assert_eq!(generated.code, "Container(color: RED)");
}

#[test]
fn test_fallback_contains_class_and_required_properties() {
    let generator = WidgetGenerator::new(snapshot_of(vec![text_type()]));
    let description = WidgetDescription::new("Text").with("data", "Hello");

    let generated = generator.generate(&description).unwrap();
    assert_eq!(generated.code, "Text(data: 'Hello')");
}

#[test]
fn test_fallback_orders_declared_then_undeclared() {
    let generator = WidgetGenerator::new(snapshot_of(vec![container_type()]));
    let description: WidgetDescription = serde_json::from_str(
        r#"{
            "type": "Container",
            "properties": {
                "tooltip": "extra",
                "height": 20,
                "width": 10
            }
        }"#,
    )
    .unwrap();

    let generated = generator.generate(&description).unwrap();
    // schema order first (width before height), undeclared afterwards
    assert_eq!(
        generated.code,
        "Container(width: 10.0, height: 20.0, tooltip: 'extra')"
    );
}

#[test]
fn test_missing_required_property() {
    let generator = WidgetGenerator::new(snapshot_of(vec![text_type()]));
    let err = generator
        .generate(&WidgetDescription::new("Text"))
        .unwrap_err();
    assert!(matches!(
        err,
        GenerateError::MissingRequiredProperty { ref widget, ref property, .. }
            if widget == "Text" && property == "data"
    ));
}

#[test]
fn test_unknown_widget_type() {
    let generator = WidgetGenerator::new(snapshot_of(vec![]));
    let err = generator
        .generate(&WidgetDescription::new("Carousel"))
        .unwrap_err();
    assert!(matches!(
        err,
        GenerateError::UnknownWidgetType { ref name, .. } if name == "Carousel"
    ));
}

#[test]
fn test_validation_error_names_widget_and_property() {
    let generator = WidgetGenerator::new(snapshot_of(vec![container_type()]));
    let description: WidgetDescription = serde_json::from_str(
        r#"{"type": "Container", "properties": {"padding": {"all": 8, "diagonal": 1}}}"#,
    )
    .unwrap();

    let err = generator.generate(&description).unwrap_err();
    match err {
        GenerateError::PropertyValidation {
            widget,
            property,
            value,
            ..
        } => {
            assert_eq!(widget, "Container");
            assert_eq!(property, "padding");
            assert!(value.contains("diagonal"));
        }
        other => panic!("expected PropertyValidation, got {:?}", other),
    }
}

#[test]
fn test_template_priority_selection() {
    let widget = WidgetTypeDefinition::new("Button", "ElevatedButton")
        .property(PropertyDefinition::new("label", "string").required())
        .property(PropertyDefinition::new("variant", "string"))
        .template(
            TemplateDefinition::new("default", "ElevatedButton(child: Text({{label}}))")
                .priority(1),
        )
        .template(
            TemplateDefinition::new("outlined", "OutlinedButton(child: Text({{label}}))")
                .priority(10)
                .condition("variant", "outlined"),
        );
    let generator = WidgetGenerator::new(snapshot_of(vec![widget]));

    let outlined = WidgetDescription::new("Button")
        .with("label", "Go")
        .with("variant", "outlined");
    assert_eq!(
        generator.generate(&outlined).unwrap().code,
        "OutlinedButton(child: Text('Go'))"
    );

    // condition fails, the unconditional template wins
    let plain = WidgetDescription::new("Button")
        .with("label", "Go")
        .with("variant", "filled");
    assert_eq!(
        generator.generate(&plain).unwrap().code,
        "ElevatedButton(child: Text('Go'))"
    );
}

#[test]
fn test_template_tie_breaks_by_name() {
    let widget = WidgetTypeDefinition::new("Chip", "Chip")
        .property(PropertyDefinition::new("label", "string").required())
        .template(TemplateDefinition::new("beta", "ChipB({{label}})").priority(5))
        .template(TemplateDefinition::new("alpha", "ChipA({{label}})").priority(5));
    let generator = WidgetGenerator::new(snapshot_of(vec![widget]));

    let generated = generator
        .generate(&WidgetDescription::new("Chip").with("label", "x"))
        .unwrap();
    assert_eq!(generated.code, "ChipA('x')");
}

#[test]
fn test_template_child_region() {
    let widget = column_type().template(
        TemplateDefinition::new(
            "expanded",
            "Column(children: [{{#children}}Expanded(child: {{item}}){{/children}}])",
        )
        .priority(1),
    );
    let generator = WidgetGenerator::new(snapshot_of(vec![widget, text_type()]));

    let description: WidgetDescription = serde_json::from_str(
        r#"{
            "type": "Column",
            "properties": {
                "children": [
                    {"type": "Text", "properties": {"data": "a"}},
                    {"type": "Text", "properties": {"data": "b"}}
                ]
            }
        }"#,
    )
    .unwrap();

    let generated = generator.generate(&description).unwrap();
    assert_eq!(
        generated.code,
        "Column(children: [Expanded(child: Text(data: 'a')), Expanded(child: Text(data: 'b'))])"
    );
}

#[test]
fn test_template_region_custom_separator() {
    let widget = column_type().template(
        TemplateDefinition::new("stacked", "Column(children: [\n{{#children}}  {{item}}{{/children}}\n])")
            .priority(1)
            .separator(",\n"),
    );
    let generator = WidgetGenerator::new(snapshot_of(vec![widget, text_type()]));

    let description: WidgetDescription = serde_json::from_str(
        r#"{
            "type": "Column",
            "properties": {
                "children": [
                    {"type": "Text", "properties": {"data": "a"}},
                    {"type": "Text", "properties": {"data": "b"}}
                ]
            }
        }"#,
    )
    .unwrap();

    let generated = generator.generate(&description).unwrap();
    assert_eq!(
        generated.code,
        "Column(children: [\n  Text(data: 'a'),\n  Text(data: 'b')\n])"
    );
}

#[test]
fn test_template_unknown_placeholder_fails() {
    let widget = WidgetTypeDefinition::new("Card", "Card")
        .template(TemplateDefinition::new("broken", "Card(child: {{body}})").priority(1));
    let generator = WidgetGenerator::new(snapshot_of(vec![widget]));

    let err = generator
        .generate(&WidgetDescription::new("Card"))
        .unwrap_err();
    assert!(matches!(
        err,
        GenerateError::TemplateRender { ref template, .. } if template == "broken"
    ));
}

#[test]
fn test_widget_name_placeholder() {
    let widget = WidgetTypeDefinition::new("Spacer", "SizedBox")
        .template(TemplateDefinition::new("named", "{{widget_name}}.shrink()").priority(1));
    let generator = WidgetGenerator::new(snapshot_of(vec![widget]));

    let generated = generator.generate(&WidgetDescription::new("Spacer")).unwrap();
    assert_eq!(generated.code, "SizedBox.shrink()");
}

#[test]
fn test_default_values_fill_absent_properties() {
    let widget = WidgetTypeDefinition::new("Gap", "SizedBox")
        .property(PropertyDefinition::new("height", "double").default_value(8i64));
    let generator = WidgetGenerator::new(snapshot_of(vec![widget]));

    let generated = generator.generate(&WidgetDescription::new("Gap")).unwrap();
    assert_eq!(generated.code, "SizedBox(height: 8.0)");
}

#[test]
fn test_rules_add_import_when_condition_matches() {
    let rules = vec![
        GenerationRule {
            name: "material".into(),
            condition: IndexMap::new(),
            action: RuleAction::AddImport {
                import: "import 'package:flutter/material.dart';".into(),
            },
            priority: 100,
        },
        GenerationRule {
            name: "svg".into(),
            condition: {
                let mut condition = IndexMap::new();
                condition.insert("widget_type".to_string(), PropValue::from("SvgPicture"));
                condition
            },
            action: RuleAction::AddImport {
                import: "import 'package:flutter_svg/flutter_svg.dart';".into(),
            },
            priority: 10,
        },
    ];
    let snapshot = Arc::new(Snapshot::new(
        WidgetTypeRegistry::from_definitions(vec![text_type()]),
        rules,
    ));
    let generator = WidgetGenerator::new(snapshot);

    let generated = generator
        .generate(&WidgetDescription::new("Text").with("data", "hi"))
        .unwrap();

    // unconditional rule fires, the SvgPicture-gated one does not
    let imports = generated.import_list();
    assert_eq!(imports, vec!["import 'package:flutter/material.dart';"]);
}

#[test]
fn test_rule_application_is_idempotent() {
    let rules = vec![GenerationRule {
        name: "material".into(),
        condition: IndexMap::new(),
        action: RuleAction::AddImport {
            import: "import 'package:flutter/material.dart';".into(),
        },
        priority: 0,
    }];

    let mut generated = dartforge_registry::GeneratedCode::new("Text('x')");
    let context = crate::RuleContext::default();
    crate::apply_rules(&rules, &mut generated, &context);
    let first = generated.import_list().len();
    crate::apply_rules(&rules, &mut generated, &context);
    assert_eq!(generated.import_list().len(), first);
}

#[test]
fn test_cancelled_token_aborts_before_resolution() {
    let generator = WidgetGenerator::new(snapshot_of(vec![text_type()]));
    let cancel = CancelToken::new();
    cancel.cancel();

    let err = generator
        .generate_with_cancel(&WidgetDescription::new("Text").with("data", "hi"), cancel)
        .unwrap_err();
    assert!(matches!(err, GenerateError::Cancelled { .. }));
}

#[test]
fn test_page_assembly_puts_material_first() {
    let mut generated = dartforge_registry::GeneratedCode::new("Text('hi')");
    generated
        .imports
        .insert("import 'package:flutter_svg/flutter_svg.dart';".to_string());

    let page = assemble_page("HomePage", &generated);
    let material_at = page.find("package:flutter/material.dart").unwrap();
    let svg_at = page.find("package:flutter_svg").unwrap();
    assert!(material_at < svg_at);
    assert!(page.contains("class HomePage extends StatelessWidget"));
    assert!(page.contains("child: Text('hi'),"));
}

#[test]
fn test_validator_reports_instead_of_failing() {
    let generator_snapshot = snapshot_of(vec![text_type()]);
    let description: WidgetDescription = serde_json::from_str(
        r#"{
            "type": "Column",
            "properties": {
                "children": [{"type": "Text", "properties": {}}]
            }
        }"#,
    )
    .unwrap();

    let report = crate::validate_description(&generator_snapshot, &description);
    assert!(!report.is_valid() || !report.warnings.is_empty());
    // unknown root type is a warning, the nested missing required is an error
    assert!(report.warnings.iter().any(|w| w.contains("Column")));
    assert!(report.errors.iter().any(|e| e.contains("data")));
}
