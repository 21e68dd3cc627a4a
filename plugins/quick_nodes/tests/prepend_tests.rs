//! Integration tests for the prepend workflow.
//!
//! Verifies the full flow: register host + extension → open a node's menu →
//! choose a prepend entry → check placement, conversion, wiring and serialization.

use graph_host::model::{Point, WidgetValue};
use graph_host::{App, GraphError, NodeTypeDefinition, OutputDefinition};
use quick_nodes::definitions::{YARS, YARS_ADV};
use quick_nodes::{
    CONVERTED_TYPE, HelperChoice, NODE_SEPARATION, QuickNodesConfig, QuickNodesError, SchemaPolicy,
    install, prepend_new_node,
};
use serde_json::json;
use uuid::Uuid;

const PREPEND_YARS: &str = "Prepend yaResolution Selector";
const PREPEND_YARS_ADV: &str = "Prepend Advanced yaResolution Selector";

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Helper: app with built-in node types and the default quick node config.
fn setup_app() -> App {
    init_logger();
    let mut app = App::with_builtin_node_types().unwrap();
    install(&mut app, QuickNodesConfig::default()).unwrap();
    app
}

fn nodes_of_type(app: &App, type_id: &str) -> Vec<Uuid> {
    app.graph
        .nodes()
        .iter()
        .filter(|n| n.type_id == type_id)
        .map(|n| n.id)
        .collect()
}

fn menu_labels(app: &App, node_id: Uuid) -> Vec<String> {
    app.node_menu(node_id)
        .unwrap()
        .into_iter()
        .map(|e| e.content)
        .collect()
}

#[test]
fn test_menu_offers_prepend_entries_on_targets_only() {
    let mut app = setup_app();
    let latent = app.add_node("EmptyLatentImage", Point::default()).unwrap();
    let sampler = app.add_node("KSampler", Point::default()).unwrap();

    assert_eq!(
        menu_labels(&app, latent),
        [PREPEND_YARS_ADV, PREPEND_YARS, "Clone", "Remove"]
    );
    assert_eq!(menu_labels(&app, sampler), ["Clone", "Remove"]);
}

#[test]
fn test_prepend_wires_width_and_height() {
    let mut app = setup_app();
    let target = app
        .add_node("EmptyLatentImage", Point::new(500.0, 200.0))
        .unwrap();

    app.activate_by_label(target, PREPEND_YARS).unwrap();

    let helpers = nodes_of_type(&app, YARS);
    assert_eq!(helpers.len(), 1);
    let helper = app.graph.node(helpers[0]).unwrap();
    assert_eq!(helper.pos, Point::new(500.0 - 240.0 - NODE_SEPARATION, 200.0));
    assert_eq!(app.canvas.selected(), &[helper.id]);

    let node = app.graph.node(target).unwrap();
    let names: Vec<_> = node.inputs.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["width", "height"]);

    for (slot, name) in ["width", "height"].iter().enumerate() {
        let link = app.graph.incoming_link(target, slot).unwrap();
        assert_eq!(link.origin.node_id, helper.id);
        assert_eq!(helper.outputs[link.origin.slot].name, *name);
        assert_eq!(node.widget(name).unwrap().widget_type, CONVERTED_TYPE);
    }
    assert!(node.widget("batch_size").unwrap().is_visible());
}

#[test]
fn test_prompt_uses_links_instead_of_widget_values() {
    let mut app = setup_app();
    let target = app.add_node("EmptyLatentImage", Point::default()).unwrap();
    app.activate_by_label(target, PREPEND_YARS_ADV).unwrap();
    let helper = nodes_of_type(&app, YARS_ADV)[0];

    let prompt = app.graph.to_prompt();
    let inputs = &prompt[target.to_string()]["inputs"];
    assert_eq!(inputs["width"], json!([helper.to_string(), 0]));
    assert_eq!(inputs["height"], json!([helper.to_string(), 1]));
    assert_eq!(inputs["batch_size"], json!(1));
    assert_eq!(prompt[helper.to_string()]["class_type"], json!(YARS_ADV));
}

#[test]
fn test_repeated_prepend_rewires_without_duplicating() {
    let mut app = setup_app();
    let target = app.add_node("EmptyLatentImage", Point::default()).unwrap();

    app.activate_by_label(target, PREPEND_YARS).unwrap();
    app.activate_by_label(target, PREPEND_YARS).unwrap();

    let helpers = nodes_of_type(&app, YARS);
    assert_eq!(helpers.len(), 2);

    let node = app.graph.node(target).unwrap();
    assert_eq!(node.inputs.len(), 2);
    assert_eq!(app.graph.links_into(target).count(), 2);
    for slot in 0..2 {
        let link = app.graph.incoming_link(target, slot).unwrap();
        assert_eq!(link.origin.node_id, helpers[1]);
    }
    let first = app.graph.node(helpers[0]).unwrap();
    assert!(first.outputs.iter().all(|o| o.links.is_empty()));
}

#[test]
fn test_image_scale_keeps_existing_image_input() {
    let mut app = setup_app();
    let target = app.add_node("ImageScale", Point::default()).unwrap();

    app.activate_by_label(target, PREPEND_YARS).unwrap();

    let node = app.graph.node(target).unwrap();
    assert_eq!(node.find_input_slot("image"), Some(0));
    assert_eq!(node.find_input_slot("width"), Some(1));
    assert_eq!(node.find_input_slot("height"), Some(2));
    assert!(app.graph.incoming_link(target, 0).is_none());
    assert!(app.graph.incoming_link(target, 1).is_some());
}

#[test]
fn test_serialization_follows_link_state() {
    let mut app = setup_app();
    let target = app.add_node("EmptyLatentImage", Point::default()).unwrap();
    app.activate_by_label(target, PREPEND_YARS).unwrap();

    let node = app.graph.node(target).unwrap();
    let width = node.widget("width").unwrap();
    assert_eq!(node.serialize_widget(width), Some(WidgetValue::Integer(512)));

    app.graph.disconnect_input(target, 0).unwrap();
    let node = app.graph.node(target).unwrap();
    let values = node.serialize_widgets();
    assert!(!values.contains_key("width"));
    assert_eq!(values.get("height"), Some(&json!(512)));
}

#[test]
fn test_missing_field_aborts_without_rollback() {
    let mut app = setup_app();
    let target = app.add_node("EmptyLatentImage", Point::default()).unwrap();
    let schema = app.registry().get("EmptyLatentImage").unwrap().clone();

    let err = prepend_new_node(
        &mut app.context(),
        target,
        &schema,
        YARS,
        &["width", "depth"],
        SchemaPolicy::Permissive,
    )
    .unwrap_err();

    assert!(matches!(err, QuickNodesError::FieldNotFound { ref field, .. } if field == "depth"));
    assert_eq!(nodes_of_type(&app, YARS).len(), 1);
    assert!(app.graph.incoming_link(target, 0).is_some());
}

#[test]
fn test_unknown_helper_changes_nothing() {
    let mut app = setup_app();
    let target = app.add_node("EmptyLatentImage", Point::default()).unwrap();
    let schema = app.registry().get("EmptyLatentImage").unwrap().clone();

    let err = prepend_new_node(
        &mut app.context(),
        target,
        &schema,
        "NotAHelper",
        &["width"],
        SchemaPolicy::Permissive,
    )
    .unwrap_err();

    assert!(matches!(err, QuickNodesError::Graph(GraphError::UnknownNodeType(_))));
    assert_eq!(app.graph.nodes().len(), 1);
    assert!(app.graph.node(target).unwrap().inputs.is_empty());
}

#[test]
fn test_menu_failures_surface_as_extension_errors() {
    init_logger();
    let mut app = App::with_builtin_node_types().unwrap();
    let config = QuickNodesConfig {
        fields: vec!["width".to_string(), "depth".to_string()],
        ..QuickNodesConfig::default()
    };
    install(&mut app, config).unwrap();
    let target = app.add_node("EmptyLatentImage", Point::default()).unwrap();

    let err = app.activate_by_label(target, PREPEND_YARS).unwrap_err();
    assert!(matches!(err, GraphError::Extension(_)));
}

#[test]
fn test_fields_without_helper_output_stay_unlinked() {
    init_logger();
    let mut app = App::with_builtin_node_types().unwrap();
    let config = QuickNodesConfig {
        fields: vec!["width".to_string(), "batch_size".to_string()],
        ..QuickNodesConfig::default()
    };
    install(&mut app, config).unwrap();
    let target = app.add_node("EmptyLatentImage", Point::default()).unwrap();

    app.activate_by_label(target, PREPEND_YARS).unwrap();

    let node = app.graph.node(target).unwrap();
    let slot = node.find_input_slot("batch_size").unwrap();
    assert!(app.graph.incoming_link(target, slot).is_none());
    assert!(!node.serialize_widgets().contains_key("batch_size"));
}

#[test]
fn test_custom_targets_from_toml() {
    init_logger();
    let mut app = App::with_builtin_node_types().unwrap();
    let config = QuickNodesConfig::from_toml_str(
        r#"
        target_node_types = ["KSampler"]
        fields = ["seed"]

        [[helpers]]
        label = "Seed From Resolution"
        node_type = "YARS"
        "#,
    )
    .unwrap();
    install(&mut app, config).unwrap();
    let sampler = app.add_node("KSampler", Point::default()).unwrap();
    let latent = app.add_node("EmptyLatentImage", Point::default()).unwrap();

    assert_eq!(menu_labels(&app, latent), ["Clone", "Remove"]);

    // YARS has no `seed` output: the seed and its control companion are hidden but stay unlinked.
    app.activate_by_label(sampler, "Prepend Seed From Resolution")
        .unwrap();
    let node = app.graph.node(sampler).unwrap();
    assert_eq!(
        node.widget("control_after_generate").unwrap().widget_type,
        "converted-widget:seed"
    );
    let values = node.serialize_widgets();
    assert!(!values.contains_key("seed"));
    assert!(!values.contains_key("control_after_generate"));
    assert!(values.contains_key("steps"));
}

/// Helper node type with a single output named after `field`.
fn source_node(type_id: &str, field: &str, data_type: &str) -> NodeTypeDefinition {
    NodeTypeDefinition::new(type_id, type_id, "utils")
        .with_outputs(vec![OutputDefinition::new(field, data_type)])
}

#[test]
fn test_reregistered_target_keeps_single_prepend_entries() {
    let mut app = setup_app();
    let def = app.registry().get("EmptyLatentImage").unwrap().clone();
    app.register_node_type(def).unwrap();
    let latent = app.add_node("EmptyLatentImage", Point::default()).unwrap();

    assert_eq!(
        menu_labels(&app, latent),
        [PREPEND_YARS_ADV, PREPEND_YARS, "Clone", "Remove"]
    );
}

#[test]
fn test_companion_field_is_skipped_after_its_primary() {
    init_logger();
    let mut app = App::with_builtin_node_types().unwrap();
    let config = QuickNodesConfig {
        target_node_types: vec!["KSampler".to_string()],
        helpers: vec![HelperChoice::new("Seed Source", "SeedSource")],
        fields: vec!["seed".to_string(), "control_after_generate".to_string()],
        ..QuickNodesConfig::default()
    };
    install(&mut app, config).unwrap();
    app.register_node_type(source_node("SeedSource", "seed", "INT"))
        .unwrap();
    let sampler = app.add_node("KSampler", Point::default()).unwrap();

    app.activate_by_label(sampler, "Prepend Seed Source").unwrap();

    let helper = nodes_of_type(&app, "SeedSource")[0];
    let node = app.graph.node(sampler).unwrap();
    let seed = node.find_input_slot("seed").unwrap();
    assert_eq!(app.graph.incoming_link(sampler, seed).unwrap().origin.node_id, helper);
    assert!(node.find_input_slot("control_after_generate").is_none());

    let prompt = app.graph.to_prompt();
    let inputs = &prompt[sampler.to_string()]["inputs"];
    assert_eq!(inputs["seed"], json!([helper.to_string(), 0]));
    assert!(inputs.get("control_after_generate").is_none());
}

#[test]
fn test_linked_float_keeps_its_rounding() {
    let mut app = setup_app();
    app.register_node_type(source_node("CfgSource", "cfg", "FLOAT"))
        .unwrap();
    let sampler = app.add_node("KSampler", Point::default()).unwrap();
    app.graph
        .node_mut(sampler)
        .unwrap()
        .widget_mut("cfg")
        .unwrap()
        .value = WidgetValue::from(7.256);
    let schema = app.registry().get("KSampler").unwrap().clone();

    prepend_new_node(
        &mut app.context(),
        sampler,
        &schema,
        "CfgSource",
        &["cfg"],
        SchemaPolicy::Strict,
    )
    .unwrap();

    let node = app.graph.node(sampler).unwrap();
    let cfg = node.widget("cfg").unwrap();
    assert_eq!(cfg.widget_type, CONVERTED_TYPE);
    let slot = node.find_input_slot("cfg").unwrap();
    assert!(app.graph.incoming_link(sampler, slot).is_some());

    let value = node.serialize_widget(cfg).and_then(|v| v.as_number()).unwrap();
    assert!((value - 7.26).abs() < 1e-9, "cfg serialized as {value}");
}
