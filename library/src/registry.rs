//! Node type registry and node factory.

use std::collections::HashMap;

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::error::GraphError;
use crate::model::widget::serialize_rounded;
use crate::model::{InputSlot, Node, OutputSlot, Widget, WidgetValue};
use crate::schema::{FieldConfig, NodeTypeDefinition};

/// Name of the companion widget created for fields with `control_after_generate`.
pub const CONTROL_AFTER_GENERATE: &str = "control_after_generate";
pub const CONTROL_MODES: [&str; 4] = ["fixed", "increment", "decrement", "randomize"];

#[derive(Debug, Default)]
pub struct NodeTypeRegistry {
    node_types: HashMap<String, NodeTypeDefinition>,
    order: Vec<String>,
}

impl NodeTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, replacing any previous one with the same type id.
    pub fn register(&mut self, def: NodeTypeDefinition) -> Option<NodeTypeDefinition> {
        let type_id = def.type_id.clone();
        let previous = self.node_types.insert(type_id.clone(), def);
        if previous.is_some() {
            warn!("Node type '{}' re-registered", type_id);
        } else {
            debug!("Registered node type '{}'", type_id);
            self.order.push(type_id);
        }
        previous
    }

    pub fn get(&self, type_id: &str) -> Option<&NodeTypeDefinition> {
        self.node_types.get(type_id)
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.node_types.contains_key(type_id)
    }

    /// Definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &NodeTypeDefinition> {
        self.order.iter().filter_map(|id| self.node_types.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Instantiate a node of a registered type. The node is not added to any graph.
    pub fn create_node(&self, type_id: &str) -> Result<Node, GraphError> {
        let def = self
            .get(type_id)
            .ok_or_else(|| GraphError::UnknownNodeType(type_id.to_string()))?;
        Ok(instantiate(def))
    }
}

/// Build a node from its definition: widget-typed fields become widgets, the rest input slots.
pub fn instantiate(def: &NodeTypeDefinition) -> Node {
    let mut node = Node::new(&def.type_id, &def.display_name);

    for (name, config) in def.input.fields() {
        match widgets_for(name, config) {
            Some(widgets) => node.widgets.extend(widgets),
            None => {
                node.add_input(InputSlot::new(name, config.type_tag()));
            }
        }
    }
    for output in &def.outputs {
        node.add_output(OutputSlot::new(&output.name, &output.data_type));
    }

    node.relayout_widgets();
    node.size = def.default_size.unwrap_or_else(|| node.compute_size());
    node
}

/// Host widget kind for a field, `None` for link-only types.
pub fn widget_kind(config: &FieldConfig) -> Option<&'static str> {
    match config {
        FieldConfig::Choice { .. } => Some("combo"),
        FieldConfig::Scalar { type_tag, .. } => match type_tag.as_str() {
            "INT" | "FLOAT" => Some("number"),
            "STRING" => Some("text"),
            "BOOLEAN" => Some("toggle"),
            _ => None,
        },
    }
}

fn widgets_for(name: &str, config: &FieldConfig) -> Option<Vec<Widget>> {
    let kind = widget_kind(config)?;
    let value = config.default_value().unwrap_or_else(|| match kind {
        "number" => WidgetValue::Integer(0),
        "toggle" => WidgetValue::Boolean(false),
        _ => WidgetValue::String(String::new()),
    });

    let options = match config {
        FieldConfig::Scalar { options, .. } => options.clone(),
        FieldConfig::Choice { values } => combo_options(values),
    };
    let mut widget = Widget::new(name, kind, value).with_options(options);

    if config.type_tag() == "FLOAT" && config.option("round").is_some_and(Value::is_number) {
        widget = widget.with_serializer(serialize_rounded);
    }

    if config
        .option(CONTROL_AFTER_GENERATE)
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        let control = Widget::new(CONTROL_AFTER_GENERATE, "combo", CONTROL_MODES[0])
            .with_options(combo_options(&CONTROL_MODES));
        widget = widget.with_linked(CONTROL_AFTER_GENERATE);
        return Some(vec![widget, control]);
    }
    Some(vec![widget])
}

fn combo_options<S: AsRef<str>>(values: &[S]) -> Map<String, Value> {
    let values = values
        .iter()
        .map(|v| Value::String(v.as_ref().to_string()))
        .collect();
    let mut options = Map::new();
    options.insert("values".to_string(), Value::Array(values));
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node_definitions::builtin_node_definitions;

    fn registry() -> NodeTypeRegistry {
        let mut registry = NodeTypeRegistry::new();
        for def in builtin_node_definitions() {
            registry.register(def);
        }
        registry
    }

    #[test]
    fn unknown_type_is_an_error() {
        let err = registry().create_node("Nope").unwrap_err();
        assert!(matches!(err, GraphError::UnknownNodeType(name) if name == "Nope"));
    }

    #[test]
    fn widget_fields_become_widgets() {
        let node = registry().create_node("EmptyLatentImage").unwrap();
        let names: Vec<_> = node.widgets.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, ["width", "height", "batch_size"]);
        assert_eq!(node.widget("width").unwrap().value, WidgetValue::Integer(512));
        assert!(node.inputs.is_empty());
        assert_eq!(node.outputs[0].data_type, "LATENT");
    }

    #[test]
    fn link_types_become_inputs() {
        let node = registry().create_node("ImageScale").unwrap();
        assert_eq!(node.find_input_slot("image"), Some(0));
        assert_eq!(node.widget("upscale_method").unwrap().widget_type, "combo");
    }

    #[test]
    fn seed_gets_control_companion() {
        let node = registry().create_node("KSampler").unwrap();
        let seed = node.widget("seed").unwrap();
        assert_eq!(seed.linked_widgets, vec![CONTROL_AFTER_GENERATE.to_string()]);
        assert_eq!(
            node.widget(CONTROL_AFTER_GENERATE).unwrap().value,
            WidgetValue::from("fixed")
        );
        assert!(node.widget("cfg").unwrap().serialize_fn.is_some());
    }

    #[test]
    fn registration_order_is_kept() {
        let registry = registry();
        let first = registry.definitions().next().map(|d| d.type_id.as_str());
        assert_eq!(first, Some("EmptyLatentImage"));
    }
}
