//! Inserting a helper node upstream of a target and wiring it into the target's fields.

use graph_host::model::{Graph, Widget};
use graph_host::{FieldConfig, GraphError, HostContext, NodeTypeDefinition};
use log::{debug, info, warn};
use uuid::Uuid;

use crate::config::SchemaPolicy;
use crate::convert::{Conversion, convert_to_input};
use crate::error::QuickNodesError;
use crate::placement::{PlaceOptions, place_new_node};

/// Place a `helper_type` node left of `target_id` and drive each of `field_names` from its
/// same-named output.
///
/// Fields that are already inputs are only rewired. There is no rollback: if a field is
/// missing, conversions and links made for earlier fields stay in place.
pub fn prepend_new_node<S: AsRef<str>>(
    ctx: &mut HostContext<'_>,
    target_id: Uuid,
    schema: &NodeTypeDefinition,
    helper_type: &str,
    field_names: &[S],
    policy: SchemaPolicy,
) -> Result<Uuid, QuickNodesError> {
    let helper_size = ctx.registry.get(helper_type).and_then(|d| d.default_size);
    let helper_id = place_new_node(
        ctx,
        helper_type,
        target_id,
        PlaceOptions::before().with_size(helper_size),
    )?;

    for name in field_names {
        let name = name.as_ref();
        let Some(slot) = input_slot_for(ctx.graph, target_id, schema, name, policy)? else {
            continue;
        };

        let helper = ctx
            .graph
            .node(helper_id)
            .ok_or(GraphError::NodeNotFound(helper_id))?;
        match helper.find_output_slot(name) {
            Some(output) => {
                ctx.graph.connect(helper_id, output, target_id, slot)?;
            }
            None => warn!(
                "{} has no output named '{}', leaving input unlinked",
                helper_type, name
            ),
        }
    }

    info!(
        "Prepended {} ({}) to {} for {} field(s)",
        helper_type,
        helper_id,
        target_id,
        field_names.len()
    );
    Ok(helper_id)
}

/// Index of the input slot named `name`, converting the widget of that name first if needed.
///
/// `None` for a widget that was already hidden along with another widget and has no input
/// of its own.
fn input_slot_for(
    graph: &mut Graph,
    target_id: Uuid,
    schema: &NodeTypeDefinition,
    name: &str,
    policy: SchemaPolicy,
) -> Result<Option<usize>, QuickNodesError> {
    let target = graph
        .node_mut(target_id)
        .ok_or(GraphError::NodeNotFound(target_id))?;
    if let Some(slot) = target.find_input_slot(name) {
        return Ok(Some(slot));
    }

    let widget = target
        .widget(name)
        .ok_or_else(|| QuickNodesError::field_not_found(&target.type_id, name))?;
    let config = resolve_field_config(schema, widget, policy)?;
    match convert_to_input(target, name, &config)? {
        Conversion::Converted { slot } => Ok(Some(slot)),
        Conversion::AlreadyConverted => {
            debug!(
                "Field '{}' on {} is already converted without an input, skipping",
                name, target_id
            );
            Ok(None)
        }
    }
}

/// Declared configuration of a widget's field: required, then optional, then the widget itself.
pub fn resolve_field_config(
    schema: &NodeTypeDefinition,
    widget: &Widget,
    policy: SchemaPolicy,
) -> Result<FieldConfig, QuickNodesError> {
    if let Some(config) = schema.input.lookup(&widget.name) {
        return Ok(config.clone());
    }
    match policy {
        SchemaPolicy::Strict => Err(QuickNodesError::UndeclaredField {
            node_type: schema.type_id.clone(),
            field: widget.name.clone(),
        }),
        SchemaPolicy::Permissive => {
            warn!(
                "Field '{}' is not declared by {}, using the widget's own type '{}'",
                widget.name, schema.type_id, widget.widget_type
            );
            Ok(FieldConfig::Scalar {
                type_tag: widget.widget_type.clone(),
                options: widget.options.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_are_found() {
        let schema = NodeTypeDefinition::new("T", "T", "test")
            .with_optional(vec![("width", FieldConfig::scalar("INT"))]);
        let widget = Widget::new("width", "number", 1i64);
        let config = resolve_field_config(&schema, &widget, SchemaPolicy::Strict).unwrap();
        assert_eq!(config, FieldConfig::scalar("INT"));
    }

    #[test]
    fn undeclared_field_falls_back_to_widget() {
        let schema = NodeTypeDefinition::new("T", "T", "test");
        let widget = Widget::new("width", "number", 1i64);
        let config = resolve_field_config(&schema, &widget, SchemaPolicy::Permissive).unwrap();
        assert_eq!(config, FieldConfig::scalar("number"));
    }

    #[test]
    fn strict_policy_rejects_undeclared_field() {
        let schema = NodeTypeDefinition::new("T", "T", "test");
        let widget = Widget::new("width", "number", 1i64);
        let err = resolve_field_config(&schema, &widget, SchemaPolicy::Strict).unwrap_err();
        assert!(matches!(err, QuickNodesError::UndeclaredField { .. }));
    }
}
