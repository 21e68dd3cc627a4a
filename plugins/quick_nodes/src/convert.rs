//! Turning inline widgets into link-driven input slots.
//!
//! A converted widget stays in the node's widget list (other code looks widgets
//! up by index) but is hidden, and its value is only serialized while the input
//! slot that replaced it has an incoming link.

use graph_host::FieldConfig;
use graph_host::model::geometry::NODE_SLOT_HEIGHT;
use graph_host::model::{InputSlot, Node, OriginalWidget, SerializeMode, Visibility, Widget, WidgetBinding};
use log::{debug, warn};

use crate::error::QuickNodesError;
use crate::widget_type::resolve_widget_type;

/// Widget type tag marking a converted widget. Companions carry `:<owner>` suffixes.
pub const CONVERTED_TYPE: &str = "converted-widget";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Conversion {
    /// The widget was hidden and a new input slot appended at `slot`.
    Converted { slot: usize },
    /// The widget already carried the converted tag; nothing changed.
    AlreadyConverted,
}

pub fn is_converted(widget: &Widget) -> bool {
    widget.widget_type.starts_with(CONVERTED_TYPE)
}

/// Hide `widget_name` on `node` and expose it as an input slot typed from `config`.
///
/// The caller is expected to have resolved `config` against the node's schema.
pub fn convert_to_input(
    node: &mut Node,
    widget_name: &str,
    config: &FieldConfig,
) -> Result<Conversion, QuickNodesError> {
    let index = node
        .widget_index(widget_name)
        .ok_or_else(|| QuickNodesError::field_not_found(&node.type_id, widget_name))?;
    if is_converted(&node.widgets[index]) {
        debug!("Widget '{}' on {} is already an input", widget_name, node.id);
        return Ok(Conversion::AlreadyConverted);
    }

    let before = node.size;
    hide_widget(node, index, "");

    let widget_type = resolve_widget_type(config);
    let binding = WidgetBinding {
        name: widget_name.to_string(),
        config: config.clone(),
    };
    let slot = node.add_input(InputSlot::from_widget(
        widget_name,
        &widget_type.link_type,
        binding,
    ));

    for widget in &mut node.widgets {
        widget.last_y += NODE_SLOT_HEIGHT;
    }
    // Grow to fit the new input row, never shrink.
    node.size = before.max(node.compute_size());

    debug!(
        "Converted widget '{}' on {} to input slot {} ({})",
        widget_name, node.id, slot, widget_type.link_type
    );
    Ok(Conversion::Converted { slot })
}

fn hide_widget(node: &mut Node, index: usize, suffix: &str) {
    let widget = &mut node.widgets[index];
    widget.original = Some(OriginalWidget {
        widget_type: widget.widget_type.clone(),
        size_hint: widget.size_hint,
        serialize_fn: widget.serialize_fn,
    });
    widget.visibility = Visibility::Hidden;
    widget.widget_type = format!("{CONVERTED_TYPE}{suffix}");
    widget.serialize_mode = SerializeMode::GatedByLink;

    let companion_suffix = format!("{suffix}:{}", widget.name);
    let companions = widget.linked_widgets.clone();
    for name in companions {
        match node.widget_index(&name) {
            Some(i) if !is_converted(&node.widgets[i]) => hide_widget(node, i, &companion_suffix),
            Some(_) => {}
            None => warn!("Linked widget '{}' missing on {}", name, node.type_id),
        }
    }
}
