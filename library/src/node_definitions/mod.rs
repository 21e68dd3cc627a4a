//! Built-in node type definitions shipped with the host.

mod image;
mod latent;
mod sampling;

use serde_json::json;

use crate::schema::{FieldConfig, NodeTypeDefinition, OutputDefinition};

/// All built-in definitions, in registration order.
pub fn builtin_node_definitions() -> Vec<NodeTypeDefinition> {
    [
        latent::latent_nodes(),
        image::image_nodes(),
        sampling::sampling_nodes(),
    ]
    .concat()
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn node(type_id: &str, name: &str, category: &str) -> NodeTypeDefinition {
    NodeTypeDefinition::new(type_id, name, category)
}

fn out(name: &str, data_type: &str) -> OutputDefinition {
    OutputDefinition::new(name, data_type)
}

fn link(type_tag: &str) -> FieldConfig {
    FieldConfig::scalar(type_tag)
}

fn int(default: i64, min: i64, max: i64, step: i64) -> FieldConfig {
    FieldConfig::scalar_with(
        "INT",
        json!({ "default": default, "min": min, "max": max, "step": step }),
    )
}

fn float(default: f64, min: f64, max: f64, step: f64) -> FieldConfig {
    FieldConfig::scalar_with(
        "FLOAT",
        json!({ "default": default, "min": min, "max": max, "step": step, "round": 0.01 }),
    )
}

fn choice(values: &[&str]) -> FieldConfig {
    FieldConfig::choice(values)
}

/// Pixel dimension field shared by latent and image nodes.
fn dimension(min: i64) -> FieldConfig {
    int(512, min, 16384, 8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn no_duplicate_type_ids() {
        let defs = builtin_node_definitions();
        let mut seen = HashSet::new();
        for def in &defs {
            assert!(seen.insert(&def.type_id), "Duplicate type_id: {}", def.type_id);
        }
    }

    #[test]
    fn resolution_targets_declare_width_and_height() {
        for def in builtin_node_definitions()
            .iter()
            .filter(|d| d.type_id == "EmptyLatentImage" || d.type_id == "ImageScale")
        {
            assert!(def.input.required_field("width").is_some(), "{}", def.type_id);
            assert!(def.input.required_field("height").is_some(), "{}", def.type_id);
        }
    }
}
