//! Schemas of the resolution selector helper nodes.
//!
//! Only their declared inputs and outputs matter here; how they compute
//! `width`/`height` belongs to the node backend.

use graph_host::{FieldConfig, NodeTypeDefinition, OutputDefinition};
use graph_host::model::Size;
use serde_json::json;

pub const YARS: &str = "YARS";
pub const YARS_ADV: &str = "YARSAdv";

const CATEGORY: &str = "utils";

pub const ASPECT_RATIOS: [&str; 11] = [
    "1:1",
    "landscape (4:3)",
    "landscape (3:2)",
    "landscape (16:9)",
    "landscape (16:10)",
    "landscape (21:9)",
    "portrait (3:4)",
    "portrait (2:3)",
    "portrait (9:16)",
    "portrait (9:10)",
    "portrait (9:21)",
];

fn base_resolution() -> FieldConfig {
    FieldConfig::scalar_with(
        "INT",
        json!({ "default": 512, "min": 512, "max": 8192, "step": 128 }),
    )
}

fn ratio() -> FieldConfig {
    FieldConfig::scalar_with(
        "INT",
        json!({ "default": 1, "min": 1, "max": 1024, "step": 1 }),
    )
}

fn yes_no() -> FieldConfig {
    FieldConfig::scalar_with(
        "BOOLEAN",
        json!({ "default": false, "label_on": "yes ", "label_off": "no " }),
    )
}

fn dimensions() -> Vec<OutputDefinition> {
    vec![
        OutputDefinition::new("width", "INT"),
        OutputDefinition::new("height", "INT"),
    ]
}

pub fn resolution_selector_nodes() -> Vec<NodeTypeDefinition> {
    vec![
        NodeTypeDefinition::new(YARS, "yaResolution Selector", CATEGORY)
            .with_description("Width and height from a base resolution and a named aspect ratio")
            .with_required(vec![
                ("base_resolution", base_resolution()),
                ("aspect_ratio", FieldConfig::choice(&ASPECT_RATIOS)),
                ("overextend", yes_no()),
            ])
            .with_outputs(dimensions())
            .with_default_size(Size::new(240.0, 110.0)),
        NodeTypeDefinition::new(YARS_ADV, "yaResolution Selector (Advanced)", CATEGORY)
            .with_description("Width and height from a base resolution and a free width:height ratio")
            .with_required(vec![
                ("base_resolution", base_resolution()),
                ("width_ratio", ratio()),
                ("height_ratio", ratio()),
                ("overextend", yes_no()),
                ("constant_resolution", yes_no()),
            ])
            .with_outputs(dimensions()),
    ]
}
