use serde_json::json;

use super::{choice, float, int, link, node, out};
use crate::schema::{FieldConfig, NodeTypeDefinition};

/// Largest seed that survives a round trip through JSON numbers.
const MAX_SEED: i64 = 9_007_199_254_740_991;

pub(super) fn sampling_nodes() -> Vec<NodeTypeDefinition> {
    vec![
        node("KSampler", "KSampler", "sampling")
            .with_required(vec![
                ("model", link("MODEL")),
                (
                    "seed",
                    FieldConfig::scalar_with(
                        "INT",
                        json!({ "default": 0, "min": 0, "max": MAX_SEED, "control_after_generate": true }),
                    ),
                ),
                ("steps", int(20, 1, 10000, 1)),
                ("cfg", float(8.0, 0.0, 100.0, 0.1)),
                ("sampler_name", choice(&["euler", "euler_ancestral", "heun", "dpmpp_2m"])),
                ("scheduler", choice(&["normal", "karras", "exponential"])),
                ("positive", link("CONDITIONING")),
                ("negative", link("CONDITIONING")),
                ("latent_image", link("LATENT")),
                ("denoise", float(1.0, 0.0, 1.0, 0.01)),
            ])
            .with_outputs(vec![out("LATENT", "LATENT")]),
    ]
}
