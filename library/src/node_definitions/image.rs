use super::{choice, dimension, link, node, out};
use crate::schema::NodeTypeDefinition;

const UPSCALE_METHODS: [&str; 5] = ["nearest-exact", "bilinear", "area", "bicubic", "lanczos"];

pub(super) fn image_nodes() -> Vec<NodeTypeDefinition> {
    vec![
        node("ImageScale", "Upscale Image", "image/upscaling")
            .with_required(vec![
                ("image", link("IMAGE")),
                ("upscale_method", choice(&UPSCALE_METHODS)),
                ("width", dimension(0)),
                ("height", dimension(0)),
                ("crop", choice(&["disabled", "center"])),
            ])
            .with_outputs(vec![out("IMAGE", "IMAGE")]),
    ]
}
