use super::{dimension, int, link, node, out};
use crate::schema::NodeTypeDefinition;

pub(super) fn latent_nodes() -> Vec<NodeTypeDefinition> {
    vec![
        node("EmptyLatentImage", "Empty Latent Image", "latent")
            .with_description("Create a new batch of empty latent images")
            .with_required(vec![
                ("width", dimension(16)),
                ("height", dimension(16)),
                ("batch_size", int(1, 1, 4096, 1)),
            ])
            .with_outputs(vec![out("LATENT", "LATENT")]),
        node("VAEDecode", "VAE Decode", "latent")
            .with_required(vec![("samples", link("LATENT")), ("vae", link("VAE"))])
            .with_outputs(vec![out("IMAGE", "IMAGE")]),
    ]
}
