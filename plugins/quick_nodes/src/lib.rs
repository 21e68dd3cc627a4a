//! Quick helper-node insertion for the node graph editor.
//!
//! Right-clicking a configured node offers `Prepend <helper>` entries. Choosing
//! one places the helper to the left of the node, converts the node's fields
//! (by default `width` and `height`) from inline widgets into inputs, and links
//! the helper's same-named outputs into them.

pub mod config;
pub mod convert;
pub mod definitions;
pub mod error;
pub mod extension;
pub mod menu;
pub mod placement;
pub mod prepend;
pub mod widget_type;

use graph_host::App;
use log::info;

pub use config::{HelperChoice, QuickNodesConfig, SchemaPolicy};
pub use convert::{CONVERTED_TYPE, Conversion, convert_to_input, is_converted};
pub use error::QuickNodesError;
pub use extension::{EXTENSION_NAME, QuickNodesExtension};
pub use placement::{NODE_SEPARATION, PlaceOptions, place_new_node};
pub use prepend::prepend_new_node;
pub use widget_type::{WidgetType, resolve_widget_type};

/// Register the helper node types and the prepend extension with a running app.
pub fn install(app: &mut App, config: QuickNodesConfig) -> Result<(), QuickNodesError> {
    app.register_extension(QuickNodesExtension::new(config))?;
    for def in definitions::resolution_selector_nodes() {
        if !app.registry().contains(&def.type_id) {
            app.register_node_type(def)?;
        }
    }
    info!("Quick nodes installed");
    Ok(())
}
