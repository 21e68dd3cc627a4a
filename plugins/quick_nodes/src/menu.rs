//! "Prepend ..." context-menu entries.

use std::sync::Arc;

use graph_host::model::Node;
use graph_host::{GraphError, MenuContributor, MenuEntry, NodeTypeDefinition};

use crate::config::{HelperChoice, SchemaPolicy};
use crate::prepend::prepend_new_node;

/// Offers one entry per helper choice, each prepending that helper to the clicked node.
pub struct PrependMenu {
    helpers: Vec<HelperChoice>,
    fields: Arc<[String]>,
    policy: SchemaPolicy,
}

impl PrependMenu {
    pub fn new(helpers: Vec<HelperChoice>, fields: Vec<String>, policy: SchemaPolicy) -> Self {
        Self {
            helpers,
            fields: fields.into(),
            policy,
        }
    }
}

impl MenuContributor for PrependMenu {
    fn extend_menu(&self, node: &Node, definition: &NodeTypeDefinition, options: &mut Vec<MenuEntry>) {
        // Each entry goes to the top, so the last helper ends up first.
        for helper in &self.helpers {
            let target = node.id;
            let schema = definition.clone();
            let helper_type = helper.node_type.clone();
            let fields = Arc::clone(&self.fields);
            let policy = self.policy;

            options.insert(
                0,
                MenuEntry::new(format!("Prepend {}", helper.label), move |ctx| {
                    prepend_new_node(ctx, target, &schema, &helper_type, &fields[..], policy)
                        .map(|_| ())
                        .map_err(GraphError::extension)
                }),
            );
        }
    }
}
