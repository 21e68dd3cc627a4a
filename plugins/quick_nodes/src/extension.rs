use std::sync::Arc;

use graph_host::{Extension, GraphError, NodeRegistration, NodeTypeDefinition};
use log::debug;

use crate::config::QuickNodesConfig;
use crate::menu::PrependMenu;

pub const EXTENSION_NAME: &str = "quick_nodes.prepend";

/// Attaches the prepend menu to every configured target node kind.
pub struct QuickNodesExtension {
    config: QuickNodesConfig,
    menu: Arc<PrependMenu>,
}

impl QuickNodesExtension {
    pub fn new(config: QuickNodesConfig) -> Self {
        let menu = Arc::new(PrependMenu::new(
            config.helpers.clone(),
            config.fields.clone(),
            config.schema_policy,
        ));
        Self { config, menu }
    }

    pub fn config(&self) -> &QuickNodesConfig {
        &self.config
    }
}

impl Default for QuickNodesExtension {
    fn default() -> Self {
        Self::new(QuickNodesConfig::default())
    }
}

impl Extension for QuickNodesExtension {
    fn name(&self) -> &str {
        EXTENSION_NAME
    }

    fn before_register_node_def(
        &self,
        definition: &NodeTypeDefinition,
        registration: &mut NodeRegistration<'_>,
    ) -> Result<(), GraphError> {
        if self.config.targets(&definition.type_id) {
            debug!("Adding prepend menu to {}", registration.type_id());
            registration.add_menu_contributor(self.menu.clone());
        }
        Ok(())
    }
}
