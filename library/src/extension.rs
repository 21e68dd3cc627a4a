//! Extension registration and per-node-kind menu contributors.
//!
//! Extensions never patch node behavior. During node type registration each
//! extension may attach [`MenuContributor`]s to that node kind; the host calls
//! them in registration order from a single dispatch point.

use std::collections::HashMap;
use std::sync::Arc;

use log::info;

use crate::error::GraphError;
use crate::menu::MenuEntry;
use crate::model::Node;
use crate::registry::NodeTypeRegistry;
use crate::schema::NodeTypeDefinition;

/// Adds entries to the context menu of one node kind.
pub trait MenuContributor: Send + Sync {
    /// `options` already holds the host's entries and those of earlier contributors.
    fn extend_menu(&self, node: &Node, definition: &NodeTypeDefinition, options: &mut Vec<MenuEntry>);
}

pub trait Extension: Send + Sync {
    /// Unique extension name.
    fn name(&self) -> &str;

    /// Called once per node type definition before the type becomes available.
    fn before_register_node_def(
        &self,
        definition: &NodeTypeDefinition,
        registration: &mut NodeRegistration<'_>,
    ) -> Result<(), GraphError> {
        let _ = (definition, registration);
        Ok(())
    }
}

/// Handle given to an extension hook for the node kind being registered.
pub struct NodeRegistration<'a> {
    type_id: &'a str,
    contributors: &'a mut Vec<Arc<dyn MenuContributor>>,
}

impl NodeRegistration<'_> {
    pub fn type_id(&self) -> &str {
        self.type_id
    }

    pub fn add_menu_contributor(&mut self, contributor: Arc<dyn MenuContributor>) {
        self.contributors.push(contributor);
    }
}

#[derive(Default)]
pub struct ExtensionManager {
    extensions: Vec<Arc<dyn Extension>>,
    contributors: HashMap<String, Vec<Arc<dyn MenuContributor>>>,
}

impl ExtensionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extension, replaying its hook for already registered node types.
    ///
    /// Contributors are only attached once every replayed hook has succeeded.
    pub fn register(
        &mut self,
        extension: Arc<dyn Extension>,
        registry: &NodeTypeRegistry,
    ) -> Result<(), GraphError> {
        let name = extension.name().to_string();
        if self.extensions.iter().any(|e| e.name() == name) {
            return Err(GraphError::DuplicateExtension(name));
        }
        let mut staged = Vec::new();
        for def in registry.definitions() {
            let mut added = Vec::new();
            Self::run_hook(extension.as_ref(), def, &mut added)?;
            if !added.is_empty() {
                staged.push((def.type_id.clone(), added));
            }
        }
        for (type_id, added) in staged {
            self.contributors.entry(type_id).or_default().extend(added);
        }
        info!("Registered extension '{}'", name);
        self.extensions.push(extension);
        Ok(())
    }

    /// Run every extension's hook for a node type about to be registered.
    ///
    /// The node kind's contributors are replaced, so registering a type again does not
    /// duplicate menu entries. On error the previous contributors are kept.
    pub fn node_registering(&mut self, def: &NodeTypeDefinition) -> Result<(), GraphError> {
        let mut list = Vec::new();
        for extension in &self.extensions {
            Self::run_hook(extension.as_ref(), def, &mut list)?;
        }
        self.contributors.insert(def.type_id.clone(), list);
        Ok(())
    }

    fn run_hook(
        extension: &dyn Extension,
        def: &NodeTypeDefinition,
        contributors: &mut Vec<Arc<dyn MenuContributor>>,
    ) -> Result<(), GraphError> {
        let mut registration = NodeRegistration {
            type_id: &def.type_id,
            contributors,
        };
        extension.before_register_node_def(def, &mut registration)
    }

    /// Contributors for a node kind, in registration order.
    pub fn contributors_for(&self, type_id: &str) -> &[Arc<dyn MenuContributor>] {
        self.contributors
            .get(type_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(|e| e.name())
    }
}
