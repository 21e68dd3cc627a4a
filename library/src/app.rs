//! The running editor application as seen by extensions.

use std::sync::Arc;

use log::{error, info};
use uuid::Uuid;

use crate::canvas::Canvas;
use crate::error::GraphError;
use crate::extension::{Extension, ExtensionManager};
use crate::menu::{MenuEntry, base_node_menu};
use crate::model::{Graph, Node, Point};
use crate::node_definitions::builtin_node_definitions;
use crate::registry::NodeTypeRegistry;
use crate::schema::NodeTypeDefinition;

/// Exclusive access to the editor state for the duration of one menu callback.
pub struct HostContext<'a> {
    pub graph: &'a mut Graph,
    pub canvas: &'a mut Canvas,
    pub registry: &'a NodeTypeRegistry,
}

impl HostContext<'_> {
    /// Instantiate a node of a registered type without adding it to the graph.
    pub fn create_node(&self, type_id: &str) -> Result<Node, GraphError> {
        self.registry.create_node(type_id)
    }
}

#[derive(Default)]
pub struct App {
    pub graph: Graph,
    pub canvas: Canvas,
    registry: NodeTypeRegistry,
    extensions: ExtensionManager,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// App with the built-in node types registered.
    pub fn with_builtin_node_types() -> Result<Self, GraphError> {
        let mut app = Self::new();
        app.register_builtin_node_types()?;
        Ok(app)
    }

    pub fn registry(&self) -> &NodeTypeRegistry {
        &self.registry
    }

    pub fn extensions(&self) -> &ExtensionManager {
        &self.extensions
    }

    pub fn register_extension<E: Extension + 'static>(&mut self, extension: E) -> Result<(), GraphError> {
        self.extensions.register(Arc::new(extension), &self.registry)
    }

    /// Run extension hooks for the definition, then make the type available.
    pub fn register_node_type(&mut self, def: NodeTypeDefinition) -> Result<(), GraphError> {
        self.extensions.node_registering(&def)?;
        self.registry.register(def);
        Ok(())
    }

    pub fn register_builtin_node_types(&mut self) -> Result<(), GraphError> {
        let defs = builtin_node_definitions();
        info!("Registering {} built-in node types", defs.len());
        for def in defs {
            self.register_node_type(def)?;
        }
        Ok(())
    }

    /// Create a node of a registered type at `pos` and add it to the graph.
    pub fn add_node(&mut self, type_id: &str, pos: Point) -> Result<Uuid, GraphError> {
        let mut node = self.registry.create_node(type_id)?;
        node.pos = pos;
        Ok(self.graph.add(node))
    }

    pub fn context(&mut self) -> HostContext<'_> {
        HostContext {
            graph: &mut self.graph,
            canvas: &mut self.canvas,
            registry: &self.registry,
        }
    }

    /// Context menu for a node: host entries first, then each contributor in registration order.
    pub fn node_menu(&self, node_id: Uuid) -> Result<Vec<MenuEntry>, GraphError> {
        let node = self
            .graph
            .node(node_id)
            .ok_or(GraphError::NodeNotFound(node_id))?;
        let mut options = base_node_menu(node);
        if let Some(def) = self.registry.get(&node.type_id) {
            for contributor in self.extensions.contributors_for(&node.type_id) {
                contributor.extend_menu(node, def, &mut options);
            }
        }
        Ok(options)
    }

    /// Run a menu entry's callback to completion. Failures are logged and returned.
    pub fn activate(&mut self, entry: &MenuEntry) -> Result<(), GraphError> {
        let mut ctx = self.context();
        (entry.action)(&mut ctx).inspect_err(|e| {
            error!("Menu action '{}' failed: {}", entry.content, e);
        })
    }

    /// Find the entry labelled `content` in a node's menu and run it.
    pub fn activate_by_label(&mut self, node_id: Uuid, content: &str) -> Result<(), GraphError> {
        let entry = self
            .node_menu(node_id)?
            .into_iter()
            .find(|e| e.content == content)
            .ok_or_else(|| GraphError::MenuEntryNotFound(content.to_string()))?;
        self.activate(&entry)
    }
}
