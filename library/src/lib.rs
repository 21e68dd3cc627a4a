//! Host-side node graph model.
//!
//! Nodes carry inline widgets and typed input/output slots. Node types are
//! described by [`schema::NodeTypeDefinition`]s held in a
//! [`registry::NodeTypeRegistry`]; extensions hook into type registration
//! through [`extension::Extension`] and contribute context-menu entries that
//! run against a [`app::HostContext`].

pub mod app;
pub mod canvas;
pub mod error;
pub mod extension;
pub mod menu;
pub mod model;
pub mod node_definitions;
pub mod registry;
pub mod schema;

pub use app::{App, HostContext};
pub use error::GraphError;
pub use extension::{Extension, ExtensionManager, MenuContributor, NodeRegistration};
pub use menu::MenuEntry;
pub use registry::NodeTypeRegistry;
pub use schema::{FieldConfig, InputSchema, NodeTypeDefinition, OutputDefinition};
