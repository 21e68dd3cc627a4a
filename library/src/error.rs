use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),
    #[error("Node {0} not found")]
    NodeNotFound(Uuid),
    #[error("Slot {slot} not found on node {node_id}")]
    SlotNotFound { node_id: Uuid, slot: String },
    #[error("Invalid connection: {0}")]
    InvalidConnection(String),
    #[error("Invalid schema for '{field}': {reason}")]
    InvalidSchema { field: String, reason: String },
    #[error("Menu entry '{0}' not found")]
    MenuEntryNotFound(String),
    #[error("Extension '{0}' is already registered")]
    DuplicateExtension(String),
    #[error("Extension error: {0}")]
    Extension(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl GraphError {
    pub fn connection(msg: impl Into<String>) -> Self {
        GraphError::InvalidConnection(msg.into())
    }

    pub fn schema(field: &str, reason: impl Into<String>) -> Self {
        GraphError::InvalidSchema {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn slot(node_id: Uuid, slot: impl ToString) -> Self {
        GraphError::SlotNotFound {
            node_id,
            slot: slot.to_string(),
        }
    }

    /// Wrap an error raised by extension code running inside a host callback.
    pub fn extension<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        GraphError::Extension(Box::new(err))
    }
}
