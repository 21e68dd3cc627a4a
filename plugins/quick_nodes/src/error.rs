use graph_host::GraphError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuickNodesError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("Node type '{node_type}' has no widget named '{field}'")]
    FieldNotFound { node_type: String, field: String },
    #[error("Field '{field}' is not declared in the schema of '{node_type}'")]
    UndeclaredField { node_type: String, field: String },
    #[error("Config parsing error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Config serialization error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuickNodesError {
    pub fn field_not_found(node_type: &str, field: &str) -> Self {
        QuickNodesError::FieldNotFound {
            node_type: node_type.to_string(),
            field: field.to_string(),
        }
    }
}
