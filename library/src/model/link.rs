//! Links between output and input slots.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies a slot by index on a specific node.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotRef {
    pub node_id: Uuid,
    pub slot: usize,
}

impl SlotRef {
    pub fn new(node_id: Uuid, slot: usize) -> Self {
        Self { node_id, slot }
    }
}

/// A directed edge from an output slot to an input slot.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Link {
    pub id: Uuid,
    /// Source (output) slot
    pub origin: SlotRef,
    /// Destination (input) slot
    pub target: SlotRef,
    pub link_type: String,
}

impl Link {
    pub fn new(origin: SlotRef, target: SlotRef, link_type: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            target,
            link_type: link_type.to_string(),
        }
    }
}
