//! Placing new nodes beside an existing one.

use graph_host::model::{Point, Size};
use graph_host::{GraphError, HostContext};
use log::debug;
use uuid::Uuid;

use crate::error::QuickNodesError;

/// Horizontal gap between a new node and its reference node.
pub const NODE_SEPARATION: f64 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaceOptions {
    /// Make the new node the sole canvas selection
    pub select: bool,
    /// Vertical offset from the reference node's top edge
    pub shift_y: f64,
    /// Place left of the reference node instead of right
    pub before: bool,
    /// Size applied before the placement math
    pub size: Option<Size>,
}

impl Default for PlaceOptions {
    fn default() -> Self {
        Self {
            select: true,
            shift_y: 0.0,
            before: false,
            size: None,
        }
    }
}

impl PlaceOptions {
    pub fn before() -> Self {
        Self {
            before: true,
            ..Self::default()
        }
    }

    pub fn with_size(mut self, size: Option<Size>) -> Self {
        self.size = size;
        self
    }

    pub fn with_shift_y(mut self, shift_y: f64) -> Self {
        self.shift_y = shift_y;
        self
    }

    pub fn without_selection(mut self) -> Self {
        self.select = false;
        self
    }
}

/// Create a node of `type_id`, add it to the graph next to `next_to`, and return its id.
///
/// Fails before touching the graph if the type is unknown or the reference node is missing.
pub fn place_new_node(
    ctx: &mut HostContext<'_>,
    type_id: &str,
    next_to: Uuid,
    options: PlaceOptions,
) -> Result<Uuid, QuickNodesError> {
    let reference = ctx
        .graph
        .node(next_to)
        .ok_or(GraphError::NodeNotFound(next_to))?;
    let (ref_pos, ref_size) = (reference.pos, reference.size);

    let mut node = ctx.create_node(type_id)?;
    if let Some(size) = options.size {
        node.size = size;
    }

    let offset_x = if options.before {
        -node.size.width - NODE_SEPARATION
    } else {
        ref_size.width + NODE_SEPARATION
    };
    node.pos = Point::new(ref_pos.x + offset_x, ref_pos.y + options.shift_y);
    let pos = node.pos;

    let id = ctx.graph.add(node);
    if options.select {
        ctx.canvas.select_node(id, false);
    }
    debug!("Placed {} at ({}, {}) next to {}", type_id, pos.x, pos.y, next_to);
    Ok(id)
}
