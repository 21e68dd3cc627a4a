//! Context-menu entries and the host's base node menu.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::app::HostContext;
use crate::error::GraphError;
use crate::model::{Node, Point};

/// Callback run when a menu entry is chosen.
pub type MenuAction = Arc<dyn Fn(&mut HostContext<'_>) -> Result<(), GraphError> + Send + Sync>;

/// Offset applied to cloned nodes so they do not cover the original.
const CLONE_OFFSET: f64 = 10.0;

#[derive(Clone)]
pub struct MenuEntry {
    pub content: String,
    pub action: MenuAction,
}

impl MenuEntry {
    pub fn new<F>(content: impl Into<String>, action: F) -> Self
    where
        F: Fn(&mut HostContext<'_>) -> Result<(), GraphError> + Send + Sync + 'static,
    {
        Self {
            content: content.into(),
            action: Arc::new(action),
        }
    }
}

impl fmt::Debug for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuEntry")
            .field("content", &self.content)
            .finish_non_exhaustive()
    }
}

/// Entries the host offers for every node before extensions contribute.
pub fn base_node_menu(node: &Node) -> Vec<MenuEntry> {
    let id = node.id;
    vec![
        MenuEntry::new("Clone", move |ctx| clone_node(ctx, id).map(|_| ())),
        MenuEntry::new("Remove", move |ctx| {
            ctx.graph.remove_node(id).ok_or(GraphError::NodeNotFound(id))?;
            ctx.canvas.forget(id);
            Ok(())
        }),
    ]
}

fn clone_node(ctx: &mut HostContext<'_>, id: Uuid) -> Result<Uuid, GraphError> {
    let mut copy = ctx
        .graph
        .node(id)
        .ok_or(GraphError::NodeNotFound(id))?
        .duplicate();
    copy.pos = Point::new(copy.pos.x + CLONE_OFFSET, copy.pos.y + CLONE_OFFSET);
    let copy_id = ctx.graph.add(copy);
    ctx.canvas.select_node(copy_id, false);
    Ok(copy_id)
}
