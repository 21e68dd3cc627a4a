//! The node graph: owns nodes and the links between their slots.

use std::collections::{HashSet, VecDeque};

use log::debug;
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::error::GraphError;
use crate::model::link::{Link, SlotRef};
use crate::model::node::Node;

/// Link type accepted by, or produced by, any slot.
pub const ANY_TYPE: &str = "*";

#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    links: Vec<Link>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a node. Returns its id.
    pub fn add(&mut self, node: Node) -> Uuid {
        let id = node.id;
        debug!("Adding node {} ({})", id, node.type_id);
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: Uuid) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: Uuid) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn link(&self, id: Uuid) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    /// Remove a node together with every link touching it.
    pub fn remove_node(&mut self, id: Uuid) -> Option<Node> {
        let index = self.nodes.iter().position(|n| n.id == id)?;
        let touching: Vec<Uuid> = self
            .links
            .iter()
            .filter(|l| l.origin.node_id == id || l.target.node_id == id)
            .map(|l| l.id)
            .collect();
        for link_id in touching {
            self.remove_link(link_id);
        }
        debug!("Removing node {}", id);
        Some(self.nodes.remove(index))
    }

    /// Connect an output slot to an input slot.
    ///
    /// Any link already feeding the input is replaced. Returns the new link's id.
    pub fn connect(
        &mut self,
        origin_id: Uuid,
        out_slot: usize,
        target_id: Uuid,
        in_slot: usize,
    ) -> Result<Uuid, GraphError> {
        let origin = self
            .node(origin_id)
            .ok_or(GraphError::NodeNotFound(origin_id))?;
        let output = origin
            .outputs
            .get(out_slot)
            .ok_or_else(|| GraphError::slot(origin_id, out_slot))?;
        let target = self
            .node(target_id)
            .ok_or(GraphError::NodeNotFound(target_id))?;
        let input = target
            .inputs
            .get(in_slot)
            .ok_or_else(|| GraphError::slot(target_id, in_slot))?;

        if origin_id == target_id {
            return Err(GraphError::connection("Cannot connect a node to itself"));
        }
        if !types_compatible(&output.data_type, &input.link_type) {
            return Err(GraphError::connection(format!(
                "Output {}.{} ({}) cannot feed input {}.{} ({})",
                origin_id, output.name, output.data_type, target_id, input.name, input.link_type
            )));
        }
        if self.would_create_cycle(origin_id, target_id) {
            return Err(GraphError::connection("Connection would create a cycle"));
        }

        let link = Link::new(
            SlotRef::new(origin_id, out_slot),
            SlotRef::new(target_id, in_slot),
            &output.data_type,
        );
        let link_id = link.id;

        self.disconnect_input(target_id, in_slot);
        if let Some(slot) = self
            .node_mut(origin_id)
            .and_then(|n| n.outputs.get_mut(out_slot))
        {
            slot.links.push(link_id);
        }
        if let Some(slot) = self
            .node_mut(target_id)
            .and_then(|n| n.inputs.get_mut(in_slot))
        {
            slot.link = Some(link_id);
        }
        debug!(
            "Linked {}[{}] -> {}[{}]",
            origin_id, out_slot, target_id, in_slot
        );
        self.links.push(link);

        Ok(link_id)
    }

    /// Drop the link feeding an input slot, if any.
    pub fn disconnect_input(&mut self, node_id: Uuid, slot: usize) -> Option<Link> {
        let link_id = self.node(node_id)?.inputs.get(slot)?.link?;
        self.remove_link(link_id)
    }

    /// Link currently feeding an input slot.
    pub fn incoming_link(&self, node_id: Uuid, slot: usize) -> Option<&Link> {
        let link_id = self.node(node_id)?.inputs.get(slot)?.link?;
        self.link(link_id)
    }

    pub fn links_into(&self, node_id: Uuid) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(move |l| l.target.node_id == node_id)
    }

    fn remove_link(&mut self, link_id: Uuid) -> Option<Link> {
        let index = self.links.iter().position(|l| l.id == link_id)?;
        let link = self.links.remove(index);

        if let Some(slot) = self
            .node_mut(link.origin.node_id)
            .and_then(|n| n.outputs.get_mut(link.origin.slot))
        {
            slot.links.retain(|id| *id != link_id);
        }
        if let Some(slot) = self
            .node_mut(link.target.node_id)
            .and_then(|n| n.inputs.get_mut(link.target.slot))
        {
            if slot.link == Some(link_id) {
                slot.link = None;
            }
        }
        Some(link)
    }

    /// True if `to_node` can already reach `from_node`.
    fn would_create_cycle(&self, from_node: Uuid, to_node: Uuid) -> bool {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(to_node);

        while let Some(current) = queue.pop_front() {
            if current == from_node {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            for link in &self.links {
                if link.origin.node_id == current {
                    queue.push_back(link.target.node_id);
                }
            }
        }
        false
    }

    /// Execution request for the whole graph, keyed by node id.
    ///
    /// Widget values come first; linked inputs then override them with
    /// `[origin_node_id, origin_slot]`. Widgets gated on an unlinked input are absent.
    pub fn to_prompt(&self) -> Value {
        let mut prompt = Map::new();
        for node in &self.nodes {
            let mut inputs = node.serialize_widgets();
            for input in &node.inputs {
                if let Some(link) = input.link.and_then(|id| self.link(id)) {
                    inputs.insert(
                        input.name.clone(),
                        json!([link.origin.node_id.to_string(), link.origin.slot]),
                    );
                }
            }
            prompt.insert(
                node.id.to_string(),
                json!({ "class_type": node.type_id, "inputs": inputs }),
            );
        }
        Value::Object(prompt)
    }
}

/// Whether an output of type `output` may feed an input accepting `input`.
pub fn types_compatible(output: &str, input: &str) -> bool {
    output == ANY_TYPE || input == ANY_TYPE || output.eq_ignore_ascii_case(input)
}
