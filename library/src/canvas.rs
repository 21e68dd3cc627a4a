//! Canvas selection state.

use uuid::Uuid;

#[derive(Clone, Debug, Default)]
pub struct Canvas {
    selected: Vec<Uuid>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a node. Without `add_to_current` it becomes the sole selection.
    pub fn select_node(&mut self, id: Uuid, add_to_current: bool) {
        if !add_to_current {
            self.selected.clear();
        }
        if !self.selected.contains(&id) {
            self.selected.push(id);
        }
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, id: Uuid) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected(&self) -> &[Uuid] {
        &self.selected
    }

    /// Drop a removed node from the selection.
    pub fn forget(&mut self, id: Uuid) {
        self.selected.retain(|s| *s != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_replaces_unless_adding() {
        let mut canvas = Canvas::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        canvas.select_node(a, false);
        canvas.select_node(b, true);
        assert_eq!(canvas.selected(), &[a, b]);
        canvas.select_node(b, false);
        assert_eq!(canvas.selected(), &[b]);
    }
}
