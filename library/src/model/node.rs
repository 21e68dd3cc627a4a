//! Graph nodes: positioned boxes holding widgets and slots.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::model::geometry::{
    NODE_MIN_WIDTH, NODE_SLOT_HEIGHT, Point, Size, TITLE_CHAR_WIDTH, WIDGET_GAP,
};
use crate::model::slot::{InputSlot, OutputSlot};
use crate::model::value::WidgetValue;
use crate::model::widget::{SerializeMode, Widget};

#[derive(Clone, Debug)]
pub struct Node {
    pub id: Uuid,
    /// References a `NodeTypeDefinition` registered in the `NodeTypeRegistry`
    pub type_id: String,
    pub title: String,
    pub pos: Point,
    pub size: Size,
    pub widgets: Vec<Widget>,
    pub inputs: Vec<InputSlot>,
    pub outputs: Vec<OutputSlot>,
}

impl Node {
    pub fn new(type_id: &str, title: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            type_id: type_id.to_string(),
            title: title.to_string(),
            pos: Point::default(),
            size: Size::default(),
            widgets: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn find_input_slot(&self, name: &str) -> Option<usize> {
        self.inputs.iter().position(|i| i.name == name)
    }

    pub fn find_output_slot(&self, name: &str) -> Option<usize> {
        self.outputs.iter().position(|o| o.name == name)
    }

    pub fn widget_index(&self, name: &str) -> Option<usize> {
        self.widgets.iter().position(|w| w.name == name)
    }

    pub fn widget(&self, name: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.name == name)
    }

    pub fn widget_mut(&mut self, name: &str) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.name == name)
    }

    /// Append an input slot and return its index.
    pub fn add_input(&mut self, slot: InputSlot) -> usize {
        self.inputs.push(slot);
        self.inputs.len() - 1
    }

    pub fn add_output(&mut self, slot: OutputSlot) -> usize {
        self.outputs.push(slot);
        self.outputs.len() - 1
    }

    /// Input slot derived from the named widget, if any.
    pub fn bound_input(&self, widget_name: &str) -> Option<&InputSlot> {
        self.inputs.iter().find(|i| i.is_bound_to(widget_name))
    }

    /// Minimum size that fits the title, slot rows and visible widgets.
    pub fn compute_size(&self) -> Size {
        let rows = self.inputs.len().max(self.outputs.len()).max(1) as f64;
        let widgets: f64 = self
            .widgets
            .iter()
            .map(|w| w.layout_height() + WIDGET_GAP)
            .sum();
        let title_width = self.title.chars().count() as f64 * TITLE_CHAR_WIDTH + 40.0;

        Size {
            width: NODE_MIN_WIDTH.max(title_width),
            height: rows * NODE_SLOT_HEIGHT + widgets + WIDGET_GAP,
        }
    }

    /// Stack widgets below the slot rows.
    pub fn relayout_widgets(&mut self) {
        let rows = self.inputs.len().max(self.outputs.len()).max(1) as f64;
        let mut y = rows * NODE_SLOT_HEIGHT + WIDGET_GAP;
        for widget in &mut self.widgets {
            widget.last_y = y;
            y += widget.layout_height() + WIDGET_GAP;
        }
    }

    /// Serialized value of one widget, `None` when the widget contributes nothing.
    pub fn serialize_widget(&self, widget: &Widget) -> Option<WidgetValue> {
        match widget.serialize_mode {
            SerializeMode::Always => widget.own_value(),
            SerializeMode::GatedByLink => {
                let linked = self
                    .bound_input(&widget.name)
                    .is_some_and(InputSlot::is_connected);
                if linked { widget.own_value() } else { None }
            }
        }
    }

    /// Widget values keyed by widget name; omitted widgets are absent.
    pub fn serialize_widgets(&self) -> Map<String, Value> {
        self.widgets
            .iter()
            .filter_map(|w| self.serialize_widget(w).map(|v| (w.name.clone(), v.to_json())))
            .collect()
    }

    /// Copy of this node with a fresh id and no links.
    pub fn duplicate(&self) -> Node {
        let mut copy = self.clone();
        copy.id = Uuid::new_v4();
        for input in &mut copy.inputs {
            input.link = None;
        }
        for output in &mut copy.outputs {
            output.links.clear();
        }
        copy
    }
}
