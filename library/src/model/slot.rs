use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::FieldConfig;

/// Back-reference from an input slot to the widget it was derived from.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WidgetBinding {
    pub name: String,
    /// Declared configuration of the widget, so a connecting node can recover its value domain
    pub config: FieldConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct InputSlot {
    pub name: String,
    /// Accepted link type; enumerated fields use the comma-joined literal list
    pub link_type: String,
    /// Incoming link, at most one
    pub link: Option<Uuid>,
    pub widget: Option<WidgetBinding>,
}

impl InputSlot {
    pub fn new(name: &str, link_type: &str) -> Self {
        Self {
            name: name.to_string(),
            link_type: link_type.to_string(),
            link: None,
            widget: None,
        }
    }

    pub fn from_widget(name: &str, link_type: &str, binding: WidgetBinding) -> Self {
        Self {
            widget: Some(binding),
            ..Self::new(name, link_type)
        }
    }

    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    pub fn is_bound_to(&self, widget_name: &str) -> bool {
        self.widget.as_ref().is_some_and(|b| b.name == widget_name)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OutputSlot {
    pub name: String,
    pub data_type: String,
    pub links: Vec<Uuid>,
}

impl OutputSlot {
    pub fn new(name: &str, data_type: &str) -> Self {
        Self {
            name: name.to_string(),
            data_type: data_type.to_string(),
            links: Vec::new(),
        }
    }
}
