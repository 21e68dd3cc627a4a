//! Inline widgets and their layout/serialization state.

use serde_json::{Map, Value};

use crate::model::geometry::{NODE_WIDGET_HEIGHT, WIDGET_GAP};
use crate::model::value::WidgetValue;

/// Custom serialization behavior of a widget. `None` from the function omits the value.
pub type SerializeFn = fn(&Widget) -> Option<WidgetValue>;

/// Whether the widget takes part in layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    /// Collapsed to zero height, still present in the widget list.
    Hidden,
}

/// When the widget contributes a value to serialized output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SerializeMode {
    #[default]
    Always,
    /// Only while the input slot bound to this widget has an incoming link.
    GatedByLink,
}

/// Widget configuration captured before the widget was converted to an input.
#[derive(Clone, Debug)]
pub struct OriginalWidget {
    pub widget_type: String,
    pub size_hint: Option<f64>,
    pub serialize_fn: Option<SerializeFn>,
}

#[derive(Clone, Debug)]
pub struct Widget {
    /// Unique within its node
    pub name: String,
    /// Host widget kind ("number", "combo", ...) or the converted tag
    pub widget_type: String,
    pub value: WidgetValue,
    pub options: Map<String, Value>,
    /// Custom layout height; `None` uses the default widget height
    pub size_hint: Option<f64>,
    pub serialize_fn: Option<SerializeFn>,
    /// Companion widgets (by name) that follow this widget, e.g. seed + control
    pub linked_widgets: Vec<String>,
    /// Layout position relative to the node's top edge
    pub last_y: f64,
    pub visibility: Visibility,
    pub serialize_mode: SerializeMode,
    pub original: Option<OriginalWidget>,
}

impl Widget {
    pub fn new(name: &str, widget_type: &str, value: impl Into<WidgetValue>) -> Self {
        Self {
            name: name.to_string(),
            widget_type: widget_type.to_string(),
            value: value.into(),
            options: Map::new(),
            size_hint: None,
            serialize_fn: None,
            linked_widgets: Vec::new(),
            last_y: 0.0,
            visibility: Visibility::Visible,
            serialize_mode: SerializeMode::Always,
            original: None,
        }
    }

    pub fn with_options(mut self, options: Map<String, Value>) -> Self {
        self.options = options;
        self
    }

    pub fn with_serializer(mut self, serialize_fn: SerializeFn) -> Self {
        self.serialize_fn = Some(serialize_fn);
        self
    }

    pub fn with_size_hint(mut self, height: f64) -> Self {
        self.size_hint = Some(height);
        self
    }

    pub fn with_linked(mut self, name: &str) -> Self {
        self.linked_widgets.push(name.to_string());
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// Height this widget occupies, not counting the gap after it.
    ///
    /// Hidden widgets report `-WIDGET_GAP` so that widget plus gap collapses to zero.
    pub fn layout_height(&self) -> f64 {
        match self.visibility {
            Visibility::Visible => self.size_hint.unwrap_or(NODE_WIDGET_HEIGHT),
            Visibility::Hidden => -WIDGET_GAP,
        }
    }

    /// The value produced by the widget's own serialization behavior, ignoring gating.
    pub fn own_value(&self) -> Option<WidgetValue> {
        let serialize_fn = self
            .original
            .as_ref()
            .map_or(self.serialize_fn, |original| original.serialize_fn);
        match serialize_fn {
            Some(f) => f(self),
            None => Some(self.value.clone()),
        }
    }
}

/// Serializer for float widgets declaring a `round` option: snaps the value to that step.
pub fn serialize_rounded(widget: &Widget) -> Option<WidgetValue> {
    let step = widget.options.get("round").and_then(Value::as_f64);
    match (widget.value.as_number(), step) {
        (Some(v), Some(step)) if step > 0.0 => Some(WidgetValue::from((v / step).round() * step)),
        _ => Some(widget.value.clone()),
    }
}
