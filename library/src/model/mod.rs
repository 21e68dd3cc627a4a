pub mod geometry;
pub mod graph;
pub mod link;
pub mod node;
pub mod slot;
pub mod value;
pub mod widget;

pub use geometry::{Point, Size};
pub use graph::Graph;
pub use link::{Link, SlotRef};
pub use node::Node;
pub use slot::{InputSlot, OutputSlot, WidgetBinding};
pub use value::WidgetValue;
pub use widget::{OriginalWidget, SerializeFn, SerializeMode, Visibility, Widget};
