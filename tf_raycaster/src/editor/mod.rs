//! Interactive editing of transfer functions
//!
//! Stops are drawn as diamonds on a horizontal gradient bar.
//! The editor translates pointer events on that bar into transfer function mutations.

mod color_dialog;
mod editor;
mod marker;

pub use color_dialog::{ColorDialog, ColorRequest, QueuedDialog};
pub use editor::{Editor, EditorState, MarkerView, StopFlags};
pub use marker::{polygon_contains, EditorLayout, Marker, LAYOUT_OFFSET, MARKER_SIZE};
