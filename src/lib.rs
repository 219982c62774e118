//! Drag-and-drop image gallery grid engine.
//!
//! The crate models a panel that arranges image thumbnails into rows,
//! resolves where a dragged thumbnail lands in the row/column grid and
//! re-flows per-row dimensions after every insertion or removal. The grid
//! model and drop resolver are pure and fully testable; a thin command
//! stream ([`LayoutCommand`]) carries structural and sizing instructions
//! to whatever retained layout tree the host environment offers.

pub mod catalog;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod panel;
pub mod placement;

pub use catalog::{ImageCatalog, ImageId, ImageSource};
pub use error::{GalleryError, Result};
pub use geometry::{Edge, Point, Rect, Size, classify_edge};
pub use grid::{CellIndex, GridModel};
pub use layout::{RowDimensions, compute_row_sizes};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink, json_kv,
};
pub use metrics::{MetricSnapshot, PanelMetrics};
pub use panel::sync::{LayoutCommand, LayoutHost, RecordingHost, push_resize_pass};
pub use panel::{Color, DragState, GalleryPanel, HighlightPen, PanelConfig};
pub use placement::{
    GridGeometry, HighlightLine, Placement, RowGeometry, hit_test, preview, resolve,
};
