//! Placement module orchestrator.
//!
//! Drop resolution, hit testing and highlight derivation live in the
//! private `core` module and are re-exported from here.

mod core;

pub use self::core::{
    GridGeometry, HighlightLine, Placement, RowGeometry, hit_test, preview, resolve,
};
