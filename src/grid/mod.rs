//! Grid module orchestrator.
//!
//! The sparse cell model lives in the private `core` module and is
//! re-exported from here.

mod core;

pub use self::core::{CellIndex, GridModel};
