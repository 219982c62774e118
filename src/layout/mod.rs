//! Layout module orchestrator.
//!
//! Row-size derivation lives in the private `core` module and is
//! re-exported from here.

mod core;

pub use self::core::{RowDimensions, compute_row_sizes};
