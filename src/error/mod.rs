//! Error module orchestrator.
//!
//! The crate-wide error enum and `Result` alias live in the private
//! `types` module and are re-exported from here.

mod types;

pub use types::{GalleryError, Result};
