//! Image handles and the externally owned image source.
//!
//! The grid never copies pixel data. It stores opaque [`ImageId`] handles
//! and asks the host's [`ImageSource`] for native dimensions when row
//! sizes are recomputed. [`ImageCatalog`] is a plain in-memory source used
//! by tests and by hosts that preload their gallery list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Size;

/// Opaque handle into an externally owned image list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ImageId(pub u64);

/// Read-only view of the host's image list.
pub trait ImageSource {
    /// Native (unscaled) dimensions of an image, or `None` when the handle
    /// is unknown to the source.
    fn native_size(&self, id: ImageId) -> Option<Size>;

    fn contains(&self, id: ImageId) -> bool {
        self.native_size(id).is_some()
    }
}

impl<T: ImageSource + ?Sized> ImageSource for &T {
    fn native_size(&self, id: ImageId) -> Option<Size> {
        (**self).native_size(id)
    }
}

impl<T: ImageSource + ?Sized> ImageSource for std::sync::Arc<T> {
    fn native_size(&self, id: ImageId) -> Option<Size> {
        (**self).native_size(id)
    }
}

/// In-memory image source keyed by handle.
#[derive(Debug, Default, Clone)]
pub struct ImageCatalog {
    entries: HashMap<ImageId, Size>,
}

impl ImageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image and hand back its id. Degenerate dimensions are
    /// clamped to one pixel so aspect-ratio math stays defined.
    pub fn insert(&mut self, id: ImageId, native: Size) {
        let native = Size::new(native.width.max(1), native.height.max(1));
        self.entries.insert(id, native);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ImageSource for ImageCatalog {
    fn native_size(&self, id: ImageId) -> Option<Size> {
        self.entries.get(&id).copied()
    }
}
