use thiserror::Error;

/// Unified result type for the gallery grid crate.
pub type Result<T> = std::result::Result<T, GalleryError>;

/// Errors surfaced at the host boundary.
///
/// The placement core itself has no fatal failure modes: invalid arguments
/// are absorbed as logged no-ops and lookups return `Option`. Errors only
/// arise when talking to the layout host or a diagnostics sink.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("layout host rejected command: {0}")]
    Backend(String),
    #[error("image `{0}` is not present in the source catalog")]
    UnknownImage(u64),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
