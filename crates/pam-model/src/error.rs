use thiserror::Error;

/// Hard failures of the ingest layer.
///
/// Validators never return these for malformed content; malformation is
/// reported through issue lists.
#[derive(Debug, Error)]
pub enum PamError {
    #[error("message text is empty")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, PamError>;
