use thiserror::Error;

/// Refusals of catalogue commands. Store failures are not errors at this
/// level; they are recorded in the session's error message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogueError {
    #[error("a page load is already in flight")]
    LoadInFlight,

    #[error("no further page can be loaded right now")]
    LoadMoreUnavailable,
}
