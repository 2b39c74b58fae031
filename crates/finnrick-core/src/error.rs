use std::time::Duration;

use thiserror::Error;

/// Reasons a catalog fetch can fail.
///
/// None of these reach the widget host: the rating fetcher logs them and
/// substitutes the fallback record.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("catalog returned HTTP {0}")]
    Status(u16),

    #[error("malformed catalog response: {0}")]
    Parse(String),

    #[error("catalog fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("catalog fetch task failed: {0}")]
    Task(String),
}

/// Unexpected failures inside the widget controller.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("failed to render rating card")]
    Render(#[from] std::fmt::Error),

    #[error("rating task failed: {0}")]
    Task(String),
}
