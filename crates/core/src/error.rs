/// Message sent to clients in place of internal failure details.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Domain error taxonomy shared by the extraction adapter and the proxy relay.
///
/// The HTTP layer decides status codes and which messages reach the client;
/// the variants here only classify the failure.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Malformed input. Raised before any network call is attempted.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The extraction engine rejected or could not process the target page.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// The media host answered with a status other than 200/206.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Transport-level failure while talking to the media host.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
