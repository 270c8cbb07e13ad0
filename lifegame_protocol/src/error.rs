// Protocol-level error type.

use derive_more::{Display, Error};

/// A line that does not fit the protocol vocabulary.
#[derive(Debug, Display, Error)]
pub enum ProtocolError {
    #[display("unknown status token {token:?}")]
    UnknownStatus { token: String },
    #[display("malformed JSON: {source}")]
    Json { source: serde_json::Error },
    /// Carried inside an `io::Error` by the framing functions.
    #[display("line longer than {limit} bytes")]
    LineTooLong { limit: usize },
}

impl From<serde_json::Error> for ProtocolError {
    fn from(source: serde_json::Error) -> Self {
        ProtocolError::Json { source }
    }
}
