//! Error taxonomy shared by every client operation.

/// Errors surfaced by client operations.
///
/// Callers should branch on the variant, not on the message text: engine and
/// transport messages are passed through exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Connection refused, DNS failure, timeout. Message is the transport's own.
    #[error("{0}")]
    Transport(String),

    /// The engine answered with an error status or an explicit `error` body.
    #[error("[{status}] {message}")]
    Engine { status: u16, message: String },

    /// A payload could not be serialized; nothing was sent.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The response body did not match the expected shape.
    #[error("Decoding error: {message}")]
    Decoding { message: String, body: String },
}

impl Error {
    pub(crate) fn decoding(err: impl std::fmt::Display, body: &[u8]) -> Self {
        Error::Decoding {
            message: err.to_string(),
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// HTTP status reported by the engine, if this is an engine error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Engine { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
