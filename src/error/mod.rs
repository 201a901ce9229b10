//! Error types for rechunkrs.

use std::fmt;

/// Errors that can occur while re-chunking a stream.
#[derive(Debug)]
pub enum RechunkError {
    /// An I/O error occurred while reading input data.
    ///
    /// Only the reader adapters produce this; the core [`Rechunker`](crate::Rechunker)
    /// performs no I/O.
    Io(std::io::Error),

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// Input was pushed after the stream was finished.
    StreamClosed,
}

impl fmt::Display for RechunkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RechunkError::Io(e) => write!(f, "io error: {}", e),
            RechunkError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
            RechunkError::StreamClosed => write!(f, "stream closed: push after finish"),
        }
    }
}

impl std::error::Error for RechunkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RechunkError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RechunkError {
    fn from(e: std::io::Error) -> Self {
        RechunkError::Io(e)
    }
}
