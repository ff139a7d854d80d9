use thiserror::Error;

/// Failures raised by a [`crate::SearchTransport`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request could not be sent: {0}")]
    Http(String),
    #[error("search endpoint answered with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("search response could not be decoded: {0}")]
    Decode(String),
    #[error("invalid search endpoint: {0}")]
    Endpoint(String),
}

impl TransportError {
    /// HTTP status code of the failed call, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<utils::endpoint::ParseError> for TransportError {
    fn from(err: utils::endpoint::ParseError) -> Self {
        TransportError::Endpoint(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("failed to load search client configuration: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
