//! Error types for hd-rest.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// The core client error this wraps, if any.
    pub fn client_error(&self) -> Option<&busbar_hd_client::Error> {
        self.source
            .as_ref()
            .and_then(|source| source.downcast_ref::<busbar_hd_client::Error>())
    }

    /// HTTP status of the underlying failure.
    pub fn status(&self) -> Option<u16> {
        self.client_error().and_then(busbar_hd_client::Error::status)
    }

    /// Returns true if the record does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Client error: {0}")]
    Client(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl From<busbar_hd_client::Error> for Error {
    fn from(err: busbar_hd_client::Error) -> Self {
        Error {
            kind: ErrorKind::Client(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}
