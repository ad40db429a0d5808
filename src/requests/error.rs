use thiserror::Error;

pub type RequestResult<T> = Result<T, RequestError>;

/// Every failure handed to an error callback. The rendered message is what
/// the user sees in the default top tip.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("request error, {0}")]
    Transport(String),
    #[error("request error, {status_text}")]
    Status { status: u16, status_text: String },
    #[error("request error, {0}")]
    Rejected(String),
    #[error("request error, {0}")]
    Decode(#[from] serde_json::Error),
    #[error("request error, {0}")]
    Encode(#[source] serde_json::Error),
    #[error("request error, {0}")]
    InvalidArgument(String),
}

impl From<gloo::net::Error> for RequestError {
    fn from(err: gloo::net::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// How a single request ended, before any callback runs.
#[derive(Debug)]
pub enum Completion<T> {
    Success(T),
    Failure(RequestError),
    /// Already dealt with (session expiry); nothing is reported.
    Handled,
}

impl<T> From<RequestError> for Completion<T> {
    fn from(err: RequestError) -> Self {
        Self::Failure(err)
    }
}
