#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The server could not be reached at all (connection refused, DNS
    /// failure, timeout). Carries the transport's description.
    #[error("server unreachable: {0}")]
    Unavailable(String),

    /// The server answered with a non-2xx status. `message` is the
    /// server-supplied `error.message`, falling back to the raw body.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A 2xx response body did not match the documented shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
