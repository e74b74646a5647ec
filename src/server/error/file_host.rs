use thiserror::Error;

/// Failures talking to the external file host.
#[derive(Error, Debug)]
pub enum FileHostError {
    /// The request never produced a response (connect, TLS, timeout, body read).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The host answered with a non-success status.
    #[error("file host returned status {0}")]
    Status(u16),

    /// Handle resolution succeeded at the HTTP level but carried no file path.
    #[error("file host response did not contain a file path")]
    MissingPath,
}
