/// Errors that can occur while hosting a player on the bus.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A remote command or property write failed its capability gate.
    ///
    /// Surfaced to the remote caller as a protocol-level access error;
    /// never fatal to the hosting process.
    #[error("permission denied: {0}")]
    PermissionDenied(&'static str),

    /// D-Bus connection setup or name acquisition failed.
    #[error("D-Bus operation failed: {0}")]
    Connection(#[from] zbus::Error),
}

impl From<Error> for zbus::fdo::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::PermissionDenied(reason) => Self::AccessDenied(reason.to_owned()),
            Error::Connection(e) => Self::Failed(e.to_string()),
        }
    }
}

/// A specialized `Result` for hosting operations.
pub type Result<T> = std::result::Result<T, Error>;
