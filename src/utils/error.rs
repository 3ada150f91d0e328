use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("unexpected account name {input}: {reason}")]
    Format { input: String, reason: &'static str },

    #[error("failed resolving account {account}: {reason}")]
    Resolution { account: String, reason: String },

    #[error("request to {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    #[error("{0}")]
    Input(&'static str),

    #[error("unexpected API response: {message}")]
    UnexpectedResponse { message: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CompareError {
    /// Expected errors are domain outcomes (bad handle, missing account,
    /// unreachable server) surfaced verbatim to the user. Everything else
    /// indicates a protocol surprise or a programming error and is logged
    /// with its cause in addition to being reported.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Format { .. } | Self::Resolution { .. } | Self::Fetch { .. } | Self::Input(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CompareError>;
