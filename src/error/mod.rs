use thiserror::Error;

/// Everything that can go wrong between fetching the login page and writing the last CSV row.
#[derive(Debug, Error)]
pub(crate) enum ExportError {
    /// The login page no longer carries the expected inline token assignment.
    #[error("{0} not found in login page")]
    TokenNotFound(&'static str),

    #[error("login failed: {0}")]
    LoginFailed(String),

    #[error("malformed transaction date '{0}'")]
    MalformedDate(String),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("csv writing error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
