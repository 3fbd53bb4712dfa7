use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("COPR config not found.")]
    NotFound,

    #[error("Error while reading COPR config")]
    Read(#[source] ini::Error),

    #[error("Error while reading COPR config: no [{0}] section")]
    MissingSection(&'static str),

    #[error("COPR config has no '{0}' option.")]
    MissingOption(&'static str),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Unknown project or missing SRPM file.
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Invalid COPR url")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Build SRPM {srpm} failed with code {status}.")]
    Build { srpm: String, status: u16 },

    #[error("Build SRPM {0} was accepted without a location.")]
    MissingLocation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
