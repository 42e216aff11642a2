use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while talking to the GraphQL endpoint.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("GraphQL errors: {}", messages.join(", "))]
    GraphQL { messages: Vec<String> },

    #[error("Empty response from API")]
    EmptyResponse,

    #[error("Unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Page reported more items but carried no end cursor")]
    MissingCursor,
}

#[derive(Error, Debug)]
pub enum SignalError {
    #[error("GitHub GraphQL client is not configured. Set SIGNALHOUND_GITHUB_TOKEN or GITHUB_TOKEN, or run 'signalhound init'")]
    ClientUnavailable,

    #[error("failed to query {what}: {source}")]
    RemoteQuery {
        what: &'static str,
        #[source]
        source: TransportError,
    },

    #[error("failed to {what}: {source}")]
    RemoteMutation {
        what: &'static str,
        #[source]
        source: TransportError,
    },

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("{0} not found in project fields")]
    MissingRequiredField(&'static str),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SignalError>;
