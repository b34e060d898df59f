use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can go wrong between asking the server for a document and
/// having an editor mounted on it.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request to {url} failed")]
    Fetch {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("response is not valid JSON")]
    Parse(#[from] serde_json::Error),

    #[error("cannot build an editor: {0}")]
    Construct(String),
}

impl LoadError {
    pub fn fetch(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Fetch {
            url: url.into(),
            source: source.into(),
        }
    }
}

/// Rejected edit of a single form field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("{0} cannot be edited here")]
    NotEditable(String),

    #[error("{field} expects {expected}, got {input:?}")]
    Invalid {
        field: String,
        expected: &'static str,
        input: String,
    },
}
