use thiserror::Error;

/// Failures that abort loading a manifest. Nothing is partially applied.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("{file} is not valid JSON: {source}")]
    MalformedInput {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{file} nests dependencies deeper than {limit} levels")]
    NestingTooDeep { file: String, limit: usize },
}

pub type Result<T> = std::result::Result<T, ManifestError>;
