use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {message}")]
    InvalidConfig { message: String },
}
