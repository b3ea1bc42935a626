use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading, generating or serving a swagger document.
#[derive(Debug, Error)]
pub enum Error {
    #[error("serde: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "yaml")]
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("io: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("swagger file {path} is not a valid document: {source}")]
    SwaggerFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("document provider is already installed")]
    AlreadyInstalled,
}

impl Error {
    pub(crate) fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
