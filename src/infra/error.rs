use std::{io, net::SocketAddr, path::PathBuf};

use thiserror::Error;

use crate::application::content::ContentError;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("could not listen on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("content snapshot `{}` could not be loaded: {source}", path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: ContentError,
    },
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

impl InfraError {
    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }
}
