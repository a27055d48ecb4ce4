use thiserror::Error;

use crate::market::types::Venue;

/// Failure of a single upstream fetch. Any variant aborts the whole request.
#[derive(Error, Debug)]
pub enum MexcError {
    #[error("{venue} API error: {status}")]
    Upstream { venue: Venue, status: u16 },

    #[error("{venue} API request failed: {source}")]
    Network {
        venue: Venue,
        #[source]
        source: reqwest::Error,
    },

    #[error("{venue} API returned malformed body: {source}")]
    Parse {
        venue: Venue,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

impl MexcError {
    pub fn venue(&self) -> Option<Venue> {
        match self {
            Self::Upstream { venue, .. }
            | Self::Network { venue, .. }
            | Self::Parse { venue, .. } => Some(*venue),
            Self::Client(_) => None,
        }
    }
}
