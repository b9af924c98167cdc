use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientInitError {
    #[error("invalid gitlab base url: {0}")]
    InvalidBaseUrl(String),
    #[error("gitlab token contains characters not allowed in a header")]
    InvalidToken,
    #[error("failed to build gitlab http client: {0}")]
    Build(String),
}

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("gitlab api request failed")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("gitlab api error ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("invalid gitlab api response")]
    InvalidResponse(#[source] serde_json::Error),
}

impl ListingError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ListingError::Http { status, .. } => Some(*status),
            ListingError::Transport { source } => source.status().map(|status| status.as_u16()),
            ListingError::InvalidResponse(_) => None,
        }
    }

    /// True when the group or user does not exist (or is not visible to the token).
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("clone url does not start with https://: {0}")]
    MissingHttpsScheme(String),
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    ClientInit(#[from] ClientInitError),
    #[error(transparent)]
    Listing(#[from] ListingError),
    #[error(transparent)]
    Credential(#[from] CredentialError),
}
