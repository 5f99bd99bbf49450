//! Errors talking to the sequencer. Kept separate from
//! [`kzg_ceremony_crypto`]'s error types: the crypto crate has no notion of
//! HTTP, sessions, or rate limiting.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("session id unknown or expired, re-authenticate")]
    Unauthorized,

    #[error("rate limited, try again later")]
    RateLimited,

    #[error("unexpected response status {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("failed to persist {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse pasted auth callback: {0}")]
    InvalidAuthCallback(#[source] serde_json::Error),

    #[error("failed to parse sequencer response: {0}")]
    InvalidResponse(#[source] serde_json::Error),
}
