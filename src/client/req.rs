//! HTTP client for the sequencer, modeled on the reference CLI's
//! `client.Client` (`GetCurrentStatus`, `GetCurrentState`, `GetRequestLink`,
//! `PostTryContribute`, `PostContribute`, `PostAbortContribution`).

use crate::client::msg::{MsgContributeReceipt, MsgRequestLink, MsgStatus};
use crate::error::ClientError;
use kzg_ceremony_crypto::{BatchContribution, BatchTranscript};
use reqwest::{Client, StatusCode};
use tracing::instrument;

/// Substring the sequencer uses, in a 200 response body, to say a
/// contribution by someone else is currently being processed. Not an
/// error: the caller should sleep and poll again.
const ANOTHER_CONTRIBUTION_IN_PROGRESS: &str = "another contribution in progress";

pub struct SequencerClient {
    base_url: String,
    http: Client,
}

pub enum TryContributeOutcome {
    Proceed(Box<BatchContribution>),
    Wait,
}

impl SequencerClient {
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: Client::new(),
        }
    }

    #[instrument(level = "info", skip(self))]
    pub async fn get_current_status(&self) -> Result<MsgStatus, ClientError> {
        let response = self
            .http
            .get(format!("{}/info/status", self.base_url))
            .send()
            .await?;
        let response = require_ok(response)?;
        Ok(response.json().await?)
    }

    /// Fetches the current audit state: the batch transcript together with
    /// the participant IDs and ECDSA signatures of everyone who has
    /// contributed so far.
    #[instrument(level = "info", skip(self))]
    pub async fn get_current_state(&self) -> Result<BatchTranscript, ClientError> {
        let response = self
            .http
            .get(format!("{}/info/current_state", self.base_url))
            .send()
            .await?;
        let response = require_ok(response)?;
        Ok(response.json().await?)
    }

    #[instrument(level = "info", skip(self))]
    pub async fn get_request_link(&self) -> Result<MsgRequestLink, ClientError> {
        let response = self
            .http
            .get(format!("{}/auth/request_link", self.base_url))
            .send()
            .await?;
        let response = require_ok(response)?;
        Ok(response.json().await?)
    }

    /// Polls for a turn in the lobby. On success, persists the raw response
    /// to `prevBatchContribution.json` (mode 0600) exactly as the reference
    /// CLI does, before parsing it.
    #[instrument(level = "info", skip(self, session_id))]
    pub async fn try_contribute(
        &self,
        session_id: &str,
    ) -> Result<TryContributeOutcome, ClientError> {
        let response = self
            .http
            .post(format!("{}/lobby/try_contribute", self.base_url))
            .bearer_auth(session_id)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        match status {
            StatusCode::OK => {
                if body.contains(ANOTHER_CONTRIBUTION_IN_PROGRESS) {
                    return Ok(TryContributeOutcome::Wait);
                }
                write_private_file("prevBatchContribution.json", body.as_bytes())?;
                let contribution: BatchContribution = serde_json::from_str(&body)
                    .map_err(ClientError::InvalidResponse)?;
                Ok(TryContributeOutcome::Proceed(Box::new(contribution)))
            }
            StatusCode::BAD_REQUEST => Err(ClientError::RateLimited),
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            other => Err(ClientError::UnexpectedStatus(other)),
        }
    }

    #[instrument(level = "info", skip(self, session_id))]
    pub async fn abort_contribution(&self, session_id: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(format!("{}/contribution/abort", self.base_url))
            .bearer_auth(session_id)
            .send()
            .await?;
        require_ok(response)?;
        Ok(())
    }

    #[instrument(level = "info", skip(self, session_id, contribution))]
    pub async fn contribute(
        &self,
        session_id: &str,
        contribution: &BatchContribution,
    ) -> Result<MsgContributeReceipt, ClientError> {
        let response = self
            .http
            .post(format!("{}/contribute", self.base_url))
            .bearer_auth(session_id)
            .json(contribution)
            .send()
            .await?;
        let response = require_ok(response)?;
        Ok(response.json().await?)
    }
}

fn require_ok(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    match response.status() {
        StatusCode::OK => Ok(response),
        StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
        StatusCode::BAD_REQUEST => Err(ClientError::RateLimited),
        other => Err(ClientError::UnexpectedStatus(other)),
    }
}

/// Writes `contents` to `path` with mode 0600 on unix, matching the
/// reference CLI's handling of locally cached ceremony artifacts.
pub fn write_private_file(path: &str, contents: &[u8]) -> Result<(), ClientError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .and_then(|mut f| std::io::Write::write_all(&mut f, contents))
            .map_err(|source| ClientError::Persist {
                path: path.to_string(),
                source,
            })
    }
    #[cfg(not(unix))]
    {
        std::fs::write(path, contents).map_err(|source| ClientError::Persist {
            path: path.to_string(),
            source,
        })
    }
}
