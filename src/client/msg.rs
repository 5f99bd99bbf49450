//! Wire messages exchanged with the sequencer's HTTP API.
//!
//! Field names mirror the sequencer's JSON responses exactly; these are
//! intentionally `snake_case`/flat, unlike the crypto crate's `camelCase`
//! ceremony data.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Deserialize)]
pub struct MsgStatus {
    pub lobby_size: u64,
    pub num_contributions: u64,
    pub sequencer_address: String,
}

impl fmt::Display for MsgStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sequencer status:\n  Lobby size: {}\n  NumContributions: {}\n  SequencerAddress: {}",
            self.lobby_size, self.num_contributions, self.sequencer_address
        )
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct MsgRequestLink {
    pub eth_auth_url: String,
    pub github_auth_url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IdToken {
    pub exp: u64,
    pub nickname: String,
    pub provider: String,
    pub sub: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MsgAuthCallback {
    pub id_token: IdToken,
    pub session_id: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MsgContributeReceipt {
    pub receipt: String,
    pub signature: String,
}

impl fmt::Display for MsgContributeReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Contribute Receipt:\n  Receipt: {}\n  Signature: {}",
            self.receipt, self.signature
        )
    }
}
