pub mod msg;
pub mod req;

pub use msg::{IdToken, MsgAuthCallback, MsgContributeReceipt, MsgRequestLink, MsgStatus};
pub use req::{write_private_file, SequencerClient, TryContributeOutcome};
