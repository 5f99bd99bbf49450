//! Contributor CLI for the KZG trusted-setup ceremony.
//!
//! Mirrors the reference contributor's flow: check sequencer status,
//! gather randomness, authenticate, wait for a lobby slot, fold the
//! randomness into the batch contribution, and submit it.

use clap::Parser;
use eyre::{eyre, Context, Result};
use kzg_ceremony_contributor::{
    client::{write_private_file, MsgAuthCallback, SequencerClient, TryContributeOutcome},
    error::ClientError,
};
use kzg_ceremony_crypto::{Arkworks, BatchContribution, MIN_RANDOMNESS_BYTES};
use std::io::BufRead;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Sequencer base URL.
    #[arg(short, long, default_value = "https://kzg-ceremony-poc.go-ethereum.io")]
    url: String,

    /// Randomness to fold into the contribution. Must be at least
    /// `MIN_RANDOMNESS_BYTES` bytes; read from stdin if omitted.
    #[arg(short, long)]
    rand: Option<String>,

    /// Seconds to sleep between lobby polls.
    #[arg(short, long, default_value_t = 30)]
    sleeptime: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let randomness = match args.rand {
        Some(r) => r,
        None => {
            println!("Enter randomness:");
            read_line()?
        }
    };
    if randomness.len() < MIN_RANDOMNESS_BYTES {
        return Err(eyre!(
            "randomness must be at least {MIN_RANDOMNESS_BYTES} bytes, got {}",
            randomness.len()
        ));
    }

    let client = SequencerClient::new(args.url);

    let status = client.get_current_status().await?;
    println!("{status}");

    let mut session_id = authenticate(&client).await?;

    let contribution = loop {
        match client.try_contribute(&session_id).await {
            Ok(TryContributeOutcome::Proceed(contribution)) => break *contribution,
            Ok(TryContributeOutcome::Wait) => {
                info!("another contribution in progress, waiting");
                tokio::time::sleep(Duration::from_secs(args.sleeptime)).await;
            }
            Err(ClientError::Unauthorized) => {
                info!("session expired, re-authenticating");
                session_id = authenticate(&client).await?;
            }
            Err(ClientError::RateLimited) => {
                tokio::time::sleep(Duration::from_secs(args.sleeptime)).await;
            }
            Err(e) => return Err(e).wrap_err("failed to join the lobby"),
        }
    };

    let contribution = compute_contribution(contribution, randomness.as_bytes())?;
    write_private_file(
        "contribution.json",
        serde_json::to_string_pretty(&contribution)?.as_bytes(),
    )
    .wrap_err("failed to persist contribution.json")?;

    let receipt = client.contribute(&session_id, &contribution).await?;
    println!("{receipt}");
    write_private_file(
        "contribution_receipt.json",
        serde_json::to_string_pretty(&receipt)?.as_bytes(),
    )
    .wrap_err("failed to persist contribution_receipt.json")?;

    Ok(())
}

fn compute_contribution(
    mut contribution: BatchContribution,
    randomness: &[u8],
) -> Result<BatchContribution> {
    contribution
        .add_entropy::<Arkworks>(randomness)
        .map_err(|e| eyre!("failed to fold randomness into contribution: {e}"))?;
    Ok(contribution)
}

/// Prompts for the sequencer's auth URLs, then waits for the caller to paste
/// back the callback JSON the sequencer redirects the browser to.
async fn authenticate(client: &SequencerClient) -> Result<String> {
    let link = client.get_request_link().await?;
    println!("Please authenticate via one of the following:");
    println!("  GitHub: {}", link.github_auth_url);
    println!("  Ethereum: {}", link.eth_auth_url);
    println!("Paste the callback response JSON below:");

    let pasted = read_line()?;
    let callback: MsgAuthCallback =
        serde_json::from_str(&pasted).wrap_err("could not parse pasted callback JSON")?;
    Ok(callback.session_id)
}

fn read_line() -> Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .wrap_err("failed to read from stdin")?;
    Ok(line.trim().to_string())
}
