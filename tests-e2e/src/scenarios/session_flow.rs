use crate::common::TestContext;
use anyhow::{anyhow, ensure, Result};
use gif_portal_sdk::core::constants::VERIFY_GIF_LINK;
use gif_portal_sdk::{Outcome, Phase, PortalSession, RpcConnection, WalletProvider};
use std::sync::Arc;

fn require<T>(step: &str, outcome: Outcome<T>) -> Result<T> {
    outcome
        .into_result()
        .map_err(|e| anyhow!("{step} failed: {e}"))
}

/// The page flow: connect, one-time init, submit, refetch
pub async fn run(ctx: &TestContext) -> Result<()> {
    println!("\n🚀 Running Session Flow Scenario...");

    let config = Arc::new(ctx.fresh_config());
    let wallet: Arc<dyn WalletProvider> = Arc::new(ctx.wallet()?);
    let connection = Arc::new(RpcConnection::from_config(&config));
    let session = PortalSession::new(config, connection, Some(wallet));

    require("Connect", session.check_wallet_connection().await)?;
    ensure!(
        session.phase().await == Phase::NeedsInit,
        "fresh base account should need init, got {:?}",
        session.phase().await
    );
    print!("{}", session.view().await);

    require("Initialize", session.initialize_account().await)?;
    ensure!(session.phase().await == Phase::HasList, "init did not produce a list");

    session.set_input(VERIFY_GIF_LINK).await;
    require("Submit", session.submit_input().await)?;
    ensure!(session.input().await.is_empty(), "input not cleared");
    ensure!(
        session.gif_list().await.len() == Some(1),
        "expected one GIF after submit"
    );
    print!("{}", session.view().await);

    println!("✅ Session Flow Scenario Passed");
    Ok(())
}
