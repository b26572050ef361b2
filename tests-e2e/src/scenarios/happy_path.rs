use crate::common::TestContext;
use anyhow::{ensure, Context, Result};
use gif_portal_sdk::core::constants::VERIFY_GIF_LINK;
use gif_portal_sdk::{GifPortalProgram, RpcConnection};

/// initialize -> fetch -> add_gif -> fetch, on a fresh base account
pub async fn run(ctx: &TestContext) -> Result<()> {
    println!("\n🚀 Running Happy Path Scenario...");

    let config = ctx.fresh_config();
    let wallet = ctx.wallet()?;
    let user = wallet.pubkey();
    let connection = RpcConnection::from_config(&config);
    let program = GifPortalProgram::from_config(&config);
    println!("Base account: {}", program.base_account());

    // 1. Initialize
    println!("\n[1/3] Initializing base account...");
    let sig = program
        .initialize(&connection, &wallet, &user)
        .await
        .context("Initialize Failed")?;
    println!("Your transaction signature {sig}");

    let account = program
        .fetch_account(&connection)
        .await
        .context("Fetch after initialize failed")?;
    println!("GIF Count {}", account.total_gifs);
    ensure!(account.gif_list.is_empty(), "fresh account is not empty");

    // 2. Add a GIF
    println!("\n[2/3] Adding GIF...");
    program
        .add_gif(&connection, &wallet, &user, VERIFY_GIF_LINK)
        .await
        .context("Add GIF Failed")?;

    // 3. Read it back
    println!("\n[3/3] Fetching account...");
    let account = program
        .fetch_account(&connection)
        .await
        .context("Fetch after add_gif failed")?;
    println!("GIF Count {}", account.total_gifs);
    println!("GIF List {:?}", account.gif_list);

    ensure!(account.gif_list.len() == 1, "expected exactly one GIF");
    ensure!(
        account.gif_list[0].gif_link == VERIFY_GIF_LINK,
        "stored link {:?} does not match",
        account.gif_list[0].gif_link
    );

    println!("✅ Happy Path Scenario Passed");
    Ok(())
}
