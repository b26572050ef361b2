mod common;
mod scenarios;

use anyhow::Result;
use common::TestContext;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("🚀 Starting GIF Portal verification...");

    // 1. Initialize Context
    let ctx = TestContext::new()?;
    println!("RPC: {}", ctx.rpc_url);
    println!("Program ID: {}", ctx.program_id);

    // 2. Run Scenarios
    scenarios::happy_path::run(&ctx).await?;
    scenarios::session_flow::run(&ctx).await?;

    println!("\n🎉 All scenarios completed successfully!");
    Ok(())
}
