use clap::Parser;
use launchpad_orc::orchestrator::error::ProcessError;
use launchpad_orc::orchestrator::Launchpad;
use launchpad_orc::util::{logger, report::render_error};

/// Print the bank balances of wallet 1 and wallet 2
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {}

#[tokio::main]
async fn main() {
    logger::init();
    let _ = Args::parse();

    if let Err(e) = run().await {
        println!("{}", render_error(&e));
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ProcessError> {
    let (launchpad, wallets) = Launchpad::from_env()?;

    for wallet in [&wallets.wallet1, &wallets.wallet2] {
        let balances = launchpad.balances(&wallet.address).await?;
        println!(
            "Balance of {}: {}",
            wallet.address,
            serde_json::to_string_pretty(&balances.balances).map_err(ProcessError::json)?
        );
    }

    Ok(())
}
