use clap::Parser;
use launchpad_orc::orchestrator::error::ProcessError;
use launchpad_orc::orchestrator::{Launchpad, MoveAddress};
use launchpad_orc::util::{logger, report::render_error};

/// Query `coin_launchpad::get_coin_data` for a coin object
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Object address of the coin metadata
    #[arg(
        long,
        default_value = "0xd77b91d81a4c4e0d86244eeb74a5ea2ff13c6079126c6bad01911817ea63ae12"
    )]
    coin: MoveAddress,
}

#[tokio::main]
async fn main() {
    logger::init();
    let args = Args::parse();

    if let Err(e) = run(args).await {
        println!("{}", render_error(&e));
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), ProcessError> {
    let (launchpad, _) = Launchpad::from_env()?;

    let res = launchpad.coin_data(args.coin).await?;
    let data: serde_json::Value = res.data()?;

    println!(
        "Coin data: {}",
        serde_json::to_string_pretty(&data).map_err(ProcessError::json)?
    );

    Ok(())
}
