use clap::Parser;
use launchpad_orc::orchestrator::error::ProcessError;
use launchpad_orc::orchestrator::{CreateCoin, Launchpad};
use launchpad_orc::util::{logger, report::render_error};

/// Create a coin through the launchpad, signed by wallet 2
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[arg(long, default_value = "Test Coin")]
    name: String,

    #[arg(long, default_value = "TC")]
    symbol: String,

    /// Max supply in whole coins
    #[arg(long, default_value_t = 1_000)]
    max_supply: u64,

    #[arg(long, default_value_t = 6)]
    decimals: u8,

    #[arg(long, default_value = "icon_uri")]
    icon_uri: String,

    #[arg(long, default_value = "project_uri")]
    project_uri: String,

    #[arg(long, default_value = "create a coin")]
    memo: String,
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
    let (launchpad, wallets) = Launchpad::from_env()?;

    let coin = CreateCoin {
        max_supply: args.max_supply,
        name: args.name,
        symbol: args.symbol,
        decimals: args.decimals,
        icon_uri: args.icon_uri,
        project_uri: args.project_uri,
    };

    let res = launchpad
        .create_coin(&wallets.wallet2, &coin, &args.memo)
        .await?;

    println!("tx height {} tx hash {}", res.height, res.txhash);

    Ok(())
}
