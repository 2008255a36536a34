use clap::Parser;
use launchpad_orc::orchestrator::error::ProcessError;
use launchpad_orc::orchestrator::Launchpad;
use launchpad_orc::util::{logger, report::render_error};

/// Send `CHAIN_DENOM` coins from wallet 2 to wallet 3
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[arg(long, default_value_t = 100_000)]
    amount: u64,

    #[arg(long, default_value = "sample memo")]
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

    let res = launchpad
        .transfer(
            &wallets.wallet2,
            &wallets.wallet3.address,
            args.amount,
            &args.memo,
        )
        .await?;

    println!("tx height {} tx hash {}", res.height, res.txhash);

    Ok(())
}
