use clap::Parser;
use launchpad_orc::orchestrator::error::ProcessError;
use launchpad_orc::orchestrator::Launchpad;
use launchpad_orc::util::{logger, report::render_error};

/// Query `coin_launchpad::get_created_coins`
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Only return coins after this one
    #[arg(long)]
    start_after: Option<String>,

    /// Max number of coins to return
    #[arg(long)]
    limit: Option<u64>,
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

    let res = launchpad
        .created_coins(args.start_after, args.limit)
        .await?;
    let data: serde_json::Value = res.data()?;

    println!(
        "Created coins: {}",
        serde_json::to_string_pretty(&data).map_err(ProcessError::json)?
    );

    Ok(())
}
