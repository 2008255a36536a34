use clap::{Parser, ValueEnum};
use launchpad_orc::orchestrator::error::ProcessError;
use launchpad_orc::orchestrator::launchpad::MODULE_NAME;
use launchpad_orc::orchestrator::{Launchpad, MoveBuilder, UpgradePolicy};
use launchpad_orc::util::{logger, report::render_error};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    Compatible,
    Immutable,
}

impl From<Policy> for UpgradePolicy {
    fn from(p: Policy) -> Self {
        match p {
            Policy::Compatible => UpgradePolicy::Compatible,
            Policy::Immutable => UpgradePolicy::Immutable,
        }
    }
}

/// Build the launchpad Move package and publish it from wallet 2
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory holding the package's Move.toml
    #[arg(long, default_value = "contract")]
    package_path: String,

    /// Package and module to publish
    #[arg(long, default_value = MODULE_NAME)]
    module: String,

    #[arg(long, value_enum, default_value_t = Policy::Compatible)]
    upgrade_policy: Policy,

    #[arg(long, default_value = "deploy coin launchpad contract")]
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

    let builder = MoveBuilder::new(&args.package_path);
    builder.build()?;
    let code = builder.bytecode_module(&args.module, &args.module)?;

    let res = launchpad
        .publish(
            &wallets.wallet2,
            vec![code],
            args.upgrade_policy.into(),
            &args.memo,
        )
        .await?;

    println!("tx height {} tx hash {}", res.height, res.txhash);

    Ok(())
}
