use clap::Parser;
use launchpad_orc::orchestrator::error::ProcessError;
use launchpad_orc::orchestrator::MoveBuilder;
use launchpad_orc::util::{logger, report::render_error};

/// Run the unit tests of the launchpad Move package
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory holding the package's Move.toml
    #[arg(long, default_value = "contract")]
    package_path: String,
}

fn main() {
    logger::init();
    let args = Args::parse();

    let builder = MoveBuilder::new(args.package_path)
        .dev_mode(true)
        .test_mode(true);

    if let Err(e) = builder.test().map_err(ProcessError::from) {
        println!("{}", render_error(&e));
        std::process::exit(1);
    }
}
