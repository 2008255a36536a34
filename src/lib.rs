//! Deployment and scripting toolkit for the `coin_launchpad` [Move] module on [Initia]
//!
//! Build, test and publish the Move package, call its entry functions, query its view
//! functions and move coins between the configured wallets, all through the chain's
//! LCD (REST) api.
//!
//! Configuration comes from the environment (or a `.env` file):
//! `RPC_ENDPOINT`, `LCD_ENDPOINT`, `CHAIN_ID`, `CHAIN_PREFIX`, `CHAIN_DENOM`
//! and `MNEMONIC_1`, `MNEMONIC_2`, `MNEMONIC_3`.
//!
//! [Move]: https://github.com/move-language/move
//! [Initia]: https://github.com/initia-labs/initia
//!
//!
//! # Quick Start
//!
//! ```no_run
//! use launchpad_orc::{
//!     config::cfg::Config,
//!     orchestrator::{CreateCoin, Launchpad, Wallets},
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = Config::from_env()?;
//! let wallets = Wallets::from_config(&cfg)?;
//!
//! // the launchpad module is published by wallet 2
//! let launchpad = Launchpad::from_config(&cfg, wallets.wallet2.address.clone())?;
//!
//! let res = launchpad
//!     .create_coin(&wallets.wallet2, &CreateCoin::default(), "create a coin")
//!     .await?;
//! println!("tx height {} tx hash {}", res.height, res.txhash);
//! # Ok(())
//! # }
//! ```

pub mod client;

pub mod config;

pub mod orchestrator;

pub mod util;
