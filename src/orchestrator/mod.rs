pub mod error;

pub mod launchpad;

pub mod move_builder;

pub mod wallet;

pub use crate::client::chain_res::{Balances, TxResponse, ViewResponse};
pub use crate::client::move_args::MoveAddress;
pub use crate::client::msgs::UpgradePolicy;
pub use launchpad::{CreateCoin, Launchpad};
pub use move_builder::MoveBuilder;
pub use wallet::{Wallet, Wallets};
