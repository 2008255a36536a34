use cosmrs::AccountId;

use crate::client::error::ClientError;
use crate::config::cfg::Config;
use crate::config::key::SigningKey;

/// A signing key together with the account address it controls.
#[derive(Clone, Debug)]
pub struct Wallet {
    pub key: SigningKey,
    pub address: AccountId,
}

impl Wallet {
    pub fn new(key: SigningKey, prefix: &str) -> Result<Self, ClientError> {
        let address = key.to_account(prefix)?;
        Ok(Self { key, address })
    }
}

/// The three wallets the scripts work with, backed by `MNEMONIC_1..3`.
#[derive(Clone, Debug)]
pub struct Wallets {
    pub wallet1: Wallet,
    /// publishes the launchpad module and creates coins
    pub wallet2: Wallet,
    pub wallet3: Wallet,
}

impl Wallets {
    pub fn from_config(cfg: &Config) -> Result<Self, ClientError> {
        let prefix = &cfg.chain_cfg.prefix;
        let [k1, k2, k3] = cfg.keys.clone();

        Ok(Self {
            wallet1: Wallet::new(k1, prefix)?,
            wallet2: Wallet::new(k2, prefix)?,
            wallet3: Wallet::new(k3, prefix)?,
        })
    }
}
