use cosmrs::bank::MsgSend;
use cosmrs::tx::Msg;
use cosmrs::{AccountId, Any, Coin, Denom};
use log::{debug, info};
use std::fmt::{self, Debug};

use super::error::ProcessError;
use super::wallet::Wallet;
use crate::client::chain_res::{Balances, TxResponse, ViewRequest, ViewResponse};
use crate::client::cosmos::send_tx;
use crate::client::error::ClientError;
use crate::client::lcd::LcdClient;
use crate::client::move_args::{encode, MoveAddress};
use crate::client::msgs::{MsgExecute, MsgPublish, UpgradePolicy};
use crate::config::cfg::ChainCfg;

#[cfg(not(test))]
use super::wallet::Wallets;
#[cfg(not(test))]
use crate::config::cfg::Config;

pub const MODULE_NAME: &str = "coin_launchpad";

/// Arguments of `coin_launchpad::create_coin`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateCoin {
    /// whole coins, scaled by `10^decimals` before submission
    pub max_supply: u64,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub icon_uri: String,
    pub project_uri: String,
}

impl Default for CreateCoin {
    fn default() -> Self {
        Self {
            max_supply: 1_000,
            name: "Test Coin".to_string(),
            symbol: "TC".to_string(),
            decimals: 6,
            icon_uri: "icon_uri".to_string(),
            project_uri: "project_uri".to_string(),
        }
    }
}

impl CreateCoin {
    /// Max supply in base units.
    pub fn scaled_max_supply(&self) -> Result<u64, ProcessError> {
        10u64
            .checked_pow(self.decimals as u32)
            .and_then(|scale| self.max_supply.checked_mul(scale))
            .ok_or(ProcessError::MaxSupplyOverflow {
                max_supply: self.max_supply,
                decimals: self.decimals,
            })
    }

    /// BCS encoded `(u64, String, String, u8, String, String)`.
    pub fn args(&self) -> Result<Vec<Vec<u8>>, ProcessError> {
        Ok(vec![
            encode(&self.scaled_max_supply()?)?,
            encode(&self.name)?,
            encode(&self.symbol)?,
            encode(&self.decimals)?,
            encode(&self.icon_uri)?,
            encode(&self.project_uri)?,
        ])
    }
}

/// Publishes and drives the `coin_launchpad` Move module on the configured chain.
#[derive(Clone)]
pub struct Launchpad {
    client: LcdClient,
    cfg: ChainCfg,
    /// account the module is published under
    pub module_address: AccountId,
    pub module_name: String,
}

impl Debug for Launchpad {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}::{}", self.module_address, self.module_name)
    }
}

impl Launchpad {
    pub fn new(client: LcdClient, cfg: ChainCfg, module_address: AccountId) -> Self {
        Self {
            client,
            cfg,
            module_address,
            module_name: MODULE_NAME.to_string(),
        }
    }

    /// Connects to the configured LCD, with the module published by `module_address`.
    #[cfg(not(test))]
    pub fn from_config(cfg: &Config, module_address: AccountId) -> Result<Self, ClientError> {
        Ok(Self::new(
            LcdClient::new(&cfg.chain_cfg.lcd_endpoint)?,
            cfg.chain_cfg.clone(),
            module_address,
        ))
    }

    /// Loads the environment configuration and its three wallets,
    /// targeting the module published by wallet 2.
    #[cfg(not(test))]
    pub fn from_env() -> Result<(Self, Wallets), ProcessError> {
        let cfg = Config::from_env()?;
        let wallets = Wallets::from_config(&cfg)?;
        let launchpad = Self::from_config(&cfg, wallets.wallet2.address.clone())?;

        Ok((launchpad, wallets))
    }

    /// Publishes compiled modules under `publisher`'s address.
    pub async fn publish(
        &self,
        publisher: &Wallet,
        modules: Vec<Vec<u8>>,
        upgrade_policy: UpgradePolicy,
        memo: &str,
    ) -> Result<TxResponse, ProcessError> {
        info!(
            "Publishing {} module(s) from {}",
            modules.len(),
            publisher.address
        );

        let msg = MsgPublish {
            sender: publisher.address.to_string(),
            code_bytes: modules,
            upgrade_policy: upgrade_policy as i32,
        }
        .to_any();

        self.send(publisher, msg, memo).await
    }

    /// Runs an entry function of the launchpad module.
    pub async fn execute(
        &self,
        sender: &Wallet,
        function_name: &str,
        args: Vec<Vec<u8>>,
        memo: &str,
    ) -> Result<TxResponse, ProcessError> {
        let msg = MsgExecute {
            sender: sender.address.to_string(),
            module_address: self.module_address.to_string(),
            module_name: self.module_name.clone(),
            function_name: function_name.to_string(),
            type_args: vec![],
            args,
        }
        .to_any();

        self.send(sender, msg, memo).await
    }

    pub async fn create_coin(
        &self,
        creator: &Wallet,
        coin: &CreateCoin,
        memo: &str,
    ) -> Result<TxResponse, ProcessError> {
        info!("Creating coin {} ({})", coin.name, coin.symbol);
        let res = self
            .execute(creator, "create_coin", coin.args()?, memo)
            .await?;

        if let Some(event) = res.find_event("move") {
            info!("create_coin emitted {}", event);
        }
        Ok(res)
    }

    /// Sends `amount` of the configured chain denom.
    pub async fn transfer(
        &self,
        from: &Wallet,
        to: &AccountId,
        amount: u64,
        memo: &str,
    ) -> Result<TxResponse, ProcessError> {
        let denom: Denom = self
            .cfg
            .denom
            .parse()
            .map_err(|_| ClientError::Denom {
                name: self.cfg.denom.clone(),
            })?;

        let msg = MsgSend {
            from_address: from.address.clone(),
            to_address: to.clone(),
            amount: vec![Coin {
                denom,
                amount: amount.into(),
            }],
        }
        .to_any()
        .map_err(ClientError::proto_encoding)?;

        self.send(from, msg, memo).await
    }

    pub async fn balances(&self, address: &AccountId) -> Result<Balances, ProcessError> {
        let balances = self.client.balances(address.to_string()).await?;
        Ok(Balances { balances })
    }

    /// Calls a view function of the launchpad module with BCS encoded `args`.
    pub async fn view(
        &self,
        function_name: &str,
        args: Vec<Vec<u8>>,
    ) -> Result<ViewResponse, ProcessError> {
        let req = ViewRequest {
            address: self.module_address.to_string(),
            module_name: self.module_name.clone(),
            function_name: function_name.to_string(),
            type_args: vec![],
            args: args.into_iter().map(base64::encode).collect(),
        };

        let res = self.client.view(req).await?;
        debug!("{:?}", res);

        Ok(res)
    }

    pub async fn coin_data(&self, coin: MoveAddress) -> Result<ViewResponse, ProcessError> {
        self.view("get_coin_data", vec![encode(&coin)?]).await
    }

    pub async fn created_coins(
        &self,
        start_after: Option<String>,
        limit: Option<u64>,
    ) -> Result<ViewResponse, ProcessError> {
        self.view(
            "get_created_coins",
            vec![encode(&start_after)?, encode(&limit)?],
        )
        .await
    }

    async fn send(&self, wallet: &Wallet, msg: Any, memo: &str) -> Result<TxResponse, ProcessError> {
        let res = send_tx(&self.client, &self.cfg, &wallet.key, vec![msg], memo).await?;
        debug!("{:?}", res);

        Ok(res)
    }
}
