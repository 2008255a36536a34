use cosmrs::crypto::secp256k1;
use cosmrs::tendermint::chain;
use cosmrs::tx::{self, Fee, SignDoc, SignerInfo};
use cosmrs::{Any, Coin, Denom};
use log::{debug, info};
use std::time::Duration;
use tokio::time;

use super::chain_res::{BaseAccount, TxResponse};
use super::error::ClientError;
use super::lcd::LcdClient;
use crate::config::cfg::ChainCfg;
use crate::config::key::SigningKey;

const TX_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Signs `msgs` with `key`, paying a simulated fee, broadcasts the tx
/// and waits until it is included in a block.
pub async fn send_tx(
    client: &LcdClient,
    cfg: &ChainCfg,
    key: &SigningKey,
    msgs: Vec<Any>,
    memo: &str,
) -> Result<TxResponse, ClientError> {
    let timeout_height = 0u16;
    let signing_key: secp256k1::SigningKey = key.try_into()?;
    let account_id = key.to_account(&cfg.prefix)?;

    let account = client.account(account_id.to_string()).await?;

    let tx_body = tx::Body::new(msgs, memo, timeout_height);

    let fee = simulate_gas_fee(client, &tx_body, &account, &signing_key, cfg).await?;

    let tx_bytes = sign(&tx_body, fee, &account, &signing_key, cfg)?;
    debug!("signed tx: {}", base64::encode(&tx_bytes));

    let res = client.broadcast(tx_bytes).await?;
    if res.is_err() {
        return Err(ClientError::CosmosSdk { res });
    }

    info!("broadcasted tx {}, waiting for inclusion", res.txhash);

    let res = wait_for_tx(client, res.txhash, cfg.broadcast_timeout_secs).await?;
    if res.is_err() {
        return Err(ClientError::CosmosSdk { res });
    }

    Ok(res)
}

fn sign(
    tx_body: &tx::Body,
    fee: Fee,
    account: &BaseAccount,
    key: &secp256k1::SigningKey,
    cfg: &ChainCfg,
) -> Result<Vec<u8>, ClientError> {
    let chain_id: chain::Id = cfg.chain_id.parse().map_err(|_| ClientError::ChainId {
        chain_id: cfg.chain_id.to_string(),
    })?;

    // NOTE: if we are making requests in parallel with the same key, we need to serialize `account.sequence` to avoid errors
    let auth_info =
        SignerInfo::single_direct(Some(key.public_key()), account.sequence).auth_info(fee);

    let sign_doc = SignDoc::new(tx_body, &auth_info, &chain_id, account.account_number)
        .map_err(ClientError::proto_encoding)?;

    let tx_raw = sign_doc.sign(key).map_err(ClientError::crypto)?;

    tx_raw.to_bytes().map_err(ClientError::proto_encoding)
}

#[allow(deprecated)]
async fn simulate_gas_fee(
    client: &LcdClient,
    tx: &tx::Body,
    account: &BaseAccount,
    key: &secp256k1::SigningKey,
    cfg: &ChainCfg,
) -> Result<Fee, ClientError> {
    let denom: Denom = cfg.gas_denom.parse().map_err(|_| ClientError::Denom {
        name: cfg.gas_denom.clone(),
    })?;

    let zero_fee = Fee::from_amount_and_gas(
        Coin {
            denom: denom.clone(),
            amount: 0u64.into(),
        },
        0u64,
    );

    let gas_used = client.simulate(sign(tx, zero_fee, account, key, cfg)?).await?;

    let (gas_limit, amount) = fee_for_gas(gas_used, cfg.gas_adjustment, cfg.gas_prices);
    debug!("simulated gas {}, limit {}, fee {}{}", gas_used, gas_limit, amount, denom);

    Ok(Fee::from_amount_and_gas(
        Coin {
            denom,
            amount: amount.into(),
        },
        gas_limit,
    ))
}

/// Returns `(gas_limit, fee_amount)` for the simulated `gas_used`.
pub fn fee_for_gas(gas_used: u64, gas_adjustment: f64, gas_prices: f64) -> (u64, u64) {
    let gas_limit = (gas_used as f64 * gas_adjustment).ceil();
    let amount = (gas_limit * gas_prices).ceil();

    (gas_limit as u64, amount as u64)
}

/// Polls the LCD until `tx_hash` is indexed or `timeout_secs` elapsed.
pub async fn wait_for_tx(
    client: &LcdClient,
    tx_hash: String,
    timeout_secs: u64,
) -> Result<TxResponse, ClientError> {
    let poll = async {
        loop {
            match client.tx(tx_hash.clone()).await {
                Ok(res) => return Ok(res),
                Err(e) if e.is_not_found() => time::sleep(TX_POLL_INTERVAL).await,
                Err(e) => return Err(e),
            }
        }
    };

    time::timeout(Duration::from_secs(timeout_secs), poll)
        .await
        .map_err(|_| ClientError::BroadcastTimeout {
            tx_hash: tx_hash.clone(),
            secs: timeout_secs,
        })?
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::client::error::HttpError;
    use crate::config::key::Key;
    use assert_matches::assert_matches;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    pub(crate) const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    pub(crate) fn test_cfg() -> ChainCfg {
        ChainCfg {
            denom: "uinit".to_string(),
            prefix: "init".to_string(),
            chain_id: "initiation-1".to_string(),
            rpc_endpoint: "http://localhost:26657".to_string(),
            lcd_endpoint: "http://localhost:1317".to_string(),
            gas_denom: "uinit".to_string(),
            gas_prices: 0.15,
            gas_adjustment: 1.5,
            coin_type: 118,
            broadcast_timeout_secs: 5,
        }
    }

    pub(crate) fn test_key() -> SigningKey {
        SigningKey {
            name: "wallet2".to_string(),
            key: Key::Mnemonic(TEST_MNEMONIC.to_string()),
            coin_type: 118,
        }
    }

    pub(crate) fn not_found() -> ClientError {
        ClientError::Http(HttpError {
            status: 404,
            headers: vec![],
            body: r#"{"code":5,"message":"tx not found"}"#.to_string(),
        })
    }

    pub(crate) fn accepted_tx() -> TxResponse {
        TxResponse {
            txhash: "HASH".to_string(),
            ..Default::default()
        }
    }

    /// Mock answering `broadcast` with `broadcast_res`, indexing the tx after `pending_polls` lookups.
    pub(crate) fn mock_client(broadcast_res: TxResponse, pending_polls: usize) -> LcdClient {
        mock_client_with(move |_| Ok(broadcast_res.clone()), pending_polls)
    }

    pub(crate) fn mock_client_with<F>(broadcast: F, pending_polls: usize) -> LcdClient
    where
        F: FnMut(Vec<u8>) -> Result<TxResponse, ClientError> + Send + 'static,
    {
        let mut client = LcdClient::faux();

        faux::when!(client.account).then(|address| {
            Ok(BaseAccount {
                type_url: "/cosmos.auth.v1beta1.BaseAccount".to_string(),
                address,
                account_number: 7,
                sequence: 2,
            })
        });
        faux::when!(client.simulate).then(|_| Ok(100_000));
        faux::when!(client.broadcast).then(broadcast);

        let polls = Arc::new(AtomicUsize::new(0));
        faux::when!(client.tx).then(move |hash| {
            if polls.fetch_add(1, Ordering::SeqCst) < pending_polls {
                return Err(not_found());
            }
            Ok(TxResponse {
                height: 42,
                txhash: hash,
                gas_wanted: 150_000,
                gas_used: 98_000,
                ..Default::default()
            })
        });

        client
    }

    #[test]
    fn fee_uses_adjustment_and_price() {
        assert_eq!(fee_for_gas(100_000, 1.5, 0.15), (150_000, 22_500));
        assert_eq!(fee_for_gas(1, 1.5, 0.15), (2, 1));
        assert_eq!(fee_for_gas(0, 1.5, 0.15), (0, 0));
    }

    #[tokio::test]
    async fn sends_tx_and_waits_for_inclusion() {
        let client = mock_client(accepted_tx(), 2);

        let res = send_tx(&client, &test_cfg(), &test_key(), vec![], "sample memo")
            .await
            .unwrap();

        assert_eq!(res.txhash, "HASH");
        assert_eq!(res.height, 42);
    }

    #[tokio::test]
    async fn check_tx_failure_is_reported() {
        let client = mock_client(
            TxResponse {
                txhash: "HASH".to_string(),
                code: 13,
                codespace: "sdk".to_string(),
                raw_log: "insufficient fee".to_string(),
                ..Default::default()
            },
            0,
        );

        let res = send_tx(&client, &test_cfg(), &test_key(), vec![], "memo").await;

        assert_matches!(res, Err(ClientError::CosmosSdk { res }) if res.code == 13);
    }

    #[tokio::test]
    async fn lcd_errors_are_not_retried() {
        let mut client = LcdClient::faux();
        faux::when!(client.tx).then(|_| {
            Err(ClientError::Http(HttpError {
                status: 500,
                headers: vec![],
                body: "boom".to_string(),
            }))
        });

        let res = wait_for_tx(&client, "HASH".to_string(), 5).await;

        assert_matches!(res, Err(ClientError::Http(e)) if e.status == 500);
    }

    #[tokio::test]
    async fn times_out_when_never_indexed() {
        let mut client = LcdClient::faux();
        faux::when!(client.tx).then(|_| Err(not_found()));

        let res = wait_for_tx(&client, "HASH".to_string(), 1).await;

        assert_matches!(
            res,
            Err(ClientError::BroadcastTimeout { tx_hash, secs: 1 }) if tx_hash == "HASH"
        );
    }
}
