use log::debug;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::future::Future;

use super::chain_res::{
    AccountResponse, BalancesPage, BaseAccount, Coin, SimulateResponse, TxResponse,
    TxResponseWrapper, ViewRequest, ViewResponse,
};
use super::error::{ClientError, HttpError};

/// REST client for the chain's light client daemon.
#[cfg_attr(test, faux::create)]
#[derive(Clone, Debug)]
pub struct LcdClient {
    http: Client,
    endpoint: String,
}

#[cfg_attr(test, faux::methods)]
impl LcdClient {
    // HACK: faux doesn't support mocking a struct wrapped in a Result
    // so we are just ignoring the constructor for this crate's tests
    #[cfg(not(test))]
    pub fn new(endpoint: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: Client::builder().build()?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub async fn account(&self, address: String) -> Result<BaseAccount, ClientError> {
        let res: AccountResponse = get(
            &self.http,
            &self.endpoint,
            &format!("/cosmos/auth/v1beta1/accounts/{}", address),
        )
        .await?;

        Ok(res.account)
    }

    /// All balances of `address`, following pagination until the last page.
    pub async fn balances(&self, address: String) -> Result<Vec<Coin>, ClientError> {
        let url = format!("{}/cosmos/bank/v1beta1/balances/{}", self.endpoint, address);

        collect_balances(|next_key| {
            let mut req = self.http.get(&url);
            if let Some(key) = next_key {
                req = req.query(&[("pagination.key", key)]);
            }
            debug!("GET {}", url);
            async move { read_json(req.send().await?).await }
        })
        .await
    }

    /// Returns the gas used by a dry run of the signed tx.
    pub async fn simulate(&self, tx_bytes: Vec<u8>) -> Result<u64, ClientError> {
        let res: SimulateResponse = post(
            &self.http,
            &self.endpoint,
            "/cosmos/tx/v1beta1/simulate",
            &json!({ "tx_bytes": base64::encode(tx_bytes) }),
        )
        .await?;

        Ok(res.gas_info.gas_used)
    }

    /// Submits the tx and returns once it passed `CheckTx`.
    pub async fn broadcast(&self, tx_bytes: Vec<u8>) -> Result<TxResponse, ClientError> {
        let res: TxResponseWrapper = post(
            &self.http,
            &self.endpoint,
            "/cosmos/tx/v1beta1/txs",
            &json!({
                "tx_bytes": base64::encode(tx_bytes),
                "mode": "BROADCAST_MODE_SYNC",
            }),
        )
        .await?;

        Ok(res.tx_response)
    }

    pub async fn tx(&self, hash: String) -> Result<TxResponse, ClientError> {
        let res: TxResponseWrapper = get(
            &self.http,
            &self.endpoint,
            &format!("/cosmos/tx/v1beta1/txs/{}", hash),
        )
        .await?;

        Ok(res.tx_response)
    }

    pub async fn view(&self, req: ViewRequest) -> Result<ViewResponse, ClientError> {
        post(&self.http, &self.endpoint, "/initia/move/v1/view", &req).await
    }
}

/// Fetches pages until one comes back without a `next_key`.
async fn collect_balances<F, Fut>(mut fetch_page: F) -> Result<Vec<Coin>, ClientError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<BalancesPage, ClientError>>,
{
    let mut coins = vec![];
    let mut next_key: Option<String> = None;

    loop {
        let page = fetch_page(next_key.take()).await?;
        coins.extend(page.balances);

        next_key = page
            .pagination
            .and_then(|p| p.next_key)
            .filter(|k| !k.is_empty());
        if next_key.is_none() {
            return Ok(coins);
        }
    }
}

async fn get<T: DeserializeOwned>(
    http: &Client,
    endpoint: &str,
    path: &str,
) -> Result<T, ClientError> {
    debug!("GET {}{}", endpoint, path);
    let res = http.get(format!("{}{}", endpoint, path)).send().await?;

    read_json(res).await
}

async fn post<B, T>(http: &Client, endpoint: &str, path: &str, body: &B) -> Result<T, ClientError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    debug!("POST {}{}", endpoint, path);
    let res = http
        .post(format!("{}{}", endpoint, path))
        .json(body)
        .send()
        .await?;

    read_json(res).await
}

async fn read_json<T: DeserializeOwned>(res: Response) -> Result<T, ClientError> {
    let status = res.status();
    let headers = res
        .headers()
        .iter()
        .map(|(k, v)| {
            (
                k.to_string(),
                String::from_utf8_lossy(v.as_bytes()).to_string(),
            )
        })
        .collect();
    let body = res.text().await?;

    if !status.is_success() {
        return Err(HttpError {
            status: status.as_u16(),
            headers,
            body,
        }
        .into());
    }

    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    fn response(status: u16, body: &str) -> Response {
        http::Response::builder()
            .status(status)
            .header("x-a", "1")
            .body(body.to_string())
            .unwrap()
            .into()
    }

    fn page(denoms: &[&str], next_key: Value) -> BalancesPage {
        let balances: Vec<Value> = denoms
            .iter()
            .map(|d| json!({ "denom": d, "amount": "1" }))
            .collect();
        serde_json::from_value(json!({
            "balances": balances,
            "pagination": { "next_key": next_key, "total": "0" }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn non_2xx_is_an_http_error() {
        let res: Result<Value, _> =
            read_json(response(400, r#"{"code":3,"message":"bad address"}"#)).await;

        let err = assert_matches!(res, Err(ClientError::Http(e)) => e);
        assert_eq!(err.status, 400);
        assert_eq!(err.headers, vec![("x-a".to_string(), "1".to_string())]);
        assert_eq!(err.body, r#"{"code":3,"message":"bad address"}"#);
    }

    #[tokio::test]
    async fn success_body_is_decoded() {
        let res: Value = read_json(response(200, r#"{"gas_info":{}}"#)).await.unwrap();
        assert_eq!(res, json!({ "gas_info": {} }));

        let res: Result<Value, _> = read_json(response(200, "not json")).await;
        assert_matches!(res, Err(ClientError::Json(_)));
    }

    #[tokio::test]
    async fn balances_follow_next_key() {
        let keys = Arc::new(Mutex::new(vec![]));

        let seen = keys.clone();
        let coins = collect_balances(|key| {
            seen.lock().unwrap().push(key.clone());
            let page = match key.as_deref() {
                None => page(&["uinit"], json!("a2V5MQ==")),
                Some("a2V5MQ==") => page(&["uusdc"], json!("a2V5Mg==")),
                _ => page(&["move/ff"], Value::Null),
            };
            async move { Ok(page) }
        })
        .await
        .unwrap();

        let denoms: Vec<_> = coins.iter().map(|c| c.denom.as_str()).collect();
        assert_eq!(denoms, vec!["uinit", "uusdc", "move/ff"]);
        assert_eq!(
            *keys.lock().unwrap(),
            vec![
                None,
                Some("a2V5MQ==".to_string()),
                Some("a2V5Mg==".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn empty_next_key_ends_pagination() {
        let mut calls = 0;
        let coins = collect_balances(|_| {
            calls += 1;
            async { Ok(page(&["uinit"], json!(""))) }
        })
        .await
        .unwrap();

        assert_eq!(coins.len(), 1);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn page_errors_stop_pagination() {
        let res = collect_balances(|_| async {
            Err(ClientError::Http(HttpError {
                status: 500,
                headers: vec![],
                body: String::new(),
            }))
        })
        .await;

        assert_matches!(res, Err(ClientError::Http(HttpError { status: 500, .. })));
    }
}
