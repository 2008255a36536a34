use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ClientError;

/// LCD encodes 64 bit integers as json strings.
pub(crate) mod str_u64 {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StrOrNum {
        Str(String),
        Num(u64),
    }

    pub fn serialize<S: Serializer>(v: &u64, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&v.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        match StrOrNum::deserialize(d)? {
            StrOrNum::Str(s) => s.parse().map_err(de::Error::custom),
            StrOrNum::Num(n) => Ok(n),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResponse {
    #[serde(with = "str_u64", default)]
    pub height: u64,
    pub txhash: String,
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub codespace: String,
    #[serde(default)]
    pub raw_log: String,
    #[serde(with = "str_u64", default)]
    pub gas_wanted: u64,
    #[serde(with = "str_u64", default)]
    pub gas_used: u64,
    #[serde(default)]
    pub events: Vec<serde_json::Value>,
}

impl TxResponse {
    pub fn is_err(&self) -> bool {
        self.code != 0
    }

    /// First event of type `key_name` emitted by the tx.
    pub fn find_event(&self, key_name: &str) -> Option<&serde_json::Value> {
        self.events.iter().find(|e| e["type"] == key_name)
    }
}

impl fmt::Display for TxResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tx {} failed with code {} ({}): {}",
            self.txhash, self.code, self.codespace, self.raw_log
        )
    }
}

#[derive(Deserialize)]
pub(crate) struct TxResponseWrapper {
    pub tx_response: TxResponse,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BaseAccount {
    #[serde(rename = "@type", default)]
    pub type_url: String,
    pub address: String,
    #[serde(with = "str_u64")]
    pub account_number: u64,
    #[serde(with = "str_u64", default)]
    pub sequence: u64,
}

#[derive(Deserialize)]
pub(crate) struct AccountResponse {
    pub account: BaseAccount,
}

#[derive(Deserialize)]
pub(crate) struct SimulateResponse {
    pub gas_info: GasInfo,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct GasInfo {
    #[serde(with = "str_u64", default)]
    pub gas_wanted: u64,
    #[serde(with = "str_u64", default)]
    pub gas_used: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balances {
    pub balances: Vec<Coin>,
}

#[derive(Deserialize)]
pub(crate) struct BalancesPage {
    pub balances: Vec<Coin>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Deserialize)]
pub(crate) struct Pagination {
    pub next_key: Option<String>,
}

/// Body of `POST /initia/move/v1/view`, arguments are base64 encoded BCS.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ViewRequest {
    pub address: String,
    pub module_name: String,
    pub function_name: String,
    pub type_args: Vec<String>,
    pub args: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewResponse {
    /// json encoded return value of the view function
    pub data: String,
    #[serde(default)]
    pub events: Vec<serde_json::Value>,
    #[serde(with = "str_u64", default)]
    pub gas_used: u64,
}

impl ViewResponse {
    pub fn data<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        Ok(serde_json::from_str(&self.data)?)
    }
}
