use cosmrs::ErrorReport;
use thiserror::Error;

use super::chain_res::TxResponse;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid account ID: {id:?}")]
    AccountId { id: String },

    #[error("invalid move address: {addr:?}")]
    MoveAddress { addr: String },

    #[error("cryptographic error")]
    Crypto { source: ErrorReport },

    #[error("invalid denomination: {name:?}")]
    Denom { name: String },

    #[error("invalid chainId: {chain_id:?}")]
    ChainId { chain_id: String },

    #[error("invalid mnemonic")]
    Mnemonic,

    #[error("invalid derivation path")]
    DerivationPath,

    #[error("proto encoding error")]
    ProtoEncoding { source: ErrorReport },

    #[error("bcs encoding error")]
    Bcs(#[from] bcs::Error),

    #[error("malformed lcd response")]
    Json(#[from] serde_json::Error),

    #[error("CosmosSDK error: {res}")]
    CosmosSdk { res: TxResponse },

    #[error("tx {tx_hash} was not included after {secs}s")]
    BroadcastTimeout { tx_hash: String, secs: u64 },

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

impl ClientError {
    pub fn crypto(e: ErrorReport) -> ClientError {
        ClientError::Crypto { source: e }
    }

    pub fn proto_encoding(e: ErrorReport) -> ClientError {
        ClientError::ProtoEncoding { source: e }
    }

    /// True when the LCD answered 404, which it does for txs that are not indexed yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Http(e) if e.status == 404)
    }
}

/// Non-2xx answer from the LCD.
#[derive(Error, Debug, Clone)]
#[error("lcd returned {status}{}", status_suffix(.body))]
pub struct HttpError {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Error body the cosmos grpc-gateway returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcdStatus {
    pub code: String,
    pub message: String,
}

impl HttpError {
    /// Structured `code` / `message` pair, when the body carries one.
    pub fn lcd_status(&self) -> Option<LcdStatus> {
        parse_lcd_status(&self.body)
    }
}

fn parse_lcd_status(body: &str) -> Option<LcdStatus> {
    let body: serde_json::Value = serde_json::from_str(body).ok()?;
    let obj = body.as_object()?;
    if !obj.contains_key("code") || !obj.contains_key("message") {
        return None;
    }

    let text = |v: &serde_json::Value| match v {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    Some(LcdStatus {
        code: text(&obj["code"]),
        message: text(&obj["message"]),
    })
}

fn status_suffix(body: &str) -> String {
    parse_lcd_status(body)
        .map(|s| format!(": code={} {}", s.code, s.message))
        .unwrap_or_default()
}
