use config::{Config as _Config, Environment, File, Source};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tendermint_rpc::{Error, Url};

use super::error::ConfigError;
use super::key::{Key, SigningKey};

/// Fee token used by the launchpad chain when `GAS_DENOM` is not set.
pub const DEFAULT_GAS_DENOM: &str =
    "move/944f8dd8dc49f96c25fea9849f16436dcfa6d564eec802f3ef7f8b3ea85368ff";
pub const DEFAULT_GAS_PRICES: f64 = 0.15;
pub const DEFAULT_GAS_ADJUSTMENT: f64 = 1.5;
pub const DEFAULT_COIN_TYPE: u32 = 118;
pub const DEFAULT_BROADCAST_TIMEOUT_SECS: u64 = 30;

/// Flat view of the environment, one field per variable.
#[derive(Debug, Deserialize)]
struct RawConfig {
    rpc_endpoint: String,
    lcd_endpoint: String,
    chain_id: String,
    chain_prefix: String,
    chain_denom: String,
    gas_denom: String,
    gas_prices: f64,
    gas_adjustment: f64,
    coin_type: u32,
    broadcast_timeout_secs: u64,
    mnemonic_1: String,
    mnemonic_2: String,
    mnemonic_3: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub chain_cfg: ChainCfg,
    /// keys backing wallet 1, 2 and 3, in that order
    pub keys: [SigningKey; 3],
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChainCfg {
    /// coin used by `transfer`
    pub denom: String,
    pub prefix: String,
    pub chain_id: String,
    pub rpc_endpoint: String,
    pub lcd_endpoint: String,
    /// coin the fee is paid in
    pub gas_denom: String,
    pub gas_prices: f64,
    pub gas_adjustment: f64,
    pub coin_type: u32,
    pub broadcast_timeout_secs: u64,
}

impl Config {
    /// Reads the configuration from the process environment,
    /// loading a `.env` file from the working directory first if there is one.
    pub fn from_env() -> Result<Config, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }

        Self::build(Environment::default().try_parsing(true))
    }

    /// Reads the configuration from a yaml file using the lower cased variable names as keys.
    pub fn from_yaml(file: &str) -> Result<Config, ConfigError> {
        Self::build(File::with_name(file))
    }

    pub(crate) fn build<S>(source: S) -> Result<Config, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = _Config::builder()
            .set_default("gas_denom", DEFAULT_GAS_DENOM)?
            .set_default("gas_prices", DEFAULT_GAS_PRICES)?
            .set_default("gas_adjustment", DEFAULT_GAS_ADJUSTMENT)?
            .set_default("coin_type", DEFAULT_COIN_TYPE as i64)?
            .set_default("broadcast_timeout_secs", DEFAULT_BROADCAST_TIMEOUT_SECS as i64)?
            .add_source(source)
            .build()?;

        settings.try_deserialize::<RawConfig>()?.try_into()
    }
}

impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Config, ConfigError> {
        if raw.gas_prices <= 0.0 {
            return Err(ConfigError::GasValue { name: "gas_prices" });
        }
        if raw.gas_adjustment <= 0.0 {
            return Err(ConfigError::GasValue {
                name: "gas_adjustment",
            });
        }

        let rpc_endpoint = parse_url(&raw.rpc_endpoint).map_err(|e| ConfigError::Endpoint {
            name: "rpc",
            url: raw.rpc_endpoint.clone(),
            source: e,
        })?;
        let lcd_endpoint = parse_url(&raw.lcd_endpoint).map_err(|e| ConfigError::Endpoint {
            name: "lcd",
            url: raw.lcd_endpoint.clone(),
            source: e,
        })?;

        let key = |name: &str, mnemonic: String| SigningKey {
            name: name.to_string(),
            key: Key::Mnemonic(mnemonic),
            coin_type: raw.coin_type,
        };

        Ok(Config {
            keys: [
                key("wallet1", raw.mnemonic_1),
                key("wallet2", raw.mnemonic_2),
                key("wallet3", raw.mnemonic_3),
            ],
            chain_cfg: ChainCfg {
                denom: raw.chain_denom,
                prefix: raw.chain_prefix,
                chain_id: raw.chain_id,
                rpc_endpoint,
                lcd_endpoint,
                gas_denom: raw.gas_denom,
                gas_prices: raw.gas_prices,
                gas_adjustment: raw.gas_adjustment,
                coin_type: raw.coin_type,
                broadcast_timeout_secs: raw.broadcast_timeout_secs,
            },
        })
    }
}

// Attempt to parse the configured url to ensure that it is valid.
// If url is missing the Scheme then default to https.
pub(crate) fn parse_url(url: &str) -> Result<String, Error> {
    let url = if url.contains("://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    };

    let u = Url::from_str(&url)?;

    Ok(u.to_string().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use config::FileFormat;

    const BASE: &str = r#"
rpc_endpoint: "https://rpc.testnet.initia.xyz"
lcd_endpoint: "https://lcd.testnet.initia.xyz/"
chain_id: "initiation-1"
chain_prefix: "init"
chain_denom: "uinit"
mnemonic_1: "one"
mnemonic_2: "two"
mnemonic_3: "three"
"#;

    fn from_yaml_str(yaml: &str) -> Result<Config, ConfigError> {
        Config::build(File::from_str(yaml, FileFormat::Yaml))
    }

    #[test]
    fn applies_gas_defaults() {
        let cfg = from_yaml_str(BASE).unwrap();

        assert_eq!(cfg.chain_cfg.gas_denom, DEFAULT_GAS_DENOM);
        assert_eq!(cfg.chain_cfg.gas_prices, 0.15);
        assert_eq!(cfg.chain_cfg.gas_adjustment, 1.5);
        assert_eq!(cfg.chain_cfg.coin_type, 118);
        assert_eq!(cfg.chain_cfg.broadcast_timeout_secs, 30);
        assert_eq!(cfg.chain_cfg.denom, "uinit");
        assert_eq!(cfg.chain_cfg.prefix, "init");
        assert_eq!(cfg.chain_cfg.lcd_endpoint, "https://lcd.testnet.initia.xyz");
    }

    #[test]
    fn maps_mnemonics_to_wallet_keys() {
        let cfg = from_yaml_str(&format!("{BASE}coin_type: 60\n")).unwrap();

        let names: Vec<&str> = cfg.keys.iter().map(|k| k.name.as_str()).collect();
        assert_eq!(names, vec!["wallet1", "wallet2", "wallet3"]);
        assert_matches!(&cfg.keys[1].key, Key::Mnemonic(m) if m == "two");
        assert!(cfg.keys.iter().all(|k| k.coin_type == 60));
    }

    #[test]
    fn missing_mnemonic_is_an_error() {
        let yaml = BASE.replace("mnemonic_3: \"three\"\n", "");
        assert_matches!(from_yaml_str(&yaml), Err(ConfigError::Config(_)));
    }

    #[test]
    fn rejects_non_positive_gas_prices() {
        let res = from_yaml_str(&format!("{BASE}gas_prices: 0\n"));
        assert_matches!(res, Err(ConfigError::GasValue { name: "gas_prices" }));
    }

    #[test]
    fn url_without_scheme_defaults_to_https() {
        assert_eq!(
            parse_url("lcd.testnet.initia.xyz").unwrap(),
            "https://lcd.testnet.initia.xyz"
        );
        assert_eq!(
            parse_url("http://localhost:1317").unwrap(),
            "http://localhost:1317"
        );
        assert!(parse_url("ftp://localhost:1317").is_err());
    }
}
