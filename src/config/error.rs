use config::ConfigError as _ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {name} endpoint: {url:?}")]
    Endpoint {
        name: &'static str,
        url: String,
        source: tendermint_rpc::Error,
    },

    #[error("gas value must be positive: {name}")]
    GasValue { name: &'static str },

    #[error("error reading .env file")]
    DotEnv(#[from] dotenvy::Error),

    #[error(transparent)]
    Config(#[from] _ConfigError),
}
