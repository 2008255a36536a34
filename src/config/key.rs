use cosmrs::bip32;
use cosmrs::crypto::secp256k1;
use cosmrs::AccountId;

use crate::client::error::ClientError;

#[derive(Debug, Clone)]
pub struct SigningKey {
    /// human readable key name
    pub name: String,
    /// private key associated with `name`
    pub key: Key,
    /// BIP-44 coin type used to derive the key, 118 on Initia
    pub coin_type: u32,
}

#[derive(Debug, Clone)]
pub enum Key {
    /// Mnemonic allows you to pass the private key mnemonic words
    /// for configuring a transaction signing key.
    /// DO NOT USE FOR MAINNET
    Mnemonic(String),
}

impl SigningKey {
    // https://github.com/confio/cosmos-hd-key-derivation-spec#the-cosmos-hub-path
    pub fn derivation_path(&self) -> String {
        format!("m/44'/{}'/0'/0/0", self.coin_type)
    }

    /// Bech32 account address controlled by this key.
    pub fn to_account(&self, prefix: &str) -> Result<AccountId, ClientError> {
        let key: secp256k1::SigningKey = self.try_into()?;
        key.public_key()
            .account_id(prefix)
            .map_err(|_| ClientError::AccountId {
                id: format!("{}:{}", prefix, self.name),
            })
    }
}

impl TryFrom<&SigningKey> for secp256k1::SigningKey {
    type Error = ClientError;
    fn try_from(signer: &SigningKey) -> Result<secp256k1::SigningKey, ClientError> {
        match &signer.key {
            Key::Mnemonic(phrase) => {
                // any BIP-39 word count, not only 24 words
                let seed = bip39::Mnemonic::parse_in(bip39::Language::English, phrase.trim())
                    .map_err(|_| ClientError::Mnemonic)?
                    .to_seed("");
                let path = signer
                    .derivation_path()
                    .parse()
                    .map_err(|_| ClientError::DerivationPath)?;
                Ok(bip32::XPrv::derive_from_path(seed, &path)
                    .map_err(|_| ClientError::DerivationPath)?
                    .into())
            }
        }
    }
}
