//! BCS encoding of Move entry and view function arguments.

use cosmrs::AccountId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ClientError;

pub const ADDRESS_LENGTH: usize = 32;

/// BCS encodes a single Move argument.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, ClientError> {
    Ok(bcs::to_bytes(value)?)
}

/// BCS encodes a single Move argument for the LCD json api.
pub fn encode_base64<T: Serialize + ?Sized>(value: &T) -> Result<String, ClientError> {
    Ok(base64::encode(encode(value)?))
}

/// A Move `address`, also used for `Object<T>` arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveAddress([u8; ADDRESS_LENGTH]);

impl MoveAddress {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ClientError> {
        if bytes.len() > ADDRESS_LENGTH {
            return Err(ClientError::MoveAddress {
                addr: hex::encode(bytes),
            });
        }

        let mut addr = [0u8; ADDRESS_LENGTH];
        addr[ADDRESS_LENGTH - bytes.len()..].copy_from_slice(bytes);
        Ok(Self(addr))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&AccountId> for MoveAddress {
    fn from(account: &AccountId) -> Self {
        let bytes = account.to_bytes();
        let mut addr = [0u8; ADDRESS_LENGTH];
        // cosmos accounts are 20 or 32 bytes
        let len = bytes.len().min(ADDRESS_LENGTH);
        addr[ADDRESS_LENGTH - len..].copy_from_slice(&bytes[bytes.len() - len..]);
        Self(addr)
    }
}

impl FromStr for MoveAddress {
    type Err = ClientError;

    /// Accepts `0x` prefixed hex, short forms like `0x1` included, or a bech32 account.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ClientError::MoveAddress {
            addr: s.to_string(),
        };

        if let Some(h) = s.strip_prefix("0x") {
            if h.is_empty() {
                return Err(err());
            }
            let h = if h.len() % 2 == 1 {
                format!("0{}", h)
            } else {
                h.to_string()
            };
            let bytes = hex::decode(h).map_err(|_| err())?;
            return Self::from_bytes(&bytes).map_err(|_| err());
        }

        let account = AccountId::from_str(s).map_err(|_| err())?;
        Ok(Self::from(&account))
    }
}

impl fmt::Display for MoveAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn encodes_primitive_args() {
        assert_eq!(encode(&1_000_000_000u64).unwrap(), 1_000_000_000u64.to_le_bytes());
        assert_eq!(encode(&6u8).unwrap(), vec![6]);
        assert_eq!(encode("TC").unwrap(), vec![2, b'T', b'C']);
        assert_eq!(encode(&None::<String>).unwrap(), vec![0]);
        assert_eq!(encode(&Some(10u64)).unwrap(), vec![1, 10, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn base64_matches_lcd_format() {
        assert_eq!(encode_base64(&None::<u64>).unwrap(), "AA==");
        assert_eq!(encode_base64("TC").unwrap(), "AlRD");
    }

    #[test]
    fn address_encodes_as_32_raw_bytes() {
        let addr: MoveAddress =
            "0xd77b91d81a4c4e0d86244eeb74a5ea2ff13c6079126c6bad01911817ea63ae12"
                .parse()
                .unwrap();

        let bytes = encode(&addr).unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(bytes[0], 0xd7);
        assert_eq!(bytes[31], 0x12);
        assert_eq!(
            addr.to_string(),
            "0xd77b91d81a4c4e0d86244eeb74a5ea2ff13c6079126c6bad01911817ea63ae12"
        );
    }

    #[test]
    fn short_addresses_are_left_padded() {
        let addr: MoveAddress = "0x1".parse().unwrap();

        let mut expected = [0u8; 32];
        expected[31] = 1;
        assert_eq!(addr.as_bytes(), &expected);
    }

    #[test]
    fn account_ids_are_left_padded() {
        let account = AccountId::new("init", &[7u8; 20]).unwrap();
        let addr = MoveAddress::from(&account);

        assert_eq!(&addr.as_bytes()[..12], &[0u8; 12]);
        assert_eq!(&addr.as_bytes()[12..], &[7u8; 20]);
        assert_eq!(account.to_string().parse::<MoveAddress>().unwrap(), addr);
    }

    #[test]
    fn rejects_bad_addresses() {
        assert_matches!(
            "0xzz".parse::<MoveAddress>(),
            Err(ClientError::MoveAddress { .. })
        );
        assert_matches!(
            format!("0x{}", "ab".repeat(33)).parse::<MoveAddress>(),
            Err(ClientError::MoveAddress { .. })
        );
        assert_matches!(
            "0x".parse::<MoveAddress>(),
            Err(ClientError::MoveAddress { .. })
        );
        assert_matches!(
            "not-an-address".parse::<MoveAddress>(),
            Err(ClientError::MoveAddress { .. })
        );
    }
}
