//! Initia `move` module tx messages, as defined in `initia/move/v1/tx.proto`.

use cosmrs::Any;
use prost::Message;

pub const MSG_EXECUTE_TYPE_URL: &str = "/initia.move.v1.MsgExecute";
pub const MSG_PUBLISH_TYPE_URL: &str = "/initia.move.v1.MsgPublish";

/// Runs an entry function of a published module.
#[derive(Clone, PartialEq, Message)]
pub struct MsgExecute {
    #[prost(string, tag = "1")]
    pub sender: String,
    #[prost(string, tag = "2")]
    pub module_address: String,
    #[prost(string, tag = "3")]
    pub module_name: String,
    #[prost(string, tag = "4")]
    pub function_name: String,
    #[prost(string, repeated, tag = "5")]
    pub type_args: Vec<String>,
    /// BCS encoded arguments
    #[prost(bytes = "vec", repeated, tag = "6")]
    pub args: Vec<Vec<u8>>,
}

/// Publishes compiled module bytecode under the sender's address.
#[derive(Clone, PartialEq, Message)]
pub struct MsgPublish {
    #[prost(string, tag = "1")]
    pub sender: String,
    #[prost(bytes = "vec", repeated, tag = "2")]
    pub code_bytes: Vec<Vec<u8>>,
    #[prost(enumeration = "UpgradePolicy", tag = "3")]
    pub upgrade_policy: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum UpgradePolicy {
    Unspecified = 0,
    /// upgrades must keep the public api compatible
    Compatible = 1,
    Immutable = 2,
}

impl MsgExecute {
    pub fn to_any(&self) -> Any {
        Any {
            type_url: MSG_EXECUTE_TYPE_URL.to_string(),
            value: self.encode_to_vec(),
        }
    }
}

impl MsgPublish {
    pub fn to_any(&self) -> Any {
        Any {
            type_url: MSG_PUBLISH_TYPE_URL.to_string(),
            value: self.encode_to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_round_trips_through_any() {
        let msg = MsgExecute {
            sender: "init1sender".to_string(),
            module_address: "init1sender".to_string(),
            module_name: "coin_launchpad".to_string(),
            function_name: "create_coin".to_string(),
            type_args: vec![],
            args: vec![vec![6], vec![2, b'T', b'C']],
        };

        let any = msg.to_any();
        assert_eq!(any.type_url, "/initia.move.v1.MsgExecute");
        assert_eq!(MsgExecute::decode(any.value.as_slice()).unwrap(), msg);
    }

    #[test]
    fn publish_carries_upgrade_policy() {
        let msg = MsgPublish {
            sender: "init1sender".to_string(),
            code_bytes: vec![vec![0xa1, 0x1c, 0xeb, 0x0b]],
            upgrade_policy: UpgradePolicy::Compatible as i32,
        };

        let any = msg.to_any();
        let decoded = MsgPublish::decode(any.value.as_slice()).unwrap();

        assert_eq!(any.type_url, "/initia.move.v1.MsgPublish");
        assert_eq!(decoded.upgrade_policy(), UpgradePolicy::Compatible);
        // field 3, varint 1
        assert!(any.value.ends_with(&[0x18, 0x01]));
    }
}
