pub mod chain_res;
pub mod cosmos;
pub mod error;
pub mod lcd;
pub mod move_args;
pub mod msgs;

pub use lcd::LcdClient;
