pub mod connection;
pub mod constants;
pub mod provider;
pub mod rpc;
