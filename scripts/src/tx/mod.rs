//! Interaction with the ledger over JSON-RPC

/// Provider construction
pub mod client;
/// The JSON-RPC ledger
pub mod sender;

pub use sender::RpcLedger;
