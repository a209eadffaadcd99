//! Fullnode JSON-RPC interface: wire types and client

pub mod client;
pub mod types;

pub use client::{RpcApi, RpcClient};
pub use types::{
    CallArg, DevInspectResults, ExecuteResponse, GetObjectParams, MoveCall, ObjectContent,
    ObjectData, ObjectDataOptions, ObjectResponse, Transaction, TransactionEffects,
    TransactionResponse,
};
