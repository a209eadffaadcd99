//! Wire types for the fullnode JSON-RPC interface

use serde::{Deserialize, Serialize};

use crate::types::{Address, Digest};

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Serialize)]
pub struct RpcRequest<P> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'static str,
    pub params: P,
}

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcErrorBody>,
}

/// Error object in a JSON-RPC response.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorBody {
    pub code: i64,
    pub message: String,
}

/// Parameters for an object fetch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetObjectParams {
    pub object_id: Address,
    pub options: ObjectDataOptions,
}

/// Which parts of the object to include in the response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDataOptions {
    pub show_type: bool,
    pub show_content: bool,
}

impl Default for ObjectDataOptions {
    fn default() -> Self {
        Self {
            show_type: true,
            show_content: true,
        }
    }
}

/// Response to an object fetch. Exactly one of `data` and `error` is
/// populated.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectResponse {
    pub data: Option<ObjectData>,
    pub error: Option<ObjectResponseError>,
}

/// The fetched object.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    pub object_id: Address,
    #[serde(rename = "type")]
    pub object_type: Option<String>,
    pub content: Option<ObjectContent>,
}

/// Serialized object contents.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectContent {
    pub data_type: String,
    pub fields: serde_json::Value,
}

/// Object-level error reported inside a successful RPC response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectResponseError {
    pub code: String,
    #[serde(default)]
    pub object_id: Option<Address>,
}

impl ObjectResponseError {
    pub fn is_not_exists(&self) -> bool {
        self.code == "notExists" || self.code == "deleted"
    }
}

/// A call description submitted to the execution layer. One transaction
/// carries one or more entry-point calls, executed in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub calls: Vec<MoveCall>,
}

impl Transaction {
    pub fn single(call: MoveCall) -> Self {
        Self { calls: vec![call] }
    }
}

/// One entry-point invocation: a `<package>::<module>::<function>` target
/// plus positional arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveCall {
    pub target: String,
    pub arguments: Vec<CallArg>,
}

/// Positional argument to an entry-point call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CallArg {
    /// Reference to an on-chain object
    Object(Address),
    /// Plain value passed by serialization
    Pure(serde_json::Value),
}

/// Response to a transaction submission.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteResponse {
    pub digest: Digest,
}

/// Confirmed transaction, as returned by the confirmation call.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionResponse {
    pub digest: Digest,
    pub effects: Option<TransactionEffects>,
}

/// Effects of a confirmed transaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEffects {
    pub status: ExecutionStatus,
    #[serde(default)]
    pub created: Vec<OwnedObjectRef>,
}

/// Execution status of a confirmed transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionStatus {
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl ExecutionStatus {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Reference to an object touched by a transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnedObjectRef {
    pub reference: ObjectRef,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    pub object_id: Address,
}

/// Results of a read-only simulation.
#[derive(Debug, Clone, Deserialize)]
pub struct DevInspectResults {
    #[serde(default)]
    pub results: Option<Vec<DevInspectExecutionResult>>,
}

/// Return values of one simulated call: `(bytes, type)` pairs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevInspectExecutionResult {
    #[serde(default)]
    pub return_values: Vec<(Vec<u8>, String)>,
}

impl DevInspectResults {
    /// First byte of the first return value of the first result, which is
    /// how single-primitive read-only calls come back.
    pub fn first_return_byte(&self) -> Option<u8> {
        self.results
            .as_ref()?
            .first()?
            .return_values
            .first()?
            .0
            .first()
            .copied()
    }
}
