//! Mock RPC endpoint backed by in-memory objects

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use serde_json::json;

use noughts::rpc::types::{
    CallArg, DevInspectResults, ExecuteResponse, GetObjectParams, ObjectResponse, Transaction,
    TransactionResponse,
};
use noughts::{Address, Digest, RpcApi, RpcError};

/// Mock fullnode that serves objects from memory and applies `place_mark`
/// transactions to them, so a refetch after confirmation observes the
/// move.
pub struct MockRpc {
    /// Raw object-response JSON by object ID
    objects: Mutex<HashMap<Address, serde_json::Value>>,
    /// Trophy byte returned by `ended` simulations, by game ID
    trophies: Mutex<HashMap<Address, u8>>,
    /// Every RPC method invoked, in order
    calls: Mutex<Vec<String>>,
    /// Object IDs reported as created by the next confirmed transaction
    created: Mutex<Vec<Address>>,
    /// Error injected into the next execute call
    fail_execute: Mutex<Option<RpcError>>,
    next_digest: AtomicU64,
}

impl MockRpc {
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            trophies: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            fail_execute: Mutex::new(None),
            next_digest: AtomicU64::new(1),
        }
    }

    /// Serve a game object at `id` with the standard field layout.
    pub fn put_game(
        &self,
        id: &Address,
        package: &Address,
        kind: &str,
        board: Vec<u8>,
        turn: u8,
        x: &Address,
        o: &Address,
    ) {
        let response = json!({
            "data": {
                "objectId": id,
                "type": format!("{}::{}::Game", package, kind),
                "content": {
                    "dataType": "moveObject",
                    "fields": {
                        "board": board,
                        "turn": turn,
                        "x": x,
                        "o": o,
                    }
                }
            }
        });
        self.objects.lock().unwrap().insert(id.clone(), response);
    }

    /// Serve an arbitrary object response at `id`.
    pub fn put_raw(&self, id: &Address, response: serde_json::Value) {
        self.objects.lock().unwrap().insert(id.clone(), response);
    }

    pub fn set_trophy(&self, id: &Address, trophy: u8) {
        self.trophies.lock().unwrap().insert(id.clone(), trophy);
    }

    pub fn set_created(&self, ids: Vec<Address>) {
        *self.created.lock().unwrap() = ids;
    }

    pub fn fail_next_execute(&self, err: RpcError) {
        *self.fail_execute.lock().unwrap() = Some(err);
    }

    /// RPC methods invoked so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, method: &str) {
        self.calls.lock().unwrap().push(method.to_string());
    }

    fn object_arg(tx: &Transaction) -> Option<Address> {
        tx.calls.first()?.arguments.iter().find_map(|arg| match arg {
            CallArg::Object(id) => Some(id.clone()),
            CallArg::Pure(_) => None,
        })
    }

    fn pure_u8(tx: &Transaction, position: usize) -> Option<u8> {
        match tx.calls.first()?.arguments.get(position)? {
            CallArg::Pure(value) => value.as_u64().map(|v| v as u8),
            CallArg::Object(_) => None,
        }
    }

    /// Apply a confirmed `place_mark` to the stored object.
    fn apply_place_mark(&self, tx: &Transaction) {
        let Some(id) = Self::object_arg(tx) else { return };
        let (Some(row), Some(col)) = (Self::pure_u8(tx, 1), Self::pure_u8(tx, 2)) else {
            return;
        };

        let mut objects = self.objects.lock().unwrap();
        let Some(object) = objects.get_mut(&id) else { return };
        let fields = &mut object["data"]["content"]["fields"];

        let turn = fields["turn"].as_u64().unwrap_or(0);
        let mark = if turn % 2 == 0 { 1 } else { 2 };
        fields["board"][(row * 3 + col) as usize] = json!(mark);
        fields["turn"] = json!(turn + 1);
    }
}

impl Default for MockRpc {
    fn default() -> Self {
        Self::new()
    }
}

impl RpcApi for MockRpc {
    async fn get_object(&self, params: GetObjectParams) -> Result<ObjectResponse, RpcError> {
        self.record("get_object");

        let objects = self.objects.lock().unwrap();
        let raw = objects
            .get(&params.object_id)
            .cloned()
            .unwrap_or_else(|| json!({ "error": { "code": "notExists" } }));

        serde_json::from_value(raw).map_err(|e| RpcError::InvalidResponse {
            message: e.to_string(),
        })
    }

    async fn execute_transaction(
        &self,
        _sender: &Address,
        tx: &Transaction,
    ) -> Result<ExecuteResponse, RpcError> {
        self.record("execute_transaction");

        if let Some(err) = self.fail_execute.lock().unwrap().take() {
            return Err(err);
        }

        let target = tx.calls.first().map(|c| c.target.as_str()).unwrap_or("");
        if target.ends_with("::place_mark") {
            self.apply_place_mark(tx);
        }

        let digest = self.next_digest.fetch_add(1, Ordering::Relaxed);
        Ok(ExecuteResponse {
            digest: Digest(format!("digest-{}", digest)),
        })
    }

    async fn wait_for_transaction(
        &self,
        digest: &Digest,
    ) -> Result<TransactionResponse, RpcError> {
        self.record("wait_for_transaction");

        let created: Vec<_> = self
            .created
            .lock()
            .unwrap()
            .iter()
            .map(|id| json!({ "reference": { "objectId": id } }))
            .collect();

        serde_json::from_value(json!({
            "digest": digest,
            "effects": {
                "status": { "status": "success" },
                "created": created,
            }
        }))
        .map_err(|e| RpcError::InvalidResponse {
            message: e.to_string(),
        })
    }

    async fn dev_inspect(
        &self,
        _sender: &Address,
        tx: &Transaction,
    ) -> Result<DevInspectResults, RpcError> {
        self.record("dev_inspect");

        let id = Self::object_arg(tx).ok_or_else(|| RpcError::InvalidResponse {
            message: "simulation call has no object argument".to_string(),
        })?;

        let trophy = self
            .trophies
            .lock()
            .unwrap()
            .get(&id)
            .copied()
            .unwrap_or(0);

        serde_json::from_value(json!({
            "results": [ { "returnValues": [ [[trophy], "u8"] ] } ]
        }))
        .map_err(|e| RpcError::InvalidResponse {
            message: e.to_string(),
        })
    }
}
