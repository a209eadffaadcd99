//! JSON-RPC client for the fullnode read and submission endpoints

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::{ClientConfig, NetworkConfig};
use crate::error::{ClientError, RpcError};
use crate::rpc::types::{
    DevInspectResults, ExecuteResponse, GetObjectParams, ObjectResponse, RpcRequest, RpcResponse,
    Transaction, TransactionResponse,
};
use crate::types::{Address, Digest};

/// Read and submission operations against the execution layer. The
/// production implementation is [`RpcClient`]; tests substitute mocks.
pub trait RpcApi {
    /// Fetch an object's current state by ID.
    fn get_object(
        &self,
        params: GetObjectParams,
    ) -> impl std::future::Future<Output = Result<ObjectResponse, RpcError>> + Send;

    /// Submit a transaction for execution. Returns its digest on acceptance.
    fn execute_transaction(
        &self,
        sender: &Address,
        tx: &Transaction,
    ) -> impl std::future::Future<Output = Result<ExecuteResponse, RpcError>> + Send;

    /// Wait until the transaction with the given digest is confirmed.
    fn wait_for_transaction(
        &self,
        digest: &Digest,
    ) -> impl std::future::Future<Output = Result<TransactionResponse, RpcError>> + Send;

    /// Run a transaction as a read-only simulation, without committing.
    fn dev_inspect(
        &self,
        sender: &Address,
        tx: &Transaction,
    ) -> impl std::future::Future<Output = Result<DevInspectResults, RpcError>> + Send;
}

/// Production JSON-RPC client over HTTP.
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    request_timeout_ms: u64,
    confirm_poll_interval_ms: u64,
    confirm_poll_attempts: u32,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Create a client for one network, taking timeouts from the main
    /// configuration.
    pub fn new(network: &NetworkConfig, config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| ClientError::Configuration {
                message: format!("failed to build HTTP client: {}", e),
                field: "request_timeout_ms".to_string(),
            })?;

        Ok(Self {
            http,
            url: network.rpc_url.clone(),
            request_timeout_ms: config.request_timeout_ms,
            confirm_poll_interval_ms: config.confirm_poll_interval_ms,
            confirm_poll_attempts: config.confirm_poll_attempts,
            next_id: AtomicU64::new(1),
        })
    }

    fn classify(&self, err: reqwest::Error) -> RpcError {
        if err.is_timeout() {
            RpcError::RequestTimeout {
                duration_ms: self.request_timeout_ms,
            }
        } else if err.is_connect() {
            RpcError::ConnectionFailed {
                message: err.to_string(),
            }
        } else {
            RpcError::InvalidResponse {
                message: err.to_string(),
            }
        }
    }

    async fn call<P: Serialize, T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: P,
    ) -> Result<T, RpcError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        debug!(method, url = %self.url, "rpc request");

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let body: RpcResponse<T> = response.json().await.map_err(|e| self.classify(e))?;

        if let Some(err) = body.error {
            return Err(RpcError::ServerError {
                code: err.code,
                message: err.message,
            });
        }

        body.result.ok_or_else(|| RpcError::InvalidResponse {
            message: format!("{} response carried neither result nor error", method),
        })
    }
}

impl RpcApi for RpcClient {
    async fn get_object(&self, params: GetObjectParams) -> Result<ObjectResponse, RpcError> {
        self.call("sui_getObject", json!([params.object_id, params.options]))
            .await
    }

    async fn execute_transaction(
        &self,
        sender: &Address,
        tx: &Transaction,
    ) -> Result<ExecuteResponse, RpcError> {
        self.call("sui_executeTransactionBlock", json!([sender, tx]))
            .await
    }

    async fn wait_for_transaction(
        &self,
        digest: &Digest,
    ) -> Result<TransactionResponse, RpcError> {
        // The submission response races ahead of the node's indexing, so
        // poll until the transaction shows up.
        let mut last_error = None;
        for attempt in 0..self.confirm_poll_attempts {
            if attempt > 0 {
                tokio::time::sleep(Duration::from_millis(self.confirm_poll_interval_ms)).await;
            }

            match self
                .call(
                    "sui_getTransactionBlock",
                    json!([digest, { "showEffects": true }]),
                )
                .await
            {
                Ok(response) => return Ok(response),
                Err(err) => {
                    warn!(%digest, attempt, error = %err, "confirmation poll failed");
                    last_error = Some(err);
                }
            }
        }

        Err(last_error.unwrap_or(RpcError::RequestTimeout {
            duration_ms: self.confirm_poll_interval_ms * self.confirm_poll_attempts as u64,
        }))
    }

    async fn dev_inspect(
        &self,
        sender: &Address,
        tx: &Transaction,
    ) -> Result<DevInspectResults, RpcError> {
        self.call("sui_devInspectTransactionBlock", json!([sender, tx]))
            .await
    }
}
