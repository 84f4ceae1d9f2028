use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

use super::{AccountInfo, AccountProvider};
use crate::error::{WalletError, WalletResult};

const METHOD_GET_ACCOUNT: &str = "pactus.blockchain.get_account";

/// JSON-RPC 2.0 client for a Pactus node.
pub struct RpcClient {
    client: reqwest::Client,
    base_url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    async fn call(&self, method: &str, params: Value) -> WalletResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        log::debug!("RPC {} -> {}", method, self.base_url);

        let response = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| WalletError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WalletError::Network(format!(
                "{} returned HTTP {}",
                method,
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| WalletError::Network(e.to_string()))?;

        parse_response(method, body)
    }
}

fn parse_response(method: &str, body: Value) -> WalletResult<Value> {
    if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
        let message = error["message"].as_str().unwrap_or("unknown error");
        return Err(WalletError::Network(format!("{} failed: {}", method, message)));
    }

    body.get("result")
        .cloned()
        .ok_or_else(|| WalletError::Network(format!("{} returned no result", method)))
}

/// Extract the balance from a `get_account` result. The gateway may encode
/// int64 values either as JSON numbers or as strings.
fn parse_account(result: &Value) -> WalletResult<AccountInfo> {
    let balance = &result["account"]["balance"];
    let balance = match balance {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Null => "0".to_string(),
        other => {
            return Err(WalletError::Network(format!(
                "Unexpected balance value: {}",
                other
            )))
        }
    };
    Ok(AccountInfo { balance })
}

#[async_trait]
impl AccountProvider for RpcClient {
    async fn get_account(&self, address: &str) -> WalletResult<AccountInfo> {
        let result = self
            .call(METHOD_GET_ACCOUNT, json!({ "address": address }))
            .await?;
        parse_account(&result)
    }
}
