//! JSON-RPC backed account source.

use async_trait::async_trait;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::json;

use crate::errors::SourceError;
use crate::source::{AccountSource, RawAccount};

/// [`AccountSource`] over a node's JSON-RPC endpoint, using `getAccountInfo`
/// with base64-encoded account data.
#[derive(Debug, Clone)]
pub struct RpcAccountSource {
    endpoint: String,
    client: reqwest::Client,
}

impl RpcAccountSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<RpcResult>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResult {
    context: RpcContext,
    value: Option<RpcAccount>,
}

#[derive(Debug, Deserialize)]
struct RpcContext {
    slot: u64,
}

#[derive(Debug, Deserialize)]
struct RpcAccount {
    owner: String,
    /// `(payload, encoding)` pair as returned by the node.
    data: (String, String),
}

fn account_from_response(response: RpcResponse) -> Result<Option<RawAccount>, SourceError> {
    if let Some(err) = response.error {
        return Err(SourceError(format!("rpc error {}: {}", err.code, err.message)));
    }
    let Some(result) = response.result else {
        return Ok(None);
    };
    let Some(account) = result.value else {
        return Ok(None);
    };

    let (payload, encoding) = account.data;
    if encoding != "base64" {
        return Err(SourceError(format!("unexpected account encoding {encoding}")));
    }
    let data = base64::engine::general_purpose::STANDARD
        .decode(payload.as_bytes())
        .map_err(|e| SourceError(format!("invalid account data: {e}")))?;

    Ok(Some(RawAccount {
        owner: account.owner,
        data,
        slot: result.context.slot,
    }))
}

#[async_trait]
impl AccountSource for RpcAccountSource {
    async fn load(&self, address: &str) -> Result<Option<RawAccount>, SourceError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getAccountInfo",
            "params": [address, { "encoding": "base64" }],
        });

        let response: RpcResponse = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| SourceError(e.to_string()))?
            .json()
            .await
            .map_err(|e| SourceError(e.to_string()))?;

        account_from_response(response)
    }
}
