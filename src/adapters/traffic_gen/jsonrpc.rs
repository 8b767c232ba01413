//! JSON-RPC traffic generator client.
//!
//! Drives a ping client through its management endpoint using JSON-RPC 2.0
//! over HTTP:
//! - `PingClient.Start {Index, Interval, ClearCounters}`
//! - `PingClient.Stop {Index, RxDelay}`
//! - `PingClient.ReadCounters {Index}` returning `{NInterests, NData, NNacks}`

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{GeneratorCounters, Nanoseconds};
use crate::domain::ports::TrafficGen;

/// Connection settings for [`JsonRpcTrafficGen`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct JsonRpcConfig {
    /// Management endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Index of the ping client on the management side
    #[serde(default)]
    pub client_index: usize,

    /// Per-call timeout, on top of any requested stop linger
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Reset counters when starting a trial
    #[serde(default = "default_clear_counters")]
    pub clear_counters: bool,
}

fn default_endpoint() -> String {
    "http://127.0.0.1:6345".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_clear_counters() -> bool {
    true
}

impl Default for JsonRpcConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            client_index: 0,
            timeout_secs: default_timeout_secs(),
            clear_counters: default_clear_counters(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    #[serde(default)]
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PingCounters {
    n_interests: u64,
    n_data: u64,
    #[serde(default)]
    n_nacks: u64,
}

/// Ping client driven over JSON-RPC.
#[derive(Debug)]
pub struct JsonRpcTrafficGen {
    http_client: ReqwestClient,
    config: JsonRpcConfig,
    next_id: u64,
}

impl JsonRpcTrafficGen {
    pub fn new(config: JsonRpcConfig) -> DomainResult<Self> {
        let http_client = ReqwestClient::builder()
            .tcp_nodelay(true)
            .build()
            .map_err(|e| DomainError::generator("connect", e.to_string()))?;

        Ok(Self {
            http_client,
            config,
            next_id: 0,
        })
    }

    pub const fn config(&self) -> &JsonRpcConfig {
        &self.config
    }

    #[instrument(skip(self, params), fields(endpoint = %self.config.endpoint))]
    async fn call(
        &mut self,
        operation: &'static str,
        method: &str,
        params: Value,
        extra_timeout: Duration,
    ) -> DomainResult<Value> {
        self.next_id += 1;
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id,
            method,
            params,
        };

        let response = self
            .http_client
            .post(&self.config.endpoint)
            .timeout(Duration::from_secs(self.config.timeout_secs) + extra_timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::generator(operation, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            warn!(%status, %body, "management endpoint error");
            return Err(DomainError::generator(
                operation,
                format!("HTTP {status}: {body}"),
            ));
        }

        let reply: RpcResponse = response
            .json()
            .await
            .map_err(|e| DomainError::generator(operation, format!("malformed reply: {e}")))?;

        if let Some(err) = reply.error {
            return Err(DomainError::generator(
                operation,
                format!("RPC error {}: {}", err.code, err.message),
            ));
        }
        debug!(method, "rpc ok");
        Ok(reply.result)
    }
}

#[async_trait]
impl TrafficGen for JsonRpcTrafficGen {
    fn name(&self) -> &'static str {
        "jsonrpc"
    }

    async fn start(&mut self, interval: Nanoseconds) -> DomainResult<()> {
        let params = json!({
            "Index": self.config.client_index,
            "Interval": interval,
            "ClearCounters": self.config.clear_counters,
        });
        self.call("start", "PingClient.Start", params, Duration::ZERO)
            .await?;
        Ok(())
    }

    async fn stop(&mut self, linger: Duration) -> DomainResult<()> {
        let params = json!({
            "Index": self.config.client_index,
            "RxDelay": linger.as_nanos() as u64,
        });
        self.call("stop", "PingClient.Stop", params, linger).await?;
        Ok(())
    }

    async fn read_counters(&mut self) -> DomainResult<GeneratorCounters> {
        let params = json!({ "Index": self.config.client_index });
        let result = self
            .call("read_counters", "PingClient.ReadCounters", params, Duration::ZERO)
            .await?;
        let cnt: PingCounters = serde_json::from_value(result)?;
        Ok(GeneratorCounters::from_totals(
            cnt.n_interests,
            cnt.n_data,
            cnt.n_nacks,
        ))
    }
}
