//! Solana token balance lookups over JSON-RPC.
//!
//! A wallet can own several token accounts for the same mint, so the balance is the sum of
//! every account returned by `getTokenAccountsByOwner`. Amounts stay arbitrary-precision
//! integers from the wire to the comparison.

use async_trait::async_trait;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

use crate::server::{
    error::balance::BalanceError,
    model::balance::{parse_raw_amount, BalanceReading},
    service::reconciliation::traits::BalanceOracle,
    util::parse::parse_public_key,
};

pub(super) const JSONRPC_VERSION: &str = "2.0";
const TOKEN_ACCOUNTS_BY_OWNER: &str = "getTokenAccountsByOwner";

#[derive(Debug, Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

#[derive(Debug, Deserialize)]
pub(super) struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
pub(super) struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

/// Balance oracle backed by a Solana RPC node chosen per tenant.
#[derive(Clone)]
pub struct SolanaBalanceOracle {
    client: reqwest::Client,
}

impl SolanaBalanceOracle {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Builds an oracle with its own client and a per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(client))
    }

    /// Fetches the total raw balance a wallet holds for a mint.
    ///
    /// # Arguments
    /// - `owner` - Base58 wallet address
    /// - `mint` - Base58 token mint address
    /// - `rpc_url` - JSON-RPC endpoint
    ///
    /// # Returns
    /// - `Ok(BigUint)` - Sum over every token account, zero when the wallet has none
    /// - `Err(BalanceError::InvalidPublicKey)` - Owner or mint is not a 32-byte key
    /// - `Err(BalanceError)` - Transport, HTTP, RPC or response shape failure
    pub async fn fetch_balance(
        &self,
        owner: &str,
        mint: &str,
        rpc_url: &str,
    ) -> Result<BigUint, BalanceError> {
        for key in [owner, mint] {
            if parse_public_key(key).is_none() {
                return Err(BalanceError::InvalidPublicKey(key.to_string()));
            }
        }

        let request = JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION,
            id: 1,
            method: TOKEN_ACCOUNTS_BY_OWNER,
            params: json!([
                owner.trim(),
                { "mint": mint.trim() },
                { "encoding": "jsonParsed", "commitment": "confirmed" }
            ]),
        };

        let response = self.client.post(rpc_url).json(&request).send().await?;
        if !response.status().is_success() {
            return Err(BalanceError::HttpStatus(response.status()));
        }

        let response: JsonRpcResponse = response.json().await?;
        if let Some(error) = response.error {
            return Err(BalanceError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let result = response
            .result
            .ok_or_else(|| BalanceError::MalformedResponse("missing result".to_string()))?;

        sum_token_amounts(&result)
    }
}

#[async_trait]
impl BalanceOracle for SolanaBalanceOracle {
    async fn get_balance(&self, address: &str, token_mint: &str, rpc_url: &str) -> BalanceReading {
        match self.fetch_balance(address, token_mint, rpc_url).await {
            Ok(balance) => BalanceReading::Known(balance),
            Err(e) => {
                tracing::warn!(
                    address = %address,
                    token_mint = %token_mint,
                    rpc_url = %rpc_url,
                    "Balance lookup failed: {}",
                    e
                );
                BalanceReading::Unknown
            }
        }
    }
}

/// Sums `tokenAmount.amount` over the accounts in a `getTokenAccountsByOwner` result.
///
/// Accounts without a parsed amount are ignored. A result without a `value` array or an
/// amount that is not a non-negative integer string is malformed.
pub fn sum_token_amounts(result: &Value) -> Result<BigUint, BalanceError> {
    let accounts = result
        .get("value")
        .and_then(Value::as_array)
        .ok_or_else(|| BalanceError::MalformedResponse("missing value array".to_string()))?;

    let mut total = BigUint::default();
    for account in accounts {
        let Some(amount) = account
            .pointer("/account/data/parsed/info/tokenAmount/amount")
            .and_then(Value::as_str)
        else {
            continue;
        };

        total += parse_raw_amount(amount)
            .map_err(|e| BalanceError::MalformedResponse(e.to_string()))?;
    }

    Ok(total)
}
