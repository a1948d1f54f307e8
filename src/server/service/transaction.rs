//! Solana transaction lookups over JSON-RPC for memo ownership proofs.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

use crate::server::{
    error::balance::BalanceError,
    model::verification::ConfirmedTransaction,
    service::verification::memo::{TransactionLookup, MEMO_PROGRAM_ID},
};

use super::balance::{JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};

const GET_TRANSACTION: &str = "getTransaction";

/// Transaction lookup backed by the tenant's Solana RPC node.
#[derive(Clone)]
pub struct SolanaTransactionClient {
    client: reqwest::Client,
}

impl SolanaTransactionClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Builds a client with a per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(client))
    }

    /// Fetches a finalized transaction by signature.
    ///
    /// # Returns
    /// - `Ok(Some(ConfirmedTransaction))` - Signers, memos and execution status
    /// - `Ok(None)` - Unknown or not yet finalized
    /// - `Err(BalanceError)` - Transport, HTTP, RPC or response shape failure
    pub async fn fetch_transaction(
        &self,
        signature: &str,
        rpc_url: &str,
    ) -> Result<Option<ConfirmedTransaction>, BalanceError> {
        let request = JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION,
            id: 1,
            method: GET_TRANSACTION,
            params: json!([
                signature.trim(),
                {
                    "encoding": "jsonParsed",
                    "commitment": "finalized",
                    "maxSupportedTransactionVersion": 0
                }
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

        match response.result {
            None | Some(Value::Null) => Ok(None),
            Some(result) => parse_confirmed_transaction(&result).map(Some),
        }
    }
}

#[async_trait]
impl TransactionLookup for SolanaTransactionClient {
    async fn find_transaction(
        &self,
        signature: &str,
        rpc_url: &str,
    ) -> Option<ConfirmedTransaction> {
        match self.fetch_transaction(signature, rpc_url).await {
            Ok(transaction) => transaction,
            Err(e) => {
                tracing::warn!(
                    signature = %signature,
                    rpc_url = %rpc_url,
                    "Transaction lookup failed: {}",
                    e
                );
                None
            }
        }
    }
}

/// Extracts signers, memo texts and status from a `jsonParsed` `getTransaction` result.
///
/// Memo instructions are read from their parsed text, or from base58 `data` when the node
/// did not parse them. Memos that are not UTF-8 are ignored.
pub fn parse_confirmed_transaction(result: &Value) -> Result<ConfirmedTransaction, BalanceError> {
    let message = result
        .pointer("/transaction/message")
        .ok_or_else(|| BalanceError::MalformedResponse("missing transaction message".into()))?;

    let signers = message
        .get("accountKeys")
        .and_then(Value::as_array)
        .ok_or_else(|| BalanceError::MalformedResponse("missing accountKeys".into()))?
        .iter()
        .filter(|key| key.get("signer").and_then(Value::as_bool).unwrap_or(false))
        .filter_map(|key| key.get("pubkey").and_then(Value::as_str))
        .map(str::to_string)
        .collect();

    let memos = message
        .get("instructions")
        .and_then(Value::as_array)
        .ok_or_else(|| BalanceError::MalformedResponse("missing instructions".into()))?
        .iter()
        .filter(|ix| ix.get("programId").and_then(Value::as_str) == Some(MEMO_PROGRAM_ID))
        .filter_map(memo_text)
        .collect();

    let succeeded = result
        .pointer("/meta/err")
        .map_or(true, Value::is_null);

    Ok(ConfirmedTransaction {
        signers,
        memos,
        succeeded,
    })
}

fn memo_text(instruction: &Value) -> Option<String> {
    if let Some(parsed) = instruction.get("parsed").and_then(Value::as_str) {
        return Some(parsed.to_string());
    }

    let data = instruction.get("data").and_then(Value::as_str)?;
    let bytes = bs58::decode(data).into_vec().ok()?;
    String::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLET: &str = "So11111111111111111111111111111111111111112";
    const FEE_PAYER: &str = "Fee1111111111111111111111111111111111111111";

    fn result(instructions: Value, err: Value) -> Value {
        json!({
            "slot": 1,
            "meta": { "err": err, "fee": 5000 },
            "transaction": {
                "signatures": ["sig"],
                "message": {
                    "accountKeys": [
                        { "pubkey": WALLET, "signer": true, "writable": true, "source": "transaction" },
                        { "pubkey": FEE_PAYER, "signer": false, "writable": false, "source": "transaction" }
                    ],
                    "instructions": instructions
                }
            }
        })
    }

    #[test]
    fn reads_signers_and_parsed_memo() {
        let result = result(
            json!([
                { "parsed": "hello", "program": "spl-memo", "programId": MEMO_PROGRAM_ID },
                { "parsed": { "type": "transfer" }, "program": "system",
                  "programId": "11111111111111111111111111111111" }
            ]),
            Value::Null,
        );

        let tx = parse_confirmed_transaction(&result).unwrap();

        assert_eq!(tx.signers, vec![WALLET.to_string()]);
        assert_eq!(tx.memos, vec!["hello".to_string()]);
        assert!(tx.succeeded);
    }

    #[test]
    fn decodes_unparsed_memo_data() {
        let data = bs58::encode("hello").into_string();
        let result = result(
            json!([{ "accounts": [], "data": data, "programId": MEMO_PROGRAM_ID }]),
            Value::Null,
        );

        let tx = parse_confirmed_transaction(&result).unwrap();

        assert_eq!(tx.memos, vec!["hello".to_string()]);
    }

    #[test]
    fn marks_failed_execution() {
        let result = result(json!([]), json!({ "InstructionError": [0, "Custom"] }));

        let tx = parse_confirmed_transaction(&result).unwrap();

        assert!(!tx.succeeded);
        assert!(tx.memos.is_empty());
    }

    #[test]
    fn rejects_result_without_message() {
        assert!(matches!(
            parse_confirmed_transaction(&json!({ "slot": 1 })),
            Err(BalanceError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_endpoint_finds_nothing() {
        let client = SolanaTransactionClient::with_timeout(Duration::from_millis(200)).unwrap();

        let found = client
            .find_transaction(&bs58::encode([1u8; 64]).into_string(), "http://127.0.0.1:1")
            .await;

        assert!(found.is_none());
    }
}
