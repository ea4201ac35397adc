//! Transaction outcomes and explorer links.

use serde::Deserialize;
use serde::Serialize;

/// The placeholder an explorer template uses for the transaction hash.
pub const TX_HASH_PLACEHOLDER: &str = "{txHash}";

/// The final outcome of a delivered transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResult {
    /// 0 on success, otherwise the chain's error code.
    pub code: u32,
    pub log: String,
    pub hash: String,
}

impl TxResult {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// Returned once a transaction was accepted into the mempool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastAck {
    pub hash: String,
}

/// Builds explorer links from a template like `https://explorer/txs/{txHash}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxExplorer {
    url_template: String,
}

impl TxExplorer {
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
        }
    }

    pub fn tx_url(&self, hash: &str) -> String {
        self.url_template.replace(TX_HASH_PLACEHOLDER, hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_hash_into_template() {
        let explorer = TxExplorer::new("https://www.mintscan.io/osmosis/txs/{txHash}");
        assert_eq!(
            explorer.tx_url("ABC"),
            "https://www.mintscan.io/osmosis/txs/ABC"
        );
    }

    #[test]
    fn zero_code_is_success() {
        let mut result = TxResult {
            code: 0,
            log: String::new(),
            hash: "ABC".to_string(),
        };
        assert!(result.is_success());
        result.code = 5;
        assert!(!result.is_success());
    }
}
