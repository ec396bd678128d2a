use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 追蹤中的 token，由 Tokens.json 載入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(default)]
    pub name: String,
    pub symbol: String,
    pub contract: String,
}

/// 單一 token 的單一持有者餘額 (原始單位)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderEntry {
    pub address: String,
    pub holding: u128,
}

/// 一個 token 的抓取結果。`aborted` 有值時表示中途失敗，`entries` 為已收集的部分結果
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub entries: Vec<HolderEntry>,
    pub pages_fetched: usize,
    pub aborted: Option<String>,
}

impl FetchOutcome {
    pub fn is_partial(&self) -> bool {
        self.aborted.is_some()
    }
}

/// 跨 token 彙總後的地址持有量
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateRow {
    pub address: String,
    pub holdings: HashMap<String, u128>,
    pub total: u128,
}

impl AggregateRow {
    pub fn new(address: String) -> Self {
        Self {
            address,
            holdings: HashMap::new(),
            total: 0,
        }
    }

    /// 未記錄的 symbol 視為 0
    pub fn holding(&self, symbol: &str) -> u128 {
        self.holdings.get(symbol).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Csv,
    Json,
}

impl ArtifactKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::Csv => "csv",
            ArtifactKind::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub symbol: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMetadata {
    pub total_items: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub description: String,
    pub pages: Vec<String>,
}

/// 一次執行的結果摘要
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub tokens_processed: usize,
    pub partial_tokens: Vec<String>,
    pub aggregate_rows: usize,
    pub total_pages: usize,
    pub snapshot_paths: Vec<String>,
}
