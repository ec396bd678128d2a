use crate::domain::model::{FetchOutcome, HolderEntry, Token};
use crate::domain::ports::{ConfigProvider, HolderSource};
use crate::utils::error::{Result, SnapshotError};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

/// Blockscout 風格的持有者分頁回應。items 保留原始 JSON，逐筆檢查欄位
#[derive(Debug, Deserialize)]
struct HoldersPage {
    #[serde(default)]
    items: Option<Vec<Value>>,
    #[serde(default)]
    next_page_params: Option<Map<String, Value>>,
}

/// 缺少 address.hash (或形狀不對) 代表 API 合約改變，直接回傳錯誤中止整個執行
fn holder_entry(item: &Value, symbol: &str, page: usize) -> Result<HolderEntry> {
    let malformed = |reason: String| SnapshotError::MalformedHolderError {
        symbol: symbol.to_string(),
        page,
        reason,
    };

    let address = item
        .get("address")
        .and_then(|a| a.get("hash"))
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(format!("missing address.hash in {}", item)))?
        .to_string();

    // serde_json 開啟 arbitrary_precision，數字保留原始字面值，超過 u64 也不會失真
    let holding = match item.get("value") {
        None | Some(Value::Null) => 0,
        Some(Value::Number(n)) => parse_balance(&n.to_string())
            .ok_or_else(|| malformed(format!("balance {} is not a non-negative integer", n)))?,
        Some(Value::String(s)) => parse_balance(s)
            .ok_or_else(|| malformed(format!("balance '{}' is not a non-negative integer", s)))?,
        Some(other) => return Err(malformed(format!("unexpected balance value {}", other))),
    };

    Ok(HolderEntry { address, holding })
}

fn parse_balance(raw: &str) -> Option<u128> {
    raw.trim().parse::<u128>().ok()
}

/// 將 next_page_params 原封不動轉成查詢參數
fn cursor_query(params: &Map<String, Value>) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((key.clone(), value))
        })
        .collect()
}

pub struct HolderFetcher {
    client: Client,
    api_base_url: String,
    holders_path: String,
    page_delay: Duration,
}

impl HolderFetcher {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url().trim_end_matches('/').to_string(),
            holders_path: config.holders_path().to_string(),
            page_delay: config.page_delay(),
        })
    }

    pub fn holders_url(&self, contract: &str) -> String {
        format!(
            "{}{}",
            self.api_base_url,
            self.holders_path.replace("{contract}", contract)
        )
    }

    async fn fetch_page(
        &self,
        url: &str,
        cursor: Option<&[(String, String)]>,
    ) -> Result<HoldersPage> {
        let mut request = self.client.get(url);
        if let Some(params) = cursor {
            request = request.query(params);
        }

        let response = request.send().await?.error_for_status()?;
        tracing::debug!("API response status: {}", response.status());

        let page = response.json::<HoldersPage>().await?;
        Ok(page)
    }
}

#[async_trait::async_trait]
impl HolderSource for HolderFetcher {
    async fn fetch_all_holders(&self, token: &Token) -> Result<FetchOutcome> {
        let url = self.holders_url(&token.contract);
        let mut outcome = FetchOutcome::default();
        let mut cursor: Option<Vec<(String, String)>> = None;
        let mut page = 1;

        loop {
            tracing::info!("📦 Page {} for {}", page, token.symbol);

            let response = match self.fetch_page(&url, cursor.as_deref()).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!("❌ Error fetching page {} for {}: {}", page, token.symbol, e);
                    outcome.aborted = Some(format!("page {}: {}", page, e));
                    break;
                }
            };

            for item in response.items.unwrap_or_default() {
                outcome.entries.push(holder_entry(&item, &token.symbol, page)?);
            }
            outcome.pages_fetched = page;

            tracing::info!(
                "✅ Page {} done. Total collected so far: {}",
                page,
                outcome.entries.len()
            );

            match response.next_page_params.filter(|params| !params.is_empty()) {
                Some(params) => {
                    cursor = Some(cursor_query(&params));
                    page += 1;
                    if !self.page_delay.is_zero() {
                        tokio::time::sleep(self.page_delay).await;
                    }
                }
                None => break,
            }
        }

        Ok(outcome)
    }
}
