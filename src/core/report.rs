use crate::domain::model::AggregateRow;

pub const TOP_HOLDERS: usize = 10;

/// `0x` 開頭且長度足夠的地址縮寫為 `0xabc***vwxyz`，其餘原樣回傳
pub fn shorten_address(address: &str) -> String {
    if !address.starts_with("0x") || address.len() < 10 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}***{}", &address[..5], &address[address.len() - 5..])
}

/// 單一 token 的持有統計；平均與最小值只看持有量大於 0 的地址
#[derive(Debug, Clone, PartialEq)]
pub struct TokenStats {
    pub symbol: String,
    pub holders: usize,
    pub total_held: u128,
    pub average: f64,
    pub max: u128,
    pub min: u128,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HolderStats {
    pub holders: usize,
    pub total_holdings: u128,
    /// 依註冊順序
    pub per_symbol: Vec<TokenStats>,
}

fn token_stats(rows: &[AggregateRow], symbol: &str) -> TokenStats {
    let held: Vec<u128> = rows
        .iter()
        .map(|r| r.holding(symbol))
        .filter(|&amount| amount > 0)
        .collect();
    let total_held: u128 = held.iter().sum();

    TokenStats {
        symbol: symbol.to_string(),
        holders: held.len(),
        total_held,
        average: if held.is_empty() {
            0.0
        } else {
            total_held as f64 / held.len() as f64
        },
        max: held.iter().copied().max().unwrap_or(0),
        min: held.iter().copied().min().unwrap_or(0),
    }
}

pub fn holder_stats(rows: &[AggregateRow], symbols: &[String]) -> HolderStats {
    HolderStats {
        holders: rows.len(),
        total_holdings: rows.iter().map(|r| r.total).sum(),
        per_symbol: symbols.iter().map(|s| token_stats(rows, s)).collect(),
    }
}

/// 輸出前十大持有者與統計摘要
pub fn log_summary(rows: &[AggregateRow], symbols: &[String]) {
    if rows.is_empty() {
        tracing::warn!("⚠️ No holders were aggregated in this run");
        return;
    }

    tracing::info!("🔝 Top {} Token Holders:", TOP_HOLDERS.min(rows.len()));
    for (rank, row) in rows.iter().take(TOP_HOLDERS).enumerate() {
        tracing::info!(
            "{:>2}. {:<16} {}",
            rank + 1,
            shorten_address(&row.address),
            row.total
        );
    }

    let stats = holder_stats(rows, symbols);
    tracing::info!(
        "📈 {} holders, {} total holdings",
        stats.holders,
        stats.total_holdings
    );
    for token in &stats.per_symbol {
        tracing::info!(
            "   {}: {} holders, {} held, avg {:.2}, max {}, min {}",
            token.symbol,
            token.holders,
            token.total_held,
            token.average,
            token.max,
            token.min
        );
    }
}
