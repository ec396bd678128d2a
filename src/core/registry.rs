use crate::domain::model::Token;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, SnapshotError};
use crate::utils::validation::validate_non_empty_string;
use std::collections::HashSet;

pub const TOKENS_FILE: &str = "Tokens.json";

pub fn parse_tokens(data: &[u8]) -> Result<Vec<Token>> {
    let tokens: Vec<Token> = serde_json::from_slice(data)?;

    let mut seen = HashSet::new();
    for (i, token) in tokens.iter().enumerate() {
        validate_non_empty_string(&format!("tokens[{}].symbol", i), &token.symbol)?;
        validate_non_empty_string(&format!("tokens[{}].contract", i), &token.contract)?;
        if !seen.insert(token.symbol.as_str()) {
            return Err(SnapshotError::InvalidConfigValueError {
                field: format!("tokens[{}].symbol", i),
                value: token.symbol.clone(),
                reason: "Duplicate token symbol".to_string(),
            });
        }
    }

    Ok(tokens)
}

/// 讀取 Tokens.json。檔案不存在時在任何網路請求之前直接失敗
pub async fn load_tokens<S: Storage>(storage: &S) -> Result<Vec<Token>> {
    if !storage.exists(TOKENS_FILE).await {
        return Err(SnapshotError::MissingInputError {
            path: TOKENS_FILE.to_string(),
        });
    }

    let tokens = parse_tokens(&storage.read_file(TOKENS_FILE).await?)?;
    tracing::info!("📋 Loaded {} tokens from {}", tokens.len(), TOKENS_FILE);
    Ok(tokens)
}
