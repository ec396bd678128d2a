use crate::domain::model::{AggregateRow, HolderEntry, Token};
use std::collections::HashMap;

/// 單次執行內獨佔的彙總狀態。地址第一次出現時建立列，之後只做加總
#[derive(Debug, Default)]
pub struct Aggregator {
    rows: Vec<AggregateRow>,
    index: HashMap<String, usize>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, address: &str, symbol: &str, amount: u128) {
        let slot = match self.index.get(address) {
            Some(&slot) => slot,
            None => {
                self.rows.push(AggregateRow::new(address.to_string()));
                self.index.insert(address.to_string(), self.rows.len() - 1);
                self.rows.len() - 1
            }
        };

        let row = &mut self.rows[slot];
        *row.holdings.entry(symbol.to_string()).or_insert(0) += amount;
        row.total += amount;
    }

    pub fn record_entries(&mut self, symbol: &str, entries: &[HolderEntry]) {
        for entry in entries {
            self.record(&entry.address, symbol, entry.holding);
        }
    }

    /// 補齊所有 symbol 欄位 (沒有持有即為 0)，並依 total 由大到小穩定排序
    pub fn finalize(self, symbols: &[String]) -> Vec<AggregateRow> {
        let mut rows = self.rows;
        for row in rows.iter_mut() {
            for symbol in symbols {
                row.holdings.entry(symbol.clone()).or_insert(0);
            }
        }
        // sort_by 是穩定排序，同 total 保留第一次出現的順序
        rows.sort_by(|a, b| b.total.cmp(&a.total));
        rows
    }
}

pub fn aggregate(tokens: &[Token], per_token_holders: &[Vec<HolderEntry>]) -> Vec<AggregateRow> {
    let mut aggregator = Aggregator::new();
    for (token, entries) in tokens.iter().zip(per_token_holders) {
        aggregator.record_entries(&token.symbol, entries);
    }
    let symbols: Vec<String> = tokens.iter().map(|t| t.symbol.clone()).collect();
    aggregator.finalize(&symbols)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(symbol: &str) -> Token {
        Token {
            name: String::new(),
            symbol: symbol.to_string(),
            contract: format!("0x{}", symbol.to_lowercase()),
        }
    }

    fn entry(address: &str, holding: u128) -> HolderEntry {
        HolderEntry {
            address: address.to_string(),
            holding,
        }
    }

    #[test]
    fn test_aggregate_two_tokens() {
        let tokens = vec![token("A"), token("B")];
        let holders = vec![
            vec![entry("addr1", 10), entry("addr2", 5)],
            vec![entry("addr1", 3)],
        ];

        let rows = aggregate(&tokens, &holders);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].address, "addr1");
        assert_eq!(rows[0].holding("A"), 10);
        assert_eq!(rows[0].holding("B"), 3);
        assert_eq!(rows[0].total, 13);
        assert_eq!(rows[1].address, "addr2");
        assert_eq!(rows[1].holding("A"), 5);
        assert_eq!(rows[1].holding("B"), 0);
        assert_eq!(rows[1].total, 5);
        assert!(rows[1].holdings.contains_key("B"));
    }

    #[test]
    fn test_repeated_address_accumulates() {
        let mut aggregator = Aggregator::new();
        aggregator.record("0x1", "A", 4);
        aggregator.record("0x1", "A", 6);
        aggregator.record("0x1", "B", 1);

        let rows = aggregator.finalize(&["A".to_string(), "B".to_string()]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].holding("A"), 10);
        assert_eq!(rows[0].total, 11);
    }

    #[test]
    fn test_total_matches_sum_of_holdings() {
        let tokens = vec![token("A"), token("B"), token("C")];
        let holders = vec![
            vec![entry("x", 1), entry("y", 2), entry("z", 3)],
            vec![entry("y", 20), entry("w", 7)],
            vec![entry("x", 100), entry("w", 1)],
        ];

        for row in aggregate(&tokens, &holders) {
            assert_eq!(row.total, row.holdings.values().sum::<u128>());
            assert_eq!(row.holdings.len(), 3);
        }
    }

    #[test]
    fn test_ties_keep_first_insertion_order() {
        let tokens = vec![token("A")];
        let holders = vec![vec![
            entry("first", 5),
            entry("big", 50),
            entry("second", 5),
            entry("third", 5),
        ]];

        let order: Vec<String> = aggregate(&tokens, &holders)
            .into_iter()
            .map(|r| r.address)
            .collect();

        assert_eq!(order, vec!["big", "first", "second", "third"]);
    }

    #[test]
    fn test_token_order_does_not_change_result() {
        let a = vec![entry("p", 10), entry("q", 1)];
        let b = vec![entry("q", 30), entry("r", 4)];

        let forward = aggregate(&[token("A"), token("B")], &[a.clone(), b.clone()]);
        let backward = aggregate(&[token("B"), token("A")], &[b, a]);

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_empty_input_yields_no_rows() {
        let rows = aggregate(&[token("A")], &[vec![]]);
        assert!(rows.is_empty());
    }
}
