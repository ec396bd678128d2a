use crate::domain::model::AggregateRow;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, SnapshotError};
use serde::ser::{Serialize, SerializeMap, Serializer};

pub const TOTAL_CSV_FILE: &str = "Total.csv";
pub const TOTAL_JSON_FILE: &str = "Total.json";

/// 以固定欄位順序 (Address, Holdings, 各 symbol) 序列化彙總列
pub struct AggregateRecord<'a> {
    row: &'a AggregateRow,
    symbols: &'a [String],
}

impl<'a> AggregateRecord<'a> {
    pub fn new(row: &'a AggregateRow, symbols: &'a [String]) -> Self {
        Self { row, symbols }
    }
}

impl Serialize for AggregateRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + self.symbols.len()))?;
        map.serialize_entry("Address", &self.row.address)?;
        map.serialize_entry("Holdings", &self.row.total)?;
        for symbol in self.symbols {
            map.serialize_entry(symbol, &self.row.holding(symbol))?;
        }
        map.end()
    }
}

pub fn records<'a>(rows: &'a [AggregateRow], symbols: &'a [String]) -> Vec<AggregateRecord<'a>> {
    rows.iter().map(|row| AggregateRecord::new(row, symbols)).collect()
}

pub fn rows_to_json(rows: &[AggregateRow], symbols: &[String]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(&records(rows, symbols))?)
}

pub fn rows_to_csv(rows: &[AggregateRow], symbols: &[String]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    let mut header = vec!["Address".to_string(), "Holdings".to_string()];
    header.extend(symbols.iter().cloned());
    writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![row.address.clone(), row.total.to_string()];
        record.extend(symbols.iter().map(|s| row.holding(s).to_string()));
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| SnapshotError::IoError(e.into_error()))
}

/// 寫出完整彙總表 Total.csv / Total.json
pub async fn export_totals<S: Storage>(
    storage: &S,
    rows: &[AggregateRow],
    symbols: &[String],
) -> Result<Vec<String>> {
    storage
        .write_file(TOTAL_CSV_FILE, &rows_to_csv(rows, symbols)?)
        .await?;
    storage
        .write_file(TOTAL_JSON_FILE, &rows_to_json(rows, symbols)?)
        .await?;

    tracing::info!(
        "✅ Exported {} aggregate rows to {} and {}",
        rows.len(),
        TOTAL_CSV_FILE,
        TOTAL_JSON_FILE
    );
    Ok(vec![TOTAL_CSV_FILE.to_string(), TOTAL_JSON_FILE.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row(address: &str, holdings: &[(&str, u128)]) -> AggregateRow {
        let holdings: HashMap<String, u128> =
            holdings.iter().map(|(s, v)| (s.to_string(), *v)).collect();
        AggregateRow {
            address: address.to_string(),
            total: holdings.values().sum(),
            holdings,
        }
    }

    fn symbols() -> Vec<String> {
        vec!["ZRO".to_string(), "ABC".to_string()]
    }

    #[test]
    fn test_json_keeps_column_order() {
        let rows = vec![row("0x1", &[("ZRO", 10), ("ABC", 3)])];
        let json = String::from_utf8(
            serde_json::to_vec(&records(&rows, &symbols())).unwrap(),
        )
        .unwrap();
        assert_eq!(json, r#"[{"Address":"0x1","Holdings":13,"ZRO":10,"ABC":3}]"#);
    }

    #[test]
    fn test_csv_fills_missing_symbols_with_zero() {
        let rows = vec![
            row("0x1", &[("ZRO", 10), ("ABC", 3)]),
            row("0x2", &[("ABC", 5)]),
        ];
        let csv = String::from_utf8(rows_to_csv(&rows, &symbols()).unwrap()).unwrap();
        assert_eq!(csv, "Address,Holdings,ZRO,ABC\n0x1,13,10,3\n0x2,5,0,5\n");
    }

    #[test]
    fn test_empty_rows_produce_header_and_empty_array() {
        let csv = String::from_utf8(rows_to_csv(&[], &symbols()).unwrap()).unwrap();
        assert_eq!(csv, "Address,Holdings,ZRO,ABC\n");
        let json: serde_json::Value =
            serde_json::from_slice(&rows_to_json(&[], &symbols()).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!([]));
    }
}
