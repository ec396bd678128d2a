use crate::domain::model::{ArtifactKind, HolderEntry, ManifestEntry, Token};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, SnapshotError};
use chrono::{DateTime, Utc};

pub const MANIFEST_FILE: &str = "index.json";
pub const SNAPSHOT_ROOT: &str = "historical_data";

/// 一次執行共用的 UTC 時間戳，決定檔名與日期資料夾
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTimestamp {
    pub iso: String,
    pub month_folder: String,
    pub day_folder: String,
}

impl RunTimestamp {
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self {
            iso: at.format("%Y%m%dT%H%M%SZ").to_string(),
            month_folder: at.format("%b%Y").to_string(),
            day_folder: at.format("%d").to_string(),
        }
    }

    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn snapshot_dir(&self) -> String {
        format!("{}/{}/{}", SNAPSHOT_ROOT, self.month_folder, self.day_folder)
    }

    pub fn artifact_path(&self, symbol: &str, kind: ArtifactKind) -> String {
        format!(
            "{}/{}_{}.{}",
            self.snapshot_dir(),
            symbol,
            self.iso,
            kind.extension()
        )
    }
}

pub fn holders_to_csv(entries: &[HolderEntry]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(["address", "holding"])?;
    for entry in entries {
        writer.write_record([entry.address.as_str(), entry.holding.to_string().as_str()])?;
    }

    writer
        .into_inner()
        .map_err(|e| SnapshotError::IoError(e.into_error()))
}

/// 寫入每個 token 的原始快照，並在每個 token 之後完整重寫 manifest
pub struct SnapshotWriter<'a, S: Storage> {
    storage: &'a S,
    manifest: Vec<ManifestEntry>,
}

impl<'a, S: Storage> SnapshotWriter<'a, S> {
    /// 讀取既有 manifest；不存在時從空清單開始。既有檔案解析失敗則回傳錯誤，不覆蓋
    pub async fn load(storage: &'a S) -> Result<Self> {
        let manifest = if storage.exists(MANIFEST_FILE).await {
            let data = storage.read_file(MANIFEST_FILE).await?;
            serde_json::from_slice(&data)?
        } else {
            Vec::new()
        };

        tracing::debug!("Loaded manifest with {} entries", manifest.len());
        Ok(Self { storage, manifest })
    }

    pub fn manifest(&self) -> &[ManifestEntry] {
        &self.manifest
    }

    pub async fn write_snapshot(
        &mut self,
        token: &Token,
        entries: &[HolderEntry],
        run_timestamp: &RunTimestamp,
    ) -> Result<Vec<String>> {
        let csv_path = run_timestamp.artifact_path(&token.symbol, ArtifactKind::Csv);
        let json_path = run_timestamp.artifact_path(&token.symbol, ArtifactKind::Json);

        self.storage
            .write_file(&csv_path, &holders_to_csv(entries)?)
            .await?;
        self.storage
            .write_file(&json_path, &serde_json::to_vec_pretty(entries)?)
            .await?;

        tracing::info!("✅ Saved snapshot for {}", token.symbol);

        for (kind, path) in [(ArtifactKind::Csv, &csv_path), (ArtifactKind::Json, &json_path)] {
            self.manifest.push(ManifestEntry {
                symbol: token.symbol.clone(),
                timestamp: run_timestamp.iso.clone(),
                kind,
                path: path.clone(),
            });
        }

        self.storage
            .write_file(MANIFEST_FILE, &serde_json::to_vec_pretty(&self.manifest)?)
            .await?;

        tracing::info!("📘 {} updated after snapshot for {}", MANIFEST_FILE, token.symbol);
        Ok(vec![csv_path, json_path])
    }
}
