use crate::core::aggregator::Aggregator;
use crate::core::export::export_totals;
use crate::core::paginator::{paginate, write_pages};
use crate::core::registry::load_tokens;
use crate::core::report::log_summary;
use crate::core::snapshot::{RunTimestamp, SnapshotWriter};
use crate::domain::model::RunReport;
use crate::domain::ports::{HolderSource, Storage};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use crate::utils::validation::validate_positive_number;

/// 依序執行：讀取 token 清單 → 逐一抓取並寫快照 → 彙總排序 → 匯出 → 分頁
pub struct SnapshotEngine<S: Storage, H: HolderSource> {
    storage: S,
    source: H,
    page_size: usize,
    monitor: SystemMonitor,
}

impl<S: Storage, H: HolderSource> SnapshotEngine<S, H> {
    pub fn new(storage: S, source: H, page_size: usize) -> Self {
        Self::new_with_monitoring(storage, source, page_size, false)
    }

    pub fn new_with_monitoring(
        storage: S,
        source: H,
        page_size: usize,
        monitor_enabled: bool,
    ) -> Self {
        Self {
            storage,
            source,
            page_size,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunReport> {
        self.run_at(RunTimestamp::now()).await
    }

    pub async fn run_at(&self, run_timestamp: RunTimestamp) -> Result<RunReport> {
        validate_positive_number("page_size", self.page_size, 1)?;

        let tokens = load_tokens(&self.storage).await?;
        let mut writer = SnapshotWriter::load(&self.storage).await?;
        let mut aggregator = Aggregator::new();
        let mut report = RunReport::default();

        tracing::info!("🚀 Starting snapshot run {}", run_timestamp.iso);

        for token in &tokens {
            tracing::info!("🔍 Processing: {} ({})", token.symbol, token.contract);

            let outcome = self.source.fetch_all_holders(token).await?;
            if let Some(reason) = &outcome.aborted {
                tracing::warn!(
                    "⚠️ {} fetch stopped early ({}), keeping {} holders from {} pages",
                    token.symbol,
                    reason,
                    outcome.entries.len(),
                    outcome.pages_fetched
                );
                report.partial_tokens.push(token.symbol.clone());
            }

            aggregator.record_entries(&token.symbol, &outcome.entries);
            let paths = writer
                .write_snapshot(token, &outcome.entries, &run_timestamp)
                .await?;
            report.snapshot_paths.extend(paths);
            report.tokens_processed += 1;
        }
        self.monitor.log_stats("Fetch");

        let symbols: Vec<String> = tokens.iter().map(|t| t.symbol.clone()).collect();
        let rows = aggregator.finalize(&symbols);
        if rows.is_empty() {
            tracing::warn!("⚠️ Aggregate is empty, writing empty exports");
        }

        tracing::info!("📊 Generating totals for {} addresses", rows.len());
        export_totals(&self.storage, &rows, &symbols).await?;
        self.monitor.log_stats("Export");

        tracing::info!("📄 Creating paginated total files");
        let pagination = paginate(&rows, self.page_size)?;
        write_pages(&self.storage, &pagination, &symbols).await?;
        self.monitor.log_stats("Paginate");

        log_summary(&rows, &symbols);

        report.aggregate_rows = rows.len();
        report.total_pages = pagination.metadata.total_pages;

        tracing::info!(
            "✅ Aggregated {} addresses across {} tokens. All done.",
            report.aggregate_rows,
            report.tokens_processed
        );
        self.monitor.log_final_stats();
        Ok(report)
    }
}
