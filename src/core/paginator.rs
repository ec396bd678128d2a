use crate::core::export::records;
use crate::domain::model::{AggregateRow, PaginationMetadata};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use crate::utils::validation::validate_positive_number;

pub const PAGINATION_DIR: &str = "Pagination";
pub const DEFAULT_PAGE_SIZE: usize = 100;

pub fn page_file_name(page_number: usize) -> String {
    format!("{}.json", page_number)
}

/// 已排序彙總資料切成固定大小的分頁；`pages[i]` 對應檔案 `{i + 1}.json`
#[derive(Debug)]
pub struct Pagination<'a> {
    pub metadata: PaginationMetadata,
    pub pages: Vec<&'a [AggregateRow]>,
}

pub fn paginate(rows: &[AggregateRow], page_size: usize) -> Result<Pagination<'_>> {
    validate_positive_number("page_size", page_size, 1)?;

    let pages: Vec<&[AggregateRow]> = rows.chunks(page_size).collect();
    let total_pages = rows.len().div_ceil(page_size);
    debug_assert_eq!(pages.len(), total_pages);

    let metadata = PaginationMetadata {
        total_items: rows.len(),
        total_pages,
        page_size,
        description: format!(
            "Paginated snapshot of Total.json with {} items per page",
            page_size
        ),
        pages: (1..=total_pages).map(page_file_name).collect(),
    };

    Ok(Pagination { metadata, pages })
}

/// 寫出 Pagination/0.json (metadata) 以及每一頁 Pagination/{n}.json
pub async fn write_pages<S: Storage>(
    storage: &S,
    pagination: &Pagination<'_>,
    symbols: &[String],
) -> Result<()> {
    let metadata_path = format!("{}/{}", PAGINATION_DIR, page_file_name(0));
    storage
        .write_file(&metadata_path, &serde_json::to_vec_pretty(&pagination.metadata)?)
        .await?;
    tracing::info!("✅ Saved pagination metadata to {}", metadata_path);

    for (file_name, page) in pagination.metadata.pages.iter().zip(&pagination.pages) {
        let path = format!("{}/{}", PAGINATION_DIR, file_name);
        storage
            .write_file(&path, &serde_json::to_vec_pretty(&records(page, symbols))?)
            .await?;
        tracing::debug!("Saved page {} with {} rows", path, page.len());
    }

    tracing::info!(
        "✅ Pagination complete: {} pages saved in {}/",
        pagination.metadata.total_pages,
        PAGINATION_DIR
    );
    Ok(())
}
