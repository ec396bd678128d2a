use crate::domain::model::{FetchOutcome, Token};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn holders_path(&self) -> &str;
    fn base_dir(&self) -> &str;
    fn page_size(&self) -> usize;
    fn page_delay(&self) -> Duration;
    fn request_timeout(&self) -> Duration;
}

/// 持有者資料來源：給定 token，回傳所有分頁合併後的持有者清單
#[async_trait]
pub trait HolderSource: Send + Sync {
    async fn fetch_all_holders(&self, token: &Token) -> Result<FetchOutcome>;
}
