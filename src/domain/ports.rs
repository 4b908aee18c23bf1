use crate::domain::model::PlantGuide;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_path(&self) -> &str;
    fn utc_offset_hours(&self) -> i32;
    fn default_guide_limit(&self) -> usize;
}

/// 植物指南目錄來源 (MySQL、MongoDB、檔案…)。每次呼叫都回傳完整目錄。
#[async_trait]
pub trait PlantCatalog: Send + Sync {
    async fn load_guides(&self) -> Result<Vec<PlantGuide>>;
}
