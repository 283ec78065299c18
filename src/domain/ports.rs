use crate::domain::model::{LensProduct, MatchResult};
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
    /// HTTP(S) endpoint or local file path of the catalog JSON document.
    fn catalog_source(&self) -> &str;
    fn output_path(&self) -> &str;
    fn lens_type(&self) -> &str;
    fn frame_type(&self) -> &str;
    /// Per-request catalog fetch timeout; `None` leaves the client default.
    fn timeout_seconds(&self) -> Option<u64>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<LensProduct>>;
    async fn transform(&self, catalog: Vec<LensProduct>) -> Result<MatchResult>;
    async fn load(&self, result: MatchResult) -> Result<String>;
}
