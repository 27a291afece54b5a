use async_trait::async_trait;

use crate::db::StoreError;
use crate::models::Revenue;

#[async_trait]
pub trait RevenueRepo: Send + Sync {
    async fn insert_many(&self, rows: Vec<Revenue>) -> Result<(), StoreError>;

    /// All rows in insertion order (the seed inserts January first).
    async fn list_all(&self) -> Result<Vec<Revenue>, StoreError>;
}
