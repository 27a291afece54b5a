use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;

use crate::db::StoreError;
use crate::models::Customer;

/// A customer reduced to what the invoice form's picker needs.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerField {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
}

/// Customer row with invoice totals computed at read time. Totals are
/// cents; `total_invoices` counts every status.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerWithTotals {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: i64,
    pub total_paid: i64,
}

#[async_trait]
pub trait CustomerRepo: Send + Sync {
    async fn insert_many(&self, customers: Vec<Customer>) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Customer>, StoreError>;

    /// Every customer in insertion order.
    async fn list_all(&self) -> Result<Vec<Customer>, StoreError>;

    /// Id and name for every customer, sorted by name ascending.
    async fn list_fields(&self) -> Result<Vec<CustomerField>, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;

    /// Customers joined with their invoices, optionally narrowed by a
    /// case-insensitive name/email substring, sorted by name ascending.
    async fn table(&self, query: Option<&str>) -> Result<Vec<CustomerWithTotals>, StoreError>;
}
