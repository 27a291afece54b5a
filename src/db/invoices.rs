use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::Deserialize;

use crate::db::StoreError;
use crate::models::{Invoice, InvoiceStatus};

/// Rows per page of the invoices table.
pub const ITEMS_PER_PAGE: i64 = 6;

/// Filter applied to the joined invoice listing. `query` is matched
/// case-insensitively against the customer's name and email; `status`
/// narrows to one lifecycle state.
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    pub query: Option<String>,
    pub status: Option<InvoiceStatus>,
}

/// An invoice joined with the customer it bills. Invoices whose
/// customer no longer exists are excluded from joined reads.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceWithCustomer {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub customer_id: ObjectId,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub date: DateTime,
    pub amount: i64,
    pub status: InvoiceStatus,
}

/// Cent sums per status over the whole collection.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct StatusTotals {
    #[serde(default)]
    pub pending: i64,
    #[serde(default)]
    pub paid: i64,
}

#[async_trait]
pub trait InvoiceRepo: Send + Sync {
    async fn insert(&self, invoice: Invoice) -> Result<(), StoreError>;

    async fn insert_many(&self, invoices: Vec<Invoice>) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Invoice>, StoreError>;

    /// Replace the stored document matching `invoice.id`.
    async fn replace(&self, invoice: Invoice) -> Result<(), StoreError>;

    /// Returns false when no document matched the id.
    async fn delete(&self, id: ObjectId) -> Result<bool, StoreError>;

    /// The filtered join ordered by date descending (id descending as
    /// tiebreak), windowed to [offset, offset + limit). The filter is
    /// applied before the window is cut.
    async fn list_filtered(
        &self,
        filter: &InvoiceFilter,
        limit: i64,
        offset: u64,
    ) -> Result<Vec<InvoiceWithCustomer>, StoreError>;

    /// Count of the same filtered join, unpaginated.
    async fn count_filtered(&self, filter: &InvoiceFilter) -> Result<u64, StoreError>;

    /// The `limit` most recent invoices, joined with their customer.
    async fn latest(&self, limit: i64) -> Result<Vec<InvoiceWithCustomer>, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;

    async fn totals_by_status(&self) -> Result<StatusTotals, StoreError>;
}
