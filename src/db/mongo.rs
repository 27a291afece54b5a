//! MongoDB-backed repositories. Joins are expressed as aggregation
//! pipelines so filtering and pagination happen inside the database.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, from_document, Bson, Document};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::db::customers::{CustomerField, CustomerWithTotals};
use crate::db::invoices::{InvoiceFilter, InvoiceWithCustomer, StatusTotals};
use crate::db::{CustomerRepo, InvoiceRepo, RevenueRepo, StoreError, UserRepo};
use crate::models::{Customer, Invoice, Revenue, User};

const USERS: &str = "users";
const CUSTOMERS: &str = "customers";
const INVOICES: &str = "invoices";
const REVENUE: &str = "revenue";

pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn users(&self) -> Collection<User> {
        self.db.collection(USERS)
    }

    fn customers(&self) -> Collection<Customer> {
        self.db.collection(CUSTOMERS)
    }

    fn invoices(&self) -> Collection<Invoice> {
        self.db.collection(INVOICES)
    }

    fn revenue(&self) -> Collection<Revenue> {
        self.db.collection(REVENUE)
    }

    async fn aggregate_rows<T: DeserializeOwned>(
        &self,
        collection: &str,
        pipeline: Vec<Document>,
    ) -> Result<Vec<T>, StoreError> {
        let cursor = self.db.collection::<Document>(collection).aggregate(pipeline).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        documents
            .into_iter()
            .map(|d| from_document(d).map_err(|e| StoreError::Internal(format!("malformed {collection} row: {e}"))))
            .collect()
    }
}

/// Create the indexes the collections rely on. Idempotent, run at startup.
pub async fn ensure_indexes(db: &Database) -> Result<(), StoreError> {
    let unique_email = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();
    db.collection::<User>(USERS).create_index(unique_email).await?;

    let by_customer = IndexModel::builder().keys(doc! { "customer_id": 1 }).build();
    let by_date = IndexModel::builder().keys(doc! { "date": -1 }).build();
    db.collection::<Invoice>(INVOICES).create_indexes([by_customer, by_date]).await?;

    Ok(())
}

/// `{ "$regex": <escaped query>, "$options": "i" }` so user input
/// matches as a literal substring, never as a pattern.
fn substring_match(query: &str) -> Document {
    doc! { "$regex": regex::escape(query), "$options": "i" }
}

/// Stages shared by the filtered listing and its count: optional status
/// match, join to customers, then the name/email substring match. The
/// unwind drops invoices whose customer is gone.
fn invoice_filter_stages(filter: &InvoiceFilter) -> Vec<Document> {
    let mut stages = Vec::new();
    if let Some(status) = filter.status {
        stages.push(doc! { "$match": { "status": status.as_str() } });
    }
    stages.push(doc! {
        "$lookup": {
            "from": CUSTOMERS,
            "localField": "customer_id",
            "foreignField": "_id",
            "as": "customer",
        }
    });
    stages.push(doc! { "$unwind": "$customer" });
    if let Some(query) = filter.query.as_deref() {
        stages.push(doc! {
            "$match": {
                "$or": [
                    { "customer.name": substring_match(query) },
                    { "customer.email": substring_match(query) },
                ]
            }
        });
    }
    stages
}

/// Flatten the joined shape into the row the listing consumes.
fn invoice_row_projection() -> Document {
    doc! {
        "$project": {
            "customer_id": 1,
            "amount": 1,
            "date": 1,
            "status": 1,
            "name": "$customer.name",
            "email": "$customer.email",
            "image_url": "$customer.image_url",
        }
    }
}

#[async_trait]
impl UserRepo for MongoStore {
    async fn insert_many(&self, users: Vec<User>) -> Result<(), StoreError> {
        if users.is_empty() {
            return Ok(());
        }
        self.users().insert_many(users).await?;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users().find_one(doc! { "email": email }).await?)
    }
}

#[async_trait]
impl CustomerRepo for MongoStore {
    async fn insert_many(&self, customers: Vec<Customer>) -> Result<(), StoreError> {
        if customers.is_empty() {
            return Ok(());
        }
        self.customers().insert_many(customers).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Customer>, StoreError> {
        Ok(self.customers().find_one(doc! { "_id": id }).await?)
    }

    async fn list_all(&self) -> Result<Vec<Customer>, StoreError> {
        let cursor = self.customers().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn list_fields(&self) -> Result<Vec<CustomerField>, StoreError> {
        let cursor = self
            .db
            .collection::<CustomerField>(CUSTOMERS)
            .find(doc! {})
            .projection(doc! { "name": 1 })
            .sort(doc! { "name": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.customers().count_documents(doc! {}).await?)
    }

    async fn table(&self, query: Option<&str>) -> Result<Vec<CustomerWithTotals>, StoreError> {
        let mut pipeline = vec![doc! {
            "$lookup": {
                "from": INVOICES,
                "localField": "_id",
                "foreignField": "customer_id",
                "as": "invoices",
            }
        }];
        if let Some(query) = query {
            pipeline.push(doc! {
                "$match": {
                    "$or": [
                        { "name": substring_match(query) },
                        { "email": substring_match(query) },
                    ]
                }
            });
        }
        pipeline.push(doc! {
            "$project": {
                "name": 1,
                "email": 1,
                "image_url": 1,
                "total_invoices": { "$size": "$invoices" },
                "total_pending": { "$sum": status_amounts("pending") },
                "total_paid": { "$sum": status_amounts("paid") },
            }
        });
        pipeline.push(doc! { "$sort": { "name": 1 } });

        self.aggregate_rows(CUSTOMERS, pipeline).await
    }
}

/// `$map` over the joined invoices, keeping the amount where the status
/// matches and contributing 0 otherwise.
fn status_amounts(status: &str) -> Document {
    doc! {
        "$map": {
            "input": "$invoices",
            "as": "invoice",
            "in": {
                "$cond": [{ "$eq": ["$$invoice.status", status] }, "$$invoice.amount", 0]
            }
        }
    }
}

#[async_trait]
impl InvoiceRepo for MongoStore {
    async fn insert(&self, invoice: Invoice) -> Result<(), StoreError> {
        self.invoices().insert_one(invoice).await?;
        Ok(())
    }

    async fn insert_many(&self, invoices: Vec<Invoice>) -> Result<(), StoreError> {
        if invoices.is_empty() {
            return Ok(());
        }
        self.invoices().insert_many(invoices).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Invoice>, StoreError> {
        Ok(self.invoices().find_one(doc! { "_id": id }).await?)
    }

    async fn replace(&self, invoice: Invoice) -> Result<(), StoreError> {
        let result = self.invoices().replace_one(doc! { "_id": invoice.id }, &invoice).await?;
        if result.matched_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, StoreError> {
        let result = self.invoices().delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn list_filtered(
        &self,
        filter: &InvoiceFilter,
        limit: i64,
        offset: u64,
    ) -> Result<Vec<InvoiceWithCustomer>, StoreError> {
        let mut pipeline = invoice_filter_stages(filter);
        pipeline.push(doc! { "$sort": { "date": -1, "_id": -1 } });
        pipeline.push(doc! { "$skip": offset as i64 });
        pipeline.push(doc! { "$limit": limit });
        pipeline.push(invoice_row_projection());

        self.aggregate_rows(INVOICES, pipeline).await
    }

    async fn count_filtered(&self, filter: &InvoiceFilter) -> Result<u64, StoreError> {
        #[derive(Deserialize)]
        struct CountRow {
            total: i64,
        }

        let mut pipeline = invoice_filter_stages(filter);
        pipeline.push(doc! { "$count": "total" });

        let rows: Vec<CountRow> = self.aggregate_rows(INVOICES, pipeline).await?;
        Ok(rows.first().map(|r| r.total.max(0) as u64).unwrap_or(0))
    }

    async fn latest(&self, limit: i64) -> Result<Vec<InvoiceWithCustomer>, StoreError> {
        let mut pipeline = invoice_filter_stages(&InvoiceFilter::default());
        pipeline.push(doc! { "$sort": { "date": -1, "_id": -1 } });
        pipeline.push(doc! { "$limit": limit });
        pipeline.push(invoice_row_projection());

        self.aggregate_rows(INVOICES, pipeline).await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.invoices().count_documents(doc! {}).await?)
    }

    async fn totals_by_status(&self) -> Result<StatusTotals, StoreError> {
        let pipeline = vec![doc! {
            "$group": {
                "_id": Bson::Null,
                "pending": { "$sum": { "$cond": [{ "$eq": ["$status", "pending"] }, "$amount", 0] } },
                "paid": { "$sum": { "$cond": [{ "$eq": ["$status", "paid"] }, "$amount", 0] } },
            }
        }];

        let rows: Vec<StatusTotals> = self.aggregate_rows(INVOICES, pipeline).await?;
        Ok(rows.first().copied().unwrap_or_default())
    }
}

#[async_trait]
impl RevenueRepo for MongoStore {
    async fn insert_many(&self, rows: Vec<Revenue>) -> Result<(), StoreError> {
        if rows.is_empty() {
            return Ok(());
        }
        self.revenue().insert_many(rows).await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Revenue>, StoreError> {
        let cursor = self.revenue().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }
}
