pub mod customers;
pub mod invoices;
pub mod memory;
pub mod mongo;
pub mod revenue;
pub mod users;

use std::sync::Arc;

use mongodb::Database;

pub use customers::CustomerRepo;
pub use invoices::InvoiceRepo;
pub use revenue::RevenueRepo;
pub use users::UserRepo;

use memory::MemoryStore;
use mongo::MongoStore;

/// Failures surfaced by a repository. Callers reduce these to the
/// uniform database-error message before they reach a client.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document not found")]
    NotFound,
    #[error("duplicate key on {0}")]
    Duplicate(String),
    #[error("{0}")]
    Internal(String),
    #[error(transparent)]
    Backend(#[from] mongodb::error::Error),
}

/// Per-entity repositories behind one handle. Built once at startup and
/// cloned into request state; every clone shares the same backend.
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn UserRepo>,
    pub customers: Arc<dyn CustomerRepo>,
    pub invoices: Arc<dyn InvoiceRepo>,
    pub revenue: Arc<dyn RevenueRepo>,
}

impl Store {
    /// Repositories backed by MongoDB collections.
    pub fn mongo(db: Database) -> Self {
        let backend = Arc::new(MongoStore::new(db));
        Self {
            users: backend.clone(),
            customers: backend.clone(),
            invoices: backend.clone(),
            revenue: backend,
        }
    }

    /// Process-local repositories for tests and offline development.
    pub fn memory() -> Self {
        let backend = Arc::new(MemoryStore::default());
        Self {
            users: backend.clone(),
            customers: backend.clone(),
            invoices: backend.clone(),
            revenue: backend,
        }
    }
}
