use async_trait::async_trait;

use crate::db::StoreError;
use crate::models::User;

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Bulk insert. Enforces the unique-email invariant.
    async fn insert_many(&self, users: Vec<User>) -> Result<(), StoreError>;

    /// Exact, case-sensitive match on the stored email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}
