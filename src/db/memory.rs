//! In-memory repositories with the same observable semantics as the
//! MongoDB backend. Used by the integration tests and for offline
//! development; nothing survives the process.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::db::customers::{CustomerField, CustomerWithTotals};
use crate::db::invoices::{InvoiceFilter, InvoiceWithCustomer, StatusTotals};
use crate::db::{CustomerRepo, InvoiceRepo, RevenueRepo, StoreError, UserRepo};
use crate::models::{Customer, Invoice, InvoiceStatus, Revenue, User};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    // Lock order: customers before invoices wherever both are held.
    customers: RwLock<Vec<Customer>>,
    invoices: RwLock<Vec<Invoice>>,
    revenue: RwLock<Vec<Revenue>>,
}

fn read<T>(lock: &RwLock<Vec<T>>) -> Result<RwLockReadGuard<'_, Vec<T>>, StoreError> {
    lock.read().map_err(|_| StoreError::Internal("store lock poisoned".to_string()))
}

fn write<T>(lock: &RwLock<Vec<T>>) -> Result<RwLockWriteGuard<'_, Vec<T>>, StoreError> {
    lock.write().map_err(|_| StoreError::Internal("store lock poisoned".to_string()))
}

fn matches_query(customer: &Customer, query: &str) -> bool {
    let query = query.to_lowercase();
    customer.name.to_lowercase().contains(&query) || customer.email.to_lowercase().contains(&query)
}

impl MemoryStore {
    /// The joined, filtered, sorted listing the paginated reads window.
    fn joined(&self, filter: &InvoiceFilter) -> Result<Vec<InvoiceWithCustomer>, StoreError> {
        let customers = read(&self.customers)?;
        let invoices = read(&self.invoices)?;

        let mut rows: Vec<InvoiceWithCustomer> = invoices
            .iter()
            .filter(|invoice| filter.status.is_none_or(|status| invoice.status == status))
            .filter_map(|invoice| {
                let customer = customers.iter().find(|c| c.id == invoice.customer_id)?;
                if let Some(query) = filter.query.as_deref() {
                    if !matches_query(customer, query) {
                        return None;
                    }
                }
                Some(InvoiceWithCustomer {
                    id: invoice.id,
                    customer_id: customer.id,
                    name: customer.name.clone(),
                    email: customer.email.clone(),
                    image_url: customer.image_url.clone(),
                    date: invoice.date,
                    amount: invoice.amount,
                    status: invoice.status,
                })
            })
            .collect();

        rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(rows)
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn insert_many(&self, users: Vec<User>) -> Result<(), StoreError> {
        let mut stored = write(&self.users)?;
        let mut seen: Vec<&str> = stored.iter().map(|u| u.email.as_str()).collect();
        for user in &users {
            if seen.contains(&user.email.as_str()) {
                return Err(StoreError::Duplicate(format!("email {}", user.email)));
            }
            seen.push(&user.email);
        }
        drop(seen);
        stored.extend(users);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(read(&self.users)?.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl CustomerRepo for MemoryStore {
    async fn insert_many(&self, customers: Vec<Customer>) -> Result<(), StoreError> {
        write(&self.customers)?.extend(customers);
        Ok(())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Customer>, StoreError> {
        Ok(read(&self.customers)?.iter().find(|c| c.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Customer>, StoreError> {
        Ok(read(&self.customers)?.clone())
    }

    async fn list_fields(&self) -> Result<Vec<CustomerField>, StoreError> {
        let mut fields: Vec<CustomerField> = read(&self.customers)?
            .iter()
            .map(|c| CustomerField { id: c.id, name: c.name.clone() })
            .collect();
        fields.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(fields)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(read(&self.customers)?.len() as u64)
    }

    async fn table(&self, query: Option<&str>) -> Result<Vec<CustomerWithTotals>, StoreError> {
        let customers = read(&self.customers)?;
        let invoices = read(&self.invoices)?;

        let mut rows: Vec<CustomerWithTotals> = customers
            .iter()
            .filter(|c| query.is_none_or(|q| matches_query(c, q)))
            .map(|customer| {
                let mut total_invoices = 0;
                let mut total_pending = 0;
                let mut total_paid = 0;
                for invoice in invoices.iter().filter(|i| i.customer_id == customer.id) {
                    total_invoices += 1;
                    match invoice.status {
                        InvoiceStatus::Pending => total_pending += invoice.amount,
                        InvoiceStatus::Paid => total_paid += invoice.amount,
                    }
                }
                CustomerWithTotals {
                    id: customer.id,
                    name: customer.name.clone(),
                    email: customer.email.clone(),
                    image_url: customer.image_url.clone(),
                    total_invoices,
                    total_pending,
                    total_paid,
                }
            })
            .collect();

        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}

#[async_trait]
impl InvoiceRepo for MemoryStore {
    async fn insert(&self, invoice: Invoice) -> Result<(), StoreError> {
        write(&self.invoices)?.push(invoice);
        Ok(())
    }

    async fn insert_many(&self, invoices: Vec<Invoice>) -> Result<(), StoreError> {
        write(&self.invoices)?.extend(invoices);
        Ok(())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Invoice>, StoreError> {
        Ok(read(&self.invoices)?.iter().find(|i| i.id == id).cloned())
    }

    async fn replace(&self, invoice: Invoice) -> Result<(), StoreError> {
        let mut stored = write(&self.invoices)?;
        match stored.iter_mut().find(|i| i.id == invoice.id) {
            Some(slot) => {
                *slot = invoice;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, StoreError> {
        let mut stored = write(&self.invoices)?;
        let before = stored.len();
        stored.retain(|i| i.id != id);
        Ok(stored.len() < before)
    }

    async fn list_filtered(
        &self,
        filter: &InvoiceFilter,
        limit: i64,
        offset: u64,
    ) -> Result<Vec<InvoiceWithCustomer>, StoreError> {
        Ok(self
            .joined(filter)?
            .into_iter()
            .skip(offset as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count_filtered(&self, filter: &InvoiceFilter) -> Result<u64, StoreError> {
        Ok(self.joined(filter)?.len() as u64)
    }

    async fn latest(&self, limit: i64) -> Result<Vec<InvoiceWithCustomer>, StoreError> {
        Ok(self
            .joined(&InvoiceFilter::default())?
            .into_iter()
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(read(&self.invoices)?.len() as u64)
    }

    async fn totals_by_status(&self) -> Result<StatusTotals, StoreError> {
        let invoices = read(&self.invoices)?;
        let mut totals = StatusTotals::default();
        for invoice in invoices.iter() {
            match invoice.status {
                InvoiceStatus::Pending => totals.pending += invoice.amount,
                InvoiceStatus::Paid => totals.paid += invoice.amount,
            }
        }
        Ok(totals)
    }
}

#[async_trait]
impl RevenueRepo for MemoryStore {
    async fn insert_many(&self, rows: Vec<Revenue>) -> Result<(), StoreError> {
        write(&self.revenue)?.extend(rows);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Revenue>, StoreError> {
        Ok(read(&self.revenue)?.clone())
    }
}
