//! Fixture data and the ordered bulk inserts behind the seed endpoint.

use mongodb::bson::DateTime;

use crate::auth::password;
use crate::db::{Store, StoreError};
use crate::models::{Customer, Invoice, InvoiceStatus, Revenue, User};

struct UserFixture {
    name: &'static str,
    email: &'static str,
    password: &'static str,
}

struct CustomerFixture {
    name: &'static str,
    email: &'static str,
    image_url: &'static str,
}

struct InvoiceFixture {
    amount: i64,
    status: InvoiceStatus,
    date: &'static str,
}

struct RevenueFixture {
    month: &'static str,
    revenue: i64,
}

const USERS: &[UserFixture] = &[UserFixture {
    name: "User",
    email: "user@nextmail.com",
    password: "123456",
}];

const CUSTOMERS: &[CustomerFixture] = &[
    CustomerFixture {
        name: "Evil Rabbit",
        email: "evil@rabbit.com",
        image_url: "/customers/evil-rabbit.png",
    },
    CustomerFixture {
        name: "Delba de Oliveira",
        email: "delba@oliveira.com",
        image_url: "/customers/delba-de-oliveira.png",
    },
    CustomerFixture {
        name: "Lee Robinson",
        email: "lee@robinson.com",
        image_url: "/customers/lee-robinson.png",
    },
    CustomerFixture {
        name: "Michael Novotny",
        email: "michael@novotny.com",
        image_url: "/customers/michael-novotny.png",
    },
    CustomerFixture {
        name: "Amy Burns",
        email: "amy@burns.com",
        image_url: "/customers/amy-burns.png",
    },
    CustomerFixture {
        name: "Balazs Orban",
        email: "balazs@orban.com",
        image_url: "/customers/balazs-orban.png",
    },
];

// Amounts are cents. Customers are assigned round-robin in fixture
// order, so the first, seventh and thirteenth invoice bill Evil Rabbit.
const INVOICES: &[InvoiceFixture] = &[
    InvoiceFixture { amount: 15795, status: InvoiceStatus::Pending, date: "2022-12-06" },
    InvoiceFixture { amount: 20348, status: InvoiceStatus::Pending, date: "2022-11-14" },
    InvoiceFixture { amount: 3040, status: InvoiceStatus::Paid, date: "2022-10-29" },
    InvoiceFixture { amount: 44800, status: InvoiceStatus::Paid, date: "2023-09-10" },
    InvoiceFixture { amount: 34577, status: InvoiceStatus::Pending, date: "2023-08-05" },
    InvoiceFixture { amount: 54246, status: InvoiceStatus::Pending, date: "2023-07-16" },
    InvoiceFixture { amount: 666, status: InvoiceStatus::Pending, date: "2023-06-27" },
    InvoiceFixture { amount: 32545, status: InvoiceStatus::Paid, date: "2023-06-09" },
    InvoiceFixture { amount: 1250, status: InvoiceStatus::Paid, date: "2023-06-17" },
    InvoiceFixture { amount: 8546, status: InvoiceStatus::Paid, date: "2023-06-07" },
    InvoiceFixture { amount: 500, status: InvoiceStatus::Paid, date: "2023-08-19" },
    InvoiceFixture { amount: 8945, status: InvoiceStatus::Paid, date: "2023-06-03" },
    InvoiceFixture { amount: 1000, status: InvoiceStatus::Paid, date: "2022-06-05" },
];

const REVENUE: &[RevenueFixture] = &[
    RevenueFixture { month: "Jan", revenue: 2000 },
    RevenueFixture { month: "Feb", revenue: 1800 },
    RevenueFixture { month: "Mar", revenue: 2200 },
    RevenueFixture { month: "Apr", revenue: 2500 },
    RevenueFixture { month: "May", revenue: 2300 },
    RevenueFixture { month: "Jun", revenue: 3200 },
    RevenueFixture { month: "Jul", revenue: 3500 },
    RevenueFixture { month: "Aug", revenue: 3700 },
    RevenueFixture { month: "Sep", revenue: 2500 },
    RevenueFixture { month: "Oct", revenue: 2800 },
    RevenueFixture { month: "Nov", revenue: 3000 },
    RevenueFixture { month: "Dec", revenue: 4800 },
];

/// Insert users, customers, invoices, revenue, in that order. Rerunning
/// against a populated store fails on the users' unique email index.
pub async fn run(store: &Store) -> Result<(), StoreError> {
    seed_users(store).await?;
    seed_customers(store).await?;
    seed_invoices(store).await?;
    seed_revenue(store).await?;
    tracing::info!("Seeded {} invoices for {} customers", INVOICES.len(), CUSTOMERS.len());
    Ok(())
}

async fn seed_users(store: &Store) -> Result<(), StoreError> {
    let mut users = Vec::with_capacity(USERS.len());
    for fixture in USERS {
        let hash = password::hash(fixture.password).map_err(StoreError::Internal)?;
        users.push(User::build(
            fixture.name.to_string(),
            fixture.email.to_string(),
            hash,
        ));
    }
    store.users.insert_many(users).await
}

async fn seed_customers(store: &Store) -> Result<(), StoreError> {
    let customers = CUSTOMERS
        .iter()
        .map(|fixture| {
            Customer::build(
                fixture.name.to_string(),
                fixture.email.to_string(),
                fixture.image_url.to_string(),
            )
        })
        .collect();
    store.customers.insert_many(customers).await
}

async fn seed_invoices(store: &Store) -> Result<(), StoreError> {
    let customers = store.customers.list_all().await?;
    if customers.is_empty() {
        return Err(StoreError::Internal("no customers to bill".to_string()));
    }

    let invoices = INVOICES
        .iter()
        .enumerate()
        .map(|(i, fixture)| {
            let customer = &customers[i % customers.len()];
            Ok(Invoice::build(
                customer.id,
                fixture.amount,
                fixture.status,
                parse_fixture_date(fixture.date)?,
            ))
        })
        .collect::<Result<Vec<_>, StoreError>>()?;

    store.invoices.insert_many(invoices).await
}

async fn seed_revenue(store: &Store) -> Result<(), StoreError> {
    let rows = REVENUE
        .iter()
        .map(|fixture| Revenue::build(fixture.month.to_string(), fixture.revenue))
        .collect();
    store.revenue.insert_many(rows).await
}

fn parse_fixture_date(date: &str) -> Result<DateTime, StoreError> {
    DateTime::parse_rfc3339_str(format!("{date}T00:00:00Z"))
        .map_err(|e| StoreError::Internal(format!("bad fixture date {date}: {e}")))
}
