pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod invoices;
pub mod seed;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn app_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        // Seed
        .route("/seed", get(seed::seed))
        // Dashboard overview
        .route("/dashboard/cards", get(dashboard::cards))
        .route("/dashboard/revenue", get(dashboard::revenue))
        // Invoices
        .route(
            "/dashboard/invoices",
            get(invoices::list).post(invoices::create),
        )
        .route("/dashboard/invoices/pages", get(invoices::pages))
        .route("/dashboard/invoices/latest", get(invoices::latest))
        .route(
            "/dashboard/invoices/{id}",
            get(invoices::get)
                .put(invoices::update)
                .delete(invoices::delete),
        )
        // Customers
        .route("/dashboard/customers", get(customers::list))
        .route("/dashboard/customers/table", get(customers::table))
}
