use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::money::format_currency;
use crate::state::SharedState;

/// The four overview cards, keyed the way the overview page consumes
/// them. Sums arrive formatted, counts raw.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub number_of_customers: u64,
    pub number_of_invoices: u64,
    pub total_paid_invoices: String,
    pub total_pending_invoices: String,
}

pub async fn cards(
    _auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<CardData>, AppError> {
    // Three independent reads, issued concurrently; they may observe
    // the store at slightly different instants.
    let (number_of_invoices, number_of_customers, totals) = tokio::try_join!(
        state.store.invoices.count(),
        state.store.customers.count(),
        state.store.invoices.totals_by_status(),
    )
    .map_err(|e| AppError::database("Failed to fetch card data.", e))?;

    Ok(Json(CardData {
        number_of_customers,
        number_of_invoices,
        total_paid_invoices: format_currency(totals.paid),
        total_pending_invoices: format_currency(totals.pending),
    }))
}

#[derive(Serialize)]
pub struct RevenueRow {
    pub month: String,
    pub revenue: i64,
}

pub async fn revenue(
    _auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<RevenueRow>>, AppError> {
    let rows = state
        .store
        .revenue
        .list_all()
        .await
        .map_err(|e| AppError::database("Failed to fetch revenue data.", e))?;

    Ok(Json(
        rows.into_iter()
            .map(|row| RevenueRow {
                month: row.month,
                revenue: row.revenue,
            })
            .collect(),
    ))
}
