use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::money::format_currency;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct TableParams {
    pub query: Option<String>,
}

/// Entry of the customer picker on the invoice form.
#[derive(Serialize)]
pub struct CustomerFieldRow {
    pub id: String,
    pub name: String,
}

/// Row of the customers table; totals arrive formatted.
#[derive(Serialize)]
pub struct CustomersTableRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: String,
    pub total_paid: String,
}

pub async fn list(
    _auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<CustomerFieldRow>>, AppError> {
    let fields = state
        .store
        .customers
        .list_fields()
        .await
        .map_err(|e| AppError::database("Failed to fetch all customers.", e))?;

    Ok(Json(
        fields
            .into_iter()
            .map(|field| CustomerFieldRow {
                id: field.id.to_hex(),
                name: field.name,
            })
            .collect(),
    ))
}

pub async fn table(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Query(params): Query<TableParams>,
) -> Result<Json<Vec<CustomersTableRow>>, AppError> {
    let query = params.query.as_deref().map(str::trim).filter(|q| !q.is_empty());

    let rows = state
        .store
        .customers
        .table(query)
        .await
        .map_err(|e| AppError::database("Failed to fetch customer table.", e))?;

    Ok(Json(
        rows.into_iter()
            .map(|row| CustomersTableRow {
                id: row.id.to_hex(),
                name: row.name,
                email: row.email,
                image_url: row.image_url,
                total_invoices: row.total_invoices,
                total_pending: format_currency(row.total_pending),
                total_paid: format_currency(row.total_paid),
            })
            .collect(),
    ))
}
