use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use axum::{Form, Json};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::AuthUser;
use crate::db::invoices::{InvoiceFilter, InvoiceWithCustomer, ITEMS_PER_PAGE};
use crate::error::AppError;
use crate::models::{Invoice, InvoiceStatus};
use crate::money::{format_currency, parse_decimal_cents};
use crate::state::SharedState;

/// The listing view whose cached rendering every mutation invalidates.
pub const INVOICES_PATH: &str = "/dashboard/invoices";

#[derive(Deserialize)]
pub struct ListParams {
    pub query: Option<String>,
    pub page: Option<i64>,
    pub status: Option<InvoiceStatus>,
}

/// Submitted invoice form. Field names follow the dashboard's form
/// controls; everything arrives as text and is coerced here.
#[derive(Deserialize)]
pub struct InvoiceForm {
    #[serde(rename = "customerId")]
    pub customer_id: Option<String>,
    pub amount: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Serialize)]
struct InvoiceFieldErrors {
    #[serde(rename = "customerId", skip_serializing_if = "Vec::is_empty")]
    customer_id: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    amount: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    status: Vec<String>,
}

#[derive(Debug)]
struct ValidInvoice {
    customer_id: ObjectId,
    amount: i64,
    status: InvoiceStatus,
}

/// Coerce and validate the submitted form. Errors accumulate per field;
/// the store is not touched until every field passes.
fn validate(form: &InvoiceForm, summary: &str) -> Result<ValidInvoice, AppError> {
    let mut errors = InvoiceFieldErrors::default();

    let customer_id = match form.customer_id.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => ObjectId::parse_str(raw).ok(),
        _ => None,
    };
    if customer_id.is_none() {
        errors.customer_id.push("Please select a customer.".to_string());
    }

    let amount = form
        .amount
        .as_deref()
        .and_then(parse_decimal_cents)
        .filter(|cents| *cents > 0);
    if amount.is_none() {
        errors.amount.push("Please enter an amount greater than $0.".to_string());
    }

    let status = form.status.as_deref().and_then(InvoiceStatus::parse);
    if status.is_none() {
        errors.status.push("Please select an invoice status.".to_string());
    }

    match (customer_id, amount, status) {
        (Some(customer_id), Some(amount), Some(status)) => Ok(ValidInvoice {
            customer_id,
            amount,
            status,
        }),
        _ => Err(AppError::Validation {
            message: summary.to_string(),
            errors: serde_json::to_value(&errors).unwrap_or_default(),
        }),
    }
}

fn normalize_query(query: Option<String>) -> Option<String> {
    query.map(|q| q.trim().to_string()).filter(|q| !q.is_empty())
}

/// Row of the paginated invoices table.
#[derive(Serialize)]
pub struct InvoicesTableRow {
    pub id: String,
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub date: String,
    pub amount: i64,
    pub status: InvoiceStatus,
}

impl From<InvoiceWithCustomer> for InvoicesTableRow {
    fn from(row: InvoiceWithCustomer) -> Self {
        Self {
            id: row.id.to_hex(),
            customer_id: row.customer_id.to_hex(),
            name: row.name,
            email: row.email,
            image_url: row.image_url,
            date: row.date.try_to_rfc3339_string().unwrap_or_default(),
            amount: row.amount,
            status: row.status,
        }
    }
}

pub async fn list(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<InvoicesTableRow>>, AppError> {
    let page = params.page.unwrap_or(1).max(1);
    // Any page past the data yields an empty page.
    let offset = (page - 1).saturating_mul(ITEMS_PER_PAGE) as u64;
    let filter = InvoiceFilter {
        query: normalize_query(params.query),
        status: params.status,
    };

    let rows = state
        .store
        .invoices
        .list_filtered(&filter, ITEMS_PER_PAGE, offset)
        .await
        .map_err(|e| AppError::database("Failed to fetch invoices.", e))?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn pages(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let filter = InvoiceFilter {
        query: normalize_query(params.query),
        status: params.status,
    };

    let count = state
        .store
        .invoices
        .count_filtered(&filter)
        .await
        .map_err(|e| AppError::database("Failed to fetch total number of invoices.", e))?;

    let total_pages = count.div_ceil(ITEMS_PER_PAGE as u64);
    Ok(Json(json!({ "total_pages": total_pages })))
}

/// Summary row for the overview's latest-invoices card.
#[derive(Serialize)]
pub struct LatestInvoice {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub email: String,
    pub amount: String,
}

pub async fn latest(
    _auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<LatestInvoice>>, AppError> {
    let rows = state
        .store
        .invoices
        .latest(5)
        .await
        .map_err(|e| AppError::database("Failed to fetch the latest invoices.", e))?;

    Ok(Json(
        rows.into_iter()
            .map(|row| LatestInvoice {
                id: row.id.to_hex(),
                name: row.name,
                image_url: row.image_url,
                email: row.email,
                amount: format_currency(row.amount),
            })
            .collect(),
    ))
}

/// The raw invoice, shaped for the edit form.
#[derive(Serialize)]
pub struct InvoiceDetail {
    pub id: String,
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: String,
}

pub async fn get(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<InvoiceDetail>, AppError> {
    let id = ObjectId::parse_str(&id)
        .map_err(|_| AppError::Database("Failed to fetch invoice.".to_string()))?;

    let invoice = state
        .store
        .invoices
        .find_by_id(id)
        .await
        .map_err(|e| AppError::database("Failed to fetch invoice.", e))?
        .ok_or_else(|| AppError::NotFound("Invoice not found.".to_string()))?;

    Ok(Json(InvoiceDetail {
        id: invoice.id.to_hex(),
        customer_id: invoice.customer_id.to_hex(),
        amount: invoice.amount,
        status: invoice.status,
        date: invoice.date.try_to_rfc3339_string().unwrap_or_default(),
    }))
}

pub async fn create(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Form(form): Form<InvoiceForm>,
) -> Result<Redirect, AppError> {
    let valid = validate(&form, "Missing Fields. Failed to Create Invoice.")?;

    let customer = state
        .store
        .customers
        .find_by_id(valid.customer_id)
        .await
        .map_err(|e| AppError::database("Failed to Create Invoice.", e))?
        .ok_or_else(|| AppError::BadRequest("Customer not found.".to_string()))?;

    let invoice = Invoice::build(customer.id, valid.amount, valid.status, DateTime::now());
    tracing::debug!(amount = invoice.amount, customer = %customer.id, "creating invoice");

    state
        .store
        .invoices
        .insert(invoice)
        .await
        .map_err(|e| AppError::database("Failed to Create Invoice.", e))?;

    state.revalidations.revalidate(INVOICES_PATH);
    Ok(Redirect::to(INVOICES_PATH))
}

pub async fn update(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Form(form): Form<InvoiceForm>,
) -> Result<Redirect, AppError> {
    let valid = validate(&form, "Missing Fields. Failed to Update Invoice.")?;

    let id = ObjectId::parse_str(&id)
        .map_err(|_| AppError::Database("Failed to Update Invoice.".to_string()))?;

    let mut invoice = state
        .store
        .invoices
        .find_by_id(id)
        .await
        .map_err(|e| AppError::database("Failed to Update Invoice.", e))?
        .ok_or_else(|| AppError::Database("Failed to Update Invoice.".to_string()))?;

    let customer = state
        .store
        .customers
        .find_by_id(valid.customer_id)
        .await
        .map_err(|e| AppError::database("Failed to Update Invoice.", e))?
        .ok_or_else(|| AppError::BadRequest("Customer not found.".to_string()))?;

    // The issue date survives edits.
    invoice.customer_id = customer.id;
    invoice.amount = valid.amount;
    invoice.status = valid.status;

    state
        .store
        .invoices
        .replace(invoice)
        .await
        .map_err(|e| AppError::database("Failed to Update Invoice.", e))?;

    state.revalidations.revalidate(INVOICES_PATH);
    Ok(Redirect::to(INVOICES_PATH))
}

pub async fn delete(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = ObjectId::parse_str(&id)
        .map_err(|_| AppError::Database("Failed to Delete Invoice.".to_string()))?;

    let deleted = state
        .store
        .invoices
        .delete(id)
        .await
        .map_err(|e| AppError::database("Failed to Delete Invoice.", e))?;
    if !deleted {
        return Err(AppError::Database("Failed to Delete Invoice.".to_string()));
    }

    state.revalidations.revalidate(INVOICES_PATH);
    Ok(Json(json!({ "message": "Deleted Invoice." })))
}
