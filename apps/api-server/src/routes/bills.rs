//! # Bill Routes
//!
//! Whole-order bills, split bills and payments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::error::ApiResult;
use crate::AppState;
use resto_core::{Bill, BillPayment, NewBill, NewPayment, SplitBillRequest};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bills", post(create_bill).get(list_bills))
        .route("/bills/split", post(split_bill))
        .route("/bills/pay", post(pay_bill))
        .route("/bills/{id}", get(get_bill).delete(delete_bill))
        .route("/bills/{id}/payments", get(list_payments))
}

#[derive(Debug, Serialize)]
pub struct BillCreated {
    pub bill_id: i64,
    pub bill: Bill,
}

#[derive(Debug, Serialize)]
pub struct BillsSplit {
    pub bill_ids: Vec<i64>,
    pub bills: Vec<Bill>,
}

async fn create_bill(
    State(state): State<AppState>,
    Json(new): Json<NewBill>,
) -> ApiResult<(StatusCode, Json<BillCreated>)> {
    let bill = state
        .db
        .bills()
        .create_bill(new.order_id, new.discount_cents)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BillCreated {
            bill_id: bill.id,
            bill,
        }),
    ))
}

async fn split_bill(
    State(state): State<AppState>,
    Json(request): Json<SplitBillRequest>,
) -> ApiResult<(StatusCode, Json<BillsSplit>)> {
    let bills = state.db.bills().create_split_bills(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(BillsSplit {
            bill_ids: bills.iter().map(|b| b.id).collect(),
            bills,
        }),
    ))
}

async fn pay_bill(
    State(state): State<AppState>,
    Json(payment): Json<NewPayment>,
) -> ApiResult<Json<Bill>> {
    Ok(Json(state.db.bills().record_payment(&payment).await?))
}

async fn list_bills(State(state): State<AppState>) -> ApiResult<Json<Vec<Bill>>> {
    Ok(Json(state.db.bills().list().await?))
}

async fn get_bill(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Bill>> {
    Ok(Json(state.db.bills().get(id).await?))
}

async fn list_payments(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<BillPayment>>> {
    Ok(Json(state.db.bills().payments(id).await?))
}

async fn delete_bill(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.db.bills().soft_delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
