use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::buckets::{invoice_bucket, InvoiceBucket};
use crate::domain::promo::{check_eligibility, discount_amount};
use crate::domain::totals::invoice_total;
use crate::entities::invoice::{self, PaymentStatus};
use crate::entities::{booking, promo_code};
use crate::error::{AppError, AppResult};
use crate::utils::reference::{generate_reference, INVOICE_PREFIX};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct InvoiceInfo {
    #[serde(flatten)]
    pub invoice: invoice::Model,
    pub booking_number: String,
    pub bucket: InvoiceBucket,
}

#[derive(Debug, Deserialize)]
pub struct ListInvoicesParams {
    pub bucket: Option<InvoiceBucket>,
}

/// List all invoices, optionally filtered to one display bucket
pub async fn list_invoices(
    State(state): State<AppState>,
    Query(params): Query<ListInvoicesParams>,
) -> AppResult<Json<Vec<InvoiceInfo>>> {
    let invoices = invoice::Entity::find()
        .order_by_desc(invoice::Column::CreatedAt)
        .all(&state.db)
        .await?;
    let bookings = booking::Entity::find().all(&state.db).await?;

    let now = Utc::now();
    let responses: Vec<InvoiceInfo> = invoices
        .into_iter()
        .map(|i| {
            let booking_number = bookings
                .iter()
                .find(|b| b.id == i.booking_id)
                .map(|b| b.booking_number.clone())
                .unwrap_or_default();
            let bucket = invoice_bucket(i.payment_status, i.due_date, now);
            InvoiceInfo {
                invoice: i,
                booking_number,
                bucket,
            }
        })
        .filter(|info| match params.bucket {
            Some(bucket) => info.bucket == bucket,
            None => true,
        })
        .collect();

    Ok(Json(responses))
}

/// Get a single invoice
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<InvoiceInfo>> {
    let found = invoice::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;

    let booking_number = booking::Entity::find_by_id(found.booking_id)
        .one(&state.db)
        .await?
        .map(|b| b.booking_number)
        .unwrap_or_default();

    let bucket = invoice_bucket(found.payment_status, found.due_date, Utc::now());

    Ok(Json(InvoiceInfo {
        invoice: found,
        booking_number,
        bucket,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub booking_id: Uuid,
    pub subtotal: Decimal,
    #[serde(default)]
    pub tax: Decimal,
    pub promo_code: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Create an invoice for a booking. The discount and total are computed
/// here, never trusted from the client, and the promo usage count advances
/// in the same transaction as the insert.
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(payload): Json<CreateInvoiceRequest>,
) -> AppResult<Json<invoice::Model>> {
    let target = booking::Entity::find_by_id(payload.booking_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    let existing = invoice::Entity::find()
        .filter(invoice::Column::BookingId.eq(target.id))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "An invoice already exists for this booking".to_string(),
        ));
    }

    let promo = match &payload.promo_code {
        Some(code) => {
            let code = code.trim().to_uppercase();
            let found = promo_code::Entity::find()
                .filter(promo_code::Column::Code.eq(&code))
                .one(&state.db)
                .await?
                .ok_or_else(|| AppError::BadRequest("Unknown promo code".to_string()))?;

            check_eligibility(&found, payload.subtotal, &target.service_type, Utc::now())
                .map_err(|e| AppError::BadRequest(e.to_string()))?;

            Some(found)
        }
        None => None,
    };

    let promo_discount = promo
        .as_ref()
        .map(|p| discount_amount(p, payload.subtotal))
        .unwrap_or(Decimal::ZERO);

    let total = invoice_total(payload.subtotal, promo_discount, payload.tax)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let new_invoice = invoice::ActiveModel {
        id: Set(Uuid::new_v4()),
        invoice_number: Set(generate_reference(INVOICE_PREFIX)),
        booking_id: Set(target.id),
        customer_id: Set(target.customer_id),
        subtotal: Set(payload.subtotal),
        promo_code_id: Set(promo.as_ref().map(|p| p.id)),
        promo_discount: Set(promo_discount),
        tax: Set(payload.tax),
        total: Set(total),
        payment_status: Set(PaymentStatus::Pending),
        due_date: Set(payload.due_date),
        notes: Set(payload.notes.clone()),
        ..Default::default()
    };

    let txn = state.db.begin().await?;

    let created = new_invoice.insert(&txn).await?;

    if let Some(promo) = promo {
        let usage_count = promo.usage_count;
        let mut active: promo_code::ActiveModel = promo.into();
        active.usage_count = Set(usage_count + 1);
        active.updated_at = Set(Utc::now().into());
        active.update(&txn).await?;
    }

    txn.commit().await?;

    Ok(Json(created))
}

#[derive(Debug, Deserialize)]
pub struct UpdatePaymentRequest {
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
}

/// Record a payment status change. Moving to PAID stamps paid_at once.
pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePaymentRequest>,
) -> AppResult<Json<invoice::Model>> {
    let found = invoice::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;

    let newly_paid = payload.payment_status == PaymentStatus::Paid && found.paid_at.is_none();

    let mut active: invoice::ActiveModel = found.into();
    active.payment_status = Set(payload.payment_status);
    if payload.payment_method.is_some() {
        active.payment_method = Set(payload.payment_method);
    }
    if newly_paid {
        active.paid_at = Set(Some(Utc::now().into()));
    }

    let updated = active.update(&state.db).await?;
    Ok(Json(updated))
}
