use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::lifecycle::quote_can_transition;
use crate::entities::booking::{self, BookingStatus};
use crate::entities::customer;
use crate::entities::quote::{self, QuoteStatus};
use crate::error::{AppError, AppResult};
use crate::utils::reference::{generate_reference, BOOKING_PREFIX};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuotesParams {
    pub status: Option<QuoteStatus>,
}

/// List quote requests, newest first
pub async fn list_quotes(
    State(state): State<AppState>,
    Query(params): Query<ListQuotesParams>,
) -> AppResult<Json<Vec<quote::Model>>> {
    let mut query = quote::Entity::find().order_by_desc(quote::Column::CreatedAt);

    if let Some(status) = params.status {
        query = query.filter(quote::Column::Status.eq(status));
    }

    Ok(Json(query.all(&state.db).await?))
}

/// Get a single quote
pub async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<quote::Model>> {
    let found = quote::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Quote not found".to_string()))?;

    Ok(Json(found))
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuoteRequest {
    pub notes: Option<String>,
}

/// Update admin notes on a quote
pub async fn update_quote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateQuoteRequest>,
) -> AppResult<Json<quote::Model>> {
    let found = quote::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Quote not found".to_string()))?;

    let mut active: quote::ActiveModel = found.into();
    if payload.notes.is_some() {
        active.notes = Set(payload.notes);
    }
    active.updated_at = Set(Utc::now().into());

    let updated = active.update(&state.db).await?;
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuoteStatusRequest {
    pub status: QuoteStatus,
    pub quoted_price: Option<Decimal>,
}

/// Advance a quote through its lifecycle. Moving to QUOTED requires a price
/// in the same request.
pub async fn update_quote_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateQuoteStatusRequest>,
) -> AppResult<Json<quote::Model>> {
    let found = quote::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Quote not found".to_string()))?;

    if !quote_can_transition(found.status, payload.status) {
        return Err(AppError::BadRequest(format!(
            "Cannot move quote from {:?} to {:?}",
            found.status, payload.status
        )));
    }

    let first_response = found.responded_at.is_none();

    let mut active: quote::ActiveModel = found.into();

    if payload.status == QuoteStatus::Quoted {
        let price = payload
            .quoted_price
            .ok_or_else(|| AppError::BadRequest("A quoted price is required".to_string()))?;
        if price <= Decimal::ZERO {
            return Err(AppError::BadRequest("Quoted price must be positive".to_string()));
        }
        active.quoted_price = Set(Some(price));
    }

    active.status = Set(payload.status);
    if first_response {
        active.responded_at = Set(Some(Utc::now().into()));
    }
    active.updated_at = Set(Utc::now().into());

    let updated = active.update(&state.db).await?;
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct ConvertQuoteRequest {
    /// Defaults to the customer account whose email matches the quote.
    pub customer_id: Option<Uuid>,
    /// Defaults to the quoted price.
    pub total_price: Option<Decimal>,
    pub vehicle_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
}

/// Create a booking from an accepted quote. One booking per quote; the
/// quote moves to COMPLETED in the same transaction.
pub async fn convert_quote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ConvertQuoteRequest>,
) -> AppResult<Json<booking::Model>> {
    let found = quote::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Quote not found".to_string()))?;

    if found.status != QuoteStatus::Accepted {
        return Err(AppError::BadRequest(
            "Only accepted quotes can be converted to bookings".to_string(),
        ));
    }

    let existing = booking::Entity::find()
        .filter(booking::Column::QuoteId.eq(found.id))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "A booking already exists for this quote".to_string(),
        ));
    }

    let customer = match payload.customer_id {
        Some(customer_id) => customer::Entity::find_by_id(customer_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?,
        None => customer::Entity::find()
            .filter(customer::Column::Email.eq(&found.email))
            .one(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(
                    "No customer account matches the quote email; supply customer_id".to_string(),
                )
            })?,
    };

    let total_price = payload
        .total_price
        .or(found.quoted_price)
        .ok_or_else(|| AppError::BadRequest("A total price is required".to_string()))?;

    let now = Utc::now();
    let new_booking = booking::ActiveModel {
        id: Set(Uuid::new_v4()),
        booking_number: Set(generate_reference(BOOKING_PREFIX)),
        customer_id: Set(customer.id),
        quote_id: Set(Some(found.id)),
        vehicle_id: Set(payload.vehicle_id),
        driver_id: Set(payload.driver_id),
        event_type: Set(found.event_type.clone()),
        event_date: Set(found.event_date),
        service_type: Set(found.service_type.clone()),
        pickup_time: Set(found.pickup_time.clone()),
        pickup_location: Set(found.pickup_location.clone()),
        dropoff_location: Set(found.dropoff_location.clone()),
        number_of_passengers: Set(found.number_of_passengers),
        number_of_hours: Set(found.number_of_hours),
        special_requests: Set(found.special_requests.clone()),
        total_price: Set(total_price),
        paid_amount: Set(Decimal::ZERO),
        status: Set(BookingStatus::Confirmed),
        confirmed_at: Set(Some(now.into())),
        ..Default::default()
    };

    let txn = state.db.begin().await?;

    let created = new_booking.insert(&txn).await?;

    let mut active: quote::ActiveModel = found.into();
    active.status = Set(QuoteStatus::Completed);
    active.updated_at = Set(now.into());
    active.update(&txn).await?;

    txn.commit().await?;

    Ok(Json(created))
}
