use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::buckets::{booking_bucket, BookingBucket};
use crate::domain::lifecycle::{booking_can_transition, booking_is_terminal};
use crate::entities::booking::{self, BookingStatus};
use crate::entities::{customer, driver, vehicle};
use crate::error::{AppError, AppResult};
use crate::utils::reference::{generate_reference, BOOKING_PREFIX};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct BookingInfo {
    pub id: Uuid,
    pub booking_number: String,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub quote_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub vehicle_name: Option<String>,
    pub driver_id: Option<Uuid>,
    pub driver_name: Option<String>,
    pub event_type: String,
    pub event_date: DateTime<Utc>,
    pub service_type: String,
    pub pickup_time: String,
    pub pickup_location: String,
    pub dropoff_location: Option<String>,
    pub number_of_passengers: i32,
    pub number_of_hours: Option<i32>,
    pub special_requests: Option<String>,
    pub total_price: Decimal,
    pub paid_amount: Decimal,
    pub remaining_balance: Decimal,
    pub status: BookingStatus,
    pub bucket: BookingBucket,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn booking_info(
    b: booking::Model,
    customers: &[customer::Model],
    vehicles: &[vehicle::Model],
    drivers: &[driver::Model],
    now: DateTime<Utc>,
) -> BookingInfo {
    let customer = customers.iter().find(|c| c.id == b.customer_id);
    let vehicle_name = b
        .vehicle_id
        .and_then(|vid| vehicles.iter().find(|v| v.id == vid))
        .map(|v| v.name.clone())
        .or_else(|| b.vehicle_details.clone());
    let driver_name = b
        .driver_id
        .and_then(|did| drivers.iter().find(|d| d.id == did))
        .map(|d| format!("{} {}", d.first_name, d.last_name))
        .or_else(|| b.driver_name.clone());

    BookingInfo {
        id: b.id,
        booking_number: b.booking_number,
        customer_id: b.customer_id,
        customer_name: customer
            .map(|c| format!("{} {}", c.first_name, c.last_name))
            .unwrap_or_default(),
        customer_email: customer.map(|c| c.email.clone()).unwrap_or_default(),
        quote_id: b.quote_id,
        vehicle_id: b.vehicle_id,
        vehicle_name,
        driver_id: b.driver_id,
        driver_name,
        event_type: b.event_type,
        event_date: b.event_date.with_timezone(&Utc),
        service_type: b.service_type,
        pickup_time: b.pickup_time,
        pickup_location: b.pickup_location,
        dropoff_location: b.dropoff_location,
        number_of_passengers: b.number_of_passengers,
        number_of_hours: b.number_of_hours,
        special_requests: b.special_requests,
        total_price: b.total_price,
        paid_amount: b.paid_amount,
        remaining_balance: b.total_price - b.paid_amount,
        status: b.status,
        bucket: booking_bucket(b.event_date.with_timezone(&Utc), b.status, now),
        notes: b.notes,
        created_at: b.created_at.with_timezone(&Utc),
    }
}

#[derive(Debug, Deserialize)]
pub struct ListBookingsParams {
    pub bucket: Option<BookingBucket>,
}

/// List all bookings, optionally filtered to one display bucket
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(params): Query<ListBookingsParams>,
) -> AppResult<Json<Vec<BookingInfo>>> {
    let bookings = booking::Entity::find()
        .order_by_desc(booking::Column::EventDate)
        .all(&state.db)
        .await?;
    let customers = customer::Entity::find().all(&state.db).await?;
    let vehicles = vehicle::Entity::find().all(&state.db).await?;
    let drivers = driver::Entity::find().all(&state.db).await?;

    let now = Utc::now();
    let responses: Vec<BookingInfo> = bookings
        .into_iter()
        .map(|b| booking_info(b, &customers, &vehicles, &drivers, now))
        .filter(|info| match params.bucket {
            Some(bucket) => info.bucket == bucket,
            None => true,
        })
        .collect();

    Ok(Json(responses))
}

/// Get a single booking
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookingInfo>> {
    let found = booking::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    let customers = customer::Entity::find().all(&state.db).await?;
    let vehicles = vehicle::Entity::find().all(&state.db).await?;
    let drivers = driver::Entity::find().all(&state.db).await?;

    Ok(Json(booking_info(
        found, &customers, &vehicles, &drivers, Utc::now(),
    )))
}

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub customer_id: Uuid,
    pub event_type: String,
    pub event_date: DateTime<Utc>,
    pub service_type: String,
    pub pickup_time: String,
    pub pickup_location: String,
    pub dropoff_location: Option<String>,
    pub number_of_passengers: i32,
    pub number_of_hours: Option<i32>,
    pub special_requests: Option<String>,
    pub vehicle_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub driver_name: Option<String>,
    pub driver_phone: Option<String>,
    pub vehicle_details: Option<String>,
    pub total_price: Decimal,
    pub notes: Option<String>,
}

/// Create a booking directly, without a quote
pub async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<Json<booking::Model>> {
    customer::Entity::find_by_id(payload.customer_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid customer".to_string()))?;

    if let Some(vehicle_id) = payload.vehicle_id {
        vehicle::Entity::find_by_id(vehicle_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::BadRequest("Invalid vehicle".to_string()))?;
    }
    if let Some(driver_id) = payload.driver_id {
        driver::Entity::find_by_id(driver_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::BadRequest("Invalid driver".to_string()))?;
    }

    if payload.number_of_passengers <= 0 {
        return Err(AppError::BadRequest(
            "Number of passengers must be positive".to_string(),
        ));
    }
    if payload.total_price < Decimal::ZERO {
        return Err(AppError::BadRequest("Total price must not be negative".to_string()));
    }

    let new_booking = booking::ActiveModel {
        id: Set(Uuid::new_v4()),
        booking_number: Set(generate_reference(BOOKING_PREFIX)),
        customer_id: Set(payload.customer_id),
        quote_id: Set(None),
        vehicle_id: Set(payload.vehicle_id),
        driver_id: Set(payload.driver_id),
        event_type: Set(payload.event_type.clone()),
        event_date: Set(payload.event_date.into()),
        service_type: Set(payload.service_type.clone()),
        pickup_time: Set(payload.pickup_time.clone()),
        pickup_location: Set(payload.pickup_location.clone()),
        dropoff_location: Set(payload.dropoff_location.clone()),
        number_of_passengers: Set(payload.number_of_passengers),
        number_of_hours: Set(payload.number_of_hours),
        special_requests: Set(payload.special_requests.clone()),
        driver_name: Set(payload.driver_name.clone()),
        driver_phone: Set(payload.driver_phone.clone()),
        vehicle_details: Set(payload.vehicle_details.clone()),
        total_price: Set(payload.total_price),
        paid_amount: Set(Decimal::ZERO),
        status: Set(BookingStatus::Confirmed),
        notes: Set(payload.notes.clone()),
        confirmed_at: Set(Some(Utc::now().into())),
        ..Default::default()
    };

    let created = new_booking.insert(&state.db).await?;
    Ok(Json(created))
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingRequest {
    pub event_type: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub service_type: Option<String>,
    pub pickup_time: Option<String>,
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,
    pub number_of_passengers: Option<i32>,
    pub number_of_hours: Option<i32>,
    pub special_requests: Option<String>,
    pub driver_name: Option<String>,
    pub driver_phone: Option<String>,
    pub vehicle_details: Option<String>,
    pub total_price: Option<Decimal>,
    pub paid_amount: Option<Decimal>,
    pub notes: Option<String>,
}

/// Edit booking fields. Completed and cancelled bookings are immutable.
pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingRequest>,
) -> AppResult<Json<booking::Model>> {
    let found = booking::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if booking_is_terminal(found.status) {
        return Err(AppError::BadRequest(format!(
            "Cannot edit a {:?} booking",
            found.status
        )));
    }

    // Enforce paid_amount <= total_price across whichever of the two changed
    let new_total = payload.total_price.unwrap_or(found.total_price);
    let new_paid = payload.paid_amount.unwrap_or(found.paid_amount);
    if new_total < Decimal::ZERO || new_paid < Decimal::ZERO {
        return Err(AppError::BadRequest("Amounts must not be negative".to_string()));
    }
    if new_paid > new_total {
        return Err(AppError::BadRequest(
            "Paid amount cannot exceed the total price".to_string(),
        ));
    }

    let mut active: booking::ActiveModel = found.into();

    if let Some(event_type) = payload.event_type {
        active.event_type = Set(event_type);
    }
    if let Some(event_date) = payload.event_date {
        active.event_date = Set(event_date.into());
    }
    if let Some(service_type) = payload.service_type {
        active.service_type = Set(service_type);
    }
    if let Some(pickup_time) = payload.pickup_time {
        active.pickup_time = Set(pickup_time);
    }
    if let Some(pickup_location) = payload.pickup_location {
        active.pickup_location = Set(pickup_location);
    }
    if payload.dropoff_location.is_some() {
        active.dropoff_location = Set(payload.dropoff_location);
    }
    if let Some(passengers) = payload.number_of_passengers {
        if passengers <= 0 {
            return Err(AppError::BadRequest(
                "Number of passengers must be positive".to_string(),
            ));
        }
        active.number_of_passengers = Set(passengers);
    }
    if payload.number_of_hours.is_some() {
        active.number_of_hours = Set(payload.number_of_hours);
    }
    if payload.special_requests.is_some() {
        active.special_requests = Set(payload.special_requests);
    }
    if payload.driver_name.is_some() {
        active.driver_name = Set(payload.driver_name);
    }
    if payload.driver_phone.is_some() {
        active.driver_phone = Set(payload.driver_phone);
    }
    if payload.vehicle_details.is_some() {
        active.vehicle_details = Set(payload.vehicle_details);
    }
    active.total_price = Set(new_total);
    active.paid_amount = Set(new_paid);
    if payload.notes.is_some() {
        active.notes = Set(payload.notes);
    }
    active.updated_at = Set(Utc::now().into());

    let updated = active.update(&state.db).await?;
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub vehicle_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
}

/// Set or clear the structured vehicle/driver assignment. Allowed in any
/// non-terminal state; null clears.
pub async fn assign_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignRequest>,
) -> AppResult<Json<booking::Model>> {
    let found = booking::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if booking_is_terminal(found.status) {
        return Err(AppError::BadRequest(format!(
            "Cannot assign a {:?} booking",
            found.status
        )));
    }

    if let Some(vehicle_id) = payload.vehicle_id {
        vehicle::Entity::find_by_id(vehicle_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::BadRequest("Invalid vehicle".to_string()))?;
    }
    if let Some(driver_id) = payload.driver_id {
        driver::Entity::find_by_id(driver_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::BadRequest("Invalid driver".to_string()))?;
    }

    let mut active: booking::ActiveModel = found.into();
    active.vehicle_id = Set(payload.vehicle_id);
    active.driver_id = Set(payload.driver_id);
    active.updated_at = Set(Utc::now().into());

    let updated = active.update(&state.db).await?;
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

/// Advance a booking through its lifecycle
pub async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> AppResult<Json<booking::Model>> {
    let found = booking::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if !booking_can_transition(found.status, payload.status) {
        return Err(AppError::BadRequest(format!(
            "Cannot move booking from {:?} to {:?}",
            found.status, payload.status
        )));
    }

    let mut active: booking::ActiveModel = found.into();
    active.status = Set(payload.status);
    active.updated_at = Set(Utc::now().into());

    let updated = active.update(&state.db).await?;
    Ok(Json(updated))
}
