use axum::{extract::State, Extension, Json};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::buckets::{booking_bucket, invoice_bucket, BookingBucket, InvoiceBucket};
use crate::domain::features::parse_features;
use crate::entities::booking::{self, BookingStatus};
use crate::entities::invoice::{self, PaymentStatus};
use crate::entities::promo_code::{self, DiscountType};
use crate::entities::{customer, driver, vehicle};
use crate::error::{AppError, AppResult};
use crate::handlers::auth::{hash_password, verify_password, CustomerInfo};
use crate::utils::jwt::Claims;
use crate::AppState;

async fn current_customer(state: &AppState, claims: &Claims) -> AppResult<customer::Model> {
    customer::Entity::find_by_id(claims.sub)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Account not found".to_string()))
}

/// Get the logged-in customer's account
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<CustomerInfo>> {
    let found = current_customer(&state, &claims).await?;
    Ok(Json(CustomerInfo::from_model(found)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
}

/// Update profile fields
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<CustomerInfo>> {
    let found = current_customer(&state, &claims).await?;

    let mut active: customer::ActiveModel = found.into();

    if let Some(first_name) = payload.first_name {
        if first_name.trim().is_empty() {
            return Err(AppError::BadRequest("First name cannot be empty".to_string()));
        }
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = payload.last_name {
        if last_name.trim().is_empty() {
            return Err(AppError::BadRequest("Last name cannot be empty".to_string()));
        }
        active.last_name = Set(last_name);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(phone);
    }
    if payload.company.is_some() {
        active.company = Set(payload.company);
    }

    let updated = active.update(&state.db).await?;
    Ok(Json(CustomerInfo::from_model(updated)))
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Change password, verifying the current one first
pub async fn change_password(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if payload.new_password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let found = current_customer(&state, &claims).await?;
    verify_password(&payload.current_password, &found.password_hash)
        .map_err(|_| AppError::Unauthorized("Current password is incorrect".to_string()))?;

    let password_hash = hash_password(&payload.new_password)?;

    let mut active: customer::ActiveModel = found.into();
    active.password_hash = Set(password_hash);
    active.update(&state.db).await?;

    Ok(Json(serde_json::json!({ "message": "Password updated" })))
}

// ============ Bookings ============

#[derive(Debug, Serialize)]
pub struct CustomerBookingResponse {
    pub id: Uuid,
    pub booking_number: String,
    pub event_type: String,
    pub event_date: DateTime<Utc>,
    pub service_type: String,
    pub pickup_time: String,
    pub pickup_location: String,
    pub dropoff_location: Option<String>,
    pub number_of_passengers: i32,
    pub vehicle_name: Option<String>,
    pub driver_name: Option<String>,
    pub total_price: Decimal,
    pub paid_amount: Decimal,
    pub status: BookingStatus,
}

#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    pub upcoming: Vec<CustomerBookingResponse>,
    pub past: Vec<CustomerBookingResponse>,
    pub cancelled: Vec<CustomerBookingResponse>,
}

/// List the customer's bookings grouped into upcoming/past/cancelled
pub async fn my_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<BookingListResponse>> {
    let bookings = booking::Entity::find()
        .filter(booking::Column::CustomerId.eq(claims.sub))
        .order_by_desc(booking::Column::EventDate)
        .all(&state.db)
        .await?;

    let vehicles = vehicle::Entity::find().all(&state.db).await?;
    let drivers = driver::Entity::find().all(&state.db).await?;

    let now = Utc::now();
    let mut response = BookingListResponse {
        upcoming: Vec::new(),
        past: Vec::new(),
        cancelled: Vec::new(),
    };

    for b in bookings {
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

        let bucket = booking_bucket(b.event_date.with_timezone(&Utc), b.status, now);
        let item = CustomerBookingResponse {
            id: b.id,
            booking_number: b.booking_number,
            event_type: b.event_type,
            event_date: b.event_date.with_timezone(&Utc),
            service_type: b.service_type,
            pickup_time: b.pickup_time,
            pickup_location: b.pickup_location,
            dropoff_location: b.dropoff_location,
            number_of_passengers: b.number_of_passengers,
            vehicle_name,
            driver_name,
            total_price: b.total_price,
            paid_amount: b.paid_amount,
            status: b.status,
        };

        match bucket {
            BookingBucket::Upcoming => response.upcoming.push(item),
            BookingBucket::Past => response.past.push(item),
            BookingBucket::Cancelled => response.cancelled.push(item),
        }
    }

    Ok(Json(response))
}

// ============ Invoices ============

#[derive(Debug, Serialize)]
pub struct CustomerInvoiceResponse {
    pub id: Uuid,
    pub invoice_number: String,
    pub booking_id: Uuid,
    pub subtotal: Decimal,
    pub promo_discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub payment_status: PaymentStatus,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct InvoiceListResponse {
    pub pending: Vec<CustomerInvoiceResponse>,
    pub paid: Vec<CustomerInvoiceResponse>,
    pub overdue: Vec<CustomerInvoiceResponse>,
}

/// List the customer's invoices grouped into pending/paid/overdue
pub async fn my_invoices(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<InvoiceListResponse>> {
    let invoices = invoice::Entity::find()
        .filter(invoice::Column::CustomerId.eq(claims.sub))
        .order_by_desc(invoice::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let now = Utc::now();
    let mut response = InvoiceListResponse {
        pending: Vec::new(),
        paid: Vec::new(),
        overdue: Vec::new(),
    };

    for i in invoices {
        let bucket = invoice_bucket(i.payment_status, i.due_date, now);
        let item = CustomerInvoiceResponse {
            id: i.id,
            invoice_number: i.invoice_number,
            booking_id: i.booking_id,
            subtotal: i.subtotal,
            promo_discount: i.promo_discount,
            tax: i.tax,
            total: i.total,
            payment_status: i.payment_status,
            due_date: i.due_date,
            created_at: i.created_at.with_timezone(&Utc),
        };

        match bucket {
            InvoiceBucket::Pending => response.pending.push(item),
            InvoiceBucket::Paid => response.paid.push(item),
            InvoiceBucket::Overdue => response.overdue.push(item),
        }
    }

    Ok(Json(response))
}

// ============ Promotions ============

#[derive(Debug, Serialize)]
pub struct PromotionResponse {
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_booking_amount: Option<Decimal>,
    pub valid_until: DateTime<Utc>,
    pub applicable_services: Vec<String>,
}

/// List promo codes a customer could currently use
pub async fn promotions(State(state): State<AppState>) -> AppResult<Json<Vec<PromotionResponse>>> {
    let now = Utc::now();
    let codes = promo_code::Entity::find()
        .filter(promo_code::Column::IsActive.eq(true))
        .all(&state.db)
        .await?;

    let responses: Vec<PromotionResponse> = codes
        .into_iter()
        .filter(|p| {
            p.valid_from.with_timezone(&Utc) <= now && now <= p.valid_until.with_timezone(&Utc)
        })
        .filter(|p| match p.usage_limit {
            Some(limit) => p.usage_count < limit,
            None => true,
        })
        .map(|p| PromotionResponse {
            code: p.code,
            description: p.description,
            discount_type: p.discount_type,
            discount_value: p.discount_value,
            min_booking_amount: p.min_booking_amount,
            valid_until: p.valid_until.with_timezone(&Utc),
            applicable_services: parse_features(&p.applicable_services),
        })
        .collect();

    Ok(Json(responses))
}
