use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::features::parse_features;
use crate::entities::quote::{self, QuoteStatus};
use crate::entities::vehicle::{self, VehicleCategory};
use crate::entities::vehicle_image;
use crate::error::{AppError, AppResult};
use crate::notify::{send_best_effort, templates, OutboundEmail};
use crate::utils::reference::{generate_reference, QUOTE_PREFIX};
use crate::AppState;

// ============ Quote Requests ============

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub service_type: String,
    pub event_type: String,
    pub event_date: DateTime<Utc>,
    pub pickup_time: String,
    pub number_of_passengers: i32,
    pub number_of_hours: Option<i32>,
    pub pickup_location: String,
    pub dropoff_location: Option<String>,
    pub special_requests: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuoteReceipt {
    pub quote_number: String,
    pub status: QuoteStatus,
    pub created_at: DateTime<Utc>,
}

/// Submit a quote request from the marketing site
pub async fn submit_quote(
    State(state): State<AppState>,
    Json(payload): Json<QuoteRequest>,
) -> AppResult<Json<QuoteReceipt>> {
    for (field, value) in [
        ("name", &payload.name),
        ("email", &payload.email),
        ("phone", &payload.phone),
        ("service_type", &payload.service_type),
        ("event_type", &payload.event_type),
        ("pickup_time", &payload.pickup_time),
        ("pickup_location", &payload.pickup_location),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("{} is required", field)));
        }
    }
    if !payload.email.contains('@') {
        return Err(AppError::BadRequest("A valid email is required".to_string()));
    }
    if payload.number_of_passengers <= 0 {
        return Err(AppError::BadRequest(
            "Number of passengers must be positive".to_string(),
        ));
    }

    let new_quote = quote::ActiveModel {
        id: Set(Uuid::new_v4()),
        quote_number: Set(generate_reference(QUOTE_PREFIX)),
        name: Set(payload.name.clone()),
        email: Set(payload.email.clone()),
        phone: Set(payload.phone.clone()),
        company: Set(payload.company.clone()),
        service_type: Set(payload.service_type.clone()),
        event_type: Set(payload.event_type.clone()),
        event_date: Set(payload.event_date.into()),
        pickup_time: Set(payload.pickup_time.clone()),
        number_of_passengers: Set(payload.number_of_passengers),
        number_of_hours: Set(payload.number_of_hours),
        pickup_location: Set(payload.pickup_location.clone()),
        dropoff_location: Set(payload.dropoff_location.clone()),
        special_requests: Set(payload.special_requests.clone()),
        status: Set(QuoteStatus::Pending),
        quoted_price: Set(None),
        ..Default::default()
    };

    let created = new_quote.insert(&state.db).await?;

    // Best-effort notifications; failures are logged, never surfaced
    let (subject, html) = templates::quote_confirmation(&created);
    send_best_effort(
        state.mailer.as_ref(),
        OutboundEmail {
            to: created.email.clone(),
            subject,
            html,
        },
    )
    .await;

    let (subject, html) = templates::quote_business_notification(&created);
    send_best_effort(
        state.mailer.as_ref(),
        OutboundEmail {
            to: state.config.business_email.clone(),
            subject,
            html,
        },
    )
    .await;

    Ok(Json(QuoteReceipt {
        quote_number: created.quote_number,
        status: created.status,
        created_at: created.created_at.with_timezone(&Utc),
    }))
}

// ============ Fleet ============

#[derive(Debug, Serialize)]
pub struct VehicleImageInfo {
    pub id: Uuid,
    pub url: String,
    pub alt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub name: String,
    pub category: VehicleCategory,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub base_price: Decimal,
    pub hourly_rate: Decimal,
    pub images: Vec<VehicleImageInfo>,
}

pub fn vehicle_response(v: vehicle::Model, images: Vec<vehicle_image::Model>) -> VehicleResponse {
    let mut image_infos: Vec<VehicleImageInfo> = images
        .into_iter()
        .map(|i| VehicleImageInfo {
            id: i.id,
            url: i.url,
            alt: i.alt,
        })
        .collect();

    // Legacy rows carry a single image_url and no image records
    if image_infos.is_empty() {
        if let Some(url) = &v.image_url {
            image_infos.push(VehicleImageInfo {
                id: v.id,
                url: url.clone(),
                alt: Some(v.name.clone()),
            });
        }
    }

    VehicleResponse {
        id: v.id,
        name: v.name,
        category: v.category,
        description: v.description,
        features: parse_features(&v.features),
        base_price: v.base_price,
        hourly_rate: v.hourly_rate,
        images: image_infos,
    }
}

/// List the active fleet for the marketing site
pub async fn list_fleet(State(state): State<AppState>) -> AppResult<Json<Vec<VehicleResponse>>> {
    let vehicles = vehicle::Entity::find()
        .filter(vehicle::Column::IsActive.eq(true))
        .order_by_asc(vehicle::Column::Name)
        .all(&state.db)
        .await?;

    let images = vehicle_image::Entity::find()
        .order_by_asc(vehicle_image::Column::SortOrder)
        .all(&state.db)
        .await?;

    let responses: Vec<VehicleResponse> = vehicles
        .into_iter()
        .map(|v| {
            let vehicle_images: Vec<vehicle_image::Model> = images
                .iter()
                .filter(|i| i.vehicle_id == v.id)
                .cloned()
                .collect();
            vehicle_response(v, vehicle_images)
        })
        .collect();

    Ok(Json(responses))
}

/// Get a single active vehicle
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> AppResult<Json<VehicleResponse>> {
    let found = vehicle::Entity::find_by_id(vehicle_id)
        .one(&state.db)
        .await?
        .filter(|v| v.is_active)
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

    let images = vehicle_image::Entity::find()
        .filter(vehicle_image::Column::VehicleId.eq(found.id))
        .order_by_asc(vehicle_image::Column::SortOrder)
        .all(&state.db)
        .await?;

    Ok(Json(vehicle_response(found, images)))
}
