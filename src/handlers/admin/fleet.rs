use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::features::{encode_features, parse_features};
use crate::entities::vehicle::{self, VehicleCategory};
use crate::entities::{booking, vehicle_image};
use crate::error::{AppError, AppResult};
use crate::handlers::public::{vehicle_response, VehicleResponse};
use crate::AppState;

/// Feature lists arrive either as a proper array or as the legacy
/// comma-separated string; both normalize to the same stored form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FeaturesInput {
    List(Vec<String>),
    Raw(String),
}

impl FeaturesInput {
    fn normalize(&self) -> Vec<String> {
        match self {
            FeaturesInput::List(list) => list
                .iter()
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect(),
            FeaturesInput::Raw(raw) => parse_features(raw),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdminVehicleResponse {
    #[serde(flatten)]
    pub vehicle: VehicleResponse,
    pub is_active: bool,
}

/// List the whole fleet, inactive vehicles included
pub async fn list_vehicles(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AdminVehicleResponse>>> {
    let vehicles = vehicle::Entity::find()
        .order_by_asc(vehicle::Column::Name)
        .all(&state.db)
        .await?;
    let images = vehicle_image::Entity::find()
        .order_by_asc(vehicle_image::Column::SortOrder)
        .all(&state.db)
        .await?;

    let responses: Vec<AdminVehicleResponse> = vehicles
        .into_iter()
        .map(|v| {
            let is_active = v.is_active;
            let vehicle_images: Vec<vehicle_image::Model> = images
                .iter()
                .filter(|i| i.vehicle_id == v.id)
                .cloned()
                .collect();
            AdminVehicleResponse {
                vehicle: vehicle_response(v, vehicle_images),
                is_active,
            }
        })
        .collect();

    Ok(Json(responses))
}

/// Get one vehicle, active or not
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AdminVehicleResponse>> {
    let found = vehicle::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

    let images = vehicle_image::Entity::find()
        .filter(vehicle_image::Column::VehicleId.eq(found.id))
        .order_by_asc(vehicle_image::Column::SortOrder)
        .all(&state.db)
        .await?;

    let is_active = found.is_active;
    Ok(Json(AdminVehicleResponse {
        vehicle: vehicle_response(found, images),
        is_active,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateVehicleRequest {
    pub name: String,
    pub category: VehicleCategory,
    pub description: Option<String>,
    pub features: Option<FeaturesInput>,
    pub base_price: Decimal,
    pub hourly_rate: Decimal,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Add a vehicle to the fleet
pub async fn create_vehicle(
    State(state): State<AppState>,
    Json(payload): Json<CreateVehicleRequest>,
) -> AppResult<Json<vehicle::Model>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    if payload.base_price < Decimal::ZERO || payload.hourly_rate < Decimal::ZERO {
        return Err(AppError::BadRequest("Prices must not be negative".to_string()));
    }

    let features = payload
        .features
        .as_ref()
        .map(|f| f.normalize())
        .unwrap_or_default();

    let new_vehicle = vehicle::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.clone()),
        category: Set(payload.category.clone()),
        description: Set(payload.description.clone()),
        features: Set(encode_features(&features)),
        base_price: Set(payload.base_price),
        hourly_rate: Set(payload.hourly_rate),
        image_url: Set(payload.image_url.clone()),
        is_active: Set(payload.is_active.unwrap_or(true)),
        ..Default::default()
    };

    let created = new_vehicle.insert(&state.db).await?;
    Ok(Json(created))
}

#[derive(Debug, Deserialize)]
pub struct UpdateVehicleRequest {
    pub name: Option<String>,
    pub category: Option<VehicleCategory>,
    pub description: Option<String>,
    pub features: Option<FeaturesInput>,
    pub base_price: Option<Decimal>,
    pub hourly_rate: Option<Decimal>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Update a vehicle
pub async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVehicleRequest>,
) -> AppResult<Json<vehicle::Model>> {
    let found = vehicle::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

    let mut active: vehicle::ActiveModel = found.into();

    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("Name cannot be empty".to_string()));
        }
        active.name = Set(name);
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
    }
    if payload.description.is_some() {
        active.description = Set(payload.description);
    }
    if let Some(features) = payload.features {
        active.features = Set(encode_features(&features.normalize()));
    }
    if let Some(base_price) = payload.base_price {
        if base_price < Decimal::ZERO {
            return Err(AppError::BadRequest("Prices must not be negative".to_string()));
        }
        active.base_price = Set(base_price);
    }
    if let Some(hourly_rate) = payload.hourly_rate {
        if hourly_rate < Decimal::ZERO {
            return Err(AppError::BadRequest("Prices must not be negative".to_string()));
        }
        active.hourly_rate = Set(hourly_rate);
    }
    if payload.image_url.is_some() {
        active.image_url = Set(payload.image_url);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(Utc::now().into());

    let updated = active.update(&state.db).await?;
    Ok(Json(updated))
}

/// Delete a vehicle. Blocked while any booking references it.
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let in_use = booking::Entity::find()
        .filter(booking::Column::VehicleId.eq(id))
        .one(&state.db)
        .await?;
    if in_use.is_some() {
        return Err(AppError::Conflict(
            "Vehicle has bookings and cannot be deleted".to_string(),
        ));
    }

    vehicle_image::Entity::delete_many()
        .filter(vehicle_image::Column::VehicleId.eq(id))
        .exec(&state.db)
        .await?;

    let result = vehicle::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Vehicle not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Vehicle deleted" })))
}

// ============ Vehicle Images ============

#[derive(Debug, Deserialize)]
pub struct AddImageRequest {
    pub url: String,
    pub alt: Option<String>,
}

/// Append an image to a vehicle's gallery
pub async fn add_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddImageRequest>,
) -> AppResult<Json<vehicle_image::Model>> {
    vehicle::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

    if payload.url.trim().is_empty() {
        return Err(AppError::BadRequest("Image URL is required".to_string()));
    }

    let existing = vehicle_image::Entity::find()
        .filter(vehicle_image::Column::VehicleId.eq(id))
        .all(&state.db)
        .await?;
    let next_order = existing.iter().map(|i| i.sort_order).max().unwrap_or(-1) + 1;

    let new_image = vehicle_image::ActiveModel {
        id: Set(Uuid::new_v4()),
        vehicle_id: Set(id),
        url: Set(payload.url.clone()),
        alt: Set(payload.alt.clone()),
        sort_order: Set(next_order),
    };

    let created = new_image.insert(&state.db).await?;
    Ok(Json(created))
}

#[derive(Debug, Deserialize)]
pub struct ReorderImagesRequest {
    pub image_ids: Vec<Uuid>,
}

/// Reorder a vehicle's gallery. The list must name every image exactly once.
pub async fn reorder_images(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReorderImagesRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let existing = vehicle_image::Entity::find()
        .filter(vehicle_image::Column::VehicleId.eq(id))
        .all(&state.db)
        .await?;

    if existing.len() != payload.image_ids.len()
        || !existing
            .iter()
            .all(|i| payload.image_ids.contains(&i.id))
    {
        return Err(AppError::BadRequest(
            "image_ids must contain every image of this vehicle exactly once".to_string(),
        ));
    }

    for (position, image_id) in payload.image_ids.iter().enumerate() {
        if let Some(image) = existing.iter().find(|i| i.id == *image_id) {
            let mut active: vehicle_image::ActiveModel = image.clone().into();
            active.sort_order = Set(position as i32);
            active.update(&state.db).await?;
        }
    }

    Ok(Json(serde_json::json!({ "message": "Images reordered" })))
}

/// Remove an image from a vehicle's gallery
pub async fn delete_image(
    State(state): State<AppState>,
    Path((id, image_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<serde_json::Value>> {
    let found = vehicle_image::Entity::find_by_id(image_id)
        .one(&state.db)
        .await?
        .filter(|i| i.vehicle_id == id)
        .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

    vehicle_image::Entity::delete_by_id(found.id)
        .exec(&state.db)
        .await?;

    Ok(Json(serde_json::json!({ "message": "Image deleted" })))
}
