use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::{booking, driver};
use crate::error::{AppError, AppResult};
use crate::AppState;

/// List all drivers
pub async fn list_drivers(State(state): State<AppState>) -> AppResult<Json<Vec<driver::Model>>> {
    let drivers = driver::Entity::find()
        .order_by_asc(driver::Column::LastName)
        .all(&state.db)
        .await?;

    Ok(Json(drivers))
}

#[derive(Debug, Deserialize)]
pub struct CreateDriverRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub license_number: Option<String>,
    pub license_class: Option<String>,
    pub license_expiry: Option<NaiveDate>,
    pub employee_number: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Add a driver
pub async fn create_driver(
    State(state): State<AppState>,
    Json(payload): Json<CreateDriverRequest>,
) -> AppResult<Json<driver::Model>> {
    for (field, value) in [
        ("first_name", &payload.first_name),
        ("last_name", &payload.last_name),
        ("email", &payload.email),
        ("phone", &payload.phone),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("{} is required", field)));
        }
    }

    let new_driver = driver::ActiveModel {
        id: Set(Uuid::new_v4()),
        first_name: Set(payload.first_name.clone()),
        last_name: Set(payload.last_name.clone()),
        email: Set(payload.email.clone()),
        phone: Set(payload.phone.clone()),
        license_number: Set(payload.license_number.clone()),
        license_class: Set(payload.license_class.clone()),
        license_expiry: Set(payload.license_expiry),
        employee_number: Set(payload.employee_number.clone()),
        hire_date: Set(payload.hire_date),
        notes: Set(payload.notes.clone()),
        is_active: Set(true),
        ..Default::default()
    };

    let created = new_driver.insert(&state.db).await?;
    Ok(Json(created))
}

#[derive(Debug, Deserialize)]
pub struct UpdateDriverRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub license_class: Option<String>,
    pub license_expiry: Option<NaiveDate>,
    pub employee_number: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

/// Update a driver
pub async fn update_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDriverRequest>,
) -> AppResult<Json<driver::Model>> {
    let found = driver::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Driver not found".to_string()))?;

    let mut active: driver::ActiveModel = found.into();

    if let Some(first_name) = payload.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = payload.last_name {
        active.last_name = Set(last_name);
    }
    if let Some(email) = payload.email {
        active.email = Set(email);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(phone);
    }
    if payload.license_number.is_some() {
        active.license_number = Set(payload.license_number);
    }
    if payload.license_class.is_some() {
        active.license_class = Set(payload.license_class);
    }
    if payload.license_expiry.is_some() {
        active.license_expiry = Set(payload.license_expiry);
    }
    if payload.employee_number.is_some() {
        active.employee_number = Set(payload.employee_number);
    }
    if payload.hire_date.is_some() {
        active.hire_date = Set(payload.hire_date);
    }
    if payload.notes.is_some() {
        active.notes = Set(payload.notes);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(Utc::now().into());

    let updated = active.update(&state.db).await?;
    Ok(Json(updated))
}

/// Delete a driver. Blocked while any booking references them.
pub async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let in_use = booking::Entity::find()
        .filter(booking::Column::DriverId.eq(id))
        .one(&state.db)
        .await?;
    if in_use.is_some() {
        return Err(AppError::Conflict(
            "Driver has bookings and cannot be deleted".to_string(),
        ));
    }

    let result = driver::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Driver not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Driver deleted" })))
}
