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

use crate::domain::features::encode_features;
use crate::domain::promo::{check_eligibility, discount_amount};
use crate::entities::invoice;
use crate::entities::promo_code::{self, DiscountType};
use crate::error::{AppError, AppResult};
use crate::AppState;

fn validate_discount(discount_type: DiscountType, value: Decimal) -> AppResult<()> {
    match discount_type {
        DiscountType::Percentage => {
            if value <= Decimal::ZERO || value > Decimal::from(100) {
                return Err(AppError::BadRequest(
                    "Percentage discount must be between 0 and 100".to_string(),
                ));
            }
        }
        DiscountType::FixedAmount => {
            if value <= Decimal::ZERO {
                return Err(AppError::BadRequest(
                    "Fixed discount must be positive".to_string(),
                ));
            }
        }
    }
    Ok(())
}

/// List all promo codes
pub async fn list_promo_codes(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<promo_code::Model>>> {
    let codes = promo_code::Entity::find()
        .order_by_desc(promo_code::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(codes))
}

#[derive(Debug, Deserialize)]
pub struct CreatePromoCodeRequest {
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_booking_amount: Option<Decimal>,
    pub max_discount: Option<Decimal>,
    pub usage_limit: Option<i32>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub applicable_services: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

/// Create a promo code
pub async fn create_promo_code(
    State(state): State<AppState>,
    Json(payload): Json<CreatePromoCodeRequest>,
) -> AppResult<Json<promo_code::Model>> {
    let code = payload.code.trim().to_uppercase();
    if code.is_empty() {
        return Err(AppError::BadRequest("Code is required".to_string()));
    }
    validate_discount(payload.discount_type, payload.discount_value)?;
    if payload.valid_until <= payload.valid_from {
        return Err(AppError::BadRequest(
            "valid_until must be after valid_from".to_string(),
        ));
    }

    let existing = promo_code::Entity::find()
        .filter(promo_code::Column::Code.eq(&code))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Code already exists".to_string()));
    }

    let services = payload.applicable_services.clone().unwrap_or_default();

    let new_code = promo_code::ActiveModel {
        id: Set(Uuid::new_v4()),
        code: Set(code),
        description: Set(payload.description.clone()),
        discount_type: Set(payload.discount_type),
        discount_value: Set(payload.discount_value),
        min_booking_amount: Set(payload.min_booking_amount),
        max_discount: Set(payload.max_discount),
        usage_limit: Set(payload.usage_limit),
        usage_count: Set(0),
        valid_from: Set(payload.valid_from.into()),
        valid_until: Set(payload.valid_until.into()),
        applicable_services: Set(encode_features(&services)),
        is_active: Set(payload.is_active.unwrap_or(true)),
        ..Default::default()
    };

    let created = new_code.insert(&state.db).await?;
    Ok(Json(created))
}

#[derive(Debug, Deserialize)]
pub struct UpdatePromoCodeRequest {
    pub description: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<Decimal>,
    pub min_booking_amount: Option<Decimal>,
    pub max_discount: Option<Decimal>,
    pub usage_limit: Option<i32>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub applicable_services: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

/// Update a promo code. The code itself is immutable once issued.
pub async fn update_promo_code(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePromoCodeRequest>,
) -> AppResult<Json<promo_code::Model>> {
    let found = promo_code::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Promo code not found".to_string()))?;

    let discount_type = payload.discount_type.unwrap_or(found.discount_type);
    let discount_value = payload.discount_value.unwrap_or(found.discount_value);
    validate_discount(discount_type, discount_value)?;

    let valid_from = payload
        .valid_from
        .unwrap_or(found.valid_from.with_timezone(&Utc));
    let valid_until = payload
        .valid_until
        .unwrap_or(found.valid_until.with_timezone(&Utc));
    if valid_until <= valid_from {
        return Err(AppError::BadRequest(
            "valid_until must be after valid_from".to_string(),
        ));
    }

    let mut active: promo_code::ActiveModel = found.into();

    if payload.description.is_some() {
        active.description = Set(payload.description);
    }
    active.discount_type = Set(discount_type);
    active.discount_value = Set(discount_value);
    if payload.min_booking_amount.is_some() {
        active.min_booking_amount = Set(payload.min_booking_amount);
    }
    if payload.max_discount.is_some() {
        active.max_discount = Set(payload.max_discount);
    }
    if payload.usage_limit.is_some() {
        active.usage_limit = Set(payload.usage_limit);
    }
    active.valid_from = Set(valid_from.into());
    active.valid_until = Set(valid_until.into());
    if let Some(services) = payload.applicable_services {
        active.applicable_services = Set(encode_features(&services));
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(Utc::now().into());

    let updated = active.update(&state.db).await?;
    Ok(Json(updated))
}

/// Delete a promo code. Blocked once any invoice has applied it;
/// deactivate instead.
pub async fn delete_promo_code(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let in_use = invoice::Entity::find()
        .filter(invoice::Column::PromoCodeId.eq(id))
        .one(&state.db)
        .await?;
    if in_use.is_some() {
        return Err(AppError::Conflict(
            "Promo code has been applied to invoices and cannot be deleted".to_string(),
        ));
    }

    let result = promo_code::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Promo code not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Promo code deleted" })))
}

// ============ Validation Preview ============

#[derive(Debug, Deserialize)]
pub struct ValidatePromoCodeRequest {
    pub code: String,
    pub subtotal: Decimal,
    pub service_type: String,
}

#[derive(Debug, Serialize)]
pub struct ValidatePromoCodeResponse {
    pub valid: bool,
    pub discount: Decimal,
    pub subtotal_after_discount: Decimal,
}

/// Preview the discount a code would produce for a subtotal, without
/// consuming a use.
pub async fn validate_promo_code(
    State(state): State<AppState>,
    Json(payload): Json<ValidatePromoCodeRequest>,
) -> AppResult<Json<ValidatePromoCodeResponse>> {
    let code = payload.code.trim().to_uppercase();
    let found = promo_code::Entity::find()
        .filter(promo_code::Column::Code.eq(&code))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::BadRequest("Unknown promo code".to_string()))?;

    check_eligibility(&found, payload.subtotal, &payload.service_type, Utc::now())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let discount = discount_amount(&found, payload.subtotal);

    Ok(Json(ValidatePromoCodeResponse {
        valid: true,
        discount,
        subtotal_after_discount: payload.subtotal - discount,
    }))
}
