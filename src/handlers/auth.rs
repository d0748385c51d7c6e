use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, Json};
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{admin_user, customer};
use crate::error::{AppError, AppResult};
use crate::notify::{send_best_effort, templates, OutboundEmail};
use crate::utils::jwt::{create_token, PrincipalRole};
use crate::AppState;

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<()> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Failed to parse password hash: {}", e)))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized("Invalid email or password".to_string()))
}

// ============ Admin ============

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AdminAuthResponse {
    pub token: String,
    pub admin: AdminInfo,
}

#[derive(Debug, Serialize)]
pub struct AdminInfo {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// Login to the admin portal
pub async fn admin_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AdminAuthResponse>> {
    let admin = admin_user::Entity::find()
        .filter(admin_user::Column::Email.eq(&payload.email))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    verify_password(&payload.password, &admin.password_hash)?;

    let token = create_token(
        admin.id,
        &admin.email,
        PrincipalRole::Admin,
        &state.config.jwt_secret,
        state.config.jwt_expiration_hours,
    )?;

    Ok(Json(AdminAuthResponse {
        token,
        admin: AdminInfo {
            id: admin.id,
            email: admin.email,
            name: admin.name,
        },
    }))
}

// ============ Customer ============

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub company: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CustomerAuthResponse {
    pub token: String,
    pub customer: CustomerInfo,
}

#[derive(Debug, Serialize)]
pub struct CustomerInfo {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub company: Option<String>,
    pub email_verified: bool,
}

impl CustomerInfo {
    pub fn from_model(c: customer::Model) -> Self {
        Self {
            id: c.id,
            email: c.email,
            first_name: c.first_name,
            last_name: c.last_name,
            phone: c.phone,
            company: c.company,
            email_verified: c.email_verified,
        }
    }
}

/// Register a new customer account
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<CustomerAuthResponse>> {
    if payload.email.trim().is_empty() || !payload.email.contains('@') {
        return Err(AppError::BadRequest("A valid email is required".to_string()));
    }
    if payload.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let existing = customer::Entity::find()
        .filter(customer::Column::Email.eq(&payload.email))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = hash_password(&payload.password)?;
    let verify_token = Uuid::new_v4().simple().to_string();

    let new_customer = customer::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(payload.email.clone()),
        password_hash: Set(password_hash),
        first_name: Set(payload.first_name.clone()),
        last_name: Set(payload.last_name.clone()),
        phone: Set(payload.phone.clone()),
        company: Set(payload.company.clone()),
        email_verified: Set(false),
        verify_token: Set(Some(verify_token.clone())),
        ..Default::default()
    };

    let created = new_customer.insert(&state.db).await?;

    let (subject, html) =
        templates::verification_email(&created.first_name, &state.config.site_url, &verify_token);
    send_best_effort(
        state.mailer.as_ref(),
        OutboundEmail {
            to: created.email.clone(),
            subject,
            html,
        },
    )
    .await;

    let token = create_token(
        created.id,
        &created.email,
        PrincipalRole::Customer,
        &state.config.jwt_secret,
        state.config.jwt_expiration_hours,
    )?;

    Ok(Json(CustomerAuthResponse {
        token,
        customer: CustomerInfo::from_model(created),
    }))
}

/// Login with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<CustomerAuthResponse>> {
    let found = customer::Entity::find()
        .filter(customer::Column::Email.eq(&payload.email))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    verify_password(&payload.password, &found.password_hash)?;

    let mut active: customer::ActiveModel = found.into();
    active.last_login = Set(Some(Utc::now().into()));
    let updated = active.update(&state.db).await?;

    let token = create_token(
        updated.id,
        &updated.email,
        PrincipalRole::Customer,
        &state.config.jwt_secret,
        state.config.jwt_expiration_hours,
    )?;

    Ok(Json(CustomerAuthResponse {
        token,
        customer: CustomerInfo::from_model(updated),
    }))
}

/// Logout. Tokens are stateless; the client discards its copy.
pub async fn logout() -> AppResult<Json<serde_json::Value>> {
    Ok(Json(serde_json::json!({ "message": "Logged out" })))
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

/// Confirm a customer's email address from the emailed link
pub async fn verify_email(
    State(state): State<AppState>,
    Json(payload): Json<VerifyEmailRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let found = customer::Entity::find()
        .filter(customer::Column::VerifyToken.eq(&payload.token))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid or expired verification token".to_string()))?;

    let mut active: customer::ActiveModel = found.into();
    active.email_verified = Set(true);
    active.verify_token = Set(None);
    active.update(&state.db).await?;

    Ok(Json(serde_json::json!({ "message": "Email verified" })))
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Request a password-reset link. Responds identically whether or not the
/// email matches an account.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let found = customer::Entity::find()
        .filter(customer::Column::Email.eq(&payload.email))
        .one(&state.db)
        .await?;

    if let Some(found) = found {
        let reset_token = Uuid::new_v4().simple().to_string();

        let first_name = found.first_name.clone();
        let email = found.email.clone();

        let mut active: customer::ActiveModel = found.into();
        active.reset_token = Set(Some(reset_token.clone()));
        active.reset_token_expires = Set(Some((Utc::now() + Duration::hours(1)).into()));
        active.update(&state.db).await?;

        let (subject, html) =
            templates::password_reset_email(&first_name, &state.config.site_url, &reset_token);
        send_best_effort(
            state.mailer.as_ref(),
            OutboundEmail {
                to: email,
                subject,
                html,
            },
        )
        .await;
    }

    Ok(Json(serde_json::json!({
        "message": "If that email has an account, a reset link has been sent"
    })))
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// Set a new password from the emailed reset link
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if payload.new_password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let found = customer::Entity::find()
        .filter(customer::Column::ResetToken.eq(&payload.token))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid or expired reset token".to_string()))?;

    let expired = match found.reset_token_expires {
        Some(expires) => expires.with_timezone(&Utc) < Utc::now(),
        None => true,
    };
    if expired {
        return Err(AppError::BadRequest(
            "Invalid or expired reset token".to_string(),
        ));
    }

    let password_hash = hash_password(&payload.new_password)?;

    let mut active: customer::ActiveModel = found.into();
    active.password_hash = Set(password_hash);
    active.reset_token = Set(None);
    active.reset_token_expires = Set(None);
    active.update(&state.db).await?;

    Ok(Json(serde_json::json!({ "message": "Password updated" })))
}
