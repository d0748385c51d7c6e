use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{admin, auth, customer, public};
use crate::middleware::auth::{auth_middleware, require_admin, require_customer};
use crate::middleware::rate_limit::{create_customer_governor, create_public_governor};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let customer_governor = create_customer_governor();
    // IP-based governor for everything reachable without a token
    let public_governor = create_public_governor();

    // Public marketing-site routes
    let public_routes = Router::new()
        .route("/quotes", post(public::submit_quote))
        .route("/fleet", get(public::list_fleet))
        .route("/fleet/{id}", get(public::get_vehicle))
        .layer(public_governor.clone());

    // Customer account routes that work without a session
    let customer_public_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/verify-email", post(auth::verify_email))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password", post(auth::reset_password))
        .layer(public_governor.clone());

    // Customer portal routes (requires auth + customer principal)
    let customer_routes = Router::new()
        .route("/me", get(customer::me))
        .route("/profile", get(customer::me))
        .route("/profile", put(customer::update_profile))
        .route("/change-password", post(customer::change_password))
        .route("/bookings", get(customer::my_bookings))
        .route("/invoices", get(customer::my_invoices))
        .route("/promotions", get(customer::promotions))
        .layer(customer_governor)
        .layer(middleware::from_fn(require_customer))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Admin login is public (IP rate-limited); the rest requires the admin principal
    let admin_public_routes = Router::new()
        .route("/login", post(auth::admin_login))
        .route("/logout", post(auth::logout))
        .layer(public_governor);

    let admin_routes = Router::new()
        // Quote management
        .route("/quotes", get(admin::quotes::list_quotes))
        .route("/quotes/{id}", get(admin::quotes::get_quote))
        .route("/quotes/{id}", put(admin::quotes::update_quote))
        .route("/quotes/{id}/status", put(admin::quotes::update_quote_status))
        .route("/quotes/{id}/convert", post(admin::quotes::convert_quote))
        // Booking management
        .route("/bookings", get(admin::bookings::list_bookings))
        .route("/bookings", post(admin::bookings::create_booking))
        .route("/bookings/{id}", get(admin::bookings::get_booking))
        .route("/bookings/{id}", put(admin::bookings::update_booking))
        .route("/bookings/{id}/assign", put(admin::bookings::assign_booking))
        .route("/bookings/{id}/status", put(admin::bookings::update_booking_status))
        // Invoices
        .route("/invoices", get(admin::invoices::list_invoices))
        .route("/invoices", post(admin::invoices::create_invoice))
        .route("/invoices/{id}", get(admin::invoices::get_invoice))
        .route("/invoices/{id}/payment", put(admin::invoices::update_payment))
        // Fleet
        .route("/fleet", get(admin::fleet::list_vehicles))
        .route("/fleet", post(admin::fleet::create_vehicle))
        .route("/fleet/{id}", get(admin::fleet::get_vehicle))
        .route("/fleet/{id}", put(admin::fleet::update_vehicle))
        .route("/fleet/{id}", delete(admin::fleet::delete_vehicle))
        .route("/fleet/{id}/images", post(admin::fleet::add_image))
        .route("/fleet/{id}/images", put(admin::fleet::reorder_images))
        .route("/fleet/{id}/images/{image_id}", delete(admin::fleet::delete_image))
        // Drivers
        .route("/drivers", get(admin::drivers::list_drivers))
        .route("/drivers", post(admin::drivers::create_driver))
        .route("/drivers/{id}", put(admin::drivers::update_driver))
        .route("/drivers/{id}", delete(admin::drivers::delete_driver))
        // Promo codes
        .route("/promo-codes", get(admin::promo_codes::list_promo_codes))
        .route("/promo-codes", post(admin::promo_codes::create_promo_code))
        .route("/promo-codes/{id}", put(admin::promo_codes::update_promo_code))
        .route("/promo-codes/{id}", delete(admin::promo_codes::delete_promo_code))
        .route("/promo-codes/validate", post(admin::promo_codes::validate_promo_code))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .nest("/api", public_routes)
        .nest("/api/customer", customer_public_routes.merge(customer_routes))
        .nest("/api/admin", admin_public_routes.merge(admin_routes))
        .with_state(state)
}
