//! Plain-format HTML bodies for the transactional emails.

use crate::entities::quote;

pub fn quote_confirmation(quote: &quote::Model) -> (String, String) {
    let subject = format!("We received your quote request {}", quote.quote_number);
    let html = format!(
        "<h2>Thank you, {name}!</h2>\
         <p>Your quote request <strong>{number}</strong> has been received. \
         Our team will review it and get back to you with pricing shortly.</p>\
         <p>Service: {service}<br>\
         Event date: {date}<br>\
         Pickup: {pickup}</p>",
        name = quote.name,
        number = quote.quote_number,
        service = quote.service_type,
        date = quote.event_date.format("%Y-%m-%d"),
        pickup = quote.pickup_location,
    );
    (subject, html)
}

pub fn quote_business_notification(quote: &quote::Model) -> (String, String) {
    let subject = format!("New quote request {}", quote.quote_number);
    let html = format!(
        "<h2>New quote request</h2>\
         <p><strong>{number}</strong> from {name} ({email}, {phone})</p>\
         <p>Service: {service} / {event}<br>\
         Event date: {date} at {time}<br>\
         Passengers: {passengers}<br>\
         Pickup: {pickup}</p>",
        number = quote.quote_number,
        name = quote.name,
        email = quote.email,
        phone = quote.phone,
        service = quote.service_type,
        event = quote.event_type,
        date = quote.event_date.format("%Y-%m-%d"),
        time = quote.pickup_time,
        passengers = quote.number_of_passengers,
        pickup = quote.pickup_location,
    );
    (subject, html)
}

pub fn verification_email(first_name: &str, site_url: &str, token: &str) -> (String, String) {
    let subject = "Verify your email address".to_string();
    let html = format!(
        "<h2>Welcome, {first_name}!</h2>\
         <p>Please confirm your email address to finish setting up your account:</p>\
         <p><a href=\"{site_url}/verify-email?token={token}\">Verify email</a></p>",
    );
    (subject, html)
}

pub fn password_reset_email(first_name: &str, site_url: &str, token: &str) -> (String, String) {
    let subject = "Reset your password".to_string();
    let html = format!(
        "<h2>Hi {first_name},</h2>\
         <p>We received a request to reset your password. The link below is \
         valid for one hour:</p>\
         <p><a href=\"{site_url}/reset-password?token={token}\">Reset password</a></p>\
         <p>If you did not request this, you can ignore this email.</p>",
    );
    (subject, html)
}
