pub use sea_orm_migration::prelude::*;

mod m20260601_000001_create_admin_users;
mod m20260601_000002_create_customers;
mod m20260601_000003_create_drivers;
mod m20260601_000004_create_vehicles;
mod m20260601_000005_create_vehicle_images;
mod m20260601_000006_create_promo_codes;
mod m20260601_000007_create_quotes;
mod m20260601_000008_create_bookings;
mod m20260601_000009_create_invoices;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260601_000001_create_admin_users::Migration),
            Box::new(m20260601_000002_create_customers::Migration),
            Box::new(m20260601_000003_create_drivers::Migration),
            Box::new(m20260601_000004_create_vehicles::Migration),
            Box::new(m20260601_000005_create_vehicle_images::Migration),
            Box::new(m20260601_000006_create_promo_codes::Migration),
            Box::new(m20260601_000007_create_quotes::Migration),
            Box::new(m20260601_000008_create_bookings::Migration),
            Box::new(m20260601_000009_create_invoices::Migration),
        ]
    }
}
