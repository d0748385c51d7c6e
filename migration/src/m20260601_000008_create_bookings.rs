use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20260601_000002_create_customers::Customer;
use super::m20260601_000003_create_drivers::Driver;
use super::m20260601_000004_create_vehicles::Vehicle;
use super::m20260601_000007_create_quotes::Quote;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create booking status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(BookingStatus::Enum)
                    .values([
                        BookingStatus::Confirmed,
                        BookingStatus::InProgress,
                        BookingStatus::Completed,
                        BookingStatus::Cancelled,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(uuid(Booking::Id).primary_key())
                    .col(string_len(Booking::BookingNumber, 30).not_null().unique_key())
                    .col(uuid(Booking::CustomerId).not_null())
                    .col(uuid_null(Booking::QuoteId))
                    .col(uuid_null(Booking::VehicleId))
                    .col(uuid_null(Booking::DriverId))
                    .col(string_len(Booking::EventType, 100).not_null())
                    .col(timestamp_with_time_zone(Booking::EventDate).not_null())
                    .col(string_len(Booking::ServiceType, 100).not_null())
                    .col(string_len(Booking::PickupTime, 20).not_null())
                    .col(string_len(Booking::PickupLocation, 512).not_null())
                    .col(string_len_null(Booking::DropoffLocation, 512))
                    .col(integer(Booking::NumberOfPassengers).not_null())
                    .col(integer_null(Booking::NumberOfHours))
                    .col(text_null(Booking::SpecialRequests))
                    .col(string_len_null(Booking::DriverName, 255))
                    .col(string_len_null(Booking::DriverPhone, 30))
                    .col(text_null(Booking::VehicleDetails))
                    .col(decimal_len(Booking::TotalPrice, 10, 2).not_null())
                    .col(
                        decimal_len(Booking::PaidAmount, 10, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Booking::Status)
                            .custom(BookingStatus::Enum)
                            .not_null(),
                    )
                    .col(text_null(Booking::Notes))
                    .col(timestamp_with_time_zone_null(Booking::ConfirmedAt))
                    .col(
                        timestamp_with_time_zone(Booking::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Booking::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_customer")
                            .from(Booking::Table, Booking::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_quote")
                            .from(Booking::Table, Booking::QuoteId)
                            .to(Quote::Table, Quote::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_vehicle")
                            .from(Booking::Table, Booking::VehicleId)
                            .to(Vehicle::Table, Vehicle::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_driver")
                            .from(Booking::Table, Booking::DriverId)
                            .to(Driver::Table, Driver::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(BookingStatus::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    Table,
    Id,
    BookingNumber,
    CustomerId,
    QuoteId,
    VehicleId,
    DriverId,
    EventType,
    EventDate,
    ServiceType,
    PickupTime,
    PickupLocation,
    DropoffLocation,
    NumberOfPassengers,
    NumberOfHours,
    SpecialRequests,
    DriverName,
    DriverPhone,
    VehicleDetails,
    TotalPrice,
    PaidAmount,
    Status,
    Notes,
    ConfirmedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum BookingStatus {
    #[sea_orm(iden = "booking_status")]
    Enum,
    #[sea_orm(iden = "confirmed")]
    Confirmed,
    #[sea_orm(iden = "in_progress")]
    InProgress,
    #[sea_orm(iden = "completed")]
    Completed,
    #[sea_orm(iden = "cancelled")]
    Cancelled,
}
