use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20260601_000002_create_customers::Customer;
use super::m20260601_000006_create_promo_codes::PromoCode;
use super::m20260601_000008_create_bookings::Booking;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create payment status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(PaymentStatus::Enum)
                    .values([
                        PaymentStatus::Pending,
                        PaymentStatus::PartiallyPaid,
                        PaymentStatus::Paid,
                        PaymentStatus::Overdue,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Invoice::Table)
                    .if_not_exists()
                    .col(uuid(Invoice::Id).primary_key())
                    .col(string_len(Invoice::InvoiceNumber, 30).not_null().unique_key())
                    .col(uuid(Invoice::BookingId).not_null())
                    .col(uuid(Invoice::CustomerId).not_null())
                    .col(decimal_len(Invoice::Subtotal, 10, 2).not_null())
                    .col(uuid_null(Invoice::PromoCodeId))
                    .col(
                        decimal_len(Invoice::PromoDiscount, 10, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(decimal_len(Invoice::Tax, 10, 2).not_null().default(0))
                    .col(decimal_len(Invoice::Total, 10, 2).not_null())
                    .col(
                        ColumnDef::new(Invoice::PaymentStatus)
                            .custom(PaymentStatus::Enum)
                            .not_null(),
                    )
                    .col(string_len_null(Invoice::PaymentMethod, 100))
                    .col(timestamp_with_time_zone_null(Invoice::PaidAt))
                    .col(date_null(Invoice::DueDate))
                    .col(text_null(Invoice::Notes))
                    .col(
                        timestamp_with_time_zone(Invoice::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoice_booking")
                            .from(Invoice::Table, Invoice::BookingId)
                            .to(Booking::Table, Booking::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoice_customer")
                            .from(Invoice::Table, Invoice::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoice_promo_code")
                            .from(Invoice::Table, Invoice::PromoCodeId)
                            .to(PromoCode::Table, PromoCode::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Invoice::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(PaymentStatus::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Invoice {
    Table,
    Id,
    InvoiceNumber,
    BookingId,
    CustomerId,
    Subtotal,
    PromoCodeId,
    PromoDiscount,
    Tax,
    Total,
    PaymentStatus,
    PaymentMethod,
    PaidAt,
    DueDate,
    Notes,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum PaymentStatus {
    #[sea_orm(iden = "payment_status")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "partially_paid")]
    PartiallyPaid,
    #[sea_orm(iden = "paid")]
    Paid,
    #[sea_orm(iden = "overdue")]
    Overdue,
}
