use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customer::Table)
                    .if_not_exists()
                    .col(uuid(Customer::Id).primary_key())
                    .col(string_len(Customer::Email, 255).not_null().unique_key())
                    .col(string_len(Customer::PasswordHash, 255).not_null())
                    .col(string_len(Customer::FirstName, 100).not_null())
                    .col(string_len(Customer::LastName, 100).not_null())
                    .col(string_len(Customer::Phone, 30).not_null())
                    .col(string_len_null(Customer::Company, 255))
                    .col(boolean(Customer::EmailVerified).not_null().default(false))
                    .col(string_len_null(Customer::VerifyToken, 64))
                    .col(string_len_null(Customer::ResetToken, 64))
                    .col(timestamp_with_time_zone_null(Customer::ResetTokenExpires))
                    .col(
                        timestamp_with_time_zone(Customer::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Customer::LastLogin))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Customer::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Customer {
    Table,
    Id,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    Phone,
    Company,
    EmailVerified,
    VerifyToken,
    ResetToken,
    ResetTokenExpires,
    CreatedAt,
    LastLogin,
}
