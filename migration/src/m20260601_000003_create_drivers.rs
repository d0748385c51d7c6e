use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Driver::Table)
                    .if_not_exists()
                    .col(uuid(Driver::Id).primary_key())
                    .col(string_len(Driver::FirstName, 100).not_null())
                    .col(string_len(Driver::LastName, 100).not_null())
                    .col(string_len(Driver::Email, 255).not_null())
                    .col(string_len(Driver::Phone, 30).not_null())
                    .col(string_len_null(Driver::LicenseNumber, 50))
                    .col(string_len_null(Driver::LicenseClass, 20))
                    .col(date_null(Driver::LicenseExpiry))
                    .col(string_len_null(Driver::EmployeeNumber, 50))
                    .col(date_null(Driver::HireDate))
                    .col(text_null(Driver::Notes))
                    .col(boolean(Driver::IsActive).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(Driver::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Driver::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Driver::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Driver {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    LicenseNumber,
    LicenseClass,
    LicenseExpiry,
    EmployeeNumber,
    HireDate,
    Notes,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
