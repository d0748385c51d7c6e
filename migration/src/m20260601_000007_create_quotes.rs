use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create quote status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(QuoteStatus::Enum)
                    .values([
                        QuoteStatus::Pending,
                        QuoteStatus::Reviewing,
                        QuoteStatus::Quoted,
                        QuoteStatus::Accepted,
                        QuoteStatus::Completed,
                        QuoteStatus::Declined,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Quote::Table)
                    .if_not_exists()
                    .col(uuid(Quote::Id).primary_key())
                    .col(string_len(Quote::QuoteNumber, 30).not_null().unique_key())
                    .col(string_len(Quote::Name, 255).not_null())
                    .col(string_len(Quote::Email, 255).not_null())
                    .col(string_len(Quote::Phone, 30).not_null())
                    .col(string_len_null(Quote::Company, 255))
                    .col(string_len(Quote::ServiceType, 100).not_null())
                    .col(string_len(Quote::EventType, 100).not_null())
                    .col(timestamp_with_time_zone(Quote::EventDate).not_null())
                    .col(string_len(Quote::PickupTime, 20).not_null())
                    .col(integer(Quote::NumberOfPassengers).not_null())
                    .col(integer_null(Quote::NumberOfHours))
                    .col(string_len(Quote::PickupLocation, 512).not_null())
                    .col(string_len_null(Quote::DropoffLocation, 512))
                    .col(text_null(Quote::SpecialRequests))
                    .col(
                        ColumnDef::new(Quote::Status)
                            .custom(QuoteStatus::Enum)
                            .not_null(),
                    )
                    .col(decimal_len_null(Quote::QuotedPrice, 10, 2))
                    .col(text_null(Quote::Notes))
                    .col(timestamp_with_time_zone_null(Quote::RespondedAt))
                    .col(
                        timestamp_with_time_zone(Quote::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Quote::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Quote::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(QuoteStatus::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Quote {
    Table,
    Id,
    QuoteNumber,
    Name,
    Email,
    Phone,
    Company,
    ServiceType,
    EventType,
    EventDate,
    PickupTime,
    NumberOfPassengers,
    NumberOfHours,
    PickupLocation,
    DropoffLocation,
    SpecialRequests,
    Status,
    QuotedPrice,
    Notes,
    RespondedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum QuoteStatus {
    #[sea_orm(iden = "quote_status")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "reviewing")]
    Reviewing,
    #[sea_orm(iden = "quoted")]
    Quoted,
    #[sea_orm(iden = "accepted")]
    Accepted,
    #[sea_orm(iden = "completed")]
    Completed,
    #[sea_orm(iden = "declined")]
    Declined,
}
