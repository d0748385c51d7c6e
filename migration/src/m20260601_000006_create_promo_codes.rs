use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create discount type enum
        manager
            .create_type(
                Type::create()
                    .as_enum(DiscountType::Enum)
                    .values([DiscountType::Percentage, DiscountType::FixedAmount])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PromoCode::Table)
                    .if_not_exists()
                    .col(uuid(PromoCode::Id).primary_key())
                    .col(string_len(PromoCode::Code, 50).not_null().unique_key())
                    .col(text_null(PromoCode::Description))
                    .col(
                        ColumnDef::new(PromoCode::DiscountType)
                            .custom(DiscountType::Enum)
                            .not_null(),
                    )
                    .col(decimal_len(PromoCode::DiscountValue, 10, 2).not_null())
                    .col(decimal_len_null(PromoCode::MinBookingAmount, 10, 2))
                    .col(decimal_len_null(PromoCode::MaxDiscount, 10, 2))
                    .col(integer_null(PromoCode::UsageLimit))
                    .col(integer(PromoCode::UsageCount).not_null().default(0))
                    .col(timestamp_with_time_zone(PromoCode::ValidFrom).not_null())
                    .col(timestamp_with_time_zone(PromoCode::ValidUntil).not_null())
                    .col(
                        text(PromoCode::ApplicableServices)
                            .not_null()
                            .default("[]"),
                    )
                    .col(boolean(PromoCode::IsActive).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(PromoCode::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(PromoCode::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PromoCode::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(DiscountType::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PromoCode {
    Table,
    Id,
    Code,
    Description,
    DiscountType,
    DiscountValue,
    MinBookingAmount,
    MaxDiscount,
    UsageLimit,
    UsageCount,
    ValidFrom,
    ValidUntil,
    ApplicableServices,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum DiscountType {
    #[sea_orm(iden = "discount_type")]
    Enum,
    #[sea_orm(iden = "percentage")]
    Percentage,
    #[sea_orm(iden = "fixed_amount")]
    FixedAmount,
}
