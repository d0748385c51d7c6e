use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create vehicle category enum
        manager
            .create_type(
                Type::create()
                    .as_enum(VehicleCategory::Enum)
                    .values([
                        VehicleCategory::Sedan,
                        VehicleCategory::Suv,
                        VehicleCategory::Luxury,
                        VehicleCategory::Van,
                        VehicleCategory::Bus,
                        VehicleCategory::Limousine,
                        VehicleCategory::Sprinter,
                        VehicleCategory::PartyBus,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Vehicle::Table)
                    .if_not_exists()
                    .col(uuid(Vehicle::Id).primary_key())
                    .col(string_len(Vehicle::Name, 255).not_null())
                    .col(
                        ColumnDef::new(Vehicle::Category)
                            .custom(VehicleCategory::Enum)
                            .not_null(),
                    )
                    .col(text_null(Vehicle::Description))
                    .col(text(Vehicle::Features).not_null().default("[]"))
                    .col(decimal_len(Vehicle::BasePrice, 10, 2).not_null())
                    .col(decimal_len(Vehicle::HourlyRate, 10, 2).not_null())
                    .col(string_len_null(Vehicle::ImageUrl, 512))
                    .col(boolean(Vehicle::IsActive).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(Vehicle::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Vehicle::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vehicle::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(VehicleCategory::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Vehicle {
    Table,
    Id,
    Name,
    Category,
    Description,
    Features,
    BasePrice,
    HourlyRate,
    ImageUrl,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum VehicleCategory {
    #[sea_orm(iden = "vehicle_category")]
    Enum,
    #[sea_orm(iden = "sedan")]
    Sedan,
    #[sea_orm(iden = "suv")]
    Suv,
    #[sea_orm(iden = "luxury")]
    Luxury,
    #[sea_orm(iden = "van")]
    Van,
    #[sea_orm(iden = "bus")]
    Bus,
    #[sea_orm(iden = "limousine")]
    Limousine,
    #[sea_orm(iden = "sprinter")]
    Sprinter,
    #[sea_orm(iden = "party_bus")]
    PartyBus,
}
