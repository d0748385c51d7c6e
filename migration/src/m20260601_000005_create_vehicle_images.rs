use sea_orm_migration::{prelude::*, schema::*};

use super::m20260601_000004_create_vehicles::Vehicle;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VehicleImage::Table)
                    .if_not_exists()
                    .col(uuid(VehicleImage::Id).primary_key())
                    .col(uuid(VehicleImage::VehicleId).not_null())
                    .col(string_len(VehicleImage::Url, 512).not_null())
                    .col(string_len_null(VehicleImage::Alt, 255))
                    .col(integer(VehicleImage::SortOrder).not_null().default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicle_image_vehicle")
                            .from(VehicleImage::Table, VehicleImage::VehicleId)
                            .to(Vehicle::Table, Vehicle::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VehicleImage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum VehicleImage {
    Table,
    Id,
    VehicleId,
    Url,
    Alt,
    SortOrder,
}
