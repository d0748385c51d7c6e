use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Canonical vehicle categories. The legacy data had `LIMO` and
/// `SPRINTER_VAN` spellings from a second intake form; those are accepted
/// on input and collapsed here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "vehicle_category")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleCategory {
    #[sea_orm(string_value = "sedan")]
    Sedan,
    #[sea_orm(string_value = "suv")]
    Suv,
    #[sea_orm(string_value = "luxury")]
    Luxury,
    #[sea_orm(string_value = "van")]
    Van,
    #[sea_orm(string_value = "bus")]
    Bus,
    #[sea_orm(string_value = "limousine")]
    #[serde(alias = "LIMO")]
    Limousine,
    #[sea_orm(string_value = "sprinter")]
    #[serde(alias = "SPRINTER_VAN")]
    Sprinter,
    #[sea_orm(string_value = "party_bus")]
    PartyBus,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicle")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub category: VehicleCategory,
    pub description: Option<String>,
    /// JSON-encoded array of feature strings, normalized on write.
    pub features: String,
    pub base_price: Decimal,
    pub hourly_rate: Decimal,
    /// Legacy singular image, used when no vehicle_image rows exist.
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::vehicle_image::Entity")]
    Images,
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
}

impl Related<super::vehicle_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
