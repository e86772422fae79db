//! The module contains `StockItem`, a raw-material inventory row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: Uuid,
    pub name: String,
    /// Quantity in thousandths of `unit`.
    pub quantity_milli: i64,
    pub unit: String,
    pub description: String,
    pub received_on: Date,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "stock_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner: String,
    pub name: String,
    pub quantity_milli: i64,
    pub unit: String,
    pub description: String,
    pub received_on: Date,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Owner",
        to = "super::users::Column::Username",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for StockItem {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "stock item")?,
            name: model.name,
            quantity_milli: model.quantity_milli,
            unit: model.unit,
            description: model.description,
            received_on: model.received_on,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Input for [`crate::Engine::create_stock_item`].
#[derive(Clone, Debug)]
pub struct NewStockItem {
    pub name: String,
    pub quantity_milli: i64,
    pub unit: String,
    pub description: Option<String>,
    pub received_on: Option<Date>,
}

/// Partial update for [`crate::Engine::update_stock_item`].
#[derive(Clone, Debug, Default)]
pub struct StockItemChanges {
    pub name: Option<String>,
    pub quantity_milli: Option<i64>,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub received_on: Option<Date>,
}
