//! Line items of a sale.
//!
//! The product name is copied onto the row at sale time so invoices
//! survive later product renames or deletions.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItem {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity_milli: i64,
    pub price_minor: i64,
    pub total_minor: i64,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "sale_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub sale_id: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity_milli: i64,
    pub price_minor: i64,
    pub total_minor: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sales::Entity",
        from = "Column::SaleId",
        to = "super::sales::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Sales,
}

impl Related<super::sales::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sales.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for SaleItem {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "sale item")?,
            product_id: util::parse_uuid(&model.product_id, "product")?,
            product_name: model.product_name,
            quantity_milli: model.quantity_milli,
            price_minor: model.price_minor,
            total_minor: model.total_minor,
        })
    }
}

/// Input line for [`crate::Engine::create_sale`].
#[derive(Clone, Debug)]
pub struct NewSaleItem {
    pub product_id: Uuid,
    pub quantity_milli: i64,
    /// Overrides the product's current price when present.
    pub price_minor: Option<i64>,
}
