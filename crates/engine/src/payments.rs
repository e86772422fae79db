//! Payment ledger rows attached to a sale.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: Uuid,
    pub paid_on: Date,
    pub amount_minor: i64,
    pub method: String,
    pub note: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub sale_id: String,
    pub paid_on: Date,
    pub amount_minor: i64,
    pub method: String,
    pub note: Option<String>,
    pub created_at: DateTimeUtc,
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

impl TryFrom<Model> for PaymentRecord {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "payment")?,
            paid_on: model.paid_on,
            amount_minor: model.amount_minor,
            method: model.method,
            note: model.note,
            created_at: model.created_at,
        })
    }
}

/// Input for [`crate::Engine::record_payment`].
#[derive(Clone, Debug)]
pub struct NewPayment {
    pub amount_minor: i64,
    pub method: Option<String>,
    pub note: Option<String>,
    pub paid_on: Option<Date>,
}
