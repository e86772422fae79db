//! The module contains `Sale`, its totals arithmetic and the derived
//! payment status.
//!
//! A sale is immutable in its items and totals after creation; only the
//! payment ledger moves, and `paid`/`remaining`/`payment_status` follow
//! it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, payments::PaymentRecord, sale_items::SaleItem, util};

pub const DEFAULT_PAYMENT_METHOD: &str = "Cash";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    PartiallyPaid,
    FullyPaid,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::PartiallyPaid => "partially_paid",
            Self::FullyPaid => "fully_paid",
        }
    }

    /// Derives the status from the ledger state:
    /// `remaining <= 0` is fully paid, any payment at all is partial,
    /// otherwise unpaid.
    pub fn derive(paid_minor: i64, total_minor: i64) -> Self {
        if total_minor - paid_minor <= 0 {
            Self::FullyPaid
        } else if paid_minor > 0 {
            Self::PartiallyPaid
        } else {
            Self::Unpaid
        }
    }
}

impl TryFrom<&str> for PaymentStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "unpaid" => Ok(Self::Unpaid),
            "partially_paid" => Ok(Self::PartiallyPaid),
            "fully_paid" => Ok(Self::FullyPaid),
            other => Err(EngineError::Validation(format!(
                "invalid payment status: {other}"
            ))),
        }
    }
}

/// `max(0, subtotal - discount + tax)`.
pub(crate) fn sale_total_minor(subtotal_minor: i64, discount_minor: i64, tax_minor: i64) -> i64 {
    (subtotal_minor - discount_minor + tax_minor).max(0)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: Uuid,
    pub sold_on: Date,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub customer_address: Option<String>,
    pub items: Vec<SaleItem>,
    pub subtotal_minor: i64,
    pub discount_minor: i64,
    pub tax_minor: i64,
    pub total_minor: i64,
    pub paid_minor: i64,
    pub remaining_minor: i64,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub payments: Vec<PaymentRecord>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner: String,
    pub sold_on: Date,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub customer_address: Option<String>,
    pub subtotal_minor: i64,
    pub discount_minor: i64,
    pub tax_minor: i64,
    pub total_minor: i64,
    pub paid_minor: i64,
    pub remaining_minor: i64,
    pub payment_method: String,
    pub payment_status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sale_items::Entity")]
    SaleItems,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Owner",
        to = "super::users::Column::Username",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
}

impl Related<super::sale_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleItems.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Sale {
    /// Builds the domain sale from its rows; items and payments must
    /// already be scoped to this sale.
    pub(crate) fn from_rows(
        model: Model,
        items: Vec<SaleItem>,
        payments: Vec<PaymentRecord>,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "sale")?,
            sold_on: model.sold_on,
            customer_name: model.customer_name,
            customer_phone: model.customer_phone,
            customer_email: model.customer_email,
            customer_address: model.customer_address,
            items,
            subtotal_minor: model.subtotal_minor,
            discount_minor: model.discount_minor,
            tax_minor: model.tax_minor,
            total_minor: model.total_minor,
            paid_minor: model.paid_minor,
            remaining_minor: model.remaining_minor,
            payment_method: model.payment_method,
            payment_status: PaymentStatus::try_from(model.payment_status.as_str())?,
            payments,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Input for [`crate::Engine::create_sale`].
#[derive(Clone, Debug)]
pub struct NewSale {
    pub sold_on: Option<Date>,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub customer_address: Option<String>,
    pub items: Vec<crate::sale_items::NewSaleItem>,
    pub discount_minor: Option<i64>,
    pub tax_minor: Option<i64>,
    pub payment_method: Option<String>,
    pub initial_payment_minor: Option<i64>,
}

/// Partial update for [`crate::Engine::update_sale`]; items and totals
/// are immutable after creation.
#[derive(Clone, Debug, Default)]
pub struct SaleChanges {
    pub sold_on: Option<Date>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub customer_address: Option<String>,
    pub payment_method: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_paid_vs_total() {
        assert_eq!(PaymentStatus::derive(0, 1000), PaymentStatus::Unpaid);
        assert_eq!(PaymentStatus::derive(1, 1000), PaymentStatus::PartiallyPaid);
        assert_eq!(PaymentStatus::derive(999, 1000), PaymentStatus::PartiallyPaid);
        assert_eq!(PaymentStatus::derive(1000, 1000), PaymentStatus::FullyPaid);
    }

    #[test]
    fn zero_total_counts_as_fully_paid() {
        assert_eq!(PaymentStatus::derive(0, 0), PaymentStatus::FullyPaid);
    }

    #[test]
    fn total_never_goes_negative() {
        assert_eq!(sale_total_minor(1000, 200, 50), 850);
        assert_eq!(sale_total_minor(1000, 2000, 0), 0);
        assert_eq!(sale_total_minor(0, 0, 0), 0);
    }
}
