use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, NewStockItem, ResultEngine, StockItem, StockItemChanges, stock_items,
};

use super::{Engine, normalize_optional_text, normalize_required_text, with_tx};

impl Engine {
    /// List all stock items of an owner, newest first.
    pub async fn stock_items(&self, owner: &str) -> ResultEngine<Vec<StockItem>> {
        let models = stock_items::Entity::find()
            .filter(stock_items::Column::Owner.eq(owner))
            .order_by_desc(stock_items::Column::CreatedAt)
            .all(&self.database)
            .await?;

        models.into_iter().map(StockItem::try_from).collect()
    }

    /// Record a raw-material delivery.
    pub async fn create_stock_item(
        &self,
        owner: &str,
        new_item: NewStockItem,
    ) -> ResultEngine<StockItem> {
        let name = normalize_required_text(&new_item.name, "stock item name")?;
        let unit = normalize_required_text(&new_item.unit, "stock item unit")?;
        if new_item.quantity_milli < 0 {
            return Err(EngineError::InvalidAmount(
                "quantity must not be negative".to_string(),
            ));
        }

        let now = Utc::now();
        let model = stock_items::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            owner: ActiveValue::Set(owner.to_string()),
            name: ActiveValue::Set(name),
            quantity_milli: ActiveValue::Set(new_item.quantity_milli),
            unit: ActiveValue::Set(unit),
            description: ActiveValue::Set(
                normalize_optional_text(new_item.description.as_deref()).unwrap_or_default(),
            ),
            received_on: ActiveValue::Set(
                new_item.received_on.unwrap_or_else(|| Utc::now().date_naive()),
            ),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };
        let model = model.insert(&self.database).await?;

        StockItem::try_from(model)
    }

    /// Apply a partial update to a stock item.
    pub async fn update_stock_item(
        &self,
        owner: &str,
        item_id: Uuid,
        changes: StockItemChanges,
    ) -> ResultEngine<StockItem> {
        if let Some(quantity) = changes.quantity_milli
            && quantity < 0
        {
            return Err(EngineError::InvalidAmount(
                "quantity must not be negative".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let model = self.require_stock_item(&db_tx, owner, item_id).await?;

            let mut active: stock_items::ActiveModel = model.into();
            if let Some(name) = changes.name.as_deref() {
                active.name = ActiveValue::Set(normalize_required_text(name, "stock item name")?);
            }
            if let Some(quantity) = changes.quantity_milli {
                active.quantity_milli = ActiveValue::Set(quantity);
            }
            if let Some(unit) = changes.unit.as_deref() {
                active.unit = ActiveValue::Set(normalize_required_text(unit, "stock item unit")?);
            }
            if let Some(description) = changes.description.as_deref() {
                active.description = ActiveValue::Set(description.trim().to_string());
            }
            if let Some(received_on) = changes.received_on {
                active.received_on = ActiveValue::Set(received_on);
            }
            active.updated_at = ActiveValue::Set(Utc::now());

            let model = active.update(&db_tx).await?;
            Ok(StockItem::try_from(model)?)
        })
    }

    /// Remove a stock item.
    pub async fn delete_stock_item(&self, owner: &str, item_id: Uuid) -> ResultEngine<()> {
        let model = self.require_stock_item(&self.database, owner, item_id).await?;
        stock_items::Entity::delete_by_id(model.id)
            .exec(&self.database)
            .await?;

        Ok(())
    }

    async fn require_stock_item<C: ConnectionTrait>(
        &self,
        db: &C,
        owner: &str,
        item_id: Uuid,
    ) -> ResultEngine<stock_items::Model> {
        stock_items::Entity::find_by_id(item_id.to_string())
            .filter(stock_items::Column::Owner.eq(owner))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("stock item not exists".to_string()))
    }
}
