use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, NewProduct, Product, ProductChanges, ResultEngine, products, util,
};

use super::{Engine, normalize_optional_text, normalize_required_text, with_tx};

impl Engine {
    /// List all products of an owner, newest first.
    pub async fn products(&self, owner: &str) -> ResultEngine<Vec<Product>> {
        let models = products::Entity::find()
            .filter(products::Column::Owner.eq(owner))
            .order_by_desc(products::Column::CreatedAt)
            .all(&self.database)
            .await?;

        models.into_iter().map(Product::try_from).collect()
    }

    /// Return a single product.
    pub async fn product(&self, owner: &str, product_id: Uuid) -> ResultEngine<Product> {
        let model = self.require_product(&self.database, owner, product_id).await?;
        Product::try_from(model)
    }

    /// Add a product to the catalog.
    ///
    /// Names are unique per owner on a normalized key.
    pub async fn create_product(&self, owner: &str, new_product: NewProduct) -> ResultEngine<Product> {
        let name = normalize_required_text(&new_product.name, "product name")?;
        let unit = normalize_required_text(&new_product.unit, "product unit")?;
        if new_product.price_minor < 0 {
            return Err(EngineError::InvalidAmount(
                "price must not be negative".to_string(),
            ));
        }

        let name_norm = util::name_key(&name);
        with_tx!(self, |db_tx| {
            let exists = products::Entity::find()
                .filter(products::Column::Owner.eq(owner))
                .filter(products::Column::NameNorm.eq(name_norm.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(name));
            }

            let now = Utc::now();
            let model = products::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4().to_string()),
                owner: ActiveValue::Set(owner.to_string()),
                name: ActiveValue::Set(name),
                name_norm: ActiveValue::Set(name_norm),
                description: ActiveValue::Set(
                    normalize_optional_text(new_product.description.as_deref()).unwrap_or_default(),
                ),
                price_minor: ActiveValue::Set(new_product.price_minor),
                unit: ActiveValue::Set(unit),
                category: ActiveValue::Set(normalize_optional_text(
                    new_product.category.as_deref(),
                )),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            };
            let model = model.insert(&db_tx).await?;

            Ok(Product::try_from(model)?)
        })
    }

    /// Apply a partial update to a product.
    pub async fn update_product(
        &self,
        owner: &str,
        product_id: Uuid,
        changes: ProductChanges,
    ) -> ResultEngine<Product> {
        if let Some(price) = changes.price_minor
            && price < 0
        {
            return Err(EngineError::InvalidAmount(
                "price must not be negative".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let model = self.require_product(&db_tx, owner, product_id).await?;

            let mut active: products::ActiveModel = model.into();
            if let Some(name) = changes.name.as_deref() {
                let name = normalize_required_text(name, "product name")?;
                let name_norm = util::name_key(&name);

                let clash = products::Entity::find()
                    .filter(products::Column::Owner.eq(owner))
                    .filter(products::Column::NameNorm.eq(name_norm.clone()))
                    .filter(products::Column::Id.ne(product_id.to_string()))
                    .one(&db_tx)
                    .await?
                    .is_some();
                if clash {
                    return Err(EngineError::ExistingKey(name));
                }

                active.name = ActiveValue::Set(name);
                active.name_norm = ActiveValue::Set(name_norm);
            }
            if let Some(description) = changes.description.as_deref() {
                active.description = ActiveValue::Set(description.trim().to_string());
            }
            if let Some(price) = changes.price_minor {
                active.price_minor = ActiveValue::Set(price);
            }
            if let Some(unit) = changes.unit.as_deref() {
                active.unit = ActiveValue::Set(normalize_required_text(unit, "product unit")?);
            }
            if let Some(category) = changes.category.as_deref() {
                active.category = ActiveValue::Set(normalize_optional_text(Some(category)));
            }
            active.updated_at = ActiveValue::Set(Utc::now());

            let model = active.update(&db_tx).await?;
            Ok(Product::try_from(model)?)
        })
    }

    /// Remove a product from the catalog.
    ///
    /// Sale line items keep the product name they were sold under, so
    /// past sales are unaffected.
    pub async fn delete_product(&self, owner: &str, product_id: Uuid) -> ResultEngine<()> {
        let model = self.require_product(&self.database, owner, product_id).await?;
        products::Entity::delete_by_id(model.id)
            .exec(&self.database)
            .await?;

        Ok(())
    }

    pub(super) async fn require_product<C: ConnectionTrait>(
        &self,
        db: &C,
        owner: &str,
        product_id: Uuid,
    ) -> ResultEngine<products::Model> {
        products::Entity::find_by_id(product_id.to_string())
            .filter(products::Column::Owner.eq(owner))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("product not exists".to_string()))
    }
}
