use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, NewPayment, NewSale, PaymentRecord, PaymentStatus, ResultEngine, Sale,
    SaleChanges, SaleItem, payments, sale_items, sales, util,
};

use super::{Engine, normalize_optional_text, normalize_required_text, with_tx};

const INITIAL_PAYMENT_NOTE: &str = "Initial payment";

impl Engine {
    /// List all sales of an owner with their items and payments, newest
    /// first.
    pub async fn sales(&self, owner: &str) -> ResultEngine<Vec<Sale>> {
        let models = sales::Entity::find()
            .filter(sales::Column::Owner.eq(owner))
            .order_by_desc(sales::Column::SoldOn)
            .order_by_desc(sales::Column::CreatedAt)
            .all(&self.database)
            .await?;

        let mut result = Vec::with_capacity(models.len());
        for model in models {
            result.push(self.load_sale(&self.database, model).await?);
        }
        Ok(result)
    }

    /// Return a single sale with its items and payments.
    pub async fn sale(&self, owner: &str, sale_id: Uuid) -> ResultEngine<Sale> {
        let model = self.require_sale(&self.database, owner, sale_id).await?;
        self.load_sale(&self.database, model).await
    }

    /// Record a sale.
    ///
    /// Line totals are `round(quantity_milli * price_minor / 1000)`,
    /// the grand total is `max(0, subtotal - discount + tax)` and an
    /// optional initial payment is clamped into `[0, total]` and stored
    /// as the first ledger entry.
    pub async fn create_sale(&self, owner: &str, new_sale: NewSale) -> ResultEngine<Sale> {
        let customer_name = normalize_required_text(&new_sale.customer_name, "customer name")?;
        if new_sale.items.is_empty() {
            return Err(EngineError::Validation(
                "a sale needs at least one item".to_string(),
            ));
        }
        for item in &new_sale.items {
            if item.quantity_milli <= 0 {
                return Err(EngineError::InvalidAmount(
                    "item quantity must be positive".to_string(),
                ));
            }
            if let Some(price) = item.price_minor
                && price < 0
            {
                return Err(EngineError::InvalidAmount(
                    "item price must not be negative".to_string(),
                ));
            }
        }

        let sold_on = new_sale.sold_on.unwrap_or_else(|| Utc::now().date_naive());
        let discount_minor = new_sale.discount_minor.unwrap_or(0).max(0);
        let tax_minor = new_sale.tax_minor.unwrap_or(0).max(0);
        let payment_method = normalize_optional_text(new_sale.payment_method.as_deref())
            .unwrap_or_else(|| sales::DEFAULT_PAYMENT_METHOD.to_string());

        with_tx!(self, |db_tx| {
            let sale_id = Uuid::new_v4();

            // Resolve every line before touching the sales table, so a
            // missing product aborts before any row is written.
            let mut subtotal_minor = 0i64;
            let mut lines = Vec::with_capacity(new_sale.items.len());
            for line in &new_sale.items {
                let product = self.require_product(&db_tx, owner, line.product_id).await?;
                let price_minor = line.price_minor.unwrap_or(product.price_minor);
                let total_minor = util::mul_div_round(line.quantity_milli, price_minor, 1000);
                subtotal_minor += total_minor;
                lines.push((product, line.quantity_milli, price_minor, total_minor));
            }

            let total_minor = sales::sale_total_minor(subtotal_minor, discount_minor, tax_minor);
            let paid_minor = new_sale
                .initial_payment_minor
                .unwrap_or(0)
                .clamp(0, total_minor);

            let now = Utc::now();
            let model = sales::ActiveModel {
                id: ActiveValue::Set(sale_id.to_string()),
                owner: ActiveValue::Set(owner.to_string()),
                sold_on: ActiveValue::Set(sold_on),
                customer_name: ActiveValue::Set(customer_name),
                customer_phone: ActiveValue::Set(
                    normalize_optional_text(new_sale.customer_phone.as_deref())
                        .unwrap_or_default(),
                ),
                customer_email: ActiveValue::Set(normalize_optional_text(
                    new_sale.customer_email.as_deref(),
                )),
                customer_address: ActiveValue::Set(normalize_optional_text(
                    new_sale.customer_address.as_deref(),
                )),
                subtotal_minor: ActiveValue::Set(subtotal_minor),
                discount_minor: ActiveValue::Set(discount_minor),
                tax_minor: ActiveValue::Set(tax_minor),
                total_minor: ActiveValue::Set(total_minor),
                paid_minor: ActiveValue::Set(paid_minor),
                remaining_minor: ActiveValue::Set(total_minor - paid_minor),
                payment_method: ActiveValue::Set(payment_method.clone()),
                payment_status: ActiveValue::Set(
                    PaymentStatus::derive(paid_minor, total_minor)
                        .as_str()
                        .to_string(),
                ),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            };
            let model = model.insert(&db_tx).await?;

            let mut items = Vec::with_capacity(lines.len());
            for (product, quantity_milli, price_minor, line_total_minor) in lines {
                let item = sale_items::ActiveModel {
                    id: ActiveValue::Set(Uuid::new_v4().to_string()),
                    sale_id: ActiveValue::Set(sale_id.to_string()),
                    product_id: ActiveValue::Set(product.id),
                    product_name: ActiveValue::Set(product.name),
                    quantity_milli: ActiveValue::Set(quantity_milli),
                    price_minor: ActiveValue::Set(price_minor),
                    total_minor: ActiveValue::Set(line_total_minor),
                };
                let item = item.insert(&db_tx).await?;
                items.push(SaleItem::try_from(item)?);
            }

            let mut ledger = Vec::new();
            if paid_minor > 0 {
                let payment = payments::ActiveModel {
                    id: ActiveValue::Set(Uuid::new_v4().to_string()),
                    sale_id: ActiveValue::Set(sale_id.to_string()),
                    paid_on: ActiveValue::Set(sold_on),
                    amount_minor: ActiveValue::Set(paid_minor),
                    method: ActiveValue::Set(payment_method),
                    note: ActiveValue::Set(Some(INITIAL_PAYMENT_NOTE.to_string())),
                    created_at: ActiveValue::Set(now),
                };
                let payment = payment.insert(&db_tx).await?;
                ledger.push(PaymentRecord::try_from(payment)?);
            }

            Ok(Sale::from_rows(model, items, ledger)?)
        })
    }

    /// Apply a partial update to a sale.
    ///
    /// Only customer details, the sale date and the payment method can
    /// change; items and totals are fixed at creation.
    pub async fn update_sale(
        &self,
        owner: &str,
        sale_id: Uuid,
        changes: SaleChanges,
    ) -> ResultEngine<Sale> {
        with_tx!(self, |db_tx| {
            let model = self.require_sale(&db_tx, owner, sale_id).await?;

            let mut active: sales::ActiveModel = model.into();
            if let Some(sold_on) = changes.sold_on {
                active.sold_on = ActiveValue::Set(sold_on);
            }
            if let Some(name) = changes.customer_name.as_deref() {
                active.customer_name =
                    ActiveValue::Set(normalize_required_text(name, "customer name")?);
            }
            if let Some(phone) = changes.customer_phone.as_deref() {
                active.customer_phone = ActiveValue::Set(phone.trim().to_string());
            }
            if let Some(email) = changes.customer_email.as_deref() {
                active.customer_email = ActiveValue::Set(normalize_optional_text(Some(email)));
            }
            if let Some(address) = changes.customer_address.as_deref() {
                active.customer_address = ActiveValue::Set(normalize_optional_text(Some(address)));
            }
            if let Some(method) = changes.payment_method.as_deref() {
                active.payment_method =
                    ActiveValue::Set(normalize_required_text(method, "payment method")?);
            }
            active.updated_at = ActiveValue::Set(Utc::now());

            let model = active.update(&db_tx).await?;
            Ok(self.load_sale(&db_tx, model).await?)
        })
    }

    /// Add a payment to a sale's ledger and refresh its status.
    ///
    /// Overpayments are rejected, not clamped.
    pub async fn record_payment(
        &self,
        owner: &str,
        sale_id: Uuid,
        new_payment: NewPayment,
    ) -> ResultEngine<Sale> {
        if new_payment.amount_minor <= 0 {
            return Err(EngineError::InvalidAmount(
                "payment amount must be positive".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let model = self.require_sale(&db_tx, owner, sale_id).await?;
            if new_payment.amount_minor > model.remaining_minor {
                return Err(EngineError::InvalidAmount(format!(
                    "payment of {} exceeds remaining balance of {}",
                    new_payment.amount_minor, model.remaining_minor
                )));
            }

            let method = normalize_optional_text(new_payment.method.as_deref())
                .unwrap_or_else(|| model.payment_method.clone());
            let payment = payments::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4().to_string()),
                sale_id: ActiveValue::Set(model.id.clone()),
                paid_on: ActiveValue::Set(
                    new_payment.paid_on.unwrap_or_else(|| Utc::now().date_naive()),
                ),
                amount_minor: ActiveValue::Set(new_payment.amount_minor),
                method: ActiveValue::Set(method),
                note: ActiveValue::Set(normalize_optional_text(new_payment.note.as_deref())),
                created_at: ActiveValue::Set(Utc::now()),
            };
            payment.insert(&db_tx).await?;

            let paid_minor = model.paid_minor + new_payment.amount_minor;
            let total_minor = model.total_minor;
            let mut active: sales::ActiveModel = model.into();
            active.paid_minor = ActiveValue::Set(paid_minor);
            active.remaining_minor = ActiveValue::Set(total_minor - paid_minor);
            active.payment_status = ActiveValue::Set(
                PaymentStatus::derive(paid_minor, total_minor)
                    .as_str()
                    .to_string(),
            );
            active.updated_at = ActiveValue::Set(Utc::now());

            let model = active.update(&db_tx).await?;
            Ok(self.load_sale(&db_tx, model).await?)
        })
    }

    /// Remove a sale together with its items and payments.
    pub async fn delete_sale(&self, owner: &str, sale_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_sale(&db_tx, owner, sale_id).await?;

            sale_items::Entity::delete_many()
                .filter(sale_items::Column::SaleId.eq(model.id.clone()))
                .exec(&db_tx)
                .await?;
            payments::Entity::delete_many()
                .filter(payments::Column::SaleId.eq(model.id.clone()))
                .exec(&db_tx)
                .await?;
            sales::Entity::delete_by_id(model.id).exec(&db_tx).await?;

            Ok(())
        })
    }

    pub(super) async fn require_sale<C: ConnectionTrait>(
        &self,
        db: &C,
        owner: &str,
        sale_id: Uuid,
    ) -> ResultEngine<sales::Model> {
        sales::Entity::find_by_id(sale_id.to_string())
            .filter(sales::Column::Owner.eq(owner))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("sale not exists".to_string()))
    }

    pub(super) async fn load_sale<C: ConnectionTrait>(
        &self,
        db: &C,
        model: sales::Model,
    ) -> ResultEngine<Sale> {
        let items = sale_items::Entity::find()
            .filter(sale_items::Column::SaleId.eq(model.id.clone()))
            .all(db)
            .await?
            .into_iter()
            .map(SaleItem::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;

        // Same-day payments fall back to insertion order.
        let ledger = payments::Entity::find()
            .filter(payments::Column::SaleId.eq(model.id.clone()))
            .order_by_asc(payments::Column::PaidOn)
            .order_by_asc(payments::Column::CreatedAt)
            .all(db)
            .await?
            .into_iter()
            .map(PaymentRecord::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;

        Sale::from_rows(model, items, ledger)
    }
}
