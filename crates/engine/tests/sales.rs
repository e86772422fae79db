use chrono::NaiveDate;
use sea_orm::Database;
use uuid::Uuid;

use engine::{
    Engine, EngineError, NewPayment, NewProduct, NewSale, NewSaleItem, NewUser, PaymentStatus,
    Role, SaleChanges,
};
use migration::MigratorTrait;

async fn engine_with_owner() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    engine
        .register_user(NewUser {
            username: "asha".to_string(),
            password: "secret".to_string(),
            full_name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            role: Role::Admin,
        })
        .await
        .unwrap();
    engine
}

async fn seed_product(engine: &Engine, name: &str, price_minor: i64) -> Uuid {
    engine
        .create_product(
            "asha",
            NewProduct {
                name: name.to_string(),
                description: None,
                price_minor,
                unit: "kg".to_string(),
                category: None,
            },
        )
        .await
        .unwrap()
        .id
}

fn sale_of(items: Vec<NewSaleItem>) -> NewSale {
    NewSale {
        sold_on: NaiveDate::from_ymd_opt(2026, 3, 10),
        customer_name: "Sharma Ji".to_string(),
        customer_phone: None,
        customer_email: None,
        customer_address: None,
        items,
        discount_minor: None,
        tax_minor: None,
        payment_method: None,
        initial_payment_minor: None,
    }
}

#[tokio::test]
async fn line_totals_round_half_up() {
    let engine = engine_with_owner().await;
    let product_id = seed_product(&engine, "Kaju Katli", 201).await;

    // 1.5 * 2.01 = 3.015, stored as 3.02
    let sale = engine
        .create_sale(
            "asha",
            sale_of(vec![NewSaleItem {
                product_id,
                quantity_milli: 1_500,
                price_minor: None,
            }]),
        )
        .await
        .unwrap();

    assert_eq!(sale.items[0].total_minor, 302);
    assert_eq!(sale.subtotal_minor, 302);
    assert_eq!(sale.total_minor, 302);
    assert_eq!(sale.payment_status, PaymentStatus::Unpaid);
    assert_eq!(sale.payment_method, "Cash");
}

#[tokio::test]
async fn price_override_beats_catalog_price() {
    let engine = engine_with_owner().await;
    let product_id = seed_product(&engine, "Kaju Katli", 45_000).await;

    let sale = engine
        .create_sale(
            "asha",
            sale_of(vec![NewSaleItem {
                product_id,
                quantity_milli: 1_000,
                price_minor: Some(40_000),
            }]),
        )
        .await
        .unwrap();

    assert_eq!(sale.items[0].price_minor, 40_000);
    assert_eq!(sale.total_minor, 40_000);

    // The override never touches the catalog.
    let product = engine.product("asha", product_id).await.unwrap();
    assert_eq!(product.price_minor, 45_000);
}

#[tokio::test]
async fn negative_discount_and_tax_are_clamped() {
    let engine = engine_with_owner().await;
    let product_id = seed_product(&engine, "Kaju Katli", 45_000).await;

    let mut new_sale = sale_of(vec![NewSaleItem {
        product_id,
        quantity_milli: 1_000,
        price_minor: None,
    }]);
    new_sale.discount_minor = Some(-500);
    new_sale.tax_minor = Some(-300);

    let sale = engine.create_sale("asha", new_sale).await.unwrap();
    assert_eq!(sale.discount_minor, 0);
    assert_eq!(sale.tax_minor, 0);
    assert_eq!(sale.total_minor, 45_000);
}

#[tokio::test]
async fn discount_larger_than_subtotal_floors_total_at_zero() {
    let engine = engine_with_owner().await;
    let product_id = seed_product(&engine, "Kaju Katli", 10_000).await;

    let mut new_sale = sale_of(vec![NewSaleItem {
        product_id,
        quantity_milli: 1_000,
        price_minor: None,
    }]);
    new_sale.discount_minor = Some(50_000);

    let sale = engine.create_sale("asha", new_sale).await.unwrap();
    assert_eq!(sale.total_minor, 0);
    assert_eq!(sale.payment_status, PaymentStatus::FullyPaid);
}

#[tokio::test]
async fn initial_payment_is_clamped_to_total() {
    let engine = engine_with_owner().await;
    let product_id = seed_product(&engine, "Kaju Katli", 20_000).await;

    let mut new_sale = sale_of(vec![NewSaleItem {
        product_id,
        quantity_milli: 1_000,
        price_minor: None,
    }]);
    new_sale.initial_payment_minor = Some(100_000);

    let sale = engine.create_sale("asha", new_sale).await.unwrap();
    assert_eq!(sale.paid_minor, 20_000);
    assert_eq!(sale.remaining_minor, 0);
    assert_eq!(sale.payment_status, PaymentStatus::FullyPaid);
    assert_eq!(sale.payments.len(), 1);
    assert_eq!(sale.payments[0].note.as_deref(), Some("Initial payment"));
}

#[tokio::test]
async fn empty_or_invalid_items_are_rejected() {
    let engine = engine_with_owner().await;
    let product_id = seed_product(&engine, "Kaju Katli", 20_000).await;

    let err = engine.create_sale("asha", sale_of(vec![])).await.unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let err = engine
        .create_sale(
            "asha",
            sale_of(vec![NewSaleItem {
                product_id,
                quantity_milli: 0,
                price_minor: None,
            }]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .create_sale(
            "asha",
            sale_of(vec![NewSaleItem {
                product_id: Uuid::new_v4(),
                quantity_milli: 1_000,
                price_minor: None,
            }]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn payment_ledger_drives_status() {
    let engine = engine_with_owner().await;
    let product_id = seed_product(&engine, "Kaju Katli", 60_000).await;

    let sale = engine
        .create_sale(
            "asha",
            sale_of(vec![NewSaleItem {
                product_id,
                quantity_milli: 1_000,
                price_minor: None,
            }]),
        )
        .await
        .unwrap();

    let err = engine
        .record_payment(
            "asha",
            sale.id,
            NewPayment {
                amount_minor: 0,
                method: None,
                note: None,
                paid_on: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .record_payment(
            "asha",
            sale.id,
            NewPayment {
                amount_minor: 70_000,
                method: None,
                note: None,
                paid_on: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let sale = engine
        .record_payment(
            "asha",
            sale.id,
            NewPayment {
                amount_minor: 20_000,
                method: Some("UPI".to_string()),
                note: None,
                paid_on: NaiveDate::from_ymd_opt(2026, 3, 12),
            },
        )
        .await
        .unwrap();
    assert_eq!(sale.paid_minor, 20_000);
    assert_eq!(sale.remaining_minor, 40_000);
    assert_eq!(sale.payment_status, PaymentStatus::PartiallyPaid);

    let sale = engine
        .record_payment(
            "asha",
            sale.id,
            NewPayment {
                amount_minor: 40_000,
                method: None,
                note: Some("settled".to_string()),
                paid_on: NaiveDate::from_ymd_opt(2026, 3, 20),
            },
        )
        .await
        .unwrap();
    assert_eq!(sale.remaining_minor, 0);
    assert_eq!(sale.payment_status, PaymentStatus::FullyPaid);
    assert_eq!(sale.payments.len(), 2);
    // The fallback method is the sale's own payment method.
    assert_eq!(sale.payments[1].method, "Cash");
}

#[tokio::test]
async fn same_day_payments_keep_insertion_order() {
    let engine = engine_with_owner().await;
    let product_id = seed_product(&engine, "Kaju Katli", 60_000).await;

    let mut new_sale = sale_of(vec![NewSaleItem {
        product_id,
        quantity_milli: 1_000,
        price_minor: None,
    }]);
    new_sale.initial_payment_minor = Some(10_000);

    let sale = engine.create_sale("asha", new_sale).await.unwrap();
    for amount in [20_000, 30_000] {
        engine
            .record_payment(
                "asha",
                sale.id,
                NewPayment {
                    amount_minor: amount,
                    method: None,
                    note: None,
                    // Same date as the initial payment.
                    paid_on: NaiveDate::from_ymd_opt(2026, 3, 10),
                },
            )
            .await
            .unwrap();
    }

    let sale = engine.sale("asha", sale.id).await.unwrap();
    let amounts: Vec<i64> = sale.payments.iter().map(|p| p.amount_minor).collect();
    assert_eq!(amounts, vec![10_000, 20_000, 30_000]);
    assert_eq!(sale.payments[0].note.as_deref(), Some("Initial payment"));
    assert_eq!(sale.payment_status, PaymentStatus::FullyPaid);
}

#[tokio::test]
async fn update_cannot_touch_totals() {
    let engine = engine_with_owner().await;
    let product_id = seed_product(&engine, "Kaju Katli", 60_000).await;

    let sale = engine
        .create_sale(
            "asha",
            sale_of(vec![NewSaleItem {
                product_id,
                quantity_milli: 1_000,
                price_minor: None,
            }]),
        )
        .await
        .unwrap();

    let updated = engine
        .update_sale(
            "asha",
            sale.id,
            SaleChanges {
                customer_name: Some("Verma".to_string()),
                payment_method: Some("Card".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.customer_name, "Verma");
    assert_eq!(updated.payment_method, "Card");
    assert_eq!(updated.total_minor, sale.total_minor);
    assert_eq!(updated.items, sale.items);
}

#[tokio::test]
async fn delete_sale_removes_items_and_payments() {
    let engine = engine_with_owner().await;
    let product_id = seed_product(&engine, "Kaju Katli", 60_000).await;

    let mut new_sale = sale_of(vec![NewSaleItem {
        product_id,
        quantity_milli: 1_000,
        price_minor: None,
    }]);
    new_sale.initial_payment_minor = Some(10_000);

    let sale = engine.create_sale("asha", new_sale).await.unwrap();
    engine.delete_sale("asha", sale.id).await.unwrap();

    let err = engine.sale("asha", sale.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn sales_are_scoped_to_their_owner() {
    let engine = engine_with_owner().await;
    engine
        .register_user(NewUser {
            username: "bina".to_string(),
            password: "secret".to_string(),
            full_name: "Bina".to_string(),
            email: "bina@example.com".to_string(),
            role: Role::Manager,
        })
        .await
        .unwrap();

    let product_id = seed_product(&engine, "Kaju Katli", 60_000).await;
    let sale = engine
        .create_sale(
            "asha",
            sale_of(vec![NewSaleItem {
                product_id,
                quantity_milli: 1_000,
                price_minor: None,
            }]),
        )
        .await
        .unwrap();

    let err = engine.sale("bina", sale.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
    assert!(engine.sales("bina").await.unwrap().is_empty());
}
