//! Sales and payment-ledger API endpoints.

use api_types::sale::{
    Customer, PaymentNew, PaymentStatus, PaymentView, SaleCreate, SaleItemView, SaleListResponse,
    SaleUpdate, SaleView,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{Data, ServerError, server::ServerState};
use engine::users;

fn map_payment_status(status: engine::PaymentStatus) -> PaymentStatus {
    match status {
        engine::PaymentStatus::Unpaid => PaymentStatus::Unpaid,
        engine::PaymentStatus::PartiallyPaid => PaymentStatus::PartiallyPaid,
        engine::PaymentStatus::FullyPaid => PaymentStatus::FullyPaid,
    }
}

fn map_item(item: engine::SaleItem) -> SaleItemView {
    SaleItemView {
        product_id: item.product_id,
        product_name: item.product_name,
        quantity_milli: item.quantity_milli,
        price_minor: item.price_minor,
        total_minor: item.total_minor,
    }
}

fn map_payment(payment: engine::PaymentRecord) -> PaymentView {
    PaymentView {
        id: payment.id,
        paid_on: payment.paid_on,
        amount_minor: payment.amount_minor,
        method: payment.method,
        note: payment.note,
    }
}

pub(crate) fn map_sale(sale: engine::Sale) -> SaleView {
    SaleView {
        id: sale.id,
        sold_on: sale.sold_on,
        customer: Customer {
            name: sale.customer_name,
            phone: (!sale.customer_phone.is_empty()).then_some(sale.customer_phone),
            email: sale.customer_email,
            address: sale.customer_address,
        },
        items: sale.items.into_iter().map(map_item).collect(),
        subtotal_minor: sale.subtotal_minor,
        discount_minor: sale.discount_minor,
        tax_minor: sale.tax_minor,
        total_minor: sale.total_minor,
        paid_minor: sale.paid_minor,
        remaining_minor: sale.remaining_minor,
        payment_method: sale.payment_method,
        payment_status: map_payment_status(sale.payment_status),
        payments: sale.payments.into_iter().map(map_payment).collect(),
        created_at: sale.created_at,
        updated_at: sale.updated_at,
    }
}

pub async fn list(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Data<SaleListResponse>>, ServerError> {
    let sales = state
        .engine
        .sales(&user.username)
        .await?
        .into_iter()
        .map(map_sale)
        .collect();

    Ok(Json(Data::new(SaleListResponse { sales })))
}

pub async fn detail(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(sale_id): Path<Uuid>,
) -> Result<Json<Data<SaleView>>, ServerError> {
    let sale = state.engine.sale(&user.username, sale_id).await?;
    Ok(Json(Data::new(map_sale(sale))))
}

pub async fn create(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<SaleCreate>,
) -> Result<(StatusCode, Json<Data<SaleView>>), ServerError> {
    let items = payload
        .items
        .into_iter()
        .map(|item| engine::NewSaleItem {
            product_id: item.product_id,
            quantity_milli: item.quantity_milli,
            price_minor: item.price_minor,
        })
        .collect();

    let sale = state
        .engine
        .create_sale(
            &user.username,
            engine::NewSale {
                sold_on: payload.sold_on,
                customer_name: payload.customer.name,
                customer_phone: payload.customer.phone,
                customer_email: payload.customer.email,
                customer_address: payload.customer.address,
                items,
                discount_minor: payload.discount_minor,
                tax_minor: payload.tax_minor,
                payment_method: payload.payment_method,
                initial_payment_minor: payload.initial_payment_minor,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(Data::new(map_sale(sale)))))
}

pub async fn update(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(sale_id): Path<Uuid>,
    Json(payload): Json<SaleUpdate>,
) -> Result<Json<Data<SaleView>>, ServerError> {
    let sale = state
        .engine
        .update_sale(
            &user.username,
            sale_id,
            engine::SaleChanges {
                sold_on: payload.sold_on,
                customer_name: payload.customer_name,
                customer_phone: payload.customer_phone,
                customer_email: payload.customer_email,
                customer_address: payload.customer_address,
                payment_method: payload.payment_method,
            },
        )
        .await?;

    Ok(Json(Data::new(map_sale(sale))))
}

pub async fn record_payment(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(sale_id): Path<Uuid>,
    Json(payload): Json<PaymentNew>,
) -> Result<(StatusCode, Json<Data<SaleView>>), ServerError> {
    let sale = state
        .engine
        .record_payment(
            &user.username,
            sale_id,
            engine::NewPayment {
                amount_minor: payload.amount_minor,
                method: payload.method,
                note: payload.note,
                paid_on: payload.paid_on,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(Data::new(map_sale(sale)))))
}

pub async fn remove(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(sale_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_sale(&user.username, sale_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
