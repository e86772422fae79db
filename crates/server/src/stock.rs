//! Stock API endpoints.

use api_types::stock::{StockItemCreate, StockItemUpdate, StockItemView, StockListResponse};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{Data, ServerError, server::ServerState};
use engine::users;

fn map_item(item: engine::StockItem) -> StockItemView {
    StockItemView {
        id: item.id,
        name: item.name,
        quantity_milli: item.quantity_milli,
        unit: item.unit,
        description: item.description,
        received_on: item.received_on,
        created_at: item.created_at,
        updated_at: item.updated_at,
    }
}

pub async fn list(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Data<StockListResponse>>, ServerError> {
    let items = state
        .engine
        .stock_items(&user.username)
        .await?
        .into_iter()
        .map(map_item)
        .collect();

    Ok(Json(Data::new(StockListResponse { items })))
}

pub async fn create(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<StockItemCreate>,
) -> Result<(StatusCode, Json<Data<StockItemView>>), ServerError> {
    let item = state
        .engine
        .create_stock_item(
            &user.username,
            engine::NewStockItem {
                name: payload.name,
                quantity_milli: payload.quantity_milli,
                unit: payload.unit,
                description: payload.description,
                received_on: payload.received_on,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(Data::new(map_item(item)))))
}

pub async fn update(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(item_id): Path<Uuid>,
    Json(payload): Json<StockItemUpdate>,
) -> Result<Json<Data<StockItemView>>, ServerError> {
    let item = state
        .engine
        .update_stock_item(
            &user.username,
            item_id,
            engine::StockItemChanges {
                name: payload.name,
                quantity_milli: payload.quantity_milli,
                unit: payload.unit,
                description: payload.description,
                received_on: payload.received_on,
            },
        )
        .await?;

    Ok(Json(Data::new(map_item(item))))
}

pub async fn remove(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(item_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_stock_item(&user.username, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
