//! Products API endpoints.

use api_types::product::{ProductCreate, ProductListResponse, ProductUpdate, ProductView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{Data, ServerError, server::ServerState};
use engine::users;

fn map_product(product: engine::Product) -> ProductView {
    ProductView {
        id: product.id,
        name: product.name,
        description: product.description,
        price_minor: product.price_minor,
        unit: product.unit,
        category: product.category,
        created_at: product.created_at,
        updated_at: product.updated_at,
    }
}

pub async fn list(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Data<ProductListResponse>>, ServerError> {
    let products = state
        .engine
        .products(&user.username)
        .await?
        .into_iter()
        .map(map_product)
        .collect();

    Ok(Json(Data::new(ProductListResponse { products })))
}

pub async fn create(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> Result<(StatusCode, Json<Data<ProductView>>), ServerError> {
    let product = state
        .engine
        .create_product(
            &user.username,
            engine::NewProduct {
                name: payload.name,
                description: payload.description,
                price_minor: payload.price_minor,
                unit: payload.unit,
                category: payload.category,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(Data::new(map_product(product)))))
}

pub async fn update(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<ProductUpdate>,
) -> Result<Json<Data<ProductView>>, ServerError> {
    let product = state
        .engine
        .update_product(
            &user.username,
            product_id,
            engine::ProductChanges {
                name: payload.name,
                description: payload.description,
                price_minor: payload.price_minor,
                unit: payload.unit,
                category: payload.category,
            },
        )
        .await?;

    Ok(Json(Data::new(map_product(product))))
}

pub async fn remove(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(product_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_product(&user.username, product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
