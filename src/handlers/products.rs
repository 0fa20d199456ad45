//! Product CRUD endpoints

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;

use crate::app::AppState;
use crate::middleware::CurrentUser;
use crate::models::{MessageResponse, Product, ProductCreate, ProductQueryParams, ProductUpdate};
use crate::utils::errors::Result;
use crate::utils::logging::log_product_action;

type Rejectable<T, R> = std::result::Result<T, R>;

pub async fn create_product(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Rejectable<Json<ProductCreate>, JsonRejection>,
) -> Result<Json<Product>> {
    let Json(request) = payload?;
    let product = state.services.products.create(request).await?;
    log_product_action(product.id, "create", &user.username);

    Ok(Json(product))
}

pub async fn list_products(
    State(state): State<AppState>,
    _user: CurrentUser,
    params: Rejectable<Query<ProductQueryParams>, QueryRejection>,
) -> Result<Json<Vec<Product>>> {
    let Query(params) = params?;
    Ok(Json(state.services.products.list(params).await?))
}

pub async fn get_product(
    State(state): State<AppState>,
    _user: CurrentUser,
    product_id: Rejectable<Path<i64>, PathRejection>,
) -> Result<Json<Product>> {
    let Path(product_id) = product_id?;
    Ok(Json(state.services.products.get(product_id).await?))
}

pub async fn update_product(
    State(state): State<AppState>,
    user: CurrentUser,
    product_id: Rejectable<Path<i64>, PathRejection>,
    payload: Rejectable<Json<ProductUpdate>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Path(product_id) = product_id?;
    let Json(request) = payload?;
    state.services.products.update(product_id, request).await?;
    log_product_action(product_id, "update", &user.username);

    Ok(Json(MessageResponse::new("Product updated")))
}

pub async fn delete_product(
    State(state): State<AppState>,
    user: CurrentUser,
    product_id: Rejectable<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>> {
    let Path(product_id) = product_id?;
    state.services.products.delete(product_id).await?;
    log_product_action(product_id, "delete", &user.username);

    Ok(Json(MessageResponse::new("Product deleted")))
}
