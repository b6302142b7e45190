//! Product CRUD endpoints, all behind bearer authentication

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::api::middleware::RequireAuth;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{PageRequest, Product};

pub fn create_products_router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[derive(Debug, Deserialize)]
pub struct ProductBody {
    pub name: String,
    pub price: f64,
}

/// Raw listing parameters; kept as strings so bad numbers degrade to 0
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
}

impl ListProductsQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            parse_count(self.page.as_deref()),
            parse_count(self.limit.as_deref()),
            self.sort.as_deref().unwrap_or_default(),
        )
    }
}

/// Non-numeric, negative or missing values mean "no pagination"
fn parse_count(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

/// POST /products
pub async fn create_product(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<ProductBody>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.product_service.create(&body.name, body.price).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /products?page=&limit=&sort=
pub async fn list_products(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.product_service.list(query.page_request()).await?;
    Ok(Json(products))
}

/// GET /products/{id}
pub async fn get_product(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.product_service.get(&id).await?))
}

/// PUT /products/{id}
pub async fn update_product(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ProductBody>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .product_service
        .update(&id, &body.name, body.price)
        .await?;
    Ok(Json(product))
}

/// DELETE /products/{id}
pub async fn delete_product(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.product_service.delete(&id).await?;
    Ok(StatusCode::OK)
}
