//! HTTP API routes for the product catalog.
//!
//! Every route lives under `/login`, matching the paths the dashboard calls.

use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::json;

use crate::AppState;

pub mod login;
pub mod products;
pub mod values;

/// Configure all API routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().nest("/login", routes())
}

fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/authenticate", post(login::authenticate))
        // Catalog reads
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/productsonly", get(products::list_products_only))
        .route("/products/{product_id}", get(products::get_product))
        // Parameter edits
        .route(
            "/products/{product_id}/parameters",
            put(products::update_product).post(products::add_parameter),
        )
        .route(
            "/products/{product_id}/parameters/{parameter_id}",
            put(products::update_parameter).delete(products::delete_parameter),
        )
        // Value rows
        .route(
            "/products/{product_id}/values",
            get(values::list_values).post(values::save_values),
        )
        .route(
            "/products/{product_id}/values/{value_id}",
            delete(values::delete_value),
        )
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "catalog-server"
    }))
}
