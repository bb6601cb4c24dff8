use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde_json::json;
use shared_types::{
    CreateProductRequest, ParameterDraft, ParameterId, ParameterRequest, Product, ProductId,
    UpdateProductRequest,
};
use tracing::info;

use crate::db::products as store;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

fn require_parameter_names<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), ApiError> {
    if names.into_iter().any(|n| n.trim().is_empty()) {
        return Err(ApiError::bad_request("parameterName is required"));
    }
    Ok(())
}

fn require_distinct_ids(parameters: &[ParameterDraft]) -> Result<(), ApiError> {
    let mut seen = HashSet::new();
    match parameters.iter().filter_map(|p| p.id).find(|id| !seen.insert(*id)) {
        Some(id) => Err(ApiError::bad_request(format!(
            "parameter {id} is listed more than once"
        ))),
        None => Ok(()),
    }
}

fn draft_names(parameters: &[ParameterDraft]) -> impl Iterator<Item = &str> {
    parameters.iter().map(|p| p.parameter_name.as_str())
}

/// GET /login/products
pub async fn list_products(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(store::list_products(&state.db).await?))
}

/// GET /login/productsonly
///
/// Display variant used by the selectable catalog; same records.
pub async fn list_products_only(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Product>>> {
    list_products(State(state)).await
}

/// GET /login/products/{product_id}
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<ProductId>,
) -> ApiResult<Json<Product>> {
    store::get_product(&state.db, product_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Product"))
}

/// POST /login/products
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateProductRequest>,
) -> ApiResult<Json<Product>> {
    if body.product_name.trim().is_empty() {
        return Err(ApiError::bad_request("productName is required"));
    }
    require_parameter_names(draft_names(&body.parameters))?;

    let product = store::create_product(&state.db, &body).await?;
    info!(
        product_id = product.id,
        parameters = product.parameters.len(),
        "product created"
    );
    Ok(Json(product))
}

/// PUT /login/products/{product_id}/parameters
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<ProductId>,
    Json(body): Json<UpdateProductRequest>,
) -> ApiResult<Json<Product>> {
    if body.product_id.is_some_and(|id| id != product_id) {
        return Err(ApiError::bad_request("productId does not match the path"));
    }
    require_parameter_names(draft_names(&body.parameters))?;
    require_distinct_ids(&body.parameters)?;

    let product = store::replace_parameters(&state.db, product_id, &body)
        .await?
        .ok_or(ApiError::NotFound("Product"))?;
    info!(product_id, parameters = product.parameters.len(), "product updated");
    Ok(Json(product))
}

/// POST /login/products/{product_id}/parameters
pub async fn add_parameter(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<ProductId>,
    Json(body): Json<ParameterRequest>,
) -> ApiResult<Json<Product>> {
    require_parameter_names([body.parameter_name.as_str()])?;

    let product = store::add_parameter(&state.db, product_id, &body)
        .await?
        .ok_or(ApiError::NotFound("Product"))?;
    info!(product_id, "parameter added");
    Ok(Json(product))
}

/// PUT /login/products/{product_id}/parameters/{parameter_id}
pub async fn update_parameter(
    State(state): State<Arc<AppState>>,
    Path((product_id, parameter_id)): Path<(ProductId, ParameterId)>,
    Json(body): Json<ParameterRequest>,
) -> ApiResult<Json<Product>> {
    require_parameter_names([body.parameter_name.as_str()])?;

    let product = store::update_parameter(&state.db, product_id, parameter_id, &body)
        .await?
        .ok_or(ApiError::NotFound("Parameter"))?;
    info!(product_id, parameter_id, "parameter updated");
    Ok(Json(product))
}

/// DELETE /login/products/{product_id}/parameters/{parameter_id}
///
/// Value cells recorded against the parameter are deleted with it.
pub async fn delete_parameter(
    State(state): State<Arc<AppState>>,
    Path((product_id, parameter_id)): Path<(ProductId, ParameterId)>,
) -> ApiResult<Json<serde_json::Value>> {
    if !store::delete_parameter(&state.db, product_id, parameter_id).await? {
        return Err(ApiError::NotFound("Parameter"));
    }
    info!(product_id, parameter_id, "parameter deleted");
    Ok(Json(json!({
        "success": true,
        "message": "Parameter deleted successfully"
    })))
}
