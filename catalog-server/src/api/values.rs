use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde_json::json;
use shared_types::{Product, ProductId, SaveValuesRequest, ValueEntry, ValueRow, ValueRowId};
use tracing::info;

use crate::db::{products, values as store};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Check that a batch is one complete row: a single non-blank name and
/// exactly one entry per current parameter of the product.
fn validate_row<'a>(product: &Product, entries: &'a [ValueEntry]) -> Result<&'a str, ApiError> {
    let Some(first) = entries.first() else {
        return Err(ApiError::bad_request("values must not be empty"));
    };

    let name = first.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }
    if entries.iter().any(|e| e.name.trim() != name) {
        return Err(ApiError::bad_request(
            "all entries of a row must carry the same name",
        ));
    }

    let expected: HashSet<_> = product.parameters.iter().map(|p| p.id).collect();
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !expected.contains(&entry.parameter_id) {
            return Err(ApiError::bad_request(format!(
                "parameter {} does not belong to product {}",
                entry.parameter_id, product.id
            )));
        }
        if !seen.insert(entry.parameter_id) {
            return Err(ApiError::bad_request(format!(
                "parameter {} appears more than once",
                entry.parameter_id
            )));
        }
    }
    if seen.len() != expected.len() {
        return Err(ApiError::bad_request(
            "a row needs one value for every parameter",
        ));
    }

    Ok(name)
}

/// GET /login/products/{product_id}/values
pub async fn list_values(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<ProductId>,
) -> ApiResult<Json<Vec<ValueRow>>> {
    if products::get_product(&state.db, product_id).await?.is_none() {
        return Err(ApiError::NotFound("Product"));
    }
    Ok(Json(store::list_value_rows(&state.db, product_id).await?))
}

/// POST /login/products/{product_id}/values
pub async fn save_values(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<ProductId>,
    Json(body): Json<SaveValuesRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    if body.product_id.is_some_and(|id| id != product_id) {
        return Err(ApiError::bad_request("productId does not match the path"));
    }

    let product = products::get_product(&state.db, product_id)
        .await?
        .ok_or(ApiError::NotFound("Product"))?;
    let name = validate_row(&product, &body.values)?;

    let row_id = store::insert_value_row(&state.db, product_id, name, &body.values).await?;
    info!(product_id, row_id, "value row saved");
    Ok(Json(json!({
        "success": true,
        "message": "Values saved successfully",
        "id": row_id
    })))
}

/// DELETE /login/products/{product_id}/values/{value_id}
pub async fn delete_value(
    State(state): State<Arc<AppState>>,
    Path((product_id, value_id)): Path<(ProductId, ValueRowId)>,
) -> ApiResult<Json<serde_json::Value>> {
    if !store::delete_value_row(&state.db, product_id, value_id).await? {
        return Err(ApiError::NotFound("Value row"));
    }
    info!(product_id, value_id, "value row deleted");
    Ok(Json(json!({
        "success": true,
        "message": "Value deleted successfully"
    })))
}
