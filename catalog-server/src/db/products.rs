//! Product and parameter persistence.
//!
//! Parameters keep an explicit `position` so the list order survives edits;
//! value rows reference parameters by id, never by position.

use std::collections::{HashMap, HashSet};

use shared_types::{
    CreateProductRequest, DataType, Parameter, ParameterId, ParameterRequest, Product, ProductId,
    UpdateProductRequest,
};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::warn;

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    product_name: String,
}

#[derive(sqlx::FromRow)]
struct ParameterRow {
    id: i64,
    product_id: i64,
    parameter_name: String,
    data_type: String,
    parameter_range: String,
}

impl ParameterRow {
    fn into_parameter(self) -> Parameter {
        let data_type = self.data_type.parse::<DataType>().unwrap_or_else(|e| {
            warn!(parameter_id = self.id, error = %e, "stored data type not recognised, reading as String");
            DataType::String
        });
        Parameter {
            id: self.id,
            parameter_name: self.parameter_name,
            data_type,
            range: self.parameter_range,
        }
    }
}

const PARAMETER_COLUMNS: &str =
    "id, product_id, parameter_name, data_type, parameter_range";

pub async fn list_products(pool: &SqlitePool) -> Result<Vec<Product>, sqlx::Error> {
    let products: Vec<ProductRow> =
        sqlx::query_as("SELECT id, product_name FROM products ORDER BY id")
            .fetch_all(pool)
            .await?;

    let parameters: Vec<ParameterRow> = sqlx::query_as(&format!(
        "SELECT {PARAMETER_COLUMNS} FROM parameters ORDER BY product_id, position, id"
    ))
    .fetch_all(pool)
    .await?;

    let mut by_product: HashMap<ProductId, Vec<Parameter>> = HashMap::new();
    for row in parameters {
        by_product
            .entry(row.product_id)
            .or_default()
            .push(row.into_parameter());
    }

    Ok(products
        .into_iter()
        .map(|p| Product {
            parameters: by_product.remove(&p.id).unwrap_or_default(),
            id: p.id,
            product_name: p.product_name,
        })
        .collect())
}

pub async fn get_product(
    pool: &SqlitePool,
    product_id: ProductId,
) -> Result<Option<Product>, sqlx::Error> {
    let mut conn = pool.acquire().await?;
    fetch_product(&mut conn, product_id).await
}

pub async fn find_product_id_by_name(
    pool: &SqlitePool,
    product_name: &str,
) -> Result<Option<ProductId>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM products WHERE product_name = ? ORDER BY id LIMIT 1")
        .bind(product_name)
        .fetch_optional(pool)
        .await
}

pub async fn create_product(
    pool: &SqlitePool,
    request: &CreateProductRequest,
) -> Result<Product, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let product_id = sqlx::query("INSERT INTO products (product_name) VALUES (?)")
        .bind(request.product_name.trim())
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    for (position, draft) in request.parameters.iter().enumerate() {
        let parameter = ParameterRequest::from(draft);
        insert_parameter_at(&mut tx, product_id, position as i64, &parameter).await?;
    }

    let product = fetch_product(&mut tx, product_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    tx.commit().await?;
    Ok(product)
}

/// Replace a product's name and parameter list.
///
/// Entries carrying the id of one of this product's parameters update it in
/// place (keeping its value cells); entries without a known id are inserted;
/// existing parameters not named in the request are deleted together with
/// their value cells. A blank name leaves the stored name unchanged.
pub async fn replace_parameters(
    pool: &SqlitePool,
    product_id: ProductId,
    request: &UpdateProductRequest,
) -> Result<Option<Product>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    if fetch_product(&mut tx, product_id).await?.is_none() {
        return Ok(None);
    }

    let name = request.product_name.trim();
    if !name.is_empty() {
        sqlx::query("UPDATE products SET product_name = ? WHERE id = ?")
            .bind(name)
            .bind(product_id)
            .execute(&mut *tx)
            .await?;
    }

    let existing: HashSet<ParameterId> =
        sqlx::query_scalar::<_, i64>("SELECT id FROM parameters WHERE product_id = ?")
            .bind(product_id)
            .fetch_all(&mut *tx)
            .await?
            .into_iter()
            .collect();

    let kept: HashSet<ParameterId> = request
        .parameters
        .iter()
        .filter_map(|p| p.id)
        .filter(|id| existing.contains(id))
        .collect();

    for removed in existing.difference(&kept) {
        remove_parameter(&mut tx, product_id, *removed).await?;
    }

    for (position, draft) in request.parameters.iter().enumerate() {
        let position = position as i64;
        match draft.id.filter(|id| kept.contains(id)) {
            Some(parameter_id) => {
                sqlx::query(
                    "UPDATE parameters
                     SET position = ?, parameter_name = ?, data_type = ?, parameter_range = ?
                     WHERE id = ? AND product_id = ?",
                )
                .bind(position)
                .bind(draft.parameter_name.trim())
                .bind(draft.data_type.as_str())
                .bind(&draft.range)
                .bind(parameter_id)
                .bind(product_id)
                .execute(&mut *tx)
                .await?;
            }
            None => {
                let parameter = ParameterRequest::from(draft);
                insert_parameter_at(&mut tx, product_id, position, &parameter).await?;
            }
        }
    }

    let product = fetch_product(&mut tx, product_id).await?;
    tx.commit().await?;
    Ok(product)
}

/// Append one parameter; returns the full updated product.
pub async fn add_parameter(
    pool: &SqlitePool,
    product_id: ProductId,
    request: &ParameterRequest,
) -> Result<Option<Product>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    if fetch_product(&mut tx, product_id).await?.is_none() {
        return Ok(None);
    }

    let position: i64 = sqlx::query_scalar(
        "SELECT COALESCE(MAX(position) + 1, 0) FROM parameters WHERE product_id = ?",
    )
    .bind(product_id)
    .fetch_one(&mut *tx)
    .await?;
    insert_parameter_at(&mut tx, product_id, position, request).await?;

    let product = fetch_product(&mut tx, product_id).await?;
    tx.commit().await?;
    Ok(product)
}

pub async fn update_parameter(
    pool: &SqlitePool,
    product_id: ProductId,
    parameter_id: ParameterId,
    request: &ParameterRequest,
) -> Result<Option<Product>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query(
        "UPDATE parameters SET parameter_name = ?, data_type = ?, parameter_range = ?
         WHERE id = ? AND product_id = ?",
    )
    .bind(request.parameter_name.trim())
    .bind(request.data_type.as_str())
    .bind(&request.range)
    .bind(parameter_id)
    .bind(product_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if updated == 0 {
        return Ok(None);
    }

    let product = fetch_product(&mut tx, product_id).await?;
    tx.commit().await?;
    Ok(product)
}

/// Delete a parameter and every value cell that references it.
pub async fn delete_parameter(
    pool: &SqlitePool,
    product_id: ProductId,
    parameter_id: ParameterId,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let deleted = remove_parameter(&mut tx, product_id, parameter_id).await?;
    tx.commit().await?;
    Ok(deleted)
}

async fn fetch_product(
    conn: &mut SqliteConnection,
    product_id: ProductId,
) -> Result<Option<Product>, sqlx::Error> {
    let Some(row) = sqlx::query_as::<_, ProductRow>(
        "SELECT id, product_name FROM products WHERE id = ?",
    )
    .bind(product_id)
    .fetch_optional(&mut *conn)
    .await?
    else {
        return Ok(None);
    };

    let parameters: Vec<ParameterRow> = sqlx::query_as(&format!(
        "SELECT {PARAMETER_COLUMNS} FROM parameters WHERE product_id = ? ORDER BY position, id"
    ))
    .bind(product_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Some(Product {
        id: row.id,
        product_name: row.product_name,
        parameters: parameters
            .into_iter()
            .map(ParameterRow::into_parameter)
            .collect(),
    }))
}

async fn insert_parameter_at(
    conn: &mut SqliteConnection,
    product_id: ProductId,
    position: i64,
    request: &ParameterRequest,
) -> Result<ParameterId, sqlx::Error> {
    let id = sqlx::query(
        "INSERT INTO parameters (product_id, position, parameter_name, data_type, parameter_range)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(product_id)
    .bind(position)
    .bind(request.parameter_name.trim())
    .bind(request.data_type.as_str())
    .bind(&request.range)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();
    Ok(id)
}

async fn remove_parameter(
    conn: &mut SqliteConnection,
    product_id: ProductId,
    parameter_id: ParameterId,
) -> Result<bool, sqlx::Error> {
    sqlx::query(
        "DELETE FROM value_cells WHERE parameter_id IN
         (SELECT id FROM parameters WHERE id = ? AND product_id = ?)",
    )
    .bind(parameter_id)
    .bind(product_id)
    .execute(&mut *conn)
    .await?;

    let deleted = sqlx::query("DELETE FROM parameters WHERE id = ? AND product_id = ?")
        .bind(parameter_id)
        .bind(product_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();
    Ok(deleted > 0)
}
