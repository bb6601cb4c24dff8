use shared_types::{ProductId, SavedCell, ValueEntry, ValueRow, ValueRowId};
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct CellRow {
    row_id: i64,
    row_name: String,
    parameter_id: Option<i64>,
    parameter_name: Option<String>,
    value: Option<String>,
}

/// Saved rows of a product, oldest first, cells in parameter order.
pub async fn list_value_rows(
    pool: &SqlitePool,
    product_id: ProductId,
) -> Result<Vec<ValueRow>, sqlx::Error> {
    let cells: Vec<CellRow> = sqlx::query_as(
        "SELECT r.id AS row_id, r.name AS row_name,
                c.parameter_id AS parameter_id, p.parameter_name AS parameter_name,
                c.value AS value
         FROM value_rows r
         LEFT JOIN value_cells c ON c.row_id = r.id
         LEFT JOIN parameters p ON p.id = c.parameter_id
         WHERE r.product_id = ?
         ORDER BY r.id, p.position, p.id",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    let mut rows: Vec<ValueRow> = Vec::new();
    for cell in cells {
        if rows.last().map(|r| r.id) != Some(cell.row_id) {
            rows.push(ValueRow {
                id: cell.row_id,
                name: cell.row_name,
                cells: Vec::new(),
            });
        }
        let (Some(parameter_id), Some(row)) = (cell.parameter_id, rows.last_mut()) else {
            continue;
        };
        row.cells.push(SavedCell {
            parameter_id,
            parameter_name: cell
                .parameter_name
                .unwrap_or_else(|| "Unknown Parameter".to_string()),
            value: cell.value.unwrap_or_default(),
        });
    }
    Ok(rows)
}

/// Insert one named row with a cell per entry. Callers validate the batch.
pub async fn insert_value_row(
    pool: &SqlitePool,
    product_id: ProductId,
    name: &str,
    entries: &[ValueEntry],
) -> Result<ValueRowId, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let row_id = sqlx::query("INSERT INTO value_rows (product_id, name) VALUES (?, ?)")
        .bind(product_id)
        .bind(name)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    for entry in entries {
        sqlx::query("INSERT INTO value_cells (row_id, parameter_id, value) VALUES (?, ?, ?)")
            .bind(row_id)
            .bind(entry.parameter_id)
            .bind(&entry.value)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(row_id)
}

pub async fn delete_value_row(
    pool: &SqlitePool,
    product_id: ProductId,
    row_id: ValueRowId,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "DELETE FROM value_cells WHERE row_id IN
         (SELECT id FROM value_rows WHERE id = ? AND product_id = ?)",
    )
    .bind(row_id)
    .bind(product_id)
    .execute(&mut *tx)
    .await?;

    let deleted = sqlx::query("DELETE FROM value_rows WHERE id = ? AND product_id = ?")
        .bind(row_id)
        .bind(product_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok(deleted > 0)
}
