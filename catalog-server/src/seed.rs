use shared_types::{CreateProductRequest, DataType, ParameterDraft};
use sqlx::SqlitePool;
use tracing::info;

use crate::auth::insert_user_if_missing;
use crate::db::products;

pub const SAMPLE_PRODUCT: &str = "Sample Product";

const DEFAULT_USERS: [(&str, &str); 2] = [("admin123", "password123"), ("user456", "secret456")];

/// Insert the default login accounts and the sample product when missing.
/// Safe to run on every start.
pub async fn seed_defaults(pool: &SqlitePool) -> anyhow::Result<()> {
    for (token_id, password) in DEFAULT_USERS {
        if insert_user_if_missing(pool, token_id, password).await? {
            info!(token_id, "seeded login account");
        }
    }

    if products::find_product_id_by_name(pool, SAMPLE_PRODUCT)
        .await?
        .is_none()
    {
        let product = products::create_product(pool, &sample_product()).await?;
        info!(product_id = product.id, "seeded sample product");
    }

    Ok(())
}

fn sample_product() -> CreateProductRequest {
    CreateProductRequest {
        product_name: SAMPLE_PRODUCT.to_string(),
        parameters: vec![
            ParameterDraft {
                id: None,
                parameter_name: "Size".to_string(),
                data_type: DataType::String,
                range: "Small, Medium, Large".to_string(),
            },
            ParameterDraft {
                id: None,
                parameter_name: "Weight".to_string(),
                data_type: DataType::Number,
                range: "1-100 kg".to_string(),
            },
        ],
    }
}
