use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{
    CreateProductRequest, LoginRequest, LoginResponse, ParameterId, ParameterRequest, Product,
    ProductId, SaveValuesRequest, UpdateProductRequest, ValueRow, ValueRowId,
};
use std::sync::OnceLock;

/// Get the API base URL based on current environment
/// - In development (localhost): use http://localhost:8080
/// - In production: use same origin (API serves static files)
fn get_api_base() -> String {
    let hostname = web_sys::window()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default();

    if hostname == "localhost" || hostname == "127.0.0.1" {
        "http://localhost:8080".to_string()
    } else {
        "".to_string()
    }
}

static API_BASE_CACHE: OnceLock<String> = OnceLock::new();

/// Get the cached API base URL
pub fn api_base() -> &'static str {
    API_BASE_CACHE.get_or_init(get_api_base).as_str()
}

/// Failure of a backend call: the request never completed, the server
/// answered with a non-success status, or the body could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("HTTP error: {status} ({message})")]
    Status { status: u16, message: String },

    #[error("Failed to parse JSON: {0}")]
    Payload(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Pull a human-readable reason out of an error body.
fn error_message_from_body(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(error) = json.get("error").and_then(|v| v.as_str()) {
            return Some(error.to_string());
        }
        if let Some(message) = json.get("message").and_then(|v| v.as_str()) {
            return Some(message.to_string());
        }
    }

    Some(body.to_string())
}

async fn describe_http_error(response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ApiError::Status {
        status,
        message: error_message_from_body(&body).unwrap_or_else(|| "no details".to_string()),
    }
}

/// REST surface the dashboard depends on.
///
/// Futures are not `Send`: in the browser everything runs on one thread.
#[async_trait(?Send)]
pub trait CatalogApi {
    async fn authenticate(&self, request: &LoginRequest) -> ApiResult<LoginResponse>;

    async fn list_products(&self) -> ApiResult<Vec<Product>>;

    /// Display-only listing used by the selectable catalog.
    async fn list_products_only(&self) -> ApiResult<Vec<Product>>;

    async fn get_product(&self, product_id: ProductId) -> ApiResult<Product>;

    async fn create_product(&self, request: &CreateProductRequest) -> ApiResult<Product>;

    async fn update_product(
        &self,
        product_id: ProductId,
        request: &UpdateProductRequest,
    ) -> ApiResult<Product>;

    /// Returns the product with its full, authoritative parameter list.
    async fn add_parameter(
        &self,
        product_id: ProductId,
        request: &ParameterRequest,
    ) -> ApiResult<Product>;

    async fn update_parameter(
        &self,
        product_id: ProductId,
        parameter_id: ParameterId,
        request: &ParameterRequest,
    ) -> ApiResult<()>;

    async fn delete_parameter(&self, product_id: ProductId, parameter_id: ParameterId)
        -> ApiResult<()>;

    async fn list_values(&self, product_id: ProductId) -> ApiResult<Vec<ValueRow>>;

    async fn save_values(&self, product_id: ProductId, request: &SaveValuesRequest)
        -> ApiResult<()>;

    async fn delete_value(&self, product_id: ProductId, value_id: ValueRowId) -> ApiResult<()>;
}

/// `CatalogApi` over HTTP with `gloo-net`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpCatalogApi {
    base: &'static str,
}

impl HttpCatalogApi {
    pub fn new() -> Self {
        Self { base: api_base() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/login{}", self.base, path)
    }

    async fn send(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !response.ok() {
            return Err(describe_http_error(response).await);
        }
        Ok(response)
    }

    async fn send_json<B: Serialize>(&self, builder: RequestBuilder, body: &B) -> ApiResult<Response> {
        let request: Request = builder
            .json(body)
            .map_err(|e| ApiError::Payload(format!("Failed to serialize request: {e}")))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !response.ok() {
            return Err(describe_http_error(response).await);
        }
        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        response
            .json()
            .await
            .map_err(|e| ApiError::Payload(e.to_string()))
    }
}

impl Default for HttpCatalogApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl CatalogApi for HttpCatalogApi {
    async fn authenticate(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        let response = self
            .send_json(Request::post(&self.url("/authenticate")), request)
            .await?;
        Self::read_json(response).await
    }

    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        let response = self.send(Request::get(&self.url("/products"))).await?;
        Self::read_json(response).await
    }

    async fn list_products_only(&self) -> ApiResult<Vec<Product>> {
        let response = self.send(Request::get(&self.url("/productsonly"))).await?;
        Self::read_json(response).await
    }

    async fn get_product(&self, product_id: ProductId) -> ApiResult<Product> {
        let url = self.url(&format!("/products/{product_id}"));
        let response = self.send(Request::get(&url)).await?;
        Self::read_json(response).await
    }

    async fn create_product(&self, request: &CreateProductRequest) -> ApiResult<Product> {
        let response = self
            .send_json(Request::post(&self.url("/products")), request)
            .await?;
        Self::read_json(response).await
    }

    async fn update_product(
        &self,
        product_id: ProductId,
        request: &UpdateProductRequest,
    ) -> ApiResult<Product> {
        let url = self.url(&format!("/products/{product_id}/parameters"));
        let response = self.send_json(Request::put(&url), request).await?;
        Self::read_json(response).await
    }

    async fn add_parameter(
        &self,
        product_id: ProductId,
        request: &ParameterRequest,
    ) -> ApiResult<Product> {
        let url = self.url(&format!("/products/{product_id}/parameters"));
        let response = self.send_json(Request::post(&url), request).await?;
        Self::read_json(response).await
    }

    async fn update_parameter(
        &self,
        product_id: ProductId,
        parameter_id: ParameterId,
        request: &ParameterRequest,
    ) -> ApiResult<()> {
        let url = self.url(&format!("/products/{product_id}/parameters/{parameter_id}"));
        self.send_json(Request::put(&url), request).await?;
        Ok(())
    }

    async fn delete_parameter(
        &self,
        product_id: ProductId,
        parameter_id: ParameterId,
    ) -> ApiResult<()> {
        let url = self.url(&format!("/products/{product_id}/parameters/{parameter_id}"));
        self.send(Request::delete(&url)).await?;
        Ok(())
    }

    async fn list_values(&self, product_id: ProductId) -> ApiResult<Vec<ValueRow>> {
        let url = self.url(&format!("/products/{product_id}/values"));
        let response = self.send(Request::get(&url)).await?;
        Self::read_json(response).await
    }

    async fn save_values(
        &self,
        product_id: ProductId,
        request: &SaveValuesRequest,
    ) -> ApiResult<()> {
        let url = self.url(&format!("/products/{product_id}/values"));
        self.send_json(Request::post(&url), request).await?;
        Ok(())
    }

    async fn delete_value(&self, product_id: ProductId, value_id: ValueRowId) -> ApiResult<()> {
        let url = self.url(&format!("/products/{product_id}/values/{value_id}"));
        self.send(Request::delete(&url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_prefers_error_then_message_field() {
        assert_eq!(
            error_message_from_body(r#"{"success":false,"error":"Product not found"}"#).as_deref(),
            Some("Product not found")
        );
        assert_eq!(
            error_message_from_body(r#"{"message":"Invalid password!"}"#).as_deref(),
            Some("Invalid password!")
        );
        assert_eq!(
            error_message_from_body("upstream timeout").as_deref(),
            Some("upstream timeout")
        );
        assert_eq!(error_message_from_body("   "), None);
    }

    #[test]
    fn status_error_renders_code_and_reason() {
        let err = ApiError::Status {
            status: 404,
            message: "Product not found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error: 404 (Product not found)");
    }
}
