//! In-memory `CatalogApi` for controller tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use shared_types::{
    CreateProductRequest, LoginRequest, LoginResponse, Parameter, ParameterId, ParameterRequest,
    Product, ProductId, SaveValuesRequest, SavedCell, UpdateProductRequest, ValueRow, ValueRowId,
};

use crate::actions::ViewState;
use crate::api::{ApiError, ApiResult, CatalogApi};

impl<T> ViewState<T> for Rc<RefCell<T>> {
    fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut *self.borrow_mut())
    }

    fn inspect<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.borrow())
    }
}

#[derive(Default)]
pub struct FakeCatalogApi {
    products: RefCell<Vec<Product>>,
    rows: RefCell<Vec<(ProductId, ValueRow)>>,
    next_id: Cell<i64>,
    fail_next: RefCell<Option<ApiError>>,
    during_next_call: RefCell<Option<Box<dyn FnOnce()>>>,
    calls: RefCell<Vec<String>>,
}

pub fn network_down() -> ApiError {
    ApiError::Network("connection refused".to_string())
}

fn not_found(what: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        message: format!("{what} not found"),
    }
}

impl FakeCatalogApi {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            ..Default::default()
        }
    }

    fn next_id(&self) -> i64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn parameter_from(&self, request: &ParameterRequest) -> Parameter {
        Parameter {
            id: self.next_id(),
            parameter_name: request.parameter_name.clone(),
            data_type: request.data_type,
            range: request.range.clone(),
        }
    }

    /// Seeds a product with the given (name, range) parameters.
    pub fn with_product(&self, name: &str, parameters: &[(&str, &str)]) -> Product {
        let product = Product {
            id: self.next_id(),
            product_name: name.to_string(),
            parameters: parameters
                .iter()
                .map(|(name, range)| {
                    self.parameter_from(&ParameterRequest {
                        parameter_name: name.to_string(),
                        data_type: Default::default(),
                        range: range.to_string(),
                    })
                })
                .collect(),
        };
        self.products.borrow_mut().push(product.clone());
        product
    }

    pub fn product(&self, product_id: ProductId) -> Option<Product> {
        self.products
            .borrow()
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
    }

    /// Replaces a stored product behind the client's back.
    pub fn replace_product(&self, product: Product) {
        let mut products = self.products.borrow_mut();
        if let Some(slot) = products.iter_mut().find(|p| p.id == product.id) {
            *slot = product;
        }
    }

    pub fn rows(&self, product_id: ProductId) -> Vec<ValueRow> {
        self.rows
            .borrow()
            .iter()
            .filter(|(owner, _)| *owner == product_id)
            .map(|(_, row)| row.clone())
            .collect()
    }

    pub fn fail_next(&self, error: ApiError) {
        *self.fail_next.borrow_mut() = Some(error);
    }

    /// Runs `f` while the next request is in flight.
    pub fn during_next_call(&self, f: impl FnOnce() + 'static) {
        *self.during_next_call.borrow_mut() = Some(Box::new(f));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: impl Into<String>) -> ApiResult<()> {
        self.calls.borrow_mut().push(call.into());
        let hook = self.during_next_call.borrow_mut().take();
        if let Some(hook) = hook {
            hook();
        }
        match self.fail_next.borrow_mut().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn with_product_mut<T>(
        &self,
        product_id: ProductId,
        f: impl FnOnce(&mut Product) -> ApiResult<T>,
    ) -> ApiResult<T> {
        let mut products = self.products.borrow_mut();
        let product = products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| not_found("Product"))?;
        f(product)
    }
}

#[async_trait(?Send)]
impl CatalogApi for FakeCatalogApi {
    async fn authenticate(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        self.record("authenticate")?;
        Ok(match (request.token_id.as_str(), request.password.as_str()) {
            ("admin123", "password123") => {
                LoginResponse::accepted("admin123", "Login successful!")
            }
            ("admin123", _) => LoginResponse::rejected("Invalid password!"),
            _ => LoginResponse::rejected("User not found!"),
        })
    }

    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        self.record("list_products")?;
        Ok(self.products.borrow().clone())
    }

    async fn list_products_only(&self) -> ApiResult<Vec<Product>> {
        self.record("list_products_only")?;
        Ok(self.products.borrow().clone())
    }

    async fn get_product(&self, product_id: ProductId) -> ApiResult<Product> {
        self.record(format!("get_product {product_id}"))?;
        self.product(product_id).ok_or_else(|| not_found("Product"))
    }

    async fn create_product(&self, request: &CreateProductRequest) -> ApiResult<Product> {
        self.record("create_product")?;
        let product = Product {
            id: self.next_id(),
            product_name: request.product_name.clone(),
            parameters: request
                .parameters
                .iter()
                .map(|draft| self.parameter_from(&ParameterRequest::from(draft)))
                .collect(),
        };
        self.products.borrow_mut().push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        product_id: ProductId,
        request: &UpdateProductRequest,
    ) -> ApiResult<Product> {
        self.record(format!("update_product {product_id}"))?;
        let parameters = request
            .parameters
            .iter()
            .map(|draft| match draft.id {
                Some(id) => Parameter {
                    id,
                    parameter_name: draft.parameter_name.clone(),
                    data_type: draft.data_type,
                    range: draft.range.clone(),
                },
                None => self.parameter_from(&ParameterRequest::from(draft)),
            })
            .collect();
        self.with_product_mut(product_id, |product| {
            product.product_name = request.product_name.clone();
            product.parameters = parameters;
            Ok(product.clone())
        })
    }

    async fn add_parameter(
        &self,
        product_id: ProductId,
        request: &ParameterRequest,
    ) -> ApiResult<Product> {
        self.record(format!("add_parameter {product_id}"))?;
        let parameter = self.parameter_from(request);
        self.with_product_mut(product_id, |product| {
            product.parameters.push(parameter);
            Ok(product.clone())
        })
    }

    async fn update_parameter(
        &self,
        product_id: ProductId,
        parameter_id: ParameterId,
        request: &ParameterRequest,
    ) -> ApiResult<()> {
        self.record(format!("update_parameter {parameter_id}"))?;
        self.with_product_mut(product_id, |product| {
            let parameter = product
                .parameters
                .iter_mut()
                .find(|p| p.id == parameter_id)
                .ok_or_else(|| not_found("Parameter"))?;
            parameter.parameter_name = request.parameter_name.clone();
            parameter.data_type = request.data_type;
            parameter.range = request.range.clone();
            Ok(())
        })
    }

    async fn delete_parameter(
        &self,
        product_id: ProductId,
        parameter_id: ParameterId,
    ) -> ApiResult<()> {
        self.record(format!("delete_parameter {parameter_id}"))?;
        self.with_product_mut(product_id, |product| {
            let before = product.parameters.len();
            product.parameters.retain(|p| p.id != parameter_id);
            if product.parameters.len() == before {
                return Err(not_found("Parameter"));
            }
            Ok(())
        })?;
        for (_, row) in self.rows.borrow_mut().iter_mut() {
            row.cells.retain(|c| c.parameter_id != parameter_id);
        }
        Ok(())
    }

    async fn list_values(&self, product_id: ProductId) -> ApiResult<Vec<ValueRow>> {
        self.record(format!("list_values {product_id}"))?;
        Ok(self.rows(product_id))
    }

    async fn save_values(
        &self,
        product_id: ProductId,
        request: &SaveValuesRequest,
    ) -> ApiResult<()> {
        self.record(format!("save_values {product_id}"))?;
        let product = self.product(product_id).ok_or_else(|| not_found("Product"))?;
        let name = request
            .values
            .first()
            .map(|v| v.name.clone())
            .unwrap_or_default();
        let cells = request
            .values
            .iter()
            .map(|entry| SavedCell {
                parameter_id: entry.parameter_id,
                parameter_name: product
                    .parameter(entry.parameter_id)
                    .map(|p| p.parameter_name.clone())
                    .unwrap_or_else(|| "Unknown Parameter".to_string()),
                value: entry.value.clone(),
            })
            .collect();
        let row = ValueRow {
            id: self.next_id(),
            name,
            cells,
        };
        self.rows.borrow_mut().push((product_id, row));
        Ok(())
    }

    async fn delete_value(&self, product_id: ProductId, value_id: ValueRowId) -> ApiResult<()> {
        self.record(format!("delete_value {value_id}"))?;
        let mut rows = self.rows.borrow_mut();
        let before = rows.len();
        rows.retain(|(owner, row)| !(*owner == product_id && row.id == value_id));
        if rows.len() == before {
            return Err(not_found("Value row"));
        }
        Ok(())
    }
}
