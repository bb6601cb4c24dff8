//! Product form: create a product or edit an existing one.
//!
//! Create mode is purely local until `submit`. Edit mode applies every
//! parameter add, update and delete against the server as soon as the user
//! confirms it, and only touches local state once the server has answered.
//!
//! Remote operations come in two halves (`begin_*` builds the request and
//! takes the busy lock, `finish_*` applies the response) so a component can
//! release its signal borrow while the request is in flight. The `async`
//! methods chain both halves for callers that own the form outright.

use dioxus_logger::tracing::{error, info};
use shared_types::{
    CreateProductRequest, DataType, ParameterDraft, ParameterId, ParameterRequest, Product,
    ProductId, UpdateProductRequest,
};

use crate::api::{ApiError, ApiResult, CatalogApi};

pub const MIN_PARAMETER_COUNT: usize = 1;
pub const MAX_PARAMETER_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterField {
    Name,
    DataType,
    Range,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("parameter count must be between 1 and 10, got {0}")]
    CountOutOfRange(usize),
    #[error("'{0}' is not a parameter count")]
    InvalidCount(String),
    #[error("only available while creating a product")]
    NotInCreateMode,
    #[error("only available while editing a saved product")]
    NotInEditMode,
    #[error("no parameter at position {0}")]
    NoSuchParameter(usize),
    #[error("parameter at position {0} has not been saved yet")]
    UnsavedParameter(usize),
    #[error("a product needs at least one parameter")]
    LastParameter,
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{0}")]
    InvalidDataType(String),
    #[error("parameter count {count} does not match {len} parameters")]
    CountMismatch { count: usize, len: usize },
    #[error("another request is still in flight")]
    Busy,
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { product_id: ProductId },
}

/// Request produced by `begin_submit`.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(CreateProductRequest),
    Update {
        product_id: ProductId,
        request: UpdateProductRequest,
    },
}

/// A single-parameter call against a saved product.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterCall {
    pub product_id: ProductId,
    pub parameter_id: ParameterId,
    pub index: usize,
    pub request: ParameterRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    mode: FormMode,
    pub product_name: String,
    parameters: Vec<ParameterDraft>,
    parameter_count: usize,
    /// New parameter being composed in edit mode.
    pending: ParameterDraft,
    editing_parameter_index: Option<usize>,
    /// Saved copy of the row being edited, restored on cancel.
    editing_snapshot: Option<ParameterDraft>,
    busy: bool,
}

impl ProductForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            product_name: String::new(),
            parameters: vec![ParameterDraft::default()],
            parameter_count: MIN_PARAMETER_COUNT,
            pending: ParameterDraft::default(),
            editing_parameter_index: None,
            editing_snapshot: None,
            busy: false,
        }
    }

    pub fn edit(product: &Product) -> Self {
        Self {
            mode: FormMode::Edit {
                product_id: product.id,
            },
            product_name: product.product_name.clone(),
            parameters: product.parameters.iter().map(|p| p.to_draft()).collect(),
            parameter_count: product.parameters.len(),
            pending: ParameterDraft::default(),
            editing_parameter_index: None,
            editing_snapshot: None,
            busy: false,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn parameters(&self) -> &[ParameterDraft] {
        &self.parameters
    }

    pub fn parameter_count(&self) -> usize {
        match self.mode {
            FormMode::Create => self.parameter_count,
            FormMode::Edit { .. } => self.parameters.len(),
        }
    }

    pub fn pending(&self) -> &ParameterDraft {
        &self.pending
    }

    pub fn editing_parameter_index(&self) -> Option<usize> {
        self.editing_parameter_index
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    fn edit_product_id(&self) -> Result<ProductId, FormError> {
        match self.mode {
            FormMode::Edit { product_id } => Ok(product_id),
            FormMode::Create => Err(FormError::NotInEditMode),
        }
    }

    fn lock(&mut self) -> Result<(), FormError> {
        if self.busy {
            return Err(FormError::Busy);
        }
        self.busy = true;
        Ok(())
    }

    /// Parses the raw count input, rejecting anything outside 1..=10.
    pub fn parse_parameter_count(input: &str) -> Result<usize, FormError> {
        let n: usize = input
            .trim()
            .parse()
            .map_err(|_| FormError::InvalidCount(input.to_string()))?;
        if !(MIN_PARAMETER_COUNT..=MAX_PARAMETER_COUNT).contains(&n) {
            return Err(FormError::CountOutOfRange(n));
        }
        Ok(n)
    }

    /// Resizes the list to `n`, keeping entries by position and padding with
    /// blank parameters.
    pub fn set_parameter_count(&mut self, n: usize) -> Result<(), FormError> {
        if self.mode != FormMode::Create {
            return Err(FormError::NotInCreateMode);
        }
        if !(MIN_PARAMETER_COUNT..=MAX_PARAMETER_COUNT).contains(&n) {
            return Err(FormError::CountOutOfRange(n));
        }
        self.parameters.resize_with(n, ParameterDraft::default);
        self.parameter_count = n;
        Ok(())
    }

    pub fn edit_field(
        &mut self,
        index: usize,
        field: ParameterField,
        value: &str,
    ) -> Result<(), FormError> {
        let parameter = self
            .parameters
            .get_mut(index)
            .ok_or(FormError::NoSuchParameter(index))?;
        apply_field(parameter, field, value)
    }

    pub fn edit_pending_field(&mut self, field: ParameterField, value: &str) -> Result<(), FormError> {
        apply_field(&mut self.pending, field, value)
    }

    pub fn delete_parameter_local(&mut self, index: usize) -> Result<(), FormError> {
        if self.mode != FormMode::Create {
            return Err(FormError::NotInCreateMode);
        }
        if index >= self.parameters.len() {
            return Err(FormError::NoSuchParameter(index));
        }
        if self.parameters.len() <= MIN_PARAMETER_COUNT {
            return Err(FormError::LastParameter);
        }
        self.parameters.remove(index);
        self.parameter_count = self.parameters.len();
        self.stop_editing();
        Ok(())
    }

    pub fn begin_editing(&mut self, index: usize) -> Result<(), FormError> {
        self.edit_product_id()?;
        if index >= self.parameters.len() {
            return Err(FormError::NoSuchParameter(index));
        }
        self.cancel_editing();
        self.editing_snapshot = Some(self.parameters[index].clone());
        self.editing_parameter_index = Some(index);
        Ok(())
    }

    /// Leaves editing mode and puts the row back the way the server has it.
    pub fn cancel_editing(&mut self) {
        if let (Some(index), Some(snapshot)) =
            (self.editing_parameter_index, self.editing_snapshot.take())
        {
            if let Some(parameter) = self.parameters.get_mut(index) {
                *parameter = snapshot;
            }
        }
        self.editing_parameter_index = None;
    }

    fn stop_editing(&mut self) {
        self.editing_parameter_index = None;
        self.editing_snapshot = None;
    }

    /// Create mode: append a blank parameter locally.
    pub fn add_parameter_local(&mut self) -> Result<(), FormError> {
        if self.mode != FormMode::Create {
            return Err(FormError::NotInCreateMode);
        }
        self.set_parameter_count(self.parameters.len() + 1)
    }

    fn saved_parameter(&self, index: usize) -> Result<(ProductId, ParameterId, &ParameterDraft), FormError> {
        let product_id = self.edit_product_id()?;
        let draft = self
            .parameters
            .get(index)
            .ok_or(FormError::NoSuchParameter(index))?;
        let parameter_id = draft.id.ok_or(FormError::UnsavedParameter(index))?;
        Ok((product_id, parameter_id, draft))
    }

    // ------------------------------------------------------------------
    // Edit mode: add parameter
    // ------------------------------------------------------------------

    pub fn begin_add_parameter(&mut self) -> Result<(ProductId, ParameterRequest), FormError> {
        let product_id = self.edit_product_id()?;
        if self.pending.parameter_name.trim().is_empty() {
            return Err(FormError::Required("Parameter name"));
        }
        self.lock()?;
        Ok((product_id, ParameterRequest::from(&self.pending)))
    }

    /// Replaces the whole parameter list with the server's copy.
    pub fn finish_add_parameter(&mut self, result: ApiResult<Product>) -> Result<(), FormError> {
        self.busy = false;
        match result {
            Ok(product) => {
                self.parameters = product.parameters.iter().map(|p| p.to_draft()).collect();
                self.pending = ParameterDraft::default();
                self.stop_editing();
                Ok(())
            }
            Err(err) => {
                error!("Failed to add parameter: {err}");
                Err(err.into())
            }
        }
    }

    pub async fn add_parameter(&mut self, api: &impl CatalogApi) -> Result<(), FormError> {
        if self.mode == FormMode::Create {
            return self.add_parameter_local();
        }
        let (product_id, request) = self.begin_add_parameter()?;
        let result = api.add_parameter(product_id, &request).await;
        self.finish_add_parameter(result)
    }

    // ------------------------------------------------------------------
    // Edit mode: update parameter
    // ------------------------------------------------------------------

    pub fn begin_update_parameter(&mut self, index: usize) -> Result<ParameterCall, FormError> {
        let (product_id, parameter_id, draft) = self.saved_parameter(index)?;
        if draft.parameter_name.trim().is_empty() {
            return Err(FormError::Required("Parameter name"));
        }
        let call = ParameterCall {
            product_id,
            parameter_id,
            index,
            request: ParameterRequest::from(draft),
        };
        self.lock()?;
        Ok(call)
    }

    pub fn finish_update_parameter(
        &mut self,
        call: &ParameterCall,
        result: ApiResult<()>,
    ) -> Result<(), FormError> {
        self.busy = false;
        match result {
            Ok(()) => {
                if self.editing_parameter_index == Some(call.index) {
                    self.stop_editing();
                }
                Ok(())
            }
            Err(err) => {
                error!(parameter_id = call.parameter_id, "Failed to update parameter: {err}");
                Err(err.into())
            }
        }
    }

    pub async fn update_parameter_remote(
        &mut self,
        api: &impl CatalogApi,
        index: usize,
    ) -> Result<(), FormError> {
        let call = self.begin_update_parameter(index)?;
        let result = api
            .update_parameter(call.product_id, call.parameter_id, &call.request)
            .await;
        self.finish_update_parameter(&call, result)
    }

    // ------------------------------------------------------------------
    // Edit mode: delete parameter
    // ------------------------------------------------------------------

    pub fn begin_delete_parameter(&mut self, index: usize) -> Result<ParameterCall, FormError> {
        let (product_id, parameter_id, draft) = self.saved_parameter(index)?;
        let call = ParameterCall {
            product_id,
            parameter_id,
            index,
            request: ParameterRequest::from(draft),
        };
        self.lock()?;
        Ok(call)
    }

    /// Removes the parameter only once the server confirmed the delete.
    pub fn finish_delete_parameter(
        &mut self,
        call: &ParameterCall,
        result: ApiResult<()>,
    ) -> Result<(), FormError> {
        self.busy = false;
        match result {
            Ok(()) => {
                self.cancel_editing();
                if let Some(position) = self
                    .parameters
                    .iter()
                    .position(|p| p.id == Some(call.parameter_id))
                {
                    self.parameters.remove(position);
                }
                Ok(())
            }
            Err(err) => {
                error!(parameter_id = call.parameter_id, "Failed to delete parameter: {err}");
                Err(err.into())
            }
        }
    }

    pub async fn delete_parameter_remote(
        &mut self,
        api: &impl CatalogApi,
        index: usize,
    ) -> Result<(), FormError> {
        let call = self.begin_delete_parameter(index)?;
        let result = api
            .delete_parameter(call.product_id, call.parameter_id)
            .await;
        self.finish_delete_parameter(&call, result)
    }

    // ------------------------------------------------------------------
    // Submit
    // ------------------------------------------------------------------

    pub fn begin_submit(&mut self) -> Result<Submission, FormError> {
        let product_name = self.product_name.trim();
        if product_name.is_empty() {
            return Err(FormError::Required("Product name"));
        }
        if self
            .parameters
            .iter()
            .any(|p| p.parameter_name.trim().is_empty())
        {
            return Err(FormError::Required("Parameter name"));
        }

        let submission = match self.mode {
            FormMode::Create => {
                if self.parameter_count != self.parameters.len() {
                    return Err(FormError::CountMismatch {
                        count: self.parameter_count,
                        len: self.parameters.len(),
                    });
                }
                Submission::Create(CreateProductRequest {
                    product_name: product_name.to_string(),
                    parameters: self.parameters.clone(),
                })
            }
            FormMode::Edit { product_id } => Submission::Update {
                product_id,
                request: UpdateProductRequest {
                    product_id: Some(product_id),
                    product_name: product_name.to_string(),
                    parameters: self.parameters.clone(),
                },
            },
        };
        self.lock()?;
        Ok(submission)
    }

    /// Hands back the saved product for the caller's continuation.
    pub fn finish_submit(&mut self, result: ApiResult<Product>) -> Result<Product, FormError> {
        self.busy = false;
        match result {
            Ok(product) => {
                info!(product_id = product.id, "product saved");
                Ok(product)
            }
            Err(err) => {
                error!("Failed to save product: {err}");
                Err(err.into())
            }
        }
    }

    pub async fn submit(&mut self, api: &impl CatalogApi) -> Result<Product, FormError> {
        let submission = self.begin_submit()?;
        let result = send_submission(api, &submission).await;
        self.finish_submit(result)
    }
}

pub async fn send_submission(api: &impl CatalogApi, submission: &Submission) -> ApiResult<Product> {
    match submission {
        Submission::Create(request) => api.create_product(request).await,
        Submission::Update {
            product_id,
            request,
        } => api.update_product(*product_id, request).await,
    }
}

fn apply_field(
    parameter: &mut ParameterDraft,
    field: ParameterField,
    value: &str,
) -> Result<(), FormError> {
    match field {
        ParameterField::Name => parameter.parameter_name = value.to_string(),
        ParameterField::Range => parameter.range = value.to_string(),
        ParameterField::DataType => {
            parameter.data_type = value
                .parse::<DataType>()
                .map_err(|e| FormError::InvalidDataType(e.to_string()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake_api::{network_down, FakeCatalogApi};
    use futures::executor::block_on;

    fn named(name: &str) -> ParameterDraft {
        ParameterDraft {
            parameter_name: name.to_string(),
            ..ParameterDraft::default()
        }
    }

    #[test]
    fn resizing_keeps_prefix_and_pads_with_defaults() {
        for m in 1..=MAX_PARAMETER_COUNT {
            for n in MIN_PARAMETER_COUNT..=MAX_PARAMETER_COUNT {
                let mut form = ProductForm::create();
                form.set_parameter_count(m).unwrap();
                for i in 0..m {
                    form.edit_field(i, ParameterField::Name, &format!("p{i}"))
                        .unwrap();
                }

                form.set_parameter_count(n).unwrap();

                assert_eq!(form.parameters().len(), n);
                assert_eq!(form.parameter_count(), n);
                for (i, parameter) in form.parameters().iter().enumerate() {
                    if i < m.min(n) {
                        assert_eq!(parameter.parameter_name, format!("p{i}"));
                    } else {
                        assert_eq!(parameter, &ParameterDraft::default());
                        assert_eq!(parameter.data_type, DataType::String);
                    }
                }
            }
        }
    }

    #[test]
    fn count_outside_bounds_is_rejected_before_resizing() {
        let mut form = ProductForm::create();
        form.set_parameter_count(3).unwrap();

        assert_eq!(form.set_parameter_count(0), Err(FormError::CountOutOfRange(0)));
        assert_eq!(form.set_parameter_count(11), Err(FormError::CountOutOfRange(11)));
        assert_eq!(form.parameters().len(), 3);

        assert_eq!(ProductForm::parse_parameter_count(" 4 "), Ok(4));
        assert_eq!(
            ProductForm::parse_parameter_count("0"),
            Err(FormError::CountOutOfRange(0))
        );
        assert_eq!(
            ProductForm::parse_parameter_count("lots"),
            Err(FormError::InvalidCount("lots".to_string()))
        );
    }

    #[test]
    fn local_delete_refuses_to_drop_the_last_parameter() {
        let mut form = ProductForm::create();
        form.set_parameter_count(2).unwrap();
        form.edit_field(1, ParameterField::Name, "Weight").unwrap();

        form.delete_parameter_local(0).unwrap();
        assert_eq!(form.parameter_count(), 1);
        assert_eq!(form.parameters()[0].parameter_name, "Weight");
        assert_eq!(form.delete_parameter_local(0), Err(FormError::LastParameter));
    }

    #[test]
    fn data_type_field_accepts_known_names_only() {
        let mut form = ProductForm::create();
        form.edit_field(0, ParameterField::DataType, "Number").unwrap();
        assert_eq!(form.parameters()[0].data_type, DataType::Number);
        assert!(matches!(
            form.edit_field(0, ParameterField::DataType, "Decimal"),
            Err(FormError::InvalidDataType(_))
        ));
        assert_eq!(
            form.edit_field(5, ParameterField::Name, "x"),
            Err(FormError::NoSuchParameter(5))
        );
    }

    #[test]
    fn create_submit_posts_name_and_parameters() {
        let api = FakeCatalogApi::new();
        let mut form = ProductForm::create();
        form.product_name = "Widget".to_string();
        form.edit_field(0, ParameterField::Name, "Size").unwrap();
        form.edit_field(0, ParameterField::DataType, "Number").unwrap();
        form.edit_field(0, ParameterField::Range, "1-10").unwrap();

        let product = block_on(form.submit(&api)).unwrap();
        assert_eq!(product.product_name, "Widget");
        assert_eq!(product.parameters.len(), 1);
        assert_eq!(product.parameters[0].data_type, DataType::Number);
        assert_eq!(product.parameters[0].range, "1-10");
        assert!(!form.is_busy());
    }

    #[test]
    fn submit_requires_names() {
        let api = FakeCatalogApi::new();
        let mut form = ProductForm::create();
        form.edit_field(0, ParameterField::Name, "Size").unwrap();
        assert_eq!(
            block_on(form.submit(&api)),
            Err(FormError::Required("Product name"))
        );

        form.product_name = "Widget".to_string();
        form.set_parameter_count(2).unwrap();
        assert_eq!(
            block_on(form.submit(&api)),
            Err(FormError::Required("Parameter name"))
        );
        assert!(api.calls().is_empty());
    }

    #[test]
    fn failed_submit_keeps_the_form() {
        let api = FakeCatalogApi::new();
        api.fail_next(network_down());
        let mut form = ProductForm::create();
        form.product_name = "Widget".to_string();
        form.edit_field(0, ParameterField::Name, "Size").unwrap();

        assert!(matches!(
            block_on(form.submit(&api)),
            Err(FormError::Api(ApiError::Network(_)))
        ));
        assert_eq!(form.product_name, "Widget");
        assert!(!form.is_busy());
    }

    #[test]
    fn calls_while_busy_are_refused_without_a_request() {
        let api = FakeCatalogApi::new();
        let product = api.with_product("Widget", &[("Size", "S-L"), ("Weight", "1-5")]);
        let mut form = ProductForm::edit(&product);

        let _in_flight = form.begin_delete_parameter(0).unwrap();
        assert_eq!(
            block_on(form.delete_parameter_remote(&api, 1)),
            Err(FormError::Busy)
        );
        assert_eq!(
            block_on(form.update_parameter_remote(&api, 1)),
            Err(FormError::Busy)
        );
        assert!(api.calls().is_empty());
    }

    #[test]
    fn remote_delete_removes_only_after_success() {
        let api = FakeCatalogApi::new();
        let product = api.with_product("Widget", &[("Size", "S-L"), ("Weight", "1-5")]);
        let mut form = ProductForm::edit(&product);

        api.fail_next(ApiError::Status {
            status: 404,
            message: "Parameter not found".to_string(),
        });
        assert!(block_on(form.delete_parameter_remote(&api, 0)).is_err());
        assert_eq!(form.parameters().len(), 2);

        block_on(form.delete_parameter_remote(&api, 0)).unwrap();
        assert_eq!(form.parameters().len(), 1);
        assert_eq!(form.parameters()[0].parameter_name, "Weight");
        assert_eq!(api.product(product.id).unwrap().parameters.len(), 1);
    }

    #[test]
    fn remote_add_adopts_the_server_parameter_list() {
        let api = FakeCatalogApi::new();
        let product = api.with_product("Widget", &[("Size", "S-L")]);
        let mut form = ProductForm::edit(&product);

        let mut changed_elsewhere = api.product(product.id).unwrap();
        changed_elsewhere.parameters[0].range = "XS-XL".to_string();
        api.replace_product(changed_elsewhere);

        assert_eq!(
            block_on(form.add_parameter(&api)),
            Err(FormError::Required("Parameter name"))
        );
        form.edit_pending_field(ParameterField::Name, "Color").unwrap();
        form.edit_pending_field(ParameterField::Range, "Red/Blue").unwrap();
        block_on(form.add_parameter(&api)).unwrap();

        let names: Vec<_> = form
            .parameters()
            .iter()
            .map(|p| p.parameter_name.as_str())
            .collect();
        assert_eq!(names, ["Size", "Color"]);
        assert_eq!(form.parameters()[0].range, "XS-XL");
        assert!(form.parameters().iter().all(|p| p.id.is_some()));
        assert_eq!(form.pending(), &ParameterDraft::default());
    }

    #[test]
    fn remote_update_leaves_editing_mode_on_success() {
        let api = FakeCatalogApi::new();
        let product = api.with_product("Widget", &[("Size", "S-L")]);
        let mut form = ProductForm::edit(&product);

        form.begin_editing(0).unwrap();
        form.edit_field(0, ParameterField::Range, "XS-XXL").unwrap();
        block_on(form.update_parameter_remote(&api, 0)).unwrap();

        assert_eq!(form.editing_parameter_index(), None);
        assert_eq!(api.product(product.id).unwrap().parameters[0].range, "XS-XXL");
    }

    #[test]
    fn cancelled_edit_restores_the_saved_parameter() {
        let api = FakeCatalogApi::new();
        let product = api.with_product("Widget", &[("Size", "S-L"), ("Weight", "1-5")]);
        let mut form = ProductForm::edit(&product);

        form.begin_editing(0).unwrap();
        form.edit_field(0, ParameterField::Range, "XXL").unwrap();
        form.edit_field(0, ParameterField::DataType, "Number").unwrap();
        form.cancel_editing();

        assert_eq!(form.editing_parameter_index(), None);
        assert_eq!(form.parameters()[0], product.parameters[0].to_draft());

        form.begin_editing(1).unwrap();
        form.edit_field(1, ParameterField::Name, "Mass").unwrap();
        form.begin_editing(0).unwrap();
        assert_eq!(form.parameters()[1].parameter_name, "Weight");

        form.cancel_editing();
        let submission = form.begin_submit().unwrap();
        match submission {
            Submission::Update { request, .. } => {
                assert_eq!(request.parameters[0].range, "S-L");
                assert_eq!(request.parameters[1].parameter_name, "Weight");
            }
            Submission::Create(_) => panic!("edit form produced a create request"),
        }
    }

    #[test]
    fn failed_update_keeps_the_edit_open_for_another_try() {
        let api = FakeCatalogApi::new();
        let product = api.with_product("Widget", &[("Size", "S-L")]);
        let mut form = ProductForm::edit(&product);

        form.begin_editing(0).unwrap();
        form.edit_field(0, ParameterField::Range, "XS-XXL").unwrap();
        api.fail_next(network_down());
        assert!(block_on(form.update_parameter_remote(&api, 0)).is_err());
        assert_eq!(form.editing_parameter_index(), Some(0));
        assert_eq!(form.parameters()[0].range, "XS-XXL");

        form.cancel_editing();
        assert_eq!(form.parameters()[0].range, "S-L");
    }

    #[test]
    fn edit_submit_sends_ids_and_count_is_derived() {
        let api = FakeCatalogApi::new();
        let product = api.with_product("Widget", &[("Size", "S-L")]);
        let mut form = ProductForm::edit(&product);
        assert_eq!(form.parameter_count(), 1);
        assert_eq!(form.set_parameter_count(2), Err(FormError::NotInCreateMode));

        form.product_name = "Widget Pro".to_string();
        let submission = form.begin_submit().unwrap();
        match &submission {
            Submission::Update { product_id, request } => {
                assert_eq!(*product_id, product.id);
                assert_eq!(request.product_id, Some(product.id));
                assert_eq!(request.parameters[0].id, Some(product.parameters[0].id));
            }
            Submission::Create(_) => panic!("edit form produced a create request"),
        }
        let result = block_on(send_submission(&api, &submission));
        let saved = form.finish_submit(result).unwrap();
        assert_eq!(saved.product_name, "Widget Pro");
        assert_eq!(saved.parameters, product.parameters);
    }

    #[test]
    fn create_mode_add_appends_blank_entry() {
        let api = FakeCatalogApi::new();
        let mut form = ProductForm::create();
        form.product_name = "Widget".to_string();
        block_on(form.add_parameter(&api)).unwrap();
        assert_eq!(form.parameter_count(), 2);
        assert_eq!(form.parameters()[1], named(""));
        assert!(api.calls().is_empty());

        form.set_parameter_count(MAX_PARAMETER_COUNT).unwrap();
        assert_eq!(
            form.add_parameter_local(),
            Err(FormError::CountOutOfRange(MAX_PARAMETER_COUNT + 1))
        );
    }
}
