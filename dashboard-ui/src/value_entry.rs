//! Value entry: record named rows of values against a product's parameters.
//!
//! The draft row holds one name and one cell per parameter. On the wire the
//! name is repeated on every entry; [`ValueRowDraft::entries`] does that
//! flattening so the name itself is only ever stored once.

use dioxus_logger::tracing::{error, warn};
use shared_types::{ParameterId, Product, ProductId, SaveValuesRequest, ValueEntry, ValueRow, ValueRowId};

use crate::api::{ApiError, ApiResult, CatalogApi};
use crate::sync::{CacheKey, FetchGuard, FetchTicket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellField {
    Name,
    Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCell {
    pub parameter_id: ParameterId,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueRowDraft {
    pub name: String,
    pub cells: Vec<ValueCell>,
}

impl ValueRowDraft {
    /// Blank row with one cell per parameter, in parameter order.
    pub fn for_product(product: &Product) -> Self {
        Self {
            name: String::new(),
            cells: product
                .parameters
                .iter()
                .map(|p| ValueCell {
                    parameter_id: p.id,
                    value: String::new(),
                })
                .collect(),
        }
    }

    /// `Name` renames the whole row; `Value` touches cell `index` only.
    pub fn edit_cell(&mut self, index: usize, field: CellField, value: &str) -> Result<(), ValueError> {
        let cell = self.cells.get_mut(index).ok_or(ValueError::NoSuchCell(index))?;
        match field {
            CellField::Name => self.name = value.to_string(),
            CellField::Value => cell.value = value.to_string(),
        }
        Ok(())
    }

    pub fn entries(&self) -> Vec<ValueEntry> {
        self.cells
            .iter()
            .map(|cell| ValueEntry {
                name: self.name.clone(),
                parameter_id: cell.parameter_id,
                value: cell.value.clone(),
            })
            .collect()
    }

    /// Realigns the cells to `product`'s parameters: values are kept by
    /// parameter id, new parameters start blank, removed ones are dropped.
    pub fn reconcile(&mut self, product: &Product) {
        let mut old = std::mem::take(&mut self.cells);
        self.cells = product
            .parameters
            .iter()
            .map(|p| {
                let value = old
                    .iter_mut()
                    .find(|c| c.parameter_id == p.id)
                    .map(|c| std::mem::take(&mut c.value))
                    .unwrap_or_default();
                ValueCell {
                    parameter_id: p.id,
                    value,
                }
            })
            .collect();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("product parameters are not loaded yet")]
    ParametersNotLoaded,
    #[error("product has no parameters")]
    NoParameters,
    #[error("no cell at position {0}")]
    NoSuchCell(usize),
    #[error("no row is being entered")]
    NoOpenRow,
    #[error("{0} is required")]
    Required(&'static str),
    #[error("another request is still in flight")]
    Busy,
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueEntryState {
    product_id: ProductId,
    product: Option<Product>,
    draft: Option<ValueRowDraft>,
    saved_rows: Vec<ValueRow>,
    busy: bool,
    fetches: FetchGuard,
    cache: CacheKey,
}

impl ValueEntryState {
    /// Starts from the product the user navigated with; it is replaced by
    /// the server copy on the first refresh.
    pub fn new(product: Product) -> Self {
        Self {
            product_id: product.id,
            product: Some(product),
            draft: None,
            saved_rows: Vec::new(),
            busy: false,
            fetches: FetchGuard::default(),
            cache: CacheKey::default(),
        }
    }

    /// Starts with only an id; parameters arrive with the first refresh.
    pub fn unloaded(product_id: ProductId) -> Self {
        Self {
            product_id,
            product: None,
            draft: None,
            saved_rows: Vec::new(),
            busy: false,
            fetches: FetchGuard::default(),
            cache: CacheKey::default(),
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    pub fn draft(&self) -> Option<&ValueRowDraft> {
        self.draft.as_ref()
    }

    pub fn saved_rows(&self) -> &[ValueRow] {
        &self.saved_rows
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn needs_refresh(&self, generation: u64) -> bool {
        self.cache.needs_refresh(generation)
    }

    pub fn start_new_row(&mut self) -> Result<(), ValueError> {
        let product = self.product.as_ref().ok_or(ValueError::ParametersNotLoaded)?;
        if product.parameters.is_empty() {
            return Err(ValueError::NoParameters);
        }
        self.draft = Some(ValueRowDraft::for_product(product));
        Ok(())
    }

    pub fn cancel_row(&mut self) {
        self.draft = None;
    }

    pub fn edit_cell(&mut self, index: usize, field: CellField, value: &str) -> Result<(), ValueError> {
        self.draft
            .as_mut()
            .ok_or(ValueError::NoOpenRow)?
            .edit_cell(index, field, value)
    }

    // ------------------------------------------------------------------
    // Refresh
    // ------------------------------------------------------------------

    pub fn begin_refresh(&mut self, generation: u64) -> FetchTicket {
        self.cache.mark(generation);
        self.fetches.begin()
    }

    /// Applies a finished refresh unless a newer one has started since.
    pub fn finish_refresh(
        &mut self,
        ticket: FetchTicket,
        product: ApiResult<Product>,
        rows: ApiResult<Vec<ValueRow>>,
    ) -> bool {
        if !self.fetches.is_current(ticket) {
            warn!(product_id = self.product_id, "discarding superseded value refresh");
            return false;
        }

        match product {
            Ok(product) => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.reconcile(&product);
                }
                self.product = Some(product);
            }
            Err(err) => error!(product_id = self.product_id, "Failed to fetch product: {err}"),
        }
        match rows {
            Ok(rows) => self.saved_rows = rows,
            Err(err) => error!(product_id = self.product_id, "Failed to fetch values: {err}"),
        }
        true
    }

    pub async fn refresh(&mut self, api: &impl CatalogApi, generation: u64) -> bool {
        let ticket = self.begin_refresh(generation);
        let (product, rows) = fetch_product_and_rows(api, self.product_id).await;
        self.finish_refresh(ticket, product, rows)
    }

    // ------------------------------------------------------------------
    // Save / delete
    // ------------------------------------------------------------------

    pub fn begin_save(&mut self) -> Result<SaveValuesRequest, ValueError> {
        let draft = self.draft.as_ref().ok_or(ValueError::NoOpenRow)?;
        if draft.name.trim().is_empty() {
            return Err(ValueError::Required("Row name"));
        }
        if draft.cells.is_empty() {
            return Err(ValueError::NoParameters);
        }
        let request = SaveValuesRequest {
            product_id: Some(self.product_id),
            values: draft.entries(),
        };
        if self.busy {
            return Err(ValueError::Busy);
        }
        self.busy = true;
        Ok(request)
    }

    /// Closes the draft on success; the caller refreshes afterwards.
    pub fn finish_save(&mut self, result: ApiResult<()>) -> Result<(), ValueError> {
        self.busy = false;
        match result {
            Ok(()) => {
                self.draft = None;
                Ok(())
            }
            Err(err) => {
                error!(product_id = self.product_id, "Failed to save values: {err}");
                Err(err.into())
            }
        }
    }

    pub async fn save_row(&mut self, api: &impl CatalogApi, generation: u64) -> Result<(), ValueError> {
        let request = self.begin_save()?;
        let result = api.save_values(self.product_id, &request).await;
        self.finish_save(result)?;
        self.refresh(api, generation).await;
        Ok(())
    }

    pub fn begin_delete(&mut self) -> Result<(), ValueError> {
        if self.busy {
            return Err(ValueError::Busy);
        }
        self.busy = true;
        Ok(())
    }

    pub fn finish_delete(&mut self, value_id: ValueRowId, result: ApiResult<()>) -> Result<(), ValueError> {
        self.busy = false;
        result.map_err(|err| {
            error!(product_id = self.product_id, value_id, "Failed to delete value row: {err}");
            ValueError::from(err)
        })
    }

    pub async fn delete_row(
        &mut self,
        api: &impl CatalogApi,
        value_id: ValueRowId,
        generation: u64,
    ) -> Result<(), ValueError> {
        self.begin_delete()?;
        let result = api.delete_value(self.product_id, value_id).await;
        self.finish_delete(value_id, result)?;
        self.refresh(api, generation).await;
        Ok(())
    }
}

/// Product first, then its rows, so cells line up with the parameters.
pub async fn fetch_product_and_rows(
    api: &impl CatalogApi,
    product_id: ProductId,
) -> (ApiResult<Product>, ApiResult<Vec<ValueRow>>) {
    let product = api.get_product(product_id).await;
    let rows = api.list_values(product_id).await;
    (product, rows)
}
