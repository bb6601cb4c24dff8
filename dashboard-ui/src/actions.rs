//! Async glue between component signals and the controllers.
//!
//! Each action takes what it needs out of the signal, releases the borrow
//! while the request is in flight, and only writes the response back if the
//! owning view is still mounted.

use dioxus::prelude::{ReadableExt, Signal, WritableExt};
use dioxus_logger::tracing::debug;
use shared_types::{Product, ValueRowId};

use crate::api::CatalogApi;
use crate::catalog::Catalog;
use crate::product_form::{send_submission, ProductForm};
use crate::session::{LoginError, LoginForm, Session};
use crate::sync::Liveness;
use crate::value_entry::{fetch_product_and_rows, ValueEntryState};

/// Where a view keeps its controller. Components hand in a `Signal`.
pub trait ViewState<T> {
    fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R;
    fn inspect<R>(&self, f: impl FnOnce(&T) -> R) -> R;
}

impl<T: 'static> ViewState<T> for Signal<T> {
    fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut *self.write())
    }

    fn inspect<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.peek())
    }
}

pub async fn login(
    api: &impl CatalogApi,
    mut form: impl ViewState<LoginForm>,
    alive: Liveness,
) -> Result<Option<Session>, LoginError> {
    let request = form.update(LoginForm::begin_submit)?;
    let result = api.authenticate(&request).await;
    if !alive.is_alive() {
        return Ok(None);
    }
    Ok(form.update(|form| form.finish_submit(result)))
}

pub async fn refresh_catalog(
    api: &impl CatalogApi,
    mut catalog: impl ViewState<Catalog>,
    generation: u64,
    alive: Liveness,
) {
    let (ticket, kind) =
        catalog.update(|catalog| (catalog.begin_fetch(generation), catalog.kind()));
    let result = kind.fetch(api).await;
    if alive.is_alive() {
        catalog.update(|catalog| catalog.finish_fetch(ticket, result));
    }
}

pub async fn refresh_values(
    api: &impl CatalogApi,
    mut state: impl ViewState<ValueEntryState>,
    generation: u64,
    alive: Liveness,
) {
    let (ticket, product_id) =
        state.update(|state| (state.begin_refresh(generation), state.product_id()));
    let (product, rows) = fetch_product_and_rows(api, product_id).await;
    if alive.is_alive() {
        state.update(|state| state.finish_refresh(ticket, product, rows));
    }
}

/// Saves the open row and refreshes once the server accepted it.
pub async fn save_value_row(
    api: &impl CatalogApi,
    mut state: impl ViewState<ValueEntryState>,
    generation: u64,
    alive: Liveness,
) {
    let request = match state.update(ValueEntryState::begin_save) {
        Ok(request) => request,
        Err(err) => {
            debug!("value row not sent: {err}");
            return;
        }
    };
    let product_id = state.inspect(ValueEntryState::product_id);
    let result = api.save_values(product_id, &request).await;
    if !alive.is_alive() {
        return;
    }
    if state.update(|state| state.finish_save(result)).is_ok() {
        refresh_values(api, state, generation, alive).await;
    }
}

pub async fn delete_value_row(
    api: &impl CatalogApi,
    mut state: impl ViewState<ValueEntryState>,
    value_id: ValueRowId,
    generation: u64,
    alive: Liveness,
) {
    if state.update(ValueEntryState::begin_delete).is_err() {
        return;
    }
    let product_id = state.inspect(ValueEntryState::product_id);
    let result = api.delete_value(product_id, value_id).await;
    if !alive.is_alive() {
        return;
    }
    if state.update(|state| state.finish_delete(value_id, result)).is_ok() {
        refresh_values(api, state, generation, alive).await;
    }
}

pub async fn submit_product(
    api: &impl CatalogApi,
    mut form: impl ViewState<ProductForm>,
    alive: Liveness,
) -> Option<Product> {
    let submission = match form.update(ProductForm::begin_submit) {
        Ok(submission) => submission,
        Err(err) => {
            debug!("product not sent: {err}");
            return None;
        }
    };
    let result = send_submission(api, &submission).await;
    if !alive.is_alive() {
        return None;
    }
    form.update(|form| form.finish_submit(result)).ok()
}

/// Returns true when the server confirmed the new parameter.
pub async fn add_parameter(
    api: &impl CatalogApi,
    mut form: impl ViewState<ProductForm>,
    alive: Liveness,
) -> bool {
    let (product_id, request) = match form.update(ProductForm::begin_add_parameter) {
        Ok(call) => call,
        Err(err) => {
            debug!("parameter not added: {err}");
            return false;
        }
    };
    let result = api.add_parameter(product_id, &request).await;
    alive.is_alive() && form.update(|form| form.finish_add_parameter(result)).is_ok()
}

pub async fn update_parameter(
    api: &impl CatalogApi,
    mut form: impl ViewState<ProductForm>,
    index: usize,
    alive: Liveness,
) -> bool {
    let call = match form.update(|form| form.begin_update_parameter(index)) {
        Ok(call) => call,
        Err(err) => {
            debug!("parameter not updated: {err}");
            return false;
        }
    };
    let result = api
        .update_parameter(call.product_id, call.parameter_id, &call.request)
        .await;
    alive.is_alive()
        && form
            .update(|form| form.finish_update_parameter(&call, result))
            .is_ok()
}

pub async fn delete_parameter(
    api: &impl CatalogApi,
    mut form: impl ViewState<ProductForm>,
    index: usize,
    alive: Liveness,
) -> bool {
    let call = match form.update(|form| form.begin_delete_parameter(index)) {
        Ok(call) => call,
        Err(err) => {
            debug!("parameter not deleted: {err}");
            return false;
        }
    };
    let result = api.delete_parameter(call.product_id, call.parameter_id).await;
    alive.is_alive()
        && form
            .update(|form| form.finish_delete_parameter(&call, result))
            .is_ok()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::executor::block_on;

    use super::*;
    use crate::catalog::CatalogKind;
    use crate::fake_api::FakeCatalogApi;
    use crate::product_form::ParameterField;
    use crate::value_entry::CellField;

    /// A mounted view whose requests see it unmount mid-flight.
    fn unmount_during_next_call(api: &FakeCatalogApi) -> Liveness {
        let alive = Liveness::new();
        let view = alive.clone();
        api.during_next_call(move || view.dispose());
        alive
    }

    fn shared<T>(value: T) -> Rc<RefCell<T>> {
        Rc::new(RefCell::new(value))
    }

    #[test]
    fn catalog_fetch_applies_while_mounted() {
        let api = FakeCatalogApi::new();
        api.with_product("Widget", &[("Size", "S-L")]);
        let catalog = shared(Catalog::new(CatalogKind::Editable));

        block_on(refresh_catalog(&api, catalog.clone(), 0, Liveness::new()));

        assert_eq!(catalog.borrow().products().len(), 1);
    }

    #[test]
    fn catalog_response_after_unmount_is_dropped() {
        let api = FakeCatalogApi::new();
        api.with_product("Widget", &[("Size", "S-L")]);
        let catalog = shared(Catalog::new(CatalogKind::Selectable));
        let alive = unmount_during_next_call(&api);

        block_on(refresh_catalog(&api, catalog.clone(), 0, alive));

        assert_eq!(api.calls(), ["list_products_only"]);
        assert!(catalog.borrow().is_loading());
        assert!(catalog.borrow().products().is_empty());
    }

    #[test]
    fn value_refresh_after_unmount_leaves_rows_alone() {
        let api = FakeCatalogApi::new();
        let product = api.with_product("Widget", &[("Size", "S-L")]);
        let state = shared(ValueEntryState::unloaded(product.id));
        let alive = unmount_during_next_call(&api);

        block_on(refresh_values(&api, state.clone(), 0, alive));

        assert!(state.borrow().product().is_none());
        assert!(state.borrow().saved_rows().is_empty());
    }

    #[test]
    fn saved_row_after_unmount_skips_the_follow_up_refresh() {
        let api = FakeCatalogApi::new();
        let product = api.with_product("Widget", &[("Size", "S-L")]);
        let state = shared(ValueEntryState::new(product.clone()));
        {
            let mut state = state.borrow_mut();
            state.start_new_row().unwrap();
            state.edit_cell(0, CellField::Name, "Small").unwrap();
            state.edit_cell(0, CellField::Value, "S").unwrap();
        }
        let alive = unmount_during_next_call(&api);

        block_on(save_value_row(&api, state.clone(), 0, alive));

        assert_eq!(api.calls(), [format!("save_values {}", product.id)]);
        assert_eq!(api.rows(product.id).len(), 1);
        assert!(state.borrow().draft().is_some());
        assert!(state.borrow().saved_rows().is_empty());
    }

    #[test]
    fn saved_row_refreshes_while_mounted() {
        let api = FakeCatalogApi::new();
        let product = api.with_product("Widget", &[("Size", "S-L")]);
        let state = shared(ValueEntryState::new(product.clone()));
        {
            let mut state = state.borrow_mut();
            state.start_new_row().unwrap();
            state.edit_cell(0, CellField::Name, "Small").unwrap();
        }

        block_on(save_value_row(&api, state.clone(), 0, Liveness::new()));

        assert!(state.borrow().draft().is_none());
        assert_eq!(state.borrow().saved_rows().len(), 1);
        assert!(!state.borrow().is_busy());
    }

    #[test]
    fn form_results_after_unmount_are_not_applied() {
        let api = FakeCatalogApi::new();
        let product = api.with_product("Widget", &[("Size", "S-L"), ("Weight", "1-5")]);
        let form = shared(ProductForm::edit(&product));

        let alive = unmount_during_next_call(&api);
        assert!(!block_on(delete_parameter(&api, form.clone(), 0, alive)));
        assert_eq!(form.borrow().parameters().len(), 2);

        let mut fresh = ProductForm::edit(&api.product(product.id).unwrap());
        fresh.edit_pending_field(ParameterField::Name, "Color").unwrap();
        let form = shared(fresh);
        let alive = unmount_during_next_call(&api);
        assert!(!block_on(add_parameter(&api, form.clone(), alive)));
        assert_eq!(form.borrow().parameters().len(), 1);
        assert_eq!(form.borrow().pending().parameter_name, "Color");

        let mut renamed = ProductForm::edit(&api.product(product.id).unwrap());
        renamed.product_name = "Widget Pro".to_string();
        let form = shared(renamed);
        let alive = unmount_during_next_call(&api);
        assert_eq!(block_on(submit_product(&api, form.clone(), alive)), None);
    }

    #[test]
    fn login_accepted_after_unmount_opens_no_session() {
        let api = FakeCatalogApi::new();
        let mut login = LoginForm::new();
        login.token_id = "admin123".to_string();
        login.password = "password123".to_string();
        let form = shared(login);
        let alive = unmount_during_next_call(&api);

        assert_eq!(block_on(super::login(&api, form.clone(), alive)), Ok(None));
        assert!(form.borrow().message().is_none());
    }
}
