pub mod actions;
pub mod api;
pub mod catalog;
pub mod components;
pub mod product_form;
pub mod router;
pub mod session;
pub mod sync;
pub mod value_entry;

#[cfg(test)]
mod fake_api;

pub use api::{api_base, ApiError, ApiResult, CatalogApi, HttpCatalogApi};
pub use components::App;
