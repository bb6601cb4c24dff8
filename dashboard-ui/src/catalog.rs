//! Product listings: the selectable catalog and the editable one.

use dioxus_logger::tracing::error;
use shared_types::Product;

use crate::api::{ApiResult, CatalogApi};
use crate::sync::{CacheKey, FetchGuard, FetchTicket};

pub const NO_PRODUCTS: &str = "No products";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    /// Clicking a product opens value entry
    Selectable,
    /// Each product links to the edit form
    Editable,
}

impl CatalogKind {
    pub async fn fetch(self, api: &impl CatalogApi) -> ApiResult<Vec<Product>> {
        match self {
            CatalogKind::Selectable => api.list_products_only().await,
            CatalogKind::Editable => api.list_products().await,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogState {
    Loading,
    Loaded(Vec<Product>),
    /// First load failed; the error has been logged.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    kind: CatalogKind,
    state: CatalogState,
    fetches: FetchGuard,
    cache: CacheKey,
}

impl Catalog {
    pub fn new(kind: CatalogKind) -> Self {
        Self {
            kind,
            state: CatalogState::Loading,
            fetches: FetchGuard::default(),
            cache: CacheKey::default(),
        }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, CatalogState::Loading)
    }

    pub fn products(&self) -> &[Product] {
        match &self.state {
            CatalogState::Loaded(products) => products,
            CatalogState::Loading | CatalogState::Failed(_) => &[],
        }
    }

    /// True once loading is over and there is nothing to show.
    pub fn is_empty(&self) -> bool {
        !self.is_loading() && self.products().is_empty()
    }

    pub fn needs_refresh(&self, generation: u64) -> bool {
        self.cache.needs_refresh(generation)
    }

    pub fn begin_fetch(&mut self, generation: u64) -> FetchTicket {
        self.cache.mark(generation);
        self.fetches.begin()
    }

    /// Later failures keep the list already on screen.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: ApiResult<Vec<Product>>) -> bool {
        if !self.fetches.is_current(ticket) {
            return false;
        }
        match result {
            Ok(products) => self.state = CatalogState::Loaded(products),
            Err(err) => {
                error!(kind = ?self.kind, "Failed to fetch products: {err}");
                if !matches!(self.state, CatalogState::Loaded(_)) {
                    self.state = CatalogState::Failed(err.to_string());
                }
            }
        }
        true
    }

    pub async fn refresh(&mut self, api: &impl CatalogApi, generation: u64) -> bool {
        let ticket = self.begin_fetch(generation);
        let result = self.kind.fetch(api).await;
        self.finish_fetch(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake_api::{network_down, FakeCatalogApi};
    use futures::executor::block_on;

    #[test]
    fn each_kind_reads_its_own_listing() {
        let api = FakeCatalogApi::new();
        api.with_product("Widget", &[("Size", "S-L")]);

        let mut selectable = Catalog::new(CatalogKind::Selectable);
        let mut editable = Catalog::new(CatalogKind::Editable);
        block_on(selectable.refresh(&api, 0));
        block_on(editable.refresh(&api, 0));

        assert_eq!(api.calls(), ["list_products_only", "list_products"]);
        assert_eq!(selectable.products().len(), 1);
        assert_eq!(editable.products()[0].product_name, "Widget");
    }

    #[test]
    fn loading_until_first_fetch_then_empty_message() {
        let api = FakeCatalogApi::new();
        let mut catalog = Catalog::new(CatalogKind::Selectable);
        assert!(catalog.is_loading());
        assert!(!catalog.is_empty());

        block_on(catalog.refresh(&api, 0));
        assert!(!catalog.is_loading());
        assert!(catalog.is_empty());
    }

    #[test]
    fn refetch_without_mutation_is_stable() {
        let api = FakeCatalogApi::new();
        api.with_product("Widget", &[("Size", "S-L")]);
        api.with_product("Gadget", &[]);
        let mut catalog = Catalog::new(CatalogKind::Editable);

        block_on(catalog.refresh(&api, 0));
        let first = catalog.products().to_vec();
        block_on(catalog.refresh(&api, 0));
        assert_eq!(catalog.products(), first.as_slice());
    }

    #[test]
    fn generation_change_requests_a_refetch() {
        let api = FakeCatalogApi::new();
        let mut catalog = Catalog::new(CatalogKind::Editable);
        assert!(catalog.needs_refresh(0));
        block_on(catalog.refresh(&api, 0));
        assert!(!catalog.needs_refresh(0));
        assert!(catalog.needs_refresh(1));
    }

    #[test]
    fn failure_after_load_keeps_the_list() {
        let api = FakeCatalogApi::new();
        api.with_product("Widget", &[]);
        let mut catalog = Catalog::new(CatalogKind::Selectable);
        block_on(catalog.refresh(&api, 0));

        api.fail_next(network_down());
        block_on(catalog.refresh(&api, 1));
        assert_eq!(catalog.products().len(), 1);

        let mut fresh = Catalog::new(CatalogKind::Selectable);
        api.fail_next(network_down());
        block_on(fresh.refresh(&api, 1));
        assert!(matches!(fresh.state(), CatalogState::Failed(_)));
        assert!(fresh.is_empty());
    }

    #[test]
    fn late_response_from_an_older_fetch_is_dropped() {
        let mut catalog = Catalog::new(CatalogKind::Editable);
        let older = catalog.begin_fetch(0);
        let newer = catalog.begin_fetch(1);

        let widget = Product {
            id: 1,
            product_name: "Widget".to_string(),
            parameters: vec![],
        };
        assert!(catalog.finish_fetch(newer, Ok(vec![widget.clone()])));
        assert!(!catalog.finish_fetch(older, Ok(vec![])));
        assert_eq!(catalog.products(), [widget]);
    }
}
