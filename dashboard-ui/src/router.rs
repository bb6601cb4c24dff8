//! Dashboard view routing.
//!
//! The current view is a single enum value owned by [`Router`]; every
//! navigation is a method on it. The router also owns the catalog
//! [`Invalidation`] so mutation sites and list views share one generation.

use shared_types::Product;

use crate::sync::Invalidation;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum View {
    #[default]
    Home,
    /// Selectable product list
    Catalog,
    /// Editable product list
    ManageCatalog,
    CreateProduct,
    EditProduct(Product),
    ValueEntry(Product),
}

/// One breadcrumb; `target` is `None` for the current page.
#[derive(Debug, Clone, PartialEq)]
pub struct Crumb {
    pub label: String,
    pub target: Option<View>,
}

impl Crumb {
    fn link(label: &str, target: View) -> Self {
        Self {
            label: label.to_string(),
            target: Some(target),
        }
    }

    fn here(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: None,
        }
    }
}

impl View {
    pub fn title(&self, token_id: &str) -> String {
        match self {
            View::Home => format!("Welcome back, {token_id}!"),
            View::Catalog => "Products".to_string(),
            View::ManageCatalog => "Edit Products".to_string(),
            View::CreateProduct => "Create Product".to_string(),
            View::EditProduct(product) => format!("Edit {}", product.product_name),
            View::ValueEntry(product) => product.product_name.clone(),
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            View::Home => "Manage your products and parameters from this dashboard",
            View::Catalog => "Pick a product to enter parameter values",
            View::ManageCatalog => "Update product names and parameters",
            View::CreateProduct => "Define a new product and its parameters",
            View::EditProduct(_) => "Parameter changes are saved as you make them",
            View::ValueEntry(_) => "Record named rows of parameter values",
        }
    }

    pub fn breadcrumbs(&self) -> Vec<Crumb> {
        let home = Crumb::link("Dashboard", View::Home);
        match self {
            View::Home => vec![Crumb::here("Dashboard")],
            View::Catalog => vec![home, Crumb::here("Products")],
            View::ManageCatalog => vec![home, Crumb::here("Edit Products")],
            View::CreateProduct => vec![
                home,
                Crumb::link("Products", View::Catalog),
                Crumb::here("Create Product"),
            ],
            View::EditProduct(product) => vec![
                home,
                Crumb::link("Edit Products", View::ManageCatalog),
                Crumb::here(product.product_name.clone()),
            ],
            View::ValueEntry(product) => vec![
                home,
                Crumb::link("Products", View::Catalog),
                Crumb::here(product.product_name.clone()),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Router {
    view: View,
    catalog: Invalidation,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn catalog_generation(&self) -> u64 {
        self.catalog.generation()
    }

    /// Marks every product listing stale after a confirmed mutation.
    pub fn invalidate_catalog(&mut self) {
        self.catalog.invalidate();
    }

    pub fn navigate(&mut self, view: View) {
        self.view = view;
    }

    pub fn product_created(&mut self, product: Product) {
        self.catalog.invalidate();
        self.view = View::ValueEntry(product);
    }

    pub fn product_selected(&mut self, product: Product) {
        self.view = View::ValueEntry(product);
    }

    pub fn edit_product(&mut self, product: Product) {
        self.view = View::EditProduct(product);
    }

    pub fn product_updated(&mut self, _product: Product) {
        self.catalog.invalidate();
        self.view = View::ManageCatalog;
    }

    pub fn back(&mut self) {
        self.view = match self.view {
            View::CreateProduct | View::ValueEntry(_) => View::Catalog,
            View::EditProduct(_) => View::ManageCatalog,
            View::Catalog | View::ManageCatalog | View::Home => View::Home,
        };
    }
}
