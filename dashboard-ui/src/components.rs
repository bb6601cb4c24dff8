pub mod dashboard;
pub mod layout;
pub mod login;
pub mod product_form;
pub mod product_list;
pub mod styles;
pub mod value_entry;

pub use dashboard::{App, Dashboard};
pub use layout::DashboardLayout;
pub use login::LoginView;
pub use product_form::ProductFormView;
pub use product_list::ProductList;
pub use value_entry::ValueEntryView;
