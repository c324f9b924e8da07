// SharePoint Online commands
pub mod app_get;

pub use app_get::{AppCatalogScope, AppGet};
