//! The admin console: token listing controller, env form, and the
//! presentation seams they render through.

pub mod controller;
pub mod display;
pub mod env_form;
pub mod pagination;
pub mod view;

pub use controller::{TokenConsole, DEFAULT_PAGE_SIZE, PAGE_SIZES};
pub use env_form::EnvForm;
pub use view::{ListView, TableView};
