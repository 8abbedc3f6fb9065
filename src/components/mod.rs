//! UI Components
//!
//! Reusable Leptos components.

mod bar_chart;
mod confirm_button;
mod file_picker;
mod header;
mod master_autocomplete;
mod modal;
mod nav_bar;
mod toast_list;

pub use bar_chart::{Bar, BarChart};
pub use confirm_button::ConfirmButton;
pub use file_picker::FilePicker;
pub use header::Header;
pub use master_autocomplete::MasterAutocomplete;
pub use modal::Modal;
pub use nav_bar::NavBar;
pub use toast_list::ToastList;
