//! Pages
//!
//! One component per navigation entry.

mod dashboard;
mod document_form;
mod documents;
mod forms;
mod history;
mod loans;
mod login;
mod master;
mod renewals;
mod settings;
mod subscriptions;

pub use dashboard::DashboardPage;
pub use documents::DocumentsPage;
pub use history::HistoryPage;
pub use loans::LoansPage;
pub use login::LoginPage;
pub use master::MasterPage;
pub use renewals::RenewalsPage;
pub use settings::SettingsPage;
pub use subscriptions::SubscriptionsPage;
