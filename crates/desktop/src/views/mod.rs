//! Observable views (the context objects commands run against).

pub mod account;
pub mod address_account;
pub mod budget_account;
pub mod draft;
pub mod group;
pub mod ledger;
pub mod posting_line;

pub use account::AccountView;
pub use address_account::AddressAccountView;
pub use budget_account::BudgetAccountView;
pub use draft::PostingDraftView;
pub use group::{AccountGroupView, BudgetAccountGroupView, GroupKind, GroupView};
pub use ledger::LedgerView;
pub use posting_line::PostingLineView;
