//! Concrete view-model commands.
//!
//! | command                          | target              | prerequisite          |
//! |----------------------------------|---------------------|-----------------------|
//! | `GetAccountGroupsCommand`        | ledger              |                       |
//! | `GetBudgetAccountGroupsCommand`  | ledger              |                       |
//! | `GetAccountsCommand`             | ledger              | account groups        |
//! | `GetBudgetAccountsCommand`       | ledger              | budget-account groups |
//! | `GetAddressAccountsCommand`      | ledger              |                       |
//! | `GetPostingLinesCommand`         | ledger              |                       |
//! | `RefreshAccountCommand`          | account             | account groups        |
//! | `RefreshBudgetAccountCommand`    | budget account      | budget-account groups |
//! | `RefreshAddressAccountCommand`   | debtor / creditor   |                       |
//! | `AccountLookupCommand`           | posting draft       | account groups        |
//! | `AddPostingLineCommand`          | posting draft       |                       |
//!
//! Prerequisites are attached by the composition root with `DependencyCommand`; the
//! commands here only carry their own body.

/// `TaskCommand` methods every concrete command forwards to its `CommandRuntime`.
macro_rules! forward_to_runtime {
    () => {
        fn command(&self) -> crate::engine::CommandRef {
            self.runtime.command()
        }

        fn execution_task(&self) -> Option<crate::engine::ExecutionHandle> {
            self.runtime.execution_task()
        }

        fn subscribe(&self) -> ledgerdesk_events::Subscription<crate::engine::CommandEvent> {
            self.runtime.subscribe()
        }
    };
}

mod accounts;
mod address_accounts;
mod budget_accounts;
mod groups;
mod posting_lines;

pub use accounts::{AccountLookupCommand, GetAccountsCommand, RefreshAccountCommand};
pub use address_accounts::{GetAddressAccountsCommand, RefreshAddressAccountCommand};
pub use budget_accounts::{GetBudgetAccountsCommand, RefreshBudgetAccountCommand};
pub use groups::{GetAccountGroupsCommand, GetBudgetAccountGroupsCommand};
pub use posting_lines::{AddPostingLineCommand, GetPostingLinesCommand};
