//! Composition root.
//!
//! `CommandEnvironment` bundles the collaborators every command needs; `LedgerCommands`
//! builds each command exactly once and attaches prerequisites:
//!
//! ```text
//! accounts ─────────────┐
//! refresh account ──────┼─▶ account groups
//! account lookup ───────┘
//! budget accounts ──────┬─▶ budget-account groups
//! refresh budget acct ──┘
//! ```

use std::sync::Arc;

use tokio::runtime::Handle;

use ledgerdesk_accounting::AddressAccountKind;

use crate::commands::{
    AccountLookupCommand, AddPostingLineCommand, GetAccountGroupsCommand, GetAccountsCommand,
    GetAddressAccountsCommand, GetBudgetAccountGroupsCommand, GetBudgetAccountsCommand,
    GetPostingLinesCommand, RefreshAccountCommand, RefreshAddressAccountCommand,
    RefreshBudgetAccountCommand,
};
use crate::config::{Clock, ConfigurationProvider, SystemClock, ViewModelConfig};
use crate::engine::{DependencyCommand, TaskCommand};
use crate::handler::{ExceptionHandler, TracingExceptionHandler};
use crate::repository::FinancialRepository;
use crate::views::{AccountView, AddressAccountView, BudgetAccountView, LedgerView, PostingDraftView};

/// Collaborators shared by every command.
#[derive(Clone)]
pub struct CommandEnvironment {
    /// Runtime command bodies are spawned on.
    pub runtime: Handle,
    pub repository: Arc<dyn FinancialRepository>,
    pub config: Arc<dyn ConfigurationProvider>,
    pub exception_handler: Arc<dyn ExceptionHandler>,
    pub clock: Arc<dyn Clock>,
}

impl CommandEnvironment {
    /// Default configuration, a logging exception handler and the system clock.
    pub fn new(runtime: Handle, repository: Arc<dyn FinancialRepository>) -> Self {
        Self {
            runtime,
            repository,
            config: Arc::new(ViewModelConfig::default()),
            exception_handler: Arc::new(TracingExceptionHandler),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_config(mut self, config: impl ConfigurationProvider + 'static) -> Self {
        self.config = Arc::new(config);
        self
    }

    pub fn with_exception_handler(mut self, handler: Arc<dyn ExceptionHandler>) -> Self {
        self.exception_handler = handler;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

fn same_ledger(ledger: &Arc<LedgerView>) -> Option<Arc<LedgerView>> {
    Some(ledger.clone())
}

fn account_ledger(account: &Arc<AccountView>) -> Option<Arc<LedgerView>> {
    account.ledger()
}

fn budget_account_ledger(account: &Arc<BudgetAccountView>) -> Option<Arc<LedgerView>> {
    account.ledger()
}

fn draft_ledger(draft: &Arc<PostingDraftView>) -> Option<Arc<LedgerView>> {
    Some(draft.ledger().clone())
}

/// Every command of the view-model layer, wired once.
pub struct LedgerCommands {
    pub account_groups: Arc<dyn TaskCommand<LedgerView>>,
    pub budget_account_groups: Arc<dyn TaskCommand<LedgerView>>,
    pub accounts: Arc<dyn TaskCommand<LedgerView>>,
    pub budget_accounts: Arc<dyn TaskCommand<LedgerView>>,
    pub debtors: Arc<dyn TaskCommand<LedgerView>>,
    pub creditors: Arc<dyn TaskCommand<LedgerView>>,
    pub posting_lines: Arc<dyn TaskCommand<LedgerView>>,
    pub refresh_account: Arc<dyn TaskCommand<AccountView>>,
    pub refresh_budget_account: Arc<dyn TaskCommand<BudgetAccountView>>,
    pub refresh_address_account: Arc<dyn TaskCommand<AddressAccountView>>,
    pub account_lookup: Arc<dyn TaskCommand<PostingDraftView>>,
    pub add_posting_line: Arc<dyn TaskCommand<PostingDraftView>>,
}

impl LedgerCommands {
    pub fn new(env: &CommandEnvironment) -> Self {
        let runtime = env.runtime.clone();

        let account_groups: Arc<dyn TaskCommand<LedgerView>> =
            Arc::new(GetAccountGroupsCommand::new(env));
        let budget_account_groups: Arc<dyn TaskCommand<LedgerView>> =
            Arc::new(GetBudgetAccountGroupsCommand::new(env));

        let refresh_account: Arc<dyn TaskCommand<AccountView>> =
            Arc::new(DependencyCommand::<AccountView, LedgerView>::new(
                Arc::new(RefreshAccountCommand::new(env)),
                account_groups.clone(),
                account_ledger,
                runtime.clone(),
            ));
        let refresh_budget_account: Arc<dyn TaskCommand<BudgetAccountView>> =
            Arc::new(DependencyCommand::<BudgetAccountView, LedgerView>::new(
                Arc::new(RefreshBudgetAccountCommand::new(env)),
                budget_account_groups.clone(),
                budget_account_ledger,
                runtime.clone(),
            ));
        let refresh_address_account: Arc<dyn TaskCommand<AddressAccountView>> =
            Arc::new(RefreshAddressAccountCommand::new(env));

        let accounts = Arc::new(DependencyCommand::<LedgerView, LedgerView>::new(
            Arc::new(GetAccountsCommand::new(env, refresh_account.clone())),
            account_groups.clone(),
            same_ledger,
            runtime.clone(),
        ));
        let budget_accounts = Arc::new(DependencyCommand::<LedgerView, LedgerView>::new(
            Arc::new(GetBudgetAccountsCommand::new(env, refresh_budget_account.clone())),
            budget_account_groups.clone(),
            same_ledger,
            runtime.clone(),
        ));
        let account_lookup = Arc::new(DependencyCommand::<PostingDraftView, LedgerView>::new(
            Arc::new(AccountLookupCommand::new(env, refresh_account.clone())),
            account_groups.clone(),
            draft_ledger,
            runtime,
        ));

        Self {
            debtors: Arc::new(GetAddressAccountsCommand::new(
                env,
                AddressAccountKind::Debtor,
                refresh_address_account.clone(),
            )),
            creditors: Arc::new(GetAddressAccountsCommand::new(
                env,
                AddressAccountKind::Creditor,
                refresh_address_account.clone(),
            )),
            posting_lines: Arc::new(GetPostingLinesCommand::new(env)),
            add_posting_line: Arc::new(AddPostingLineCommand::new(env)),
            account_groups,
            budget_account_groups,
            accounts,
            budget_accounts,
            refresh_account,
            refresh_budget_account,
            refresh_address_account,
            account_lookup,
        }
    }

    /// Trigger every list fetch of `ledger` and wait until all of them have finished.
    ///
    /// Failures are reported through the exception handler as usual.
    pub async fn load(&self, ledger: &Arc<LedgerView>) {
        let commands = [
            &self.accounts,
            &self.budget_accounts,
            &self.debtors,
            &self.creditors,
            &self.posting_lines,
        ];

        let mut handles = Vec::with_capacity(commands.len());
        for command in commands {
            if command.can_execute(ledger) {
                command.execute(ledger.clone());
                handles.extend(command.execution_task());
            }
        }
        for handle in handles {
            handle.wait().await;
        }
        tracing::info!(ledger = %ledger.number(), accounts = ledger.accounts.len(), "ledger loaded");
    }
}
