//! Group lookups. Loaded once per ledger: ready only while the collection is empty.

use std::sync::Arc;

use crate::engine::{CommandRuntime, TaskCommand, reconcile};
use crate::environment::CommandEnvironment;
use crate::repository::FinancialRepository;
use crate::views::{GroupKind, GroupView, LedgerView};

pub struct GetAccountGroupsCommand {
    runtime: CommandRuntime,
    repository: Arc<dyn FinancialRepository>,
}

impl GetAccountGroupsCommand {
    pub fn new(env: &CommandEnvironment) -> Self {
        Self {
            runtime: CommandRuntime::new("GetAccountGroupsCommand", "error loading account groups", env),
            repository: env.repository.clone(),
        }
    }
}

impl TaskCommand<LedgerView> for GetAccountGroupsCommand {
    forward_to_runtime!();

    fn can_execute(&self, ledger: &LedgerView) -> bool {
        ledger.account_groups.is_empty()
    }

    fn execute(&self, ledger: Arc<LedgerView>) {
        if !self.can_execute(&ledger) {
            return;
        }

        let repository = self.repository.clone();
        let target = ledger.clone();
        self.runtime.spawn(ledger, async move {
            let records = repository.account_groups().await?;
            reconcile(
                &target.account_groups,
                records,
                |record| record.number,
                |group, record| {
                    group.set_name(record.name.clone());
                },
                |record| GroupView::new(GroupKind::Account, record.number, record.name.clone()),
            );
            tracing::debug!(ledger = %target.number(), groups = target.account_groups.len(), "account groups loaded");
            Ok(())
        });
    }
}

pub struct GetBudgetAccountGroupsCommand {
    runtime: CommandRuntime,
    repository: Arc<dyn FinancialRepository>,
}

impl GetBudgetAccountGroupsCommand {
    pub fn new(env: &CommandEnvironment) -> Self {
        Self {
            runtime: CommandRuntime::new(
                "GetBudgetAccountGroupsCommand",
                "error loading budget account groups",
                env,
            ),
            repository: env.repository.clone(),
        }
    }
}

impl TaskCommand<LedgerView> for GetBudgetAccountGroupsCommand {
    forward_to_runtime!();

    fn can_execute(&self, ledger: &LedgerView) -> bool {
        ledger.budget_account_groups.is_empty()
    }

    fn execute(&self, ledger: Arc<LedgerView>) {
        if !self.can_execute(&ledger) {
            return;
        }

        let repository = self.repository.clone();
        let target = ledger.clone();
        self.runtime.spawn(ledger, async move {
            let records = repository.budget_account_groups().await?;
            reconcile(
                &target.budget_account_groups,
                records,
                |record| record.number,
                |group, record| {
                    group.set_name(record.name.clone());
                },
                |record| GroupView::new(GroupKind::BudgetAccount, record.number, record.name.clone()),
            );
            Ok(())
        });
    }
}
