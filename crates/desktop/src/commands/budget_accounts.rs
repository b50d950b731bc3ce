//! Budget-account list fetch and single budget-account refresh.

use std::sync::Arc;

use crate::engine::{CommandRuntime, Refreshable, TaskCommand, reconcile_grouped};
use crate::environment::CommandEnvironment;
use crate::repository::FinancialRepository;
use crate::views::{BudgetAccountView, LedgerView};

pub struct GetBudgetAccountsCommand {
    runtime: CommandRuntime,
    repository: Arc<dyn FinancialRepository>,
    refresh: Arc<dyn TaskCommand<BudgetAccountView>>,
}

impl GetBudgetAccountsCommand {
    pub fn new(
        env: &CommandEnvironment,
        refresh: Arc<dyn TaskCommand<BudgetAccountView>>,
    ) -> Self {
        Self {
            runtime: CommandRuntime::new(
                "GetBudgetAccountsCommand",
                "error loading budget accounts",
                env,
            ),
            repository: env.repository.clone(),
            refresh,
        }
    }
}

impl TaskCommand<LedgerView> for GetBudgetAccountsCommand {
    forward_to_runtime!();

    fn can_execute(&self, _ledger: &LedgerView) -> bool {
        true
    }

    fn execute(&self, ledger: Arc<LedgerView>) {
        let repository = self.repository.clone();
        let refresh = self.refresh.clone();
        let target = ledger.clone();
        let status_date = ledger.status_date();

        self.runtime.spawn(ledger, async move {
            let records = repository.budget_accounts(target.number(), status_date).await?;
            reconcile_grouped(
                &target.budget_accounts,
                records,
                &target.budget_account_groups,
                |record| record.group,
                |record| record.number.clone(),
                |account, record, group| account.apply(record, group),
                |record, group| {
                    BudgetAccountView::from_record(&target, record, group, Some(refresh.clone()))
                },
            );
            Ok(())
        });
    }
}

pub struct RefreshBudgetAccountCommand {
    runtime: CommandRuntime,
    repository: Arc<dyn FinancialRepository>,
}

impl RefreshBudgetAccountCommand {
    pub fn new(env: &CommandEnvironment) -> Self {
        Self {
            runtime: CommandRuntime::new(
                "RefreshBudgetAccountCommand",
                "error refreshing budget account",
                env,
            ),
            repository: env.repository.clone(),
        }
    }
}

impl TaskCommand<BudgetAccountView> for RefreshBudgetAccountCommand {
    forward_to_runtime!();

    fn can_execute(&self, account: &BudgetAccountView) -> bool {
        account.ledger().is_some()
    }

    fn execute(&self, account: Arc<BudgetAccountView>) {
        let Some(ledger) = account.ledger() else {
            return;
        };
        let repository = self.repository.clone();
        let target = account.clone();
        let status_date = ledger.status_date();

        self.runtime.spawn(account, async move {
            let record = repository
                .budget_account(ledger.number(), target.number(), status_date)
                .await?;
            reconcile_grouped(
                &ledger.budget_accounts,
                [record],
                &ledger.budget_account_groups,
                |record| record.group,
                |record| record.number.clone(),
                |account, record, group| account.apply(record, group),
                |record, group| {
                    BudgetAccountView::from_record(&ledger, record, group, target.refresh_command())
                },
            );
            Ok(())
        });
    }
}
