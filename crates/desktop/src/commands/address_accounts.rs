//! Debtors and creditors.

use std::sync::Arc;

use ledgerdesk_accounting::AddressAccountKind;
use ledgerdesk_events::ObservableCollection;

use crate::engine::{CommandRuntime, Refreshable, TaskCommand, reconcile};
use crate::environment::CommandEnvironment;
use crate::repository::FinancialRepository;
use crate::views::{AddressAccountView, LedgerView};

fn collection_of(ledger: &LedgerView, kind: AddressAccountKind) -> &ObservableCollection<AddressAccountView> {
    match kind {
        AddressAccountKind::Debtor => &ledger.debtors,
        AddressAccountKind::Creditor => &ledger.creditors,
    }
}

/// Fetches the debtors or the creditors of a ledger.
pub struct GetAddressAccountsCommand {
    runtime: CommandRuntime,
    repository: Arc<dyn FinancialRepository>,
    kind: AddressAccountKind,
    refresh: Arc<dyn TaskCommand<AddressAccountView>>,
}

impl GetAddressAccountsCommand {
    pub fn new(
        env: &CommandEnvironment,
        kind: AddressAccountKind,
        refresh: Arc<dyn TaskCommand<AddressAccountView>>,
    ) -> Self {
        let (name, operation) = match kind {
            AddressAccountKind::Debtor => ("GetDebtorsCommand", "error loading debtors"),
            AddressAccountKind::Creditor => ("GetCreditorsCommand", "error loading creditors"),
        };
        Self {
            runtime: CommandRuntime::new(name, operation, env),
            repository: env.repository.clone(),
            kind,
            refresh,
        }
    }

    pub fn kind(&self) -> AddressAccountKind {
        self.kind
    }
}

impl TaskCommand<LedgerView> for GetAddressAccountsCommand {
    forward_to_runtime!();

    fn can_execute(&self, _ledger: &LedgerView) -> bool {
        true
    }

    fn execute(&self, ledger: Arc<LedgerView>) {
        let repository = self.repository.clone();
        let refresh = self.refresh.clone();
        let kind = self.kind;
        let target = ledger.clone();
        let status_date = ledger.status_date();

        self.runtime.spawn(ledger, async move {
            let records = repository
                .address_accounts(target.number(), kind, status_date)
                .await?;
            reconcile(
                collection_of(&target, kind),
                records.iter().filter(|record| record.kind == kind),
                |record| record.number,
                |account, record| account.apply(record),
                |record| AddressAccountView::from_record(&target, record, Some(refresh.clone())),
            );
            Ok(())
        });
    }
}

/// Re-fetches one known debtor or creditor.
pub struct RefreshAddressAccountCommand {
    runtime: CommandRuntime,
    repository: Arc<dyn FinancialRepository>,
}

impl RefreshAddressAccountCommand {
    pub fn new(env: &CommandEnvironment) -> Self {
        Self {
            runtime: CommandRuntime::new(
                "RefreshAddressAccountCommand",
                "error refreshing address account",
                env,
            ),
            repository: env.repository.clone(),
        }
    }
}

impl TaskCommand<AddressAccountView> for RefreshAddressAccountCommand {
    forward_to_runtime!();

    fn can_execute(&self, account: &AddressAccountView) -> bool {
        account.ledger().is_some()
    }

    fn execute(&self, account: Arc<AddressAccountView>) {
        let Some(ledger) = account.ledger() else {
            return;
        };
        let repository = self.repository.clone();
        let target = account.clone();
        let status_date = ledger.status_date();

        self.runtime.spawn(account, async move {
            let record = repository
                .address_account(ledger.number(), target.number(), status_date)
                .await?;
            reconcile(
                collection_of(&ledger, target.kind()),
                [record],
                |record| record.number,
                |account, record| account.apply(record),
                |record| AddressAccountView::from_record(&ledger, record, target.refresh_command()),
            );
            Ok(())
        });
    }
}
