//! Account list, single-account refresh and the posting draft's account lookup.

use std::sync::Arc;

use ledgerdesk_core::AccountNumber;

use crate::config::ConfigurationProvider;
use crate::engine::{
    CommandRuntime, Refreshable, RecordOrigin, TaskCommand, publish_news, reconcile_grouped,
};
use crate::environment::CommandEnvironment;
use crate::repository::FinancialRepository;
use crate::views::{AccountView, LedgerView, PostingDraftView};

/// Fetches every account of a ledger as of its status date.
pub struct GetAccountsCommand {
    runtime: CommandRuntime,
    repository: Arc<dyn FinancialRepository>,
    refresh: Arc<dyn TaskCommand<AccountView>>,
}

impl GetAccountsCommand {
    /// `refresh` is attached to every account view this command creates.
    pub fn new(env: &CommandEnvironment, refresh: Arc<dyn TaskCommand<AccountView>>) -> Self {
        Self {
            runtime: CommandRuntime::new("GetAccountsCommand", "error loading accounts", env),
            repository: env.repository.clone(),
            refresh,
        }
    }
}

impl TaskCommand<LedgerView> for GetAccountsCommand {
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
            let records = repository.accounts(target.number(), status_date).await?;
            reconcile_grouped(
                &target.accounts,
                records,
                &target.account_groups,
                |record| record.group,
                |record| record.number.clone(),
                |account, record, group| account.apply(record, group),
                |record, group| AccountView::from_record(&target, record, group, Some(refresh.clone())),
            );
            Ok(())
        });
    }
}

/// Re-fetches one known account.
pub struct RefreshAccountCommand {
    runtime: CommandRuntime,
    repository: Arc<dyn FinancialRepository>,
}

impl RefreshAccountCommand {
    pub fn new(env: &CommandEnvironment) -> Self {
        Self {
            runtime: CommandRuntime::new("RefreshAccountCommand", "error refreshing account", env),
            repository: env.repository.clone(),
        }
    }
}

impl TaskCommand<AccountView> for RefreshAccountCommand {
    forward_to_runtime!();

    fn can_execute(&self, account: &AccountView) -> bool {
        account.ledger().is_some()
    }

    fn execute(&self, account: Arc<AccountView>) {
        let Some(ledger) = account.ledger() else {
            return;
        };
        let repository = self.repository.clone();
        let target = account.clone();
        let status_date = ledger.status_date();

        self.runtime.spawn(account, async move {
            let record = repository
                .account(ledger.number(), target.number(), status_date)
                .await?;
            reconcile_grouped(
                &ledger.accounts,
                [record],
                &ledger.account_groups,
                |record| record.group,
                |record| record.number.clone(),
                |account, record, group| account.apply(record, group),
                |record, group| {
                    AccountView::from_record(&ledger, record, group, target.refresh_command())
                },
            );
            Ok(())
        });
    }
}

/// Resolves the account typed into the posting draft.
///
/// An account the ledger did not know yet is inserted and announced as news. The name
/// is shown only if the draft still holds the looked-up number and the account's group
/// is known.
pub struct AccountLookupCommand {
    runtime: CommandRuntime,
    repository: Arc<dyn FinancialRepository>,
    config: Arc<dyn ConfigurationProvider>,
    refresh: Arc<dyn TaskCommand<AccountView>>,
}

impl AccountLookupCommand {
    pub fn new(env: &CommandEnvironment, refresh: Arc<dyn TaskCommand<AccountView>>) -> Self {
        Self {
            runtime: CommandRuntime::new("AccountLookupCommand", "error looking up account", env),
            repository: env.repository.clone(),
            config: env.config.clone(),
            refresh,
        }
    }
}

impl TaskCommand<PostingDraftView> for AccountLookupCommand {
    forward_to_runtime!();

    fn can_execute(&self, draft: &PostingDraftView) -> bool {
        AccountNumber::new(draft.input().account).is_ok()
    }

    fn execute(&self, draft: Arc<PostingDraftView>) {
        let Ok(number) = AccountNumber::new(draft.input().account) else {
            return;
        };
        let repository = self.repository.clone();
        let refresh = self.refresh.clone();
        let target = draft.clone();
        let ledger = draft.ledger().clone();
        let status_date = ledger.status_date();
        let window = ledger.news_window(self.config.news_window_days());

        self.runtime.spawn(draft, async move {
            let record = repository.account(ledger.number(), &number, status_date).await?;
            let name = record.name.clone();
            let outcome = reconcile_grouped(
                &ledger.accounts,
                [record],
                &ledger.account_groups,
                |record| record.group,
                |record| record.number.clone(),
                |account, record, group| account.apply(record, group),
                |record, group| AccountView::from_record(&ledger, record, group, Some(refresh.clone())),
            );
            publish_news(&ledger.news, &outcome.inserted, window, RecordOrigin::DirectFetch);

            // The form may have moved on while the fetch was in flight, and a dropped
            // record is an account the ledger does not show.
            let still_typed = AccountNumber::new(target.input().account).is_ok_and(|typed| typed == number);
            if still_typed && outcome.dropped == 0 {
                target.set_account_name(Some(name));
            } else {
                tracing::debug!(account = %number, dropped = outcome.dropped, "account name not applied");
            }
            Ok(())
        });
    }
}
