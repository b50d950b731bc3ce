//! Financial repository collaborator.
//!
//! The remote financial service is an opaque async data source: one operation per
//! fetch or mutate use case. Failures are reported as `anyhow::Error`; a repository
//! signals the two failures the view-model layer understands with
//! [`DataSourceError`](crate::error::DataSourceError), and anything else it raises is
//! treated as unexpected.

mod in_memory;

use chrono::NaiveDate;

use ledgerdesk_accounting::{
    AccountGroupRecord, AccountRecord, AddressAccountKind, AddressAccountRecord,
    BudgetAccountGroupRecord, BudgetAccountRecord, PostingLineRecord, PostingRequest,
};
use ledgerdesk_core::{AccountNumber, AddressAccountNumber, BudgetAccountNumber, LedgerNumber};

pub use in_memory::{CallPhase, InMemoryFinancialRepository, RepositoryOperation, ScriptedFailure};

/// Async interface of the financial service.
///
/// Balances are reported as of the requested status date.
#[async_trait::async_trait]
pub trait FinancialRepository: Send + Sync {
    /// Name used as the reason-context of repository failures.
    fn name(&self) -> &'static str;

    async fn account_groups(&self) -> anyhow::Result<Vec<AccountGroupRecord>>;

    async fn budget_account_groups(&self) -> anyhow::Result<Vec<BudgetAccountGroupRecord>>;

    async fn accounts(
        &self,
        ledger: LedgerNumber,
        status_date: NaiveDate,
    ) -> anyhow::Result<Vec<AccountRecord>>;

    async fn account(
        &self,
        ledger: LedgerNumber,
        number: &AccountNumber,
        status_date: NaiveDate,
    ) -> anyhow::Result<AccountRecord>;

    async fn budget_accounts(
        &self,
        ledger: LedgerNumber,
        status_date: NaiveDate,
    ) -> anyhow::Result<Vec<BudgetAccountRecord>>;

    async fn budget_account(
        &self,
        ledger: LedgerNumber,
        number: &BudgetAccountNumber,
        status_date: NaiveDate,
    ) -> anyhow::Result<BudgetAccountRecord>;

    async fn address_accounts(
        &self,
        ledger: LedgerNumber,
        kind: AddressAccountKind,
        status_date: NaiveDate,
    ) -> anyhow::Result<Vec<AddressAccountRecord>>;

    async fn address_account(
        &self,
        ledger: LedgerNumber,
        number: AddressAccountNumber,
        status_date: NaiveDate,
    ) -> anyhow::Result<AddressAccountRecord>;

    /// The newest `count` lines dated on or before `status_date`, newest first.
    async fn posting_lines(
        &self,
        ledger: LedgerNumber,
        status_date: NaiveDate,
        count: usize,
    ) -> anyhow::Result<Vec<PostingLineRecord>>;

    /// Post one line and return the lines it created.
    async fn post_line(
        &self,
        ledger: LedgerNumber,
        request: &PostingRequest,
    ) -> anyhow::Result<Vec<PostingLineRecord>>;
}
