//! In-memory financial repository for tests/dev.
//!
//! Balances are computed from the posted lines as of the requested status date, on top
//! of the opening figures the records were seeded with. Every call is journaled, and
//! failures and latency can be scripted per operation.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError, RwLock};
use std::time::Duration;

use chrono::NaiveDate;

use ledgerdesk_accounting::{
    AccountGroupRecord, AccountRecord, AddressAccountKind, AddressAccountRecord,
    BudgetAccountGroupRecord, BudgetAccountRecord, LedgerRecord, PostingLineRecord, PostingRequest,
};
use ledgerdesk_core::{
    AccountNumber, AddressAccountNumber, BudgetAccountNumber, LedgerNumber, Money, RunningNumber,
};

use crate::error::DataSourceError;
use crate::repository::FinancialRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    AccountGroups,
    BudgetAccountGroups,
    Accounts,
    Account,
    BudgetAccounts,
    BudgetAccount,
    AddressAccounts,
    AddressAccount,
    PostingLines,
    PostLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPhase {
    Started,
    Completed,
}

/// A failure the repository raises instead of answering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedFailure {
    BusinessRule(String),
    Repository(String),
    /// An error that is neither a business-rule nor a repository failure.
    Unexpected(String),
}

impl ScriptedFailure {
    fn into_error(self) -> anyhow::Error {
        match self {
            ScriptedFailure::BusinessRule(message) => DataSourceError::business_rule(message).into(),
            ScriptedFailure::Repository(message) => DataSourceError::repository(message).into(),
            ScriptedFailure::Unexpected(message) => anyhow::anyhow!(message),
        }
    }
}

#[derive(Debug, Default)]
struct LedgerBook {
    name: String,
    accounts: BTreeMap<AccountNumber, AccountRecord>,
    budget_accounts: BTreeMap<BudgetAccountNumber, BudgetAccountRecord>,
    address_accounts: BTreeMap<AddressAccountNumber, AddressAccountRecord>,
    lines: Vec<PostingLineRecord>,
    next_running_number: i32,
}

impl LedgerBook {
    fn lines_until(&self, status_date: NaiveDate) -> impl Iterator<Item = &PostingLineRecord> {
        self.lines.iter().filter(move |line| line.date <= status_date)
    }

    fn account_as_of(&self, record: &AccountRecord, status_date: NaiveDate) -> AccountRecord {
        let movement = self
            .lines_until(status_date)
            .filter(|line| line.account == record.number)
            .fold(Money::ZERO, |sum, line| sum + line.debit - line.credit);
        AccountRecord {
            status_date,
            balance: record.balance + movement,
            ..record.clone()
        }
    }

    fn budget_account_as_of(
        &self,
        record: &BudgetAccountRecord,
        status_date: NaiveDate,
    ) -> BudgetAccountRecord {
        let movement = self
            .lines_until(status_date)
            .filter(|line| line.budget_account.as_ref() == Some(&record.number))
            .fold(Money::ZERO, |sum, line| sum + line.credit - line.debit);
        BudgetAccountRecord {
            status_date,
            posted: record.posted + movement,
            ..record.clone()
        }
    }

    fn address_account_as_of(
        &self,
        record: &AddressAccountRecord,
        status_date: NaiveDate,
    ) -> AddressAccountRecord {
        let movement = self
            .lines_until(status_date)
            .filter(|line| line.address_account == Some(record.number))
            .fold(Money::ZERO, |sum, line| sum + line.debit - line.credit);
        AddressAccountRecord {
            status_date,
            balance: record.balance + movement,
            ..record.clone()
        }
    }
}

#[derive(Debug, Default)]
struct Books {
    account_groups: Vec<AccountGroupRecord>,
    budget_account_groups: Vec<BudgetAccountGroupRecord>,
    ledgers: BTreeMap<LedgerNumber, LedgerBook>,
}

impl Books {
    fn ledger(&self, number: LedgerNumber) -> anyhow::Result<&LedgerBook> {
        self.ledgers
            .get(&number)
            .ok_or_else(|| DataSourceError::business_rule(format!("ledger {number} does not exist")).into())
    }

    fn ledger_mut(&mut self, number: LedgerNumber) -> anyhow::Result<&mut LedgerBook> {
        self.ledgers
            .get_mut(&number)
            .ok_or_else(|| DataSourceError::business_rule(format!("ledger {number} does not exist")).into())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryFinancialRepository {
    books: RwLock<Books>,
    failures: Mutex<HashMap<RepositoryOperation, ScriptedFailure>>,
    delays: Mutex<HashMap<RepositoryOperation, Duration>>,
    journal: Mutex<Vec<(RepositoryOperation, CallPhase)>>,
}

impl InMemoryFinancialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn write_books(&self) -> std::sync::RwLockWriteGuard<'_, Books> {
        self.books.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn seed_ledger(&self, record: LedgerRecord) {
        self.write_books().ledgers.insert(
            record.number,
            LedgerBook {
                name: record.name,
                next_running_number: 1,
                ..LedgerBook::default()
            },
        );
    }

    pub fn seed_account_group(&self, record: AccountGroupRecord) {
        self.write_books().account_groups.push(record);
    }

    pub fn seed_budget_account_group(&self, record: BudgetAccountGroupRecord) {
        self.write_books().budget_account_groups.push(record);
    }

    /// Seed an account; its `balance` is the opening balance. The ledger must exist.
    pub fn seed_account(&self, record: AccountRecord) {
        if let Some(book) = self.write_books().ledgers.get_mut(&record.ledger) {
            book.accounts.insert(record.number.clone(), record);
        }
    }

    pub fn seed_budget_account(&self, record: BudgetAccountRecord) {
        if let Some(book) = self.write_books().ledgers.get_mut(&record.ledger) {
            book.budget_accounts.insert(record.number.clone(), record);
        }
    }

    pub fn seed_address_account(&self, record: AddressAccountRecord) {
        if let Some(book) = self.write_books().ledgers.get_mut(&record.ledger) {
            book.address_accounts.insert(record.number, record);
        }
    }

    pub fn ledger(&self, number: LedgerNumber) -> Option<LedgerRecord> {
        let books = self.books.read().unwrap_or_else(PoisonError::into_inner);
        books.ledgers.get(&number).map(|book| LedgerRecord {
            number,
            name: book.name.clone(),
        })
    }

    /// Fail every call of `operation` until [`Self::clear_failure`].
    pub fn fail(&self, operation: RepositoryOperation, failure: ScriptedFailure) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(operation, failure);
    }

    pub fn clear_failure(&self, operation: RepositoryOperation) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&operation);
    }

    /// Make every call of `operation` take at least `delay`.
    pub fn delay(&self, operation: RepositoryOperation, delay: Duration) {
        self.delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(operation, delay);
    }

    /// Every call so far, in the order the phases happened.
    pub fn journal(&self) -> Vec<(RepositoryOperation, CallPhase)> {
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn calls(&self, operation: RepositoryOperation) -> usize {
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|entry| **entry == (operation, CallPhase::Started))
            .count()
    }

    fn record(&self, operation: RepositoryOperation, phase: CallPhase) {
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((operation, phase));
    }

    async fn call<T>(
        &self,
        operation: RepositoryOperation,
        body: impl FnOnce(&mut Books) -> anyhow::Result<T> + Send,
    ) -> anyhow::Result<T> {
        self.record(operation, CallPhase::Started);

        let delay = self
            .delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&operation)
            .copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failure = self
            .failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&operation)
            .cloned();
        let result = match failure {
            Some(failure) => Err(failure.into_error()),
            None => body(&mut self.write_books()),
        };

        self.record(operation, CallPhase::Completed);
        result
    }
}

#[async_trait::async_trait]
impl FinancialRepository for InMemoryFinancialRepository {
    fn name(&self) -> &'static str {
        "in-memory financial repository"
    }

    async fn account_groups(&self) -> anyhow::Result<Vec<AccountGroupRecord>> {
        self.call(RepositoryOperation::AccountGroups, |books| {
            Ok(books.account_groups.clone())
        })
        .await
    }

    async fn budget_account_groups(&self) -> anyhow::Result<Vec<BudgetAccountGroupRecord>> {
        self.call(RepositoryOperation::BudgetAccountGroups, |books| {
            Ok(books.budget_account_groups.clone())
        })
        .await
    }

    async fn accounts(
        &self,
        ledger: LedgerNumber,
        status_date: NaiveDate,
    ) -> anyhow::Result<Vec<AccountRecord>> {
        self.call(RepositoryOperation::Accounts, |books| {
            let book = books.ledger(ledger)?;
            Ok(book
                .accounts
                .values()
                .map(|record| book.account_as_of(record, status_date))
                .collect())
        })
        .await
    }

    async fn account(
        &self,
        ledger: LedgerNumber,
        number: &AccountNumber,
        status_date: NaiveDate,
    ) -> anyhow::Result<AccountRecord> {
        self.call(RepositoryOperation::Account, |books| {
            let book = books.ledger(ledger)?;
            let record = book.accounts.get(number).ok_or_else(|| {
                DataSourceError::business_rule(format!("account {number} does not exist"))
            })?;
            Ok(book.account_as_of(record, status_date))
        })
        .await
    }

    async fn budget_accounts(
        &self,
        ledger: LedgerNumber,
        status_date: NaiveDate,
    ) -> anyhow::Result<Vec<BudgetAccountRecord>> {
        self.call(RepositoryOperation::BudgetAccounts, |books| {
            let book = books.ledger(ledger)?;
            Ok(book
                .budget_accounts
                .values()
                .map(|record| book.budget_account_as_of(record, status_date))
                .collect())
        })
        .await
    }

    async fn budget_account(
        &self,
        ledger: LedgerNumber,
        number: &BudgetAccountNumber,
        status_date: NaiveDate,
    ) -> anyhow::Result<BudgetAccountRecord> {
        self.call(RepositoryOperation::BudgetAccount, |books| {
            let book = books.ledger(ledger)?;
            let record = book.budget_accounts.get(number).ok_or_else(|| {
                DataSourceError::business_rule(format!("budget account {number} does not exist"))
            })?;
            Ok(book.budget_account_as_of(record, status_date))
        })
        .await
    }

    async fn address_accounts(
        &self,
        ledger: LedgerNumber,
        kind: AddressAccountKind,
        status_date: NaiveDate,
    ) -> anyhow::Result<Vec<AddressAccountRecord>> {
        self.call(RepositoryOperation::AddressAccounts, |books| {
            let book = books.ledger(ledger)?;
            Ok(book
                .address_accounts
                .values()
                .filter(|record| record.kind == kind)
                .map(|record| book.address_account_as_of(record, status_date))
                .collect())
        })
        .await
    }

    async fn address_account(
        &self,
        ledger: LedgerNumber,
        number: AddressAccountNumber,
        status_date: NaiveDate,
    ) -> anyhow::Result<AddressAccountRecord> {
        self.call(RepositoryOperation::AddressAccount, |books| {
            let book = books.ledger(ledger)?;
            let record = book.address_accounts.get(&number).ok_or_else(|| {
                DataSourceError::business_rule(format!("address account {number} does not exist"))
            })?;
            Ok(book.address_account_as_of(record, status_date))
        })
        .await
    }

    async fn posting_lines(
        &self,
        ledger: LedgerNumber,
        status_date: NaiveDate,
        count: usize,
    ) -> anyhow::Result<Vec<PostingLineRecord>> {
        self.call(RepositoryOperation::PostingLines, |books| {
            let book = books.ledger(ledger)?;
            let mut lines: Vec<_> = book.lines_until(status_date).cloned().collect();
            lines.sort_by(|a, b| {
                b.date
                    .cmp(&a.date)
                    .then(b.running_number.cmp(&a.running_number))
            });
            lines.truncate(count);
            Ok(lines)
        })
        .await
    }

    async fn post_line(
        &self,
        ledger: LedgerNumber,
        request: &PostingRequest,
    ) -> anyhow::Result<Vec<PostingLineRecord>> {
        self.call(RepositoryOperation::PostLine, |books| {
            let book = books.ledger_mut(ledger)?;
            if !book.accounts.contains_key(&request.account) {
                return Err(DataSourceError::business_rule(format!(
                    "account {} does not exist",
                    request.account
                ))
                .into());
            }
            if let Some(number) = &request.budget_account {
                if !book.budget_accounts.contains_key(number) {
                    return Err(DataSourceError::business_rule(format!(
                        "budget account {number} does not exist"
                    ))
                    .into());
                }
            }
            if let Some(number) = request.address_account {
                if !book.address_accounts.contains_key(&number) {
                    return Err(DataSourceError::business_rule(format!(
                        "address account {number} does not exist"
                    ))
                    .into());
                }
            }

            let line = PostingLineRecord {
                ledger,
                running_number: RunningNumber::new(book.next_running_number),
                date: request.date,
                voucher: request.voucher.clone(),
                account: request.account.clone(),
                text: request.text.clone(),
                budget_account: request.budget_account.clone(),
                debit: request.debit,
                credit: request.credit,
                address_account: request.address_account,
            };
            book.next_running_number += 1;
            book.lines.push(line.clone());
            tracing::debug!(ledger = %ledger, running_number = %line.running_number, "line posted");
            Ok(vec![line])
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerdesk_core::GroupNumber;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    fn repository() -> InMemoryFinancialRepository {
        let repository = InMemoryFinancialRepository::new();
        repository.seed_ledger(LedgerRecord {
            number: LedgerNumber::new(1),
            name: "Household".to_string(),
        });
        repository.seed_account(AccountRecord {
            ledger: LedgerNumber::new(1),
            number: AccountNumber::new("1000").unwrap(),
            name: "Bank".to_string(),
            group: GroupNumber::new(1),
            status_date: date(1),
            credit: Money::new(1_000, 0),
            balance: Money::new(100, 0),
        });
        repository
    }

    fn request(day: u32, debit: Money) -> PostingRequest {
        PostingRequest {
            date: date(day),
            voucher: None,
            account: AccountNumber::new("1000").unwrap(),
            text: "Rent".to_string(),
            budget_account: None,
            debit,
            credit: Money::ZERO,
            address_account: None,
        }
    }

    #[tokio::test]
    async fn balances_follow_posted_lines_up_to_the_status_date() {
        let repository = repository();
        let ledger = LedgerNumber::new(1);
        let number = AccountNumber::new("1000").unwrap();

        repository.post_line(ledger, &request(10, Money::new(50, 0))).await.unwrap();
        repository.post_line(ledger, &request(20, Money::new(25, 0))).await.unwrap();

        let mid = repository.account(ledger, &number, date(15)).await.unwrap();
        assert_eq!(mid.balance, Money::new(150, 0));
        let end = repository.account(ledger, &number, date(31)).await.unwrap();
        assert_eq!(end.balance, Money::new(175, 0));

        let lines = repository.posting_lines(ledger, date(31), 1).await.unwrap();
        assert_eq!(lines[0].running_number, RunningNumber::new(2));
    }

    #[tokio::test]
    async fn posting_against_an_unknown_account_is_a_business_rule_failure() {
        let repository = repository();
        let mut request = request(10, Money::new(50, 0));
        request.account = AccountNumber::new("9999").unwrap();

        let error = repository
            .post_line(LedgerNumber::new(1), &request)
            .await
            .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<DataSourceError>(),
            Some(DataSourceError::BusinessRule { .. })
        ));
    }

    #[tokio::test]
    async fn scripted_failures_are_journaled() {
        let repository = repository();
        repository.fail(
            RepositoryOperation::AccountGroups,
            ScriptedFailure::Repository("connection reset".to_string()),
        );

        assert!(repository.account_groups().await.is_err());
        repository.clear_failure(RepositoryOperation::AccountGroups);
        assert!(repository.account_groups().await.is_ok());

        assert_eq!(repository.calls(RepositoryOperation::AccountGroups), 2);
        assert_eq!(
            repository.journal()[..2],
            [
                (RepositoryOperation::AccountGroups, CallPhase::Started),
                (RepositoryOperation::AccountGroups, CallPhase::Completed),
            ]
        );
    }
}
