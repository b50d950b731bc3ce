#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;

use ledgerdesk_accounting::{
    AccountGroupRecord, AccountRecord, AddressAccountKind, AddressAccountRecord,
    BudgetAccountGroupRecord, BudgetAccountRecord, LedgerRecord,
};
use ledgerdesk_core::{
    AccountNumber, AddressAccountNumber, BudgetAccountNumber, GroupNumber, LedgerNumber, Money,
};
use ledgerdesk_desktop::views::{LedgerView, PostingDraftView};
use ledgerdesk_desktop::{
    CollectingExceptionHandler, CommandEnvironment, FixedClock, InMemoryFinancialRepository,
    LedgerCommands, ViewModelConfig,
};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

pub struct Fixture {
    pub repository: Arc<InMemoryFinancialRepository>,
    pub handler: Arc<CollectingExceptionHandler>,
    pub commands: LedgerCommands,
    pub ledger: Arc<LedgerView>,
}

impl Fixture {
    /// Seeded repository, default configuration, clock fixed at [`today`].
    ///
    /// Must be called inside a tokio runtime.
    pub fn new() -> Self {
        Self::with_config(ViewModelConfig::default())
    }

    pub fn with_config(config: ViewModelConfig) -> Self {
        let repository = Arc::new(InMemoryFinancialRepository::new());
        let record = seed(&repository);
        let handler = Arc::new(CollectingExceptionHandler::new());
        let env = CommandEnvironment::new(tokio::runtime::Handle::current(), repository.clone())
            .with_config(config)
            .with_exception_handler(handler.clone())
            .with_clock(Arc::new(FixedClock(today())));

        Self {
            repository,
            handler,
            commands: LedgerCommands::new(&env),
            ledger: LedgerView::new(&record, today()),
        }
    }

    /// A second, empty view of the same ledger.
    pub fn another_view(&self) -> Arc<LedgerView> {
        LedgerView::new(
            &LedgerRecord {
                number: self.ledger.number(),
                name: self.ledger.name(),
            },
            today(),
        )
    }

    /// A draft for `text` on `account`, dated today, in the default input format.
    pub fn draft(&self, account: &str, text: &str, debit: &str, credit: &str) -> Arc<PostingDraftView> {
        let draft = PostingDraftView::new(self.ledger.clone());
        draft.set_date("16-10-2026");
        draft.set_account(account);
        draft.set_text(text);
        draft.set_debit(debit);
        draft.set_credit(credit);
        draft
    }
}

fn seed(repository: &InMemoryFinancialRepository) -> LedgerRecord {
    let ledger = LedgerRecord {
        number: LedgerNumber::new(1),
        name: "Household".to_string(),
    };
    repository.seed_ledger(ledger.clone());
    repository.seed_account_group(AccountGroupRecord {
        number: GroupNumber::new(1),
        name: "Assets".to_string(),
    });
    repository.seed_budget_account_group(BudgetAccountGroupRecord {
        number: GroupNumber::new(1),
        name: "Housing".to_string(),
    });
    repository.seed_account(AccountRecord {
        ledger: ledger.number,
        number: AccountNumber::new("1000").unwrap(),
        name: "Bank".to_string(),
        group: GroupNumber::new(1),
        status_date: today(),
        credit: Money::new(1_000, 0),
        balance: Money::new(2_000, 0),
    });
    repository.seed_account(AccountRecord {
        ledger: ledger.number,
        number: AccountNumber::new("3000").unwrap(),
        name: "Orphan".to_string(),
        group: GroupNumber::new(9),
        status_date: today(),
        credit: Money::ZERO,
        balance: Money::ZERO,
    });
    repository.seed_budget_account(BudgetAccountRecord {
        ledger: ledger.number,
        number: BudgetAccountNumber::new("BU-01").unwrap(),
        name: "Rent".to_string(),
        group: GroupNumber::new(1),
        status_date: today(),
        budget: Money::new(6_000, 0),
        posted: Money::ZERO,
    });
    repository.seed_address_account(AddressAccountRecord {
        ledger: ledger.number,
        number: AddressAccountNumber::new(10),
        name: "Landlord".to_string(),
        kind: AddressAccountKind::Creditor,
        status_date: today(),
        balance: Money::ZERO,
    });
    ledger
}
