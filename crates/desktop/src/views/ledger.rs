//! Ledger view: the root context object of one accounting book.

use std::sync::Arc;

use chrono::NaiveDate;

use ledgerdesk_accounting::LedgerRecord;
use ledgerdesk_core::{Entity, LedgerNumber};
use ledgerdesk_events::{DependencyGraph, ObservableCollection, ObservableState, PropertyChanged, Subscription};

use crate::engine::{ContextObject, NewsEntry, NewsWindow};
use crate::views::{AccountView, AddressAccountView, BudgetAccountView, GroupView, PostingLineView};

#[derive(Debug)]
struct LedgerFields {
    name: String,
    status_date: NaiveDate,
}

/// One ledger with its keyed collections and news feed.
///
/// Collections only ever grow; commands reconcile fetched records into them.
#[derive(Debug)]
pub struct LedgerView {
    number: LedgerNumber,
    fields: ObservableState<LedgerFields>,
    pub accounts: ObservableCollection<AccountView>,
    pub budget_accounts: ObservableCollection<BudgetAccountView>,
    pub debtors: ObservableCollection<AddressAccountView>,
    pub creditors: ObservableCollection<AddressAccountView>,
    pub posting_lines: ObservableCollection<PostingLineView>,
    pub account_groups: ObservableCollection<GroupView>,
    pub budget_account_groups: ObservableCollection<GroupView>,
    pub news: ObservableCollection<NewsEntry>,
}

impl LedgerView {
    pub fn new(record: &LedgerRecord, status_date: NaiveDate) -> Arc<Self> {
        Arc::new(Self {
            number: record.number,
            fields: ObservableState::new(
                "ledger",
                DependencyGraph::EMPTY,
                LedgerFields {
                    name: record.name.clone(),
                    status_date,
                },
            ),
            accounts: ObservableCollection::new("accounts"),
            budget_accounts: ObservableCollection::new("budget_accounts"),
            debtors: ObservableCollection::new("debtors"),
            creditors: ObservableCollection::new("creditors"),
            posting_lines: ObservableCollection::new("posting_lines"),
            account_groups: ObservableCollection::new("account_groups"),
            budget_account_groups: ObservableCollection::new("budget_account_groups"),
            news: ObservableCollection::new("news"),
        })
    }

    pub fn number(&self) -> LedgerNumber {
        self.number
    }

    pub fn name(&self) -> String {
        self.fields.read(|f| f.name.clone())
    }

    pub fn status_date(&self) -> NaiveDate {
        self.fields.read(|f| f.status_date)
    }

    pub fn set_name(&self, name: impl Into<String>) -> bool {
        self.fields.set("name", name.into(), |f| &mut f.name)
    }

    pub fn set_status_date(&self, date: NaiveDate) -> bool {
        self.fields.set("status_date", date, |f| &mut f.status_date)
    }

    pub fn subscribe(&self) -> Subscription<PropertyChanged> {
        self.fields.subscribe()
    }

    /// News window ending at the current status date.
    pub fn news_window(&self, window_days: u32) -> NewsWindow {
        NewsWindow::new(self.status_date(), window_days)
    }
}

impl Entity for LedgerView {
    type Id = LedgerNumber;

    fn id(&self) -> &Self::Id {
        &self.number
    }
}

impl ContextObject for LedgerView {
    fn describe(&self) -> String {
        format!("ledger {}", self.number)
    }
}
