//! Account view.

use std::sync::{Arc, Weak};

use chrono::NaiveDate;

use ledgerdesk_accounting::AccountRecord;
use ledgerdesk_core::{AccountNumber, Entity, Money};
use ledgerdesk_events::{DependencyGraph, ObservableState, PropertyChanged, Subscription};

use crate::engine::{ContextObject, NewsSource, NewsSubject, Refreshable, TaskCommand};
use crate::views::{GroupView, LedgerView};

/// `available` is derived from `credit` and `balance`.
pub const ACCOUNT_GRAPH: DependencyGraph =
    DependencyGraph::new(&[("credit", &["available"]), ("balance", &["available"])]);

#[derive(Debug)]
struct AccountFields {
    name: String,
    group: Arc<GroupView>,
    status_date: NaiveDate,
    credit: Money,
    balance: Money,
}

pub struct AccountView {
    ledger: Weak<LedgerView>,
    number: AccountNumber,
    fields: ObservableState<AccountFields>,
    refresh: Option<Arc<dyn TaskCommand<AccountView>>>,
}

impl AccountView {
    pub fn from_record(
        ledger: &Arc<LedgerView>,
        record: &AccountRecord,
        group: Arc<GroupView>,
        refresh: Option<Arc<dyn TaskCommand<AccountView>>>,
    ) -> Self {
        Self {
            ledger: Arc::downgrade(ledger),
            number: record.number.clone(),
            fields: ObservableState::new(
                "account",
                ACCOUNT_GRAPH,
                AccountFields {
                    name: record.name.clone(),
                    group,
                    status_date: record.status_date,
                    credit: record.credit,
                    balance: record.balance,
                },
            ),
            refresh,
        }
    }

    /// Copy every mapped field of `record`; unchanged fields stay silent.
    pub fn apply(&self, record: &AccountRecord, group: Arc<GroupView>) {
        self.set_name(record.name.clone());
        self.set_group(group);
        self.set_status_date(record.status_date);
        self.set_credit(record.credit);
        self.set_balance(record.balance);
    }

    /// The owning ledger, if it is still alive.
    pub fn ledger(&self) -> Option<Arc<LedgerView>> {
        self.ledger.upgrade()
    }

    pub fn number(&self) -> &AccountNumber {
        &self.number
    }

    pub fn name(&self) -> String {
        self.fields.read(|f| f.name.clone())
    }

    pub fn group(&self) -> Arc<GroupView> {
        self.fields.read(|f| f.group.clone())
    }

    pub fn status_date(&self) -> NaiveDate {
        self.fields.read(|f| f.status_date)
    }

    pub fn credit(&self) -> Money {
        self.fields.read(|f| f.credit)
    }

    pub fn balance(&self) -> Money {
        self.fields.read(|f| f.balance)
    }

    pub fn available(&self) -> Money {
        self.fields.read(|f| f.credit + f.balance)
    }

    pub fn set_name(&self, name: String) -> bool {
        self.fields.set("name", name, |f| &mut f.name)
    }

    /// Groups compare by identity, not by number.
    pub fn set_group(&self, group: Arc<GroupView>) -> bool {
        self.fields.update("group", |f| {
            if Arc::ptr_eq(&f.group, &group) {
                return false;
            }
            f.group = group;
            true
        })
    }

    pub fn set_status_date(&self, date: NaiveDate) -> bool {
        self.fields.set("status_date", date, |f| &mut f.status_date)
    }

    pub fn set_credit(&self, credit: Money) -> bool {
        self.fields.set("credit", credit, |f| &mut f.credit)
    }

    pub fn set_balance(&self, balance: Money) -> bool {
        self.fields.set("balance", balance, |f| &mut f.balance)
    }

    pub fn subscribe(&self) -> Subscription<PropertyChanged> {
        self.fields.subscribe()
    }
}

impl core::fmt::Debug for AccountView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AccountView")
            .field("number", &self.number)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl Entity for AccountView {
    type Id = AccountNumber;

    fn id(&self) -> &Self::Id {
        &self.number
    }
}

impl ContextObject for AccountView {
    fn describe(&self) -> String {
        format!("account {}", self.number)
    }
}

impl Refreshable for AccountView {
    fn refresh_command(&self) -> Option<Arc<dyn TaskCommand<Self>>> {
        self.refresh.clone()
    }
}

impl NewsSource for AccountView {
    fn news_date(&self) -> NaiveDate {
        self.status_date()
    }

    fn news_subject(&self) -> NewsSubject {
        NewsSubject::Account(self.number.clone())
    }

    fn headline(&self) -> String {
        format!("{} {}", self.number, self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::GroupKind;
    use ledgerdesk_accounting::LedgerRecord;
    use ledgerdesk_core::{GroupNumber, LedgerNumber};

    fn record(balance: Money) -> AccountRecord {
        AccountRecord {
            ledger: LedgerNumber::new(1),
            number: AccountNumber::new("1000").unwrap(),
            name: "Bank".to_string(),
            group: GroupNumber::new(1),
            status_date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            credit: Money::new(1_000, 0),
            balance,
        }
    }

    fn ledger() -> Arc<LedgerView> {
        LedgerView::new(
            &LedgerRecord {
                number: LedgerNumber::new(1),
                name: "Household".to_string(),
            },
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        )
    }

    #[test]
    fn balance_change_notifies_balance_then_available() {
        let ledger = ledger();
        let group = Arc::new(GroupView::new(GroupKind::Account, GroupNumber::new(1), "Assets"));
        let account = AccountView::from_record(&ledger, &record(Money::ZERO), group.clone(), None);
        let subscription = account.subscribe();

        account.apply(&record(Money::new(-250, 0)), group);

        let names: Vec<_> = subscription.drain().into_iter().map(|c| c.property).collect();
        assert_eq!(names, vec!["balance", "available"]);
        assert_eq!(account.available(), Money::new(750, 0));
    }

    #[test]
    fn reapplying_the_same_record_is_silent() {
        let ledger = ledger();
        let group = Arc::new(GroupView::new(GroupKind::Account, GroupNumber::new(1), "Assets"));
        let account = AccountView::from_record(&ledger, &record(Money::ZERO), group.clone(), None);
        let subscription = account.subscribe();

        account.apply(&record(Money::ZERO), group);

        assert!(subscription.drain().is_empty());
        assert!(Arc::ptr_eq(&account.ledger().unwrap(), &ledger));
    }
}
