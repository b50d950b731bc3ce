//! Budget-account view.

use std::sync::{Arc, Weak};

use chrono::NaiveDate;

use ledgerdesk_accounting::BudgetAccountRecord;
use ledgerdesk_core::{BudgetAccountNumber, Entity, Money};
use ledgerdesk_events::{DependencyGraph, ObservableState, PropertyChanged, Subscription};

use crate::engine::{ContextObject, Refreshable, TaskCommand};
use crate::views::{GroupView, LedgerView};

pub const BUDGET_ACCOUNT_GRAPH: DependencyGraph =
    DependencyGraph::new(&[("budget", &["available"]), ("posted", &["available"])]);

#[derive(Debug)]
struct BudgetAccountFields {
    name: String,
    group: Arc<GroupView>,
    status_date: NaiveDate,
    budget: Money,
    posted: Money,
}

pub struct BudgetAccountView {
    ledger: Weak<LedgerView>,
    number: BudgetAccountNumber,
    fields: ObservableState<BudgetAccountFields>,
    refresh: Option<Arc<dyn TaskCommand<BudgetAccountView>>>,
}

impl BudgetAccountView {
    pub fn from_record(
        ledger: &Arc<LedgerView>,
        record: &BudgetAccountRecord,
        group: Arc<GroupView>,
        refresh: Option<Arc<dyn TaskCommand<BudgetAccountView>>>,
    ) -> Self {
        Self {
            ledger: Arc::downgrade(ledger),
            number: record.number.clone(),
            fields: ObservableState::new(
                "budget_account",
                BUDGET_ACCOUNT_GRAPH,
                BudgetAccountFields {
                    name: record.name.clone(),
                    group,
                    status_date: record.status_date,
                    budget: record.budget,
                    posted: record.posted,
                },
            ),
            refresh,
        }
    }

    pub fn apply(&self, record: &BudgetAccountRecord, group: Arc<GroupView>) {
        self.fields.set("name", record.name.clone(), |f| &mut f.name);
        self.fields.update("group", |f| {
            if Arc::ptr_eq(&f.group, &group) {
                return false;
            }
            f.group = group;
            true
        });
        self.fields.set("status_date", record.status_date, |f| &mut f.status_date);
        self.set_budget(record.budget);
        self.set_posted(record.posted);
    }

    pub fn ledger(&self) -> Option<Arc<LedgerView>> {
        self.ledger.upgrade()
    }

    pub fn number(&self) -> &BudgetAccountNumber {
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

    pub fn budget(&self) -> Money {
        self.fields.read(|f| f.budget)
    }

    pub fn posted(&self) -> Money {
        self.fields.read(|f| f.posted)
    }

    pub fn available(&self) -> Money {
        self.fields.read(|f| f.budget + f.posted)
    }

    pub fn set_budget(&self, budget: Money) -> bool {
        self.fields.set("budget", budget, |f| &mut f.budget)
    }

    pub fn set_posted(&self, posted: Money) -> bool {
        self.fields.set("posted", posted, |f| &mut f.posted)
    }

    pub fn subscribe(&self) -> Subscription<PropertyChanged> {
        self.fields.subscribe()
    }
}

impl core::fmt::Debug for BudgetAccountView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BudgetAccountView")
            .field("number", &self.number)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl Entity for BudgetAccountView {
    type Id = BudgetAccountNumber;

    fn id(&self) -> &Self::Id {
        &self.number
    }
}

impl ContextObject for BudgetAccountView {
    fn describe(&self) -> String {
        format!("budget account {}", self.number)
    }
}

impl Refreshable for BudgetAccountView {
    fn refresh_command(&self) -> Option<Arc<dyn TaskCommand<Self>>> {
        self.refresh.clone()
    }
}
