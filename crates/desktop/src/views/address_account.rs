//! Debtor and creditor view.

use std::sync::{Arc, Weak};

use chrono::NaiveDate;

use ledgerdesk_accounting::{AddressAccountKind, AddressAccountRecord};
use ledgerdesk_core::{AddressAccountNumber, Entity, Money};
use ledgerdesk_events::{DependencyGraph, ObservableState, PropertyChanged, Subscription};

use crate::engine::{ContextObject, Refreshable, TaskCommand};
use crate::views::LedgerView;

#[derive(Debug)]
struct AddressAccountFields {
    name: String,
    status_date: NaiveDate,
    balance: Money,
}

pub struct AddressAccountView {
    ledger: Weak<LedgerView>,
    number: AddressAccountNumber,
    kind: AddressAccountKind,
    fields: ObservableState<AddressAccountFields>,
    refresh: Option<Arc<dyn TaskCommand<AddressAccountView>>>,
}

impl AddressAccountView {
    pub fn from_record(
        ledger: &Arc<LedgerView>,
        record: &AddressAccountRecord,
        refresh: Option<Arc<dyn TaskCommand<AddressAccountView>>>,
    ) -> Self {
        Self {
            ledger: Arc::downgrade(ledger),
            number: record.number,
            kind: record.kind,
            fields: ObservableState::new(
                "address_account",
                DependencyGraph::EMPTY,
                AddressAccountFields {
                    name: record.name.clone(),
                    status_date: record.status_date,
                    balance: record.balance,
                },
            ),
            refresh,
        }
    }

    pub fn apply(&self, record: &AddressAccountRecord) {
        self.fields.set("name", record.name.clone(), |f| &mut f.name);
        self.fields.set("status_date", record.status_date, |f| &mut f.status_date);
        self.fields.set("balance", record.balance, |f| &mut f.balance);
    }

    pub fn ledger(&self) -> Option<Arc<LedgerView>> {
        self.ledger.upgrade()
    }

    pub fn number(&self) -> AddressAccountNumber {
        self.number
    }

    pub fn kind(&self) -> AddressAccountKind {
        self.kind
    }

    pub fn name(&self) -> String {
        self.fields.read(|f| f.name.clone())
    }

    pub fn status_date(&self) -> NaiveDate {
        self.fields.read(|f| f.status_date)
    }

    pub fn balance(&self) -> Money {
        self.fields.read(|f| f.balance)
    }

    pub fn subscribe(&self) -> Subscription<PropertyChanged> {
        self.fields.subscribe()
    }
}

impl core::fmt::Debug for AddressAccountView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AddressAccountView")
            .field("number", &self.number)
            .field("kind", &self.kind)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl Entity for AddressAccountView {
    type Id = AddressAccountNumber;

    fn id(&self) -> &Self::Id {
        &self.number
    }
}

impl ContextObject for AddressAccountView {
    fn describe(&self) -> String {
        match self.kind {
            AddressAccountKind::Debtor => format!("debtor {}", self.number),
            AddressAccountKind::Creditor => format!("creditor {}", self.number),
        }
    }
}

impl Refreshable for AddressAccountView {
    fn refresh_command(&self) -> Option<Arc<dyn TaskCommand<Self>>> {
        self.refresh.clone()
    }
}
