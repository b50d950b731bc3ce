//! Account-group and budget-account-group lookups.

use ledgerdesk_core::{Entity, GroupNumber};
use ledgerdesk_events::{DependencyGraph, ObservableState, PropertyChanged, Subscription};

use crate::engine::ContextObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Account,
    BudgetAccount,
}

/// A classification bucket referenced by leaf accounts through its number.
#[derive(Debug)]
pub struct GroupView {
    kind: GroupKind,
    number: GroupNumber,
    name: ObservableState<String>,
}

pub type AccountGroupView = GroupView;
pub type BudgetAccountGroupView = GroupView;

impl GroupView {
    pub fn new(kind: GroupKind, number: GroupNumber, name: impl Into<String>) -> Self {
        Self {
            kind,
            number,
            name: ObservableState::new("group", DependencyGraph::EMPTY, name.into()),
        }
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn number(&self) -> GroupNumber {
        self.number
    }

    pub fn name(&self) -> String {
        self.name.read(Clone::clone)
    }

    pub fn set_name(&self, name: impl Into<String>) -> bool {
        self.name.set("name", name.into(), |n| n)
    }

    pub fn subscribe(&self) -> Subscription<PropertyChanged> {
        self.name.subscribe()
    }
}

impl Entity for GroupView {
    type Id = GroupNumber;

    fn id(&self) -> &Self::Id {
        &self.number
    }
}

impl ContextObject for GroupView {
    fn describe(&self) -> String {
        match self.kind {
            GroupKind::Account => format!("account group {}", self.number),
            GroupKind::BudgetAccount => format!("budget account group {}", self.number),
        }
    }
}
