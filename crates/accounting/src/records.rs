//! Immutable snapshots returned by the financial repository.
//!
//! A record is keyed the same way as the local view it reconciles into. Records are
//! never mutated after they are fetched; views copy their fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use ledgerdesk_core::{
    AccountNumber, AddressAccountNumber, BudgetAccountNumber, GroupNumber, LedgerNumber, Money,
    RunningNumber,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub number: LedgerNumber,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountGroupRecord {
    pub number: GroupNumber,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetAccountGroupRecord {
    pub number: GroupNumber,
    pub name: String,
}

/// Account as of a status date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub ledger: LedgerNumber,
    pub number: AccountNumber,
    pub name: String,
    /// Account group; must be known locally for the record to be shown.
    pub group: GroupNumber,
    pub status_date: NaiveDate,
    pub credit: Money,
    pub balance: Money,
}

/// Budget account as of a status date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetAccountRecord {
    pub ledger: LedgerNumber,
    pub number: BudgetAccountNumber,
    pub name: String,
    pub group: GroupNumber,
    pub status_date: NaiveDate,
    pub budget: Money,
    pub posted: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressAccountKind {
    Debtor,
    Creditor,
}

/// Debtor or creditor balance as of a status date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressAccountRecord {
    pub ledger: LedgerNumber,
    pub number: AddressAccountNumber,
    pub name: String,
    pub kind: AddressAccountKind,
    pub status_date: NaiveDate,
    pub balance: Money,
}

/// One posted debit/credit entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingLineRecord {
    pub ledger: LedgerNumber,
    pub running_number: RunningNumber,
    pub date: NaiveDate,
    pub voucher: Option<String>,
    pub account: AccountNumber,
    pub text: String,
    pub budget_account: Option<BudgetAccountNumber>,
    pub debit: Money,
    pub credit: Money,
    pub address_account: Option<AddressAccountNumber>,
}
