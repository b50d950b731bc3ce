//! Accounting module (records, input parsing, posting rules).
//!
//! Pure domain logic only: no IO, no async, no notification concerns.

pub mod format;
pub mod posting;
pub mod records;

pub use format::InputFormat;
pub use posting::{PostingInput, PostingRequest};
pub use records::{
    AccountGroupRecord, AccountRecord, AddressAccountKind, AddressAccountRecord,
    BudgetAccountGroupRecord, BudgetAccountRecord, LedgerRecord, PostingLineRecord,
};
