//! `ledgerdesk-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the validation error model, keyed identity and money.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{
    AccountNumber, AddressAccountNumber, BudgetAccountNumber, CommandId, GroupNumber,
    LedgerNumber, NewsId, RunningNumber,
};
pub use value_object::Money;
