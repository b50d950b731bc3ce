//! `ledgerdesk-desktop`
//!
//! **Responsibility:** the view-model layer of the desktop accounting client.
//!
//! This crate provides:
//! - Observable views (ledger, accounts, budget accounts, debtors/creditors, posting
//!   lines, groups, the posting draft) bound by the UI
//! - Task-backed commands that fetch from the financial repository without blocking
//!   the caller, optionally after a prerequisite command
//! - Reconciliation of fetched records into the views, a derived news feed, cascading
//!   refreshes after postings, and translation of failures for the UI
//!
//! The UI toolkit, the repository transport and DI wiring live elsewhere; this crate
//! only consumes them through the traits in `repository`, `handler` and `config`.

pub mod commands;
pub mod config;
pub mod engine;
pub mod environment;
pub mod error;
pub mod handler;
pub mod repository;
pub mod views;

pub use config::{Clock, ConfigurationProvider, FixedClock, SystemClock, ViewModelConfig};
pub use engine::{CommandEvent, CommandRef, ContextObject, ExecutionHandle, TaskCommand};
pub use environment::{CommandEnvironment, LedgerCommands};
pub use error::{CommandError, DataSourceError, ReasonContext, SystemError, ViewModelError};
pub use handler::{CollectingExceptionHandler, ExceptionHandler, TracingExceptionHandler};
pub use repository::{FinancialRepository, InMemoryFinancialRepository};
