//! Command execution and reconciliation engine.

pub mod cascade;
pub mod command;
pub mod dependency;
pub mod news;
pub mod reconcile;
pub mod translate;

pub use cascade::{Refreshable, refresh_all_known, refresh_known};
pub use command::{
    CommandEvent, CommandRef, CommandRuntime, ContextObject, ExecutionHandle, ExecutionSignal,
    TaskCommand,
};
pub use dependency::{DependencyCommand, Projection};
pub use news::{
    NewsEntry, NewsSource, NewsSubject, NewsWindow, Recency, RecordOrigin, derive_news,
    publish_news,
};
pub use reconcile::{ReconcileOutcome, reconcile, reconcile_grouped};
pub use translate::{ErrorTranslator, REPOSITORY_UPDATE_FAILED};
