//! Posting lines: the paged list fetch and posting a new line.

use std::sync::Arc;

use crate::config::{Clock, ConfigurationProvider};
use crate::engine::{
    CommandRuntime, RecordOrigin, TaskCommand, publish_news, reconcile, refresh_all_known,
};
use crate::environment::CommandEnvironment;
use crate::repository::FinancialRepository;
use crate::views::{LedgerView, PostingDraftView, PostingLineView};

/// Fetches the newest page of posting lines. New lines become low-tier news.
pub struct GetPostingLinesCommand {
    runtime: CommandRuntime,
    repository: Arc<dyn FinancialRepository>,
    config: Arc<dyn ConfigurationProvider>,
}

impl GetPostingLinesCommand {
    pub fn new(env: &CommandEnvironment) -> Self {
        Self {
            runtime: CommandRuntime::new("GetPostingLinesCommand", "error loading posting lines", env),
            repository: env.repository.clone(),
            config: env.config.clone(),
        }
    }
}

impl TaskCommand<LedgerView> for GetPostingLinesCommand {
    forward_to_runtime!();

    fn can_execute(&self, _ledger: &LedgerView) -> bool {
        self.config.posting_lines_per_page() > 0
    }

    fn execute(&self, ledger: Arc<LedgerView>) {
        if !self.can_execute(&ledger) {
            return;
        }

        let repository = self.repository.clone();
        let target = ledger.clone();
        let status_date = ledger.status_date();
        let count = self.config.posting_lines_per_page();
        let window = ledger.news_window(self.config.news_window_days());

        self.runtime.spawn(ledger, async move {
            let records = repository
                .posting_lines(target.number(), status_date, count)
                .await?;
            let outcome = reconcile(
                &target.posting_lines,
                records.iter(),
                |record| record.running_number,
                |_, _| {},
                |record| PostingLineView::from_record(record),
            );
            publish_news(&target.news, &outcome.inserted, window, RecordOrigin::BulkRefresh);
            Ok(())
        });
    }
}

/// Posts the line held by a posting draft.
///
/// On success the posted lines are reconciled into the ledger (high-tier news), every
/// known account, budget account, debtor and creditor they reference is refreshed,
/// and the draft is cleared for the next line.
pub struct AddPostingLineCommand {
    runtime: CommandRuntime,
    repository: Arc<dyn FinancialRepository>,
    config: Arc<dyn ConfigurationProvider>,
    clock: Arc<dyn Clock>,
}

impl AddPostingLineCommand {
    pub fn new(env: &CommandEnvironment) -> Self {
        Self {
            runtime: CommandRuntime::new("AddPostingLineCommand", "error posting accounting line", env),
            repository: env.repository.clone(),
            config: env.config.clone(),
            clock: env.clock.clone(),
        }
    }
}

impl TaskCommand<PostingDraftView> for AddPostingLineCommand {
    forward_to_runtime!();

    fn can_execute(&self, draft: &PostingDraftView) -> bool {
        draft
            .validate(self.config.input_format(), self.clock.today())
            .is_ok()
    }

    fn execute(&self, draft: Arc<PostingDraftView>) {
        if !self.can_execute(&draft) {
            tracing::debug!(command = self.runtime.command().name, "posting ignored: draft is not valid");
            return;
        }

        let repository = self.repository.clone();
        let format = self.config.input_format().clone();
        let cutoff = self.clock.today();
        let target = draft.clone();
        let ledger = draft.ledger().clone();
        let window = ledger.news_window(self.config.news_window_days());

        self.runtime.spawn(draft, async move {
            // The draft may have been edited since the readiness check.
            let request = target.validate(&format, cutoff)?;
            let lines = repository.post_line(ledger.number(), &request).await?;

            let outcome = reconcile(
                &ledger.posting_lines,
                lines.iter(),
                |record| record.running_number,
                |_, _| {},
                |record| PostingLineView::from_record(record),
            );
            publish_news(&ledger.news, &outcome.inserted, window, RecordOrigin::UserMutation);

            let refreshed = refresh_all_known(&ledger.accounts, lines.iter().map(|l| l.account.clone()))
                + refresh_all_known(
                    &ledger.budget_accounts,
                    lines.iter().filter_map(|l| l.budget_account.clone()),
                )
                + refresh_all_known(
                    &ledger.debtors,
                    lines.iter().filter_map(|l| l.address_account),
                )
                + refresh_all_known(
                    &ledger.creditors,
                    lines.iter().filter_map(|l| l.address_account),
                );
            tracing::debug!(
                ledger = %ledger.number(),
                posted = lines.len(),
                refreshed,
                "posting applied"
            );

            target.clear();
            Ok(())
        });
    }
}
