mod common;

use std::time::Duration;

use ledgerdesk_desktop::engine::{CommandEvent, REPOSITORY_UPDATE_FAILED};
use ledgerdesk_desktop::repository::{RepositoryOperation, ScriptedFailure};
use ledgerdesk_desktop::views::PostingDraftView;
use ledgerdesk_desktop::{ReasonContext, TaskCommand};

use common::Fixture;

async fn run_posting(fixture: &Fixture, account: &str) -> (std::sync::Arc<PostingDraftView>, Vec<CommandEvent>) {
    let add = &fixture.commands.add_posting_line;
    let events = add.subscribe();
    let draft = fixture.draft(account, "Rent", "500,00", "");
    add.execute(draft.clone());
    let task = add.execution_task().expect("posting triggered");
    tokio::time::timeout(Duration::from_secs(5), task.wait())
        .await
        .expect("posting finished");
    (draft, events.drain())
}

#[tokio::test]
async fn rejected_posting_is_reported_against_the_draft() {
    let fixture = Fixture::new();

    let (draft, events) = run_posting(&fixture, "9999").await;

    let errors = fixture.handler.errors();
    assert_eq!(errors.len(), 1);
    let error = errors[0].as_command_error().expect("command error");
    assert_eq!(error.message, "error posting accounting line");
    assert_eq!(error.reason, "account 9999 does not exist");
    assert_eq!(error.context.name, "AddPostingLineCommand");
    match &error.reason_context {
        ReasonContext::Target(target) => assert!(target.is(&draft)),
        other => panic!("unexpected reason context {other:?}"),
    }

    assert!(matches!(
        events.as_slice(),
        [CommandEvent::Error { .. }, CommandEvent::Finished { .. }]
    ));
    assert!(fixture.ledger.posting_lines.is_empty());
    assert_eq!(draft.input().account, "9999");
}

#[tokio::test]
async fn repository_failure_names_the_repository() {
    let fixture = Fixture::new();
    fixture.repository.fail(
        RepositoryOperation::PostLine,
        ScriptedFailure::Repository("disk full".to_string()),
    );

    let (_draft, events) = run_posting(&fixture, "1000").await;

    let errors = fixture.handler.errors();
    assert_eq!(errors.len(), 1);
    let error = errors[0].as_command_error().expect("command error");
    assert_eq!(error.reason, REPOSITORY_UPDATE_FAILED);
    assert!(matches!(
        error.reason_context,
        ReasonContext::Repository("in-memory financial repository")
    ));
    assert_eq!(events.len(), 2);
    assert!(events[1].is_finished());
}

#[tokio::test]
async fn unexpected_failure_becomes_a_system_error() {
    let fixture = Fixture::new();
    fixture.repository.fail(
        RepositoryOperation::Accounts,
        ScriptedFailure::Unexpected("boom".to_string()),
    );
    let accounts = &fixture.commands.accounts;

    accounts.execute(fixture.ledger.clone());
    let task = accounts.execution_task().expect("accounts triggered");
    tokio::time::timeout(Duration::from_secs(5), task.wait())
        .await
        .expect("handle resolves after a failure");

    let errors = fixture.handler.errors();
    assert_eq!(errors.len(), 1);
    let error = errors[0].as_system_error().expect("system error");
    assert!(error.message.contains("GetAccountsCommand"));
    assert!(error.message.contains("boom"));
    assert_eq!(errors[0].command().name, "GetAccountsCommand");
    assert!(fixture.ledger.accounts.is_empty());
    assert_eq!(fixture.ledger.account_groups.len(), 1);
}
