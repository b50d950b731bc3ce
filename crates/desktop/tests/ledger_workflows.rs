mod common;

use std::sync::Arc;
use std::time::Duration;

use ledgerdesk_core::{AccountNumber, AddressAccountNumber, Money, RunningNumber};
use ledgerdesk_desktop::engine::{CommandEvent, NewsSubject, Recency};
use ledgerdesk_desktop::repository::RepositoryOperation;
use ledgerdesk_desktop::{TaskCommand, ViewModelConfig};

use common::{Fixture, today};

async fn wait<C: ?Sized>(command: &Arc<dyn TaskCommand<C>>) {
    let task = command.execution_task().expect("command was triggered");
    tokio::time::timeout(Duration::from_secs(5), task.wait())
        .await
        .expect("command finished in time");
}

#[tokio::test]
async fn posting_against_a_ledger_without_known_accounts() {
    let fixture = Fixture::new();
    let draft = fixture.draft("1000", "Rent", "500,00", "0,00");
    let add = &fixture.commands.add_posting_line;

    assert!(add.can_execute(&draft));
    add.execute(draft.clone());
    wait(add).await;

    assert!(fixture.handler.is_empty());
    assert_eq!(fixture.ledger.posting_lines.len(), 1);
    let line = &fixture.ledger.posting_lines.snapshot()[0];
    assert_eq!(line.record().debit, Money::new(500, 0));
    assert_eq!(line.date(), today());

    let news = fixture.ledger.news.snapshot();
    assert_eq!(news.len(), 1);
    assert_eq!(news[0].timestamp(), today());
    assert_eq!(news[0].recency(), Recency::High);
    assert_eq!(news[0].subject(), &NewsSubject::PostingLine(RunningNumber::new(1)));

    assert!(fixture.commands.refresh_account.execution_task().is_none());
    assert_eq!(fixture.repository.calls(RepositoryOperation::Account), 0);

    let input = draft.input();
    assert_eq!(input.date, "16-10-2026");
    assert!(input.account.is_empty());
    assert!(input.debit.is_empty());
}

#[tokio::test]
async fn posting_refreshes_each_known_referenced_object_once() {
    let fixture = Fixture::new();
    fixture.commands.load(&fixture.ledger).await;
    let account = fixture
        .ledger
        .accounts
        .find(&AccountNumber::new("1000").unwrap())
        .expect("account loaded");
    assert_eq!(account.balance(), Money::new(2_000, 0));
    let refresh_events = fixture.commands.refresh_account.subscribe();

    let draft = fixture.draft("1000", "Rent", "", "500,00");
    draft.set_budget_account("BU-01");
    draft.set_address_account("10");
    fixture.commands.add_posting_line.execute(draft);
    wait(&fixture.commands.add_posting_line).await;

    wait(&fixture.commands.refresh_account).await;
    wait(&fixture.commands.refresh_budget_account).await;
    wait(&fixture.commands.refresh_address_account).await;

    assert_eq!(fixture.repository.calls(RepositoryOperation::Account), 1);
    assert_eq!(fixture.repository.calls(RepositoryOperation::BudgetAccount), 1);
    assert_eq!(fixture.repository.calls(RepositoryOperation::AddressAccount), 1);
    assert_eq!(fixture.repository.calls(RepositoryOperation::AccountGroups), 1);

    let events = refresh_events.drain();
    assert_eq!(events.len(), 1);
    assert!(events[0].is_finished());

    assert_eq!(account.balance(), Money::new(1_500, 0));
    assert_eq!(account.available(), Money::new(2_500, 0));
    let creditor = fixture
        .ledger
        .creditors
        .find(&AddressAccountNumber::new(10))
        .expect("creditor loaded");
    assert_eq!(creditor.balance(), Money::new(-500, 0));
    assert!(fixture.handler.is_empty());
}

#[tokio::test]
async fn accounts_with_an_unknown_group_are_not_shown() {
    let fixture = Fixture::new();

    fixture.commands.load(&fixture.ledger).await;

    assert_eq!(
        fixture.ledger.accounts.keys(),
        vec![AccountNumber::new("1000").unwrap()]
    );
    assert!(fixture.handler.is_empty());
}

#[tokio::test]
async fn account_lookup_inserts_an_unknown_account_as_news() {
    let fixture = Fixture::new();
    let draft = fixture.draft("1000", "Rent", "500,00", "");
    let lookup = &fixture.commands.account_lookup;

    assert!(lookup.can_execute(&draft));
    lookup.execute(draft.clone());
    wait(lookup).await;

    assert_eq!(draft.account_name().as_deref(), Some("Bank"));
    assert_eq!(fixture.ledger.accounts.len(), 1);
    let news = fixture.ledger.news.snapshot();
    assert_eq!(news.len(), 1);
    assert_eq!(news[0].recency(), Recency::Medium);

    lookup.execute(draft);
    wait(lookup).await;
    assert_eq!(fixture.ledger.news.len(), 1);
}

#[tokio::test]
async fn account_lookup_does_not_name_an_account_the_form_moved_away_from() {
    let fixture = Fixture::new();
    fixture.commands.load(&fixture.ledger).await;
    fixture
        .repository
        .delay(RepositoryOperation::Account, Duration::from_millis(50));
    let draft = fixture.draft("1000", "Rent", "500,00", "");
    let lookup = &fixture.commands.account_lookup;

    lookup.execute(draft.clone());
    draft.set_account("2500");
    wait(lookup).await;

    assert_eq!(draft.input().account, "2500");
    assert_eq!(draft.account_name(), None);
    assert_eq!(fixture.repository.calls(RepositoryOperation::Account), 1);
    assert!(fixture.handler.is_empty());
}

#[tokio::test]
async fn account_lookup_does_not_name_an_account_with_an_unknown_group() {
    let fixture = Fixture::new();
    let draft = fixture.draft("3000", "Rent", "500,00", "");
    let lookup = &fixture.commands.account_lookup;

    lookup.execute(draft.clone());
    wait(lookup).await;

    assert_eq!(draft.input().account, "3000");
    assert_eq!(draft.account_name(), None);
    assert!(fixture.ledger.accounts.is_empty());
    assert!(fixture.ledger.news.is_empty());
    assert_eq!(fixture.ledger.account_groups.len(), 1);
    assert!(fixture.handler.is_empty());
}

#[tokio::test]
async fn posting_line_pages_produce_news_only_for_new_lines_in_the_window() {
    let fixture = Fixture::with_config(
        ViewModelConfig::default()
            .with_posting_lines_per_page(2)
            .with_news_window_days(5),
    );
    for (date, text) in [("01-10-2026", "Old"), ("14-10-2026", "Recent"), ("16-10-2026", "Today")] {
        let draft = fixture.draft("1000", text, "10,00", "");
        draft.set_date(date);
        fixture.commands.add_posting_line.execute(draft);
        wait(&fixture.commands.add_posting_line).await;
    }
    assert_eq!(fixture.ledger.posting_lines.len(), 3);
    assert_eq!(fixture.ledger.news.len(), 2);

    let view = fixture.another_view();
    let page = &fixture.commands.posting_lines;
    let events = page.subscribe();
    page.execute(view.clone());
    wait(page).await;

    assert_eq!(
        view.posting_lines.keys(),
        vec![RunningNumber::new(3), RunningNumber::new(2)]
    );
    let news = view.news.snapshot();
    assert_eq!(news.len(), 2);
    assert!(news.iter().all(|entry| entry.recency() == Recency::Low));
    assert!(matches!(events.drain().as_slice(), [CommandEvent::Finished { .. }]));

    page.execute(view.clone());
    wait(page).await;
    assert_eq!(view.posting_lines.len(), 2);
    assert_eq!(view.news.len(), 2);
}
