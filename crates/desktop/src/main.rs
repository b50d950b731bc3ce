//! Headless demo of the view-model layer against the in-memory repository.

use std::sync::Arc;

use chrono::Local;

use ledgerdesk_accounting::{
    AccountGroupRecord, AccountRecord, AddressAccountKind, AddressAccountRecord,
    BudgetAccountGroupRecord, BudgetAccountRecord, LedgerRecord,
};
use ledgerdesk_core::{
    AccountNumber, AddressAccountNumber, BudgetAccountNumber, GroupNumber, LedgerNumber, Money,
};
use ledgerdesk_desktop::views::{LedgerView, PostingDraftView};
use ledgerdesk_desktop::{
    CollectingExceptionHandler, CommandEnvironment, ConfigurationProvider, InMemoryFinancialRepository,
    LedgerCommands, ViewModelConfig,
};

fn seed(repository: &InMemoryFinancialRepository) -> anyhow::Result<LedgerRecord> {
    let today = Local::now().date_naive();
    let ledger = LedgerRecord {
        number: LedgerNumber::new(1),
        name: "Household".to_string(),
    };
    repository.seed_ledger(ledger.clone());

    for (number, name) in [(1, "Assets"), (2, "Expenses")] {
        repository.seed_account_group(AccountGroupRecord {
            number: GroupNumber::new(number),
            name: name.to_string(),
        });
    }
    repository.seed_budget_account_group(BudgetAccountGroupRecord {
        number: GroupNumber::new(1),
        name: "Housing".to_string(),
    });

    for (number, name, group, credit, balance) in [
        ("1000", "Bank", 1, Money::new(5_000, 0), Money::new(12_500, 0)),
        ("2000", "Rent", 2, Money::ZERO, Money::ZERO),
    ] {
        repository.seed_account(AccountRecord {
            ledger: ledger.number,
            number: AccountNumber::new(number)?,
            name: name.to_string(),
            group: GroupNumber::new(group),
            status_date: today,
            credit,
            balance,
        });
    }
    repository.seed_budget_account(BudgetAccountRecord {
        ledger: ledger.number,
        number: BudgetAccountNumber::new("BU-01")?,
        name: "Rent".to_string(),
        group: GroupNumber::new(1),
        status_date: today,
        budget: Money::new(6_000, 0),
        posted: Money::ZERO,
    });
    for (number, name, kind) in [
        (10, "Landlord", AddressAccountKind::Creditor),
        (20, "Tenant", AddressAccountKind::Debtor),
    ] {
        repository.seed_address_account(AddressAccountRecord {
            ledger: ledger.number,
            number: AddressAccountNumber::new(number),
            name: name.to_string(),
            kind,
            status_date: today,
            balance: Money::ZERO,
        });
    }

    Ok(ledger)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ledgerdesk_observability::init_pretty();

    let repository = Arc::new(InMemoryFinancialRepository::new());
    let record = seed(&repository)?;

    let config = ViewModelConfig::from_env();
    let format = config.input_format().clone();
    let handler = Arc::new(CollectingExceptionHandler::new());
    let env = CommandEnvironment::new(tokio::runtime::Handle::current(), repository.clone())
        .with_config(config)
        .with_exception_handler(handler.clone());
    let commands = LedgerCommands::new(&env);

    let ledger = LedgerView::new(&record, Local::now().date_naive());
    commands.load(&ledger).await;

    let draft = PostingDraftView::new(ledger.clone());
    draft.set_date(format.format_date(ledger.status_date()));
    draft.set_account("2000");
    draft.set_text("Rent");
    draft.set_budget_account("BU-01");
    draft.set_debit(format.format_amount(Money::new(500, 0)));
    draft.set_address_account("10");

    if !commands.add_posting_line.can_execute(&draft) {
        anyhow::bail!("demo posting draft is not valid");
    }
    commands.add_posting_line.execute(draft.clone());
    if let Some(task) = commands.add_posting_line.execution_task() {
        task.wait().await;
    }
    for task in [
        commands.refresh_account.execution_task(),
        commands.refresh_budget_account.execution_task(),
        commands.refresh_address_account.execution_task(),
    ]
    .into_iter()
    .flatten()
    {
        task.wait().await;
    }

    println!("ledger {} ({})", ledger.number(), ledger.name());
    for account in ledger.accounts.snapshot() {
        println!(
            "  account {:<6} {:<10} balance {:>10} available {:>10}",
            account.number(),
            account.name(),
            account.balance(),
            account.available()
        );
    }
    for account in ledger.budget_accounts.snapshot() {
        println!(
            "  budget  {:<6} {:<10} posted  {:>10} available {:>10}",
            account.number(),
            account.name(),
            account.posted(),
            account.available()
        );
    }
    for entry in ledger.news.snapshot() {
        println!("  news    {:?} {} {}", entry.recency(), entry.timestamp(), entry.headline());
    }
    for error in handler.errors() {
        println!("  error   {error}");
    }

    Ok(())
}
