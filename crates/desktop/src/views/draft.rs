//! Posting draft: the free-text posting form bound to a ledger.

use std::sync::Arc;

use chrono::NaiveDate;

use ledgerdesk_accounting::{InputFormat, PostingInput, PostingRequest};
use ledgerdesk_core::DomainResult;
use ledgerdesk_events::{DependencyGraph, ObservableState, PropertyChanged, Subscription};

use crate::engine::ContextObject;
use crate::views::LedgerView;

#[derive(Debug, Default)]
struct DraftFields {
    input: PostingInput,
    account_name: Option<String>,
}

/// Unvalidated posting inputs.
///
/// The posting command checks them with [`PostingDraftView::validate`] both in its
/// readiness predicate and again inside its body.
#[derive(Debug)]
pub struct PostingDraftView {
    ledger: Arc<LedgerView>,
    fields: ObservableState<DraftFields>,
}

impl PostingDraftView {
    pub fn new(ledger: Arc<LedgerView>) -> Arc<Self> {
        Arc::new(Self {
            ledger,
            fields: ObservableState::new("posting_draft", DependencyGraph::EMPTY, DraftFields::default()),
        })
    }

    pub fn ledger(&self) -> &Arc<LedgerView> {
        &self.ledger
    }

    pub fn input(&self) -> PostingInput {
        self.fields.read(|f| f.input.clone())
    }

    /// Name of the account typed into the form, once looked up.
    pub fn account_name(&self) -> Option<String> {
        self.fields.read(|f| f.account_name.clone())
    }

    pub fn set_date(&self, value: impl Into<String>) -> bool {
        self.fields.set("date", value.into(), |f| &mut f.input.date)
    }

    pub fn set_voucher(&self, value: impl Into<String>) -> bool {
        self.fields.set("voucher", value.into(), |f| &mut f.input.voucher)
    }

    pub fn set_account(&self, value: impl Into<String>) -> bool {
        let changed = self.fields.set("account", value.into(), |f| &mut f.input.account);
        if changed {
            self.set_account_name(None);
        }
        changed
    }

    pub fn set_text(&self, value: impl Into<String>) -> bool {
        self.fields.set("text", value.into(), |f| &mut f.input.text)
    }

    pub fn set_budget_account(&self, value: impl Into<String>) -> bool {
        self.fields.set("budget_account", value.into(), |f| &mut f.input.budget_account)
    }

    pub fn set_debit(&self, value: impl Into<String>) -> bool {
        self.fields.set("debit", value.into(), |f| &mut f.input.debit)
    }

    pub fn set_credit(&self, value: impl Into<String>) -> bool {
        self.fields.set("credit", value.into(), |f| &mut f.input.credit)
    }

    pub fn set_address_account(&self, value: impl Into<String>) -> bool {
        self.fields.set("address_account", value.into(), |f| &mut f.input.address_account)
    }

    pub fn set_account_name(&self, name: Option<String>) -> bool {
        self.fields.set("account_name", name, |f| &mut f.account_name)
    }

    pub fn validate(&self, format: &InputFormat, cutoff: NaiveDate) -> DomainResult<PostingRequest> {
        self.fields.read(|f| f.input.validate(format, cutoff))
    }

    /// Reset every input except the date, ready for the next line.
    pub fn clear(&self) {
        self.set_voucher("");
        self.set_account("");
        self.set_text("");
        self.set_budget_account("");
        self.set_debit("");
        self.set_credit("");
        self.set_address_account("");
    }

    pub fn subscribe(&self) -> Subscription<PropertyChanged> {
        self.fields.subscribe()
    }
}

impl ContextObject for PostingDraftView {
    fn describe(&self) -> String {
        format!("posting draft for ledger {}", self.ledger.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerdesk_accounting::LedgerRecord;
    use ledgerdesk_core::LedgerNumber;

    fn draft() -> Arc<PostingDraftView> {
        let ledger = LedgerView::new(
            &LedgerRecord {
                number: LedgerNumber::new(1),
                name: "Household".to_string(),
            },
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        );
        PostingDraftView::new(ledger)
    }

    #[test]
    fn clear_keeps_the_date() {
        let draft = draft();
        draft.set_date("16-10-2026");
        draft.set_account("1000");
        draft.set_text("Rent");
        draft.set_debit("500,00");

        draft.clear();

        let input = draft.input();
        assert_eq!(input.date, "16-10-2026");
        assert!(input.account.is_empty());
        assert!(input.debit.is_empty());
    }

    #[test]
    fn changing_the_account_forgets_its_looked_up_name() {
        let draft = draft();
        draft.set_account("1000");
        draft.set_account_name(Some("Bank".to_string()));
        let subscription = draft.subscribe();

        draft.set_account("1010");

        assert_eq!(draft.account_name(), None);
        let names: Vec<_> = subscription.drain().into_iter().map(|c| c.property).collect();
        assert_eq!(names, vec!["account", "account_name"]);
    }

    #[test]
    fn validation_uses_the_given_format() {
        let draft = draft();
        draft.set_date("2026-10-16");
        draft.set_account("1000");
        draft.set_text("Rent");
        draft.set_debit("500.00");

        let cutoff = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert!(draft.validate(&InputFormat::default(), cutoff).is_err());
        assert!(draft.validate(&InputFormat::iso(), cutoff).is_ok());
    }
}
