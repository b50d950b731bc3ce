//! Posting input rules.
//!
//! A `PostingInput` holds the raw text of the posting form. `validate` turns it into a
//! `PostingRequest` or explains, with a `DomainError`, why the line cannot be posted.
//! The same check backs the posting command's readiness predicate, so it must stay
//! pure: no IO, no clock reads (the cutoff date is passed in).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use ledgerdesk_core::{
    AccountNumber, AddressAccountNumber, BudgetAccountNumber, DomainError, DomainResult, Money,
};

use crate::format::InputFormat;

/// Free-text posting form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingInput {
    pub date: String,
    pub voucher: String,
    pub account: String,
    pub text: String,
    pub budget_account: String,
    pub debit: String,
    pub credit: String,
    pub address_account: String,
}

/// A validated posting, ready for the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingRequest {
    pub date: NaiveDate,
    pub voucher: Option<String>,
    pub account: AccountNumber,
    pub text: String,
    pub budget_account: Option<BudgetAccountNumber>,
    pub debit: Money,
    pub credit: Money,
    pub address_account: Option<AddressAccountNumber>,
}

fn optional(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

impl PostingInput {
    /// Validate the form against `format`, rejecting dates after `cutoff`.
    pub fn validate(&self, format: &InputFormat, cutoff: NaiveDate) -> DomainResult<PostingRequest> {
        let date = format.parse_date(&self.date)?;
        if date > cutoff {
            return Err(DomainError::validation(format!(
                "posting date {date} is after {cutoff}"
            )));
        }

        let account = AccountNumber::new(&self.account)
            .map_err(|_| DomainError::validation("account number is required"))?;

        let text = self.text.trim();
        if text.is_empty() {
            return Err(DomainError::validation("posting text is required"));
        }

        let debit = format.parse_amount(&self.debit)?;
        let credit = format.parse_amount(&self.credit)?;
        if debit.is_negative() || credit.is_negative() {
            return Err(DomainError::validation("debit and credit must not be negative"));
        }
        if debit.is_zero() == credit.is_zero() {
            return Err(DomainError::validation(
                "exactly one of debit or credit must be set",
            ));
        }

        let budget_account = optional(&self.budget_account)
            .map(BudgetAccountNumber::new)
            .transpose()?;
        let address_account = optional(&self.address_account)
            .map(str::parse::<AddressAccountNumber>)
            .transpose()?;

        Ok(PostingRequest {
            date,
            voucher: optional(&self.voucher).map(str::to_string),
            account,
            text: text.to_string(),
            budget_account,
            debit,
            credit,
            address_account,
        })
    }
}
