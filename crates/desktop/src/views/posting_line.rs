//! Posted line view. Immutable once created.

use chrono::NaiveDate;

use ledgerdesk_accounting::PostingLineRecord;
use ledgerdesk_core::{Entity, RunningNumber};

use crate::engine::{ContextObject, NewsSource, NewsSubject};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingLineView {
    record: PostingLineRecord,
}

impl PostingLineView {
    pub fn from_record(record: &PostingLineRecord) -> Self {
        Self {
            record: record.clone(),
        }
    }

    pub fn record(&self) -> &PostingLineRecord {
        &self.record
    }

    pub fn running_number(&self) -> RunningNumber {
        self.record.running_number
    }

    pub fn date(&self) -> NaiveDate {
        self.record.date
    }
}

impl Entity for PostingLineView {
    type Id = RunningNumber;

    fn id(&self) -> &Self::Id {
        &self.record.running_number
    }
}

impl ContextObject for PostingLineView {
    fn describe(&self) -> String {
        format!("posting line {}", self.record.running_number)
    }
}

impl NewsSource for PostingLineView {
    fn news_date(&self) -> NaiveDate {
        self.record.date
    }

    fn news_subject(&self) -> NewsSubject {
        NewsSubject::PostingLine(self.record.running_number)
    }

    fn headline(&self) -> String {
        let amount = if self.record.debit.is_zero() {
            -self.record.credit
        } else {
            self.record.debit
        };
        format!("{} {} {}", self.record.account, self.record.text, amount)
    }
}
