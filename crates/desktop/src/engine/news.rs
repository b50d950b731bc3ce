//! News feed derived from newly reconciled records.
//!
//! Only records a reconcile pass *inserted* are offered here; records that matched an
//! existing entry never produce news again. A record yields one entry when its date
//! lies in `[status_date - window_days, status_date]` (calendar days, inclusive).
//!
//! Recency follows how the record arrived:
//!
//! | origin                          | recency  |
//! |---------------------------------|----------|
//! | bulk list refresh               | `Low`    |
//! | direct single-record fetch      | `Medium` |
//! | result of a user mutation       | `High`   |

use std::sync::Arc;

use chrono::{Days, NaiveDate};

use ledgerdesk_core::{AccountNumber, Entity, NewsId, RunningNumber};
use ledgerdesk_events::ObservableCollection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Recency {
    Low,
    Medium,
    High,
}

/// How a record entered the local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOrigin {
    BulkRefresh,
    DirectFetch,
    UserMutation,
}

impl RecordOrigin {
    pub fn recency(self) -> Recency {
        match self {
            RecordOrigin::BulkRefresh => Recency::Low,
            RecordOrigin::DirectFetch => Recency::Medium,
            RecordOrigin::UserMutation => Recency::High,
        }
    }
}

/// Key of the record a news entry was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NewsSubject {
    PostingLine(RunningNumber),
    Account(AccountNumber),
}

/// A record that can be summarized as news.
pub trait NewsSource {
    /// The record's own relevant date.
    fn news_date(&self) -> NaiveDate;
    fn news_subject(&self) -> NewsSubject;
    fn headline(&self) -> String;
}

/// Immutable feed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsEntry {
    id: NewsId,
    subject: NewsSubject,
    recency: Recency,
    timestamp: NaiveDate,
    headline: String,
}

impl NewsEntry {
    pub fn subject(&self) -> &NewsSubject {
        &self.subject
    }

    pub fn recency(&self) -> Recency {
        self.recency
    }

    pub fn timestamp(&self) -> NaiveDate {
        self.timestamp
    }

    pub fn headline(&self) -> &str {
        &self.headline
    }
}

impl Entity for NewsEntry {
    type Id = NewsId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Trailing date window ending at the status date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsWindow {
    status_date: NaiveDate,
    window_days: u32,
}

impl NewsWindow {
    pub fn new(status_date: NaiveDate, window_days: u32) -> Self {
        Self {
            status_date,
            window_days,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let start = self
            .status_date
            .checked_sub_days(Days::new(u64::from(self.window_days)))
            .unwrap_or(NaiveDate::MIN);
        start <= date && date <= self.status_date
    }
}

/// One entry per record inside `window`, in record order.
pub fn derive_news<T: NewsSource>(
    inserted: &[Arc<T>],
    window: NewsWindow,
    origin: RecordOrigin,
) -> Vec<NewsEntry> {
    inserted
        .iter()
        .filter(|record| window.contains(record.news_date()))
        .map(|record| NewsEntry {
            id: NewsId::new(),
            subject: record.news_subject(),
            recency: origin.recency(),
            timestamp: record.news_date(),
            headline: record.headline(),
        })
        .collect()
}

/// Derive news for `inserted` and append it to `feed`. Returns the number added.
pub fn publish_news<T: NewsSource>(
    feed: &ObservableCollection<NewsEntry>,
    inserted: &[Arc<T>],
    window: NewsWindow,
    origin: RecordOrigin,
) -> usize {
    let entries = derive_news(inserted, window, origin);
    let count = entries.len();
    for entry in entries {
        feed.push(Arc::new(entry));
    }
    if count > 0 {
        tracing::debug!(count, recency = ?origin.recency(), "news published");
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Dated(NaiveDate, i32);

    impl NewsSource for Dated {
        fn news_date(&self) -> NaiveDate {
            self.0
        }

        fn news_subject(&self) -> NewsSubject {
            NewsSubject::PostingLine(RunningNumber::new(self.1))
        }

        fn headline(&self) -> String {
            format!("line {}", self.1)
        }
    }

    fn status_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn window_is_inclusive_at_both_ends() {
        let window = NewsWindow::new(status_date(), 30);
        assert!(window.contains(status_date()));
        assert!(window.contains(NaiveDate::from_ymd_opt(2026, 9, 16).unwrap()));
        assert!(!window.contains(NaiveDate::from_ymd_opt(2026, 9, 15).unwrap()));
        assert!(!window.contains(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()));
    }

    #[test]
    fn recency_is_ordered_high_over_low() {
        assert!(Recency::High > Recency::Medium);
        assert!(Recency::Medium > Recency::Low);
        assert_eq!(RecordOrigin::UserMutation.recency(), Recency::High);
    }

    #[test]
    fn entries_carry_the_record_date_and_recency() {
        let records = vec![Arc::new(Dated(status_date(), 1))];
        let news = derive_news(&records, NewsWindow::new(status_date(), 0), RecordOrigin::BulkRefresh);

        assert_eq!(news.len(), 1);
        assert_eq!(news[0].timestamp(), status_date());
        assert_eq!(news[0].recency(), Recency::Low);
        assert_eq!(news[0].subject(), &NewsSubject::PostingLine(RunningNumber::new(1)));
    }

    proptest! {
        #[test]
        fn only_dates_inside_the_window_produce_news(offsets in prop::collection::vec(-60i64..60, 0..30), window_days in 0u32..45) {
            let records: Vec<_> = offsets
                .iter()
                .enumerate()
                .map(|(i, offset)| Arc::new(Dated(status_date() - chrono::Duration::days(*offset), i as i32)))
                .collect();

            let news = derive_news(&records, NewsWindow::new(status_date(), window_days), RecordOrigin::DirectFetch);

            let expected = offsets.iter().filter(|o| **o >= 0 && **o <= i64::from(window_days)).count();
            prop_assert_eq!(news.len(), expected);
        }
    }
}
