//! Configuration collaborator.
//!
//! `ViewModelConfig` carries the paging and news settings plus the input format used
//! to read dates and amounts. Commands only see it through `ConfigurationProvider`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ledgerdesk_accounting::InputFormat;

/// Read-only settings consumed by commands.
pub trait ConfigurationProvider: Send + Sync {
    /// Page size of the posting-line list fetch.
    fn posting_lines_per_page(&self) -> usize;

    /// Trailing window (in days, ending at the status date) for news.
    fn news_window_days(&self) -> u32;

    fn input_format(&self) -> &InputFormat;
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// View-model settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewModelConfig {
    pub posting_lines_per_page: usize,
    pub news_window_days: u32,
    pub input_format: InputFormat,
}

impl Default for ViewModelConfig {
    fn default() -> Self {
        Self {
            posting_lines_per_page: 50,
            news_window_days: 30,
            input_format: InputFormat::default(),
        }
    }
}

impl ViewModelConfig {
    pub fn with_posting_lines_per_page(mut self, count: usize) -> Self {
        self.posting_lines_per_page = count;
        self
    }

    pub fn with_news_window_days(mut self, days: u32) -> Self {
        self.news_window_days = days;
        self
    }

    pub fn with_input_format(mut self, format: InputFormat) -> Self {
        self.input_format = format;
        self
    }

    /// Parse a JSON settings document; missing keys keep their defaults.
    ///
    /// A group separator equal to the decimal separator is cleared.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(document)?;
        config.separate_group_from_decimal(None);
        Ok(config)
    }

    /// Defaults overlaid with `LEDGERDESK_*` environment variables.
    ///
    /// Unparsable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = lookup("LEDGERDESK_POSTING_LINES_PER_PAGE") {
            match value.trim().parse() {
                Ok(count) => self.posting_lines_per_page = count,
                Err(e) => tracing::warn!(%value, error = %e, "ignoring LEDGERDESK_POSTING_LINES_PER_PAGE"),
            }
        }
        if let Some(value) = lookup("LEDGERDESK_NEWS_WINDOW_DAYS") {
            match value.trim().parse() {
                Ok(days) => self.news_window_days = days,
                Err(e) => tracing::warn!(%value, error = %e, "ignoring LEDGERDESK_NEWS_WINDOW_DAYS"),
            }
        }
        if let Some(value) = lookup("LEDGERDESK_DATE_FORMAT") {
            self.input_format.date_format = value;
        }
        if let Some(value) = lookup("LEDGERDESK_DECIMAL_SEPARATOR") {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(separator), None) => {
                    let previous = std::mem::replace(&mut self.input_format.decimal_separator, separator);
                    self.separate_group_from_decimal(Some(previous));
                }
                _ => tracing::warn!(%value, "ignoring LEDGERDESK_DECIMAL_SEPARATOR"),
            }
        }
        self
    }

    /// Keep the two separators apart: a clashing group separator takes over
    /// `previous_decimal` when that differs, and is cleared otherwise.
    fn separate_group_from_decimal(&mut self, previous_decimal: Option<char>) {
        let format = &mut self.input_format;
        if format.group_separator != Some(format.decimal_separator) {
            return;
        }
        let replacement = previous_decimal.filter(|c| *c != format.decimal_separator);
        tracing::warn!(
            decimal = %format.decimal_separator,
            group = ?replacement,
            "group separator equals the decimal separator; replacing it"
        );
        format.group_separator = replacement;
    }
}

impl ConfigurationProvider for ViewModelConfig {
    fn posting_lines_per_page(&self) -> usize {
        self.posting_lines_per_page
    }

    fn news_window_days(&self) -> u32 {
        self.news_window_days
    }

    fn input_format(&self) -> &InputFormat {
        &self.input_format
    }
}

/// Source of "today" for the posting cutoff.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
