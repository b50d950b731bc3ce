//! Locale-explicit parsing of free-text input.
//!
//! Dates and amounts typed into the posting form are parsed with an injected
//! `InputFormat`, never with process-wide locale state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use ledgerdesk_core::{DomainError, DomainResult, Money};

/// Date and number conventions used to read user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFormat {
    /// `chrono` format pattern, e.g. `%d-%m-%Y`.
    pub date_format: String,
    pub decimal_separator: char,
    /// Thousands separator, ignored while parsing.
    pub group_separator: Option<char>,
}

impl Default for InputFormat {
    fn default() -> Self {
        Self {
            date_format: "%d-%m-%Y".to_string(),
            decimal_separator: ',',
            group_separator: Some('.'),
        }
    }
}

impl InputFormat {
    /// ISO dates and a decimal point; handy for fixtures.
    pub fn iso() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
            decimal_separator: '.',
            group_separator: Some(','),
        }
    }

    pub fn parse_date(&self, text: &str) -> DomainResult<NaiveDate> {
        let trimmed = text.trim();
        NaiveDate::parse_from_str(trimmed, &self.date_format)
            .map_err(|_| DomainError::parse("date", trimmed))
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }

    /// Parse an amount with at most two decimals. Empty text is zero.
    ///
    /// A format whose group and decimal separators coincide is ambiguous and rejected.
    pub fn parse_amount(&self, text: &str) -> DomainResult<Money> {
        if self.group_separator == Some(self.decimal_separator) {
            return Err(DomainError::validation(format!(
                "decimal and group separator are both {:?}",
                self.decimal_separator
            )));
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Money::ZERO);
        }
        let fail = || DomainError::parse("amount", trimmed);

        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let cleaned: String = body
            .chars()
            .filter(|c| Some(*c) != self.group_separator)
            .collect();
        let (whole, fraction) = match cleaned.split_once(self.decimal_separator) {
            Some((whole, fraction)) => (whole, fraction),
            None => (cleaned.as_str(), ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(fail());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
            || fraction.len() > 2
        {
            return Err(fail());
        }

        let whole_units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| fail())?
        };
        let hundredths: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| fail())? * 10,
            _ => fraction.parse().map_err(|_| fail())?,
        };

        let minor = whole_units
            .checked_mul(100)
            .and_then(|v| v.checked_add(hundredths))
            .ok_or_else(fail)?;

        Ok(Money::from_minor(if negative { -minor } else { minor }))
    }

    pub fn format_amount(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let abs = amount.minor_units().unsigned_abs();
        format!("{sign}{}{}{:02}", abs / 100, self.decimal_separator, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_amounts_in_the_configured_locale() {
        let format = InputFormat::default();
        assert_eq!(format.parse_amount("500,00").unwrap(), Money::new(500, 0));
        assert_eq!(format.parse_amount("1.234,5").unwrap(), Money::new(1234, 50));
        assert_eq!(format.parse_amount("-3").unwrap(), Money::new(-3, 0));
        assert_eq!(format.parse_amount("  ").unwrap(), Money::ZERO);
    }

    #[test]
    fn rejects_malformed_amounts() {
        let format = InputFormat::default();
        for text in ["abc", "1,234", ",", "12x", "--1"] {
            assert!(
                matches!(format.parse_amount(text), Err(DomainError::Parse { what: "amount", .. })),
                "{text} should not parse"
            );
        }
    }

    #[test]
    fn identical_separators_are_rejected_instead_of_guessed() {
        let format = InputFormat {
            decimal_separator: '.',
            ..InputFormat::default()
        };
        assert!(matches!(format.parse_amount("500.00"), Err(DomainError::Validation(_))));
        assert!(matches!(format.parse_amount(""), Err(DomainError::Validation(_))));
    }

    #[test]
    fn parses_dates_with_the_configured_pattern() {
        let format = InputFormat::default();
        assert_eq!(
            format.parse_date("16-10-2026").unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
        );
        assert!(format.parse_date("2026-10-16").is_err());
        assert!(InputFormat::iso().parse_date("2026-10-16").is_ok());
    }

    proptest! {
        #[test]
        fn formatted_amounts_parse_back(minor in -1_000_000_000i64..1_000_000_000) {
            let format = InputFormat::default();
            let amount = Money::from_minor(minor);
            prop_assert_eq!(format.parse_amount(&format.format_amount(amount)).unwrap(), amount);
        }
    }
}
