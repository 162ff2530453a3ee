use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::QuotationError;

/// Indian financial year, 1 April to 31 March.
///
/// Identified by the calendar year it starts in: `FinancialYear(2024)` runs
/// from 2024-04-01 to 2025-03-31 and displays as `2024-25`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FinancialYear(pub i32);

impl FinancialYear {
    /// The financial year a date falls in.
    pub fn containing(date: NaiveDate) -> Self {
        if date.month() >= 4 {
            Self(date.year())
        } else {
            Self(date.year() - 1)
        }
    }

    pub fn start_year(&self) -> i32 {
        self.0
    }

    /// The following financial year, or `None` past `i32::MAX`.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.0, (i64::from(self.0) + 1).rem_euclid(100))
    }
}

/// Which kind of document a sequence numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Quotation,
    Invoice,
}

impl DocumentKind {
    /// Default number prefix.
    pub fn default_prefix(&self) -> &'static str {
        match self {
            Self::Quotation => "QT",
            Self::Invoice => "INV",
        }
    }
}

/// Gapless document number sequence per financial year.
///
/// Generates numbers in the format `{prefix}/{fy}/{sequential}`,
/// e.g. "QT/2024-25/001", "QT/2024-25/002". The counter restarts at 1 when
/// the sequence moves into a new financial year.
#[derive(Debug, Clone)]
pub struct DocumentNumberSequence {
    kind: DocumentKind,
    prefix: String,
    year: FinancialYear,
    next_number: u64,
    zero_pad: usize,
}

impl DocumentNumberSequence {
    /// Create a new sequence starting at 1.
    pub fn new(kind: DocumentKind, year: FinancialYear) -> Self {
        Self::starting_at(kind, year, 1)
    }

    /// Create a sequence continuing from a given number.
    pub fn starting_at(kind: DocumentKind, year: FinancialYear, next_number: u64) -> Self {
        Self {
            kind,
            prefix: kind.default_prefix().to_string(),
            year,
            next_number,
            zero_pad: 3,
        }
    }

    /// Replace the default prefix ("QT" / "INV").
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set zero-padding width (default: 3, so "001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    /// Generate the next document number.
    pub fn next_number(&mut self) -> String {
        let number = self.format(self.next_number);
        self.next_number += 1;
        number
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> String {
        self.format(self.next_number)
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn year(&self) -> FinancialYear {
        self.year
    }

    /// The next counter value that will be issued.
    pub fn next_raw(&self) -> u64 {
        self.next_number
    }

    /// Move to a later financial year, resetting the counter to 1.
    pub fn advance_to(&mut self, year: FinancialYear) -> Result<(), QuotationError> {
        if year <= self.year {
            return Err(QuotationError::Numbering(format!(
                "financial year {year} must be later than current year {}",
                self.year
            )));
        }
        self.year = year;
        self.next_number = 1;
        Ok(())
    }

    /// Advance if `date` falls in a later financial year.
    /// Returns true if the year was advanced.
    pub fn auto_advance(&mut self, date: NaiveDate) -> bool {
        let year = FinancialYear::containing(date);
        if year > self.year {
            self.year = year;
            self.next_number = 1;
            true
        } else {
            false
        }
    }

    fn format(&self, number: u64) -> String {
        format!(
            "{}/{}/{:0>width$}",
            self.prefix,
            self.year,
            number,
            width = self.zero_pad
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn financial_year_boundaries() {
        assert_eq!(FinancialYear::containing(date(2024, 3, 31)), FinancialYear(2023));
        assert_eq!(FinancialYear::containing(date(2024, 4, 1)), FinancialYear(2024));
        assert_eq!(FinancialYear::containing(date(2025, 1, 15)), FinancialYear(2024));
    }

    #[test]
    fn financial_year_display() {
        assert_eq!(FinancialYear(2024).to_string(), "2024-25");
        assert_eq!(FinancialYear(1999).to_string(), "1999-00");
        assert_eq!(FinancialYear(2024).next(), Some(FinancialYear(2025)));
        assert_eq!(FinancialYear(-1).to_string(), "-1-00");
    }

    #[test]
    fn last_representable_year() {
        let last = FinancialYear(i32::MAX);
        assert_eq!(last.next(), None);
        assert_eq!(last.to_string(), "2147483647-48");
    }

    #[test]
    fn sequential_numbering() {
        let mut seq = DocumentNumberSequence::new(DocumentKind::Quotation, FinancialYear(2024));
        assert_eq!(seq.next_number(), "QT/2024-25/001");
        assert_eq!(seq.next_number(), "QT/2024-25/002");
        assert_eq!(seq.next_raw(), 3);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut seq = DocumentNumberSequence::new(DocumentKind::Invoice, FinancialYear(2024));
        assert_eq!(seq.peek(), "INV/2024-25/001");
        assert_eq!(seq.peek(), "INV/2024-25/001");
        assert_eq!(seq.next_number(), "INV/2024-25/001");
        assert_eq!(seq.peek(), "INV/2024-25/002");
    }

    #[test]
    fn custom_prefix_padding_and_start() {
        let mut seq =
            DocumentNumberSequence::starting_at(DocumentKind::Quotation, FinancialYear(2024), 42)
                .with_prefix("EST")
                .with_padding(5);
        assert_eq!(seq.next_number(), "EST/2024-25/00042");
    }

    #[test]
    fn advance_rejects_past_and_current() {
        let mut seq = DocumentNumberSequence::new(DocumentKind::Quotation, FinancialYear(2024));
        assert!(seq.advance_to(FinancialYear(2023)).is_err());
        assert!(seq.advance_to(FinancialYear(2024)).is_err());
        seq.next_number();
        seq.advance_to(FinancialYear(2025)).unwrap();
        assert_eq!(seq.next_number(), "QT/2025-26/001");
    }

    #[test]
    fn auto_advance_on_april_first() {
        let mut seq = DocumentNumberSequence::new(DocumentKind::Invoice, FinancialYear(2024));
        seq.next_number();

        // March still belongs to 2024-25
        assert!(!seq.auto_advance(date(2025, 3, 31)));
        assert_eq!(seq.next_number(), "INV/2024-25/002");

        assert!(seq.auto_advance(date(2025, 4, 1)));
        assert_eq!(seq.next_number(), "INV/2025-26/001");
    }
}
