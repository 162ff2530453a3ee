use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::QuotationError;
use super::types::*;
use super::validation;

/// Maximum number of lines a single quotation may carry.
const MAX_LINES: usize = 10_000;

/// Builder for constructing valid quotation drafts.
///
/// ```
/// use hisaab::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let draft = QuotationDraftBuilder::new("QT/2024-25/001", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
///     .customer("Sharma Traders")
///     .add_line(LineItemBuilder::new("Steel rack", 2, dec!(200))
///         .discount(dec!(10))
///         .gst(GstRate::Eighteen)
///         .build())
///     .add_charge(AdditionalCharge::new("Packing", dec!(25)))
///     .round_off(RoundOff::Auto)
///     .build()
///     .unwrap();
///
/// assert_eq!(draft.totals().final_total, dec!(450));
/// ```
pub struct QuotationDraftBuilder {
    number: String,
    date: NaiveDate,
    valid_until: Option<NaiveDate>,
    customer: Option<String>,
    lines: Vec<LineItem>,
    charges: Vec<AdditionalCharge>,
    overall_discount: Option<OverallDiscount>,
    round_off: RoundOff,
    notes: Vec<String>,
}

impl QuotationDraftBuilder {
    pub fn new(number: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            number: number.into(),
            date,
            valid_until: None,
            customer: None,
            lines: Vec::new(),
            charges: Vec::new(),
            overall_discount: None,
            round_off: RoundOff::default(),
            notes: Vec::new(),
        }
    }

    pub fn valid_until(mut self, date: NaiveDate) -> Self {
        self.valid_until = Some(date);
        self
    }

    pub fn customer(mut self, name: impl Into<String>) -> Self {
        self.customer = Some(name.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn add_line(mut self, line: LineItem) -> Self {
        self.lines.push(line);
        self
    }

    pub fn add_charge(mut self, charge: AdditionalCharge) -> Self {
        self.charges.push(charge);
        self
    }

    pub fn overall_discount(mut self, discount: OverallDiscount) -> Self {
        self.overall_discount = Some(discount);
        self
    }

    pub fn round_off(mut self, round_off: RoundOff) -> Self {
        self.round_off = round_off;
        self
    }

    /// Build the draft and run validation.
    ///
    /// Fails if any error-severity finding is reported; warnings are allowed.
    /// All errors are reported, not just the first.
    pub fn build(self) -> Result<QuotationDraft, QuotationError> {
        let draft = self.build_unchecked()?;

        let errors: Vec<String> = validation::validate_draft(&draft)
            .into_iter()
            .filter(|e| e.is_error())
            .map(|e| e.to_string())
            .collect();
        if !errors.is_empty() {
            return Err(QuotationError::Validation(errors.join("; ")));
        }

        Ok(draft)
    }

    /// Build without validation, e.g. when importing stored quotations.
    ///
    /// Only the size limit is enforced.
    pub fn build_unchecked(self) -> Result<QuotationDraft, QuotationError> {
        if self.lines.len() > MAX_LINES {
            return Err(QuotationError::Builder(format!(
                "quotation cannot have more than {MAX_LINES} line items"
            )));
        }

        Ok(QuotationDraft {
            number: self.number,
            date: self.date,
            valid_until: self.valid_until,
            customer: self.customer,
            lines: self.lines,
            charges: self.charges,
            overall_discount: self.overall_discount,
            round_off: self.round_off,
            notes: self.notes,
        })
    }
}

/// Builder for LineItem. Defaults to no discount and 0% tax.
pub struct LineItemBuilder {
    item_id: Option<String>,
    name: String,
    quantity: u32,
    unit_price: Decimal,
    discount_percent: Decimal,
    tax_percent: Decimal,
}

impl LineItemBuilder {
    pub fn new(name: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            item_id: None,
            name: name.into(),
            quantity,
            unit_price,
            discount_percent: Decimal::ZERO,
            tax_percent: Decimal::ZERO,
        }
    }

    pub fn item_id(mut self, id: impl Into<String>) -> Self {
        self.item_id = Some(id.into());
        self
    }

    pub fn discount(mut self, percent: Decimal) -> Self {
        self.discount_percent = percent;
        self
    }

    /// Arbitrary tax percentage.
    pub fn tax(mut self, percent: Decimal) -> Self {
        self.tax_percent = percent;
        self
    }

    /// One of the standard GST slabs.
    pub fn gst(mut self, rate: GstRate) -> Self {
        self.tax_percent = rate.percent();
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            item_id: self.item_id,
            name: self.name,
            quantity: self.quantity,
            unit_price: self.unit_price,
            discount_percent: self.discount_percent,
            tax_percent: self.tax_percent,
        }
    }
}

// Edits return a new draft; the receiver is left untouched.
impl QuotationDraft {
    /// Append a line.
    pub fn with_line(&self, line: LineItem) -> Result<Self, QuotationError> {
        if self.lines.len() >= MAX_LINES {
            return Err(QuotationError::Builder(format!(
                "quotation cannot have more than {MAX_LINES} line items"
            )));
        }
        let mut next = self.clone();
        next.lines.push(line);
        Ok(next)
    }

    /// Replace the line at `index`.
    pub fn with_line_replaced(
        &self,
        index: usize,
        line: LineItem,
    ) -> Result<Self, QuotationError> {
        check_index("line", index, self.lines.len())?;
        let mut next = self.clone();
        next.lines[index] = line;
        Ok(next)
    }

    /// Remove the line at `index`.
    pub fn without_line(&self, index: usize) -> Result<Self, QuotationError> {
        check_index("line", index, self.lines.len())?;
        let mut next = self.clone();
        next.lines.remove(index);
        Ok(next)
    }

    /// Append an additional charge.
    pub fn with_charge(&self, charge: AdditionalCharge) -> Self {
        let mut next = self.clone();
        next.charges.push(charge);
        next
    }

    /// Remove the charge at `index`, keeping the order of the rest.
    pub fn without_charge(&self, index: usize) -> Result<Self, QuotationError> {
        check_index("charge", index, self.charges.len())?;
        let mut next = self.clone();
        next.charges.remove(index);
        Ok(next)
    }

    pub fn with_overall_discount(&self, discount: Option<OverallDiscount>) -> Self {
        Self {
            overall_discount: discount,
            ..self.clone()
        }
    }

    pub fn with_round_off(&self, round_off: RoundOff) -> Self {
        Self {
            round_off,
            ..self.clone()
        }
    }
}

fn check_index(what: &str, index: usize, len: usize) -> Result<(), QuotationError> {
    if index >= len {
        return Err(QuotationError::Builder(format!(
            "{what} index {index} out of range (len {len})"
        )));
    }
    Ok(())
}
