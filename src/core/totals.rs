//! Document aggregator.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::calc::line_values;
use super::types::*;

/// Compute the totals of a quotation.
///
/// Order of evaluation: subtotal, line discounts, line taxes, overall
/// discount (against `subtotal`, not the line-discounted subtotal), charges,
/// total before round-off, final total.
///
/// With [`RoundOff::Auto`] the final total is the nearest whole rupee (ties
/// round up) and `round_off_amount` is the derived difference. With
/// [`RoundOff::Manual`] the entered amount is added as-is. Negative totals
/// are not clamped.
///
/// Never panics. Lines that overflow count as 0 (see
/// [`compute_line_amount`](crate::core::compute_line_amount)); if the
/// document sums themselves leave the `Decimal` range, all totals are 0 and
/// a warning is logged. Inputs that can get there fail
/// [`validate_draft`](crate::core::validate_draft).
pub fn compute_totals(
    lines: &[LineItem],
    overall_discount: Option<&OverallDiscount>,
    charges: &[AdditionalCharge],
    round_off: RoundOff,
) -> QuotationTotals {
    match checked_totals(lines, overall_discount, charges, round_off) {
        Some(totals) => {
            tracing::debug!(
                lines = lines.len(),
                charges = charges.len(),
                subtotal = %totals.subtotal,
                line_tax_total = %totals.line_tax_total,
                total_before_round_off = %totals.total_before_round_off,
                final_total = %totals.final_total,
                "computed quotation totals"
            );
            totals
        }
        None => {
            tracing::warn!(
                lines = lines.len(),
                charges = charges.len(),
                "quotation totals out of range, reported as 0"
            );
            QuotationTotals::default()
        }
    }
}

fn checked_totals(
    lines: &[LineItem],
    overall_discount: Option<&OverallDiscount>,
    charges: &[AdditionalCharge],
    round_off: RoundOff,
) -> Option<QuotationTotals> {
    let mut subtotal = Decimal::ZERO;
    let mut line_discount_total = Decimal::ZERO;
    let mut line_tax_total = Decimal::ZERO;

    for line in lines {
        let values = line_values(
            line.quantity,
            line.unit_price,
            line.discount_percent,
            line.tax_percent,
        );
        subtotal = subtotal.checked_add(values.gross)?;
        line_discount_total = line_discount_total.checked_add(values.discount)?;
        line_tax_total = line_tax_total.checked_add(values.tax)?;
    }

    let overall_discount_amount = match overall_discount {
        Some(d) => d.checked_amount_on(subtotal)?,
        None => Decimal::ZERO,
    };

    let mut additional_charges_total = Decimal::ZERO;
    for charge in charges {
        additional_charges_total = additional_charges_total.checked_add(charge.amount)?;
    }

    let total_before_round_off = subtotal
        .checked_sub(line_discount_total)?
        .checked_sub(overall_discount_amount)?
        .checked_add(line_tax_total)?
        .checked_add(additional_charges_total)?;

    let (round_off_amount, final_total) = match round_off {
        RoundOff::Auto => {
            let rounded = round_half_up_to_integer(total_before_round_off)?;
            (rounded.checked_sub(total_before_round_off)?, rounded)
        }
        RoundOff::Manual(amount) => (amount, total_before_round_off.checked_add(amount)?),
    };

    Some(QuotationTotals {
        subtotal,
        line_discount_total,
        line_tax_total,
        overall_discount_amount,
        additional_charges_total,
        total_before_round_off,
        round_off_amount,
        final_total,
    })
}

/// Nearest integer, ties toward positive infinity.
fn round_half_up_to_integer(value: Decimal) -> Option<Decimal> {
    value.checked_add(dec!(0.5)).map(|v| v.floor())
}

impl QuotationDraft {
    /// Totals of this draft. Recomputed on every call.
    pub fn totals(&self) -> QuotationTotals {
        compute_totals(
            &self.lines,
            self.overall_discount.as_ref(),
            &self.charges,
            self.round_off,
        )
    }
}

impl QuotationTotals {
    /// Split the undivided GST total into equal CGST and SGST halves.
    ///
    /// The halves are not rounded, so `cgst + sgst == line_tax_total` always
    /// holds. Round them for display only.
    pub fn tax_split(&self) -> TaxSplit {
        let half = self.line_tax_total / dec!(2);
        TaxSplit {
            cgst: half,
            sgst: half,
        }
    }

    /// Line discounts plus the overall discount.
    pub fn total_discount(&self) -> Decimal {
        self.line_discount_total.saturating_add(self.overall_discount_amount)
    }
}
