//! Line-item calculator.
//!
//! Rounding is half away from zero to 2 decimal places, applied once at the
//! end of each formula. Intermediate products are never rounded.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::types::{LineBreakdown, LineItem};

/// Currency minor-unit precision.
const DECIMAL_PLACES: u32 = 2;

/// Round to 2 decimal places, half away from zero (commercial rounding).
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Line amount after discount and tax.
///
/// `round2(quantity * unit_price * (1 - discount/100) * (1 + tax/100))`
///
/// The caller is responsible for keeping `discount_percent` within [0, 100];
/// values outside that range are used as given. A line whose arithmetic
/// leaves the `Decimal` range counts as 0 and logs a warning;
/// [`validate_draft`](crate::core::validate_draft) reports such inputs as
/// errors.
///
/// ```
/// use hisaab::core::compute_line_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(compute_line_amount(2, dec!(200), dec!(10), dec!(18)), dec!(424.80));
/// ```
pub fn compute_line_amount(
    quantity: u32,
    unit_price: Decimal,
    discount_percent: Decimal,
    tax_percent: Decimal,
) -> Decimal {
    line_values(quantity, unit_price, discount_percent, tax_percent).amount
}

/// Per-column values of a line for table display.
///
/// `amount` comes from [`compute_line_amount`], not from adding the rounded
/// columns, so it can differ from `gross - discount + tax` by a paisa.
pub fn line_breakdown(line: &LineItem) -> LineBreakdown {
    line_values(
        line.quantity,
        line.unit_price,
        line.discount_percent,
        line.tax_percent,
    )
}

/// All columns of a line, or zeros if any step overflows.
pub(crate) fn line_values(
    quantity: u32,
    unit_price: Decimal,
    discount_percent: Decimal,
    tax_percent: Decimal,
) -> LineBreakdown {
    match checked_line_values(quantity, unit_price, discount_percent, tax_percent) {
        Some(values) => values,
        None => {
            tracing::warn!(
                quantity,
                %unit_price,
                %discount_percent,
                %tax_percent,
                "line amount out of range, counted as 0"
            );
            LineBreakdown::default()
        }
    }
}

fn checked_line_values(
    quantity: u32,
    unit_price: Decimal,
    discount_percent: Decimal,
    tax_percent: Decimal,
) -> Option<LineBreakdown> {
    let hundred = dec!(100);
    let gross = Decimal::from(quantity).checked_mul(unit_price)?;
    let discount = gross.checked_mul(discount_percent)?.checked_div(hundred)?;
    let taxable =
        gross.checked_mul(Decimal::ONE.checked_sub(discount_percent.checked_div(hundred)?)?)?;
    let tax = taxable.checked_mul(tax_percent)?.checked_div(hundred)?;
    let amount =
        taxable.checked_mul(Decimal::ONE.checked_add(tax_percent.checked_div(hundred)?)?)?;

    Some(LineBreakdown {
        gross: round2(gross),
        discount: round2(discount),
        taxable,
        tax: round2(tax),
        amount: round2(amount),
    })
}
