use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::ValidationError;
use super::totals::compute_totals;
use super::types::*;

/// Upper bound for any single amount (prices, charges, adjustments).
/// Keeps every intermediate product well inside the `Decimal` range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// Validate a quotation draft.
/// Returns all findings (errors and warnings), not just the first.
pub fn validate_draft(draft: &QuotationDraft) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if draft.number.trim().is_empty() {
        errors.push(ValidationError::error(
            "number",
            "quotation number must not be empty",
        ));
    }

    if let Some(valid_until) = draft.valid_until {
        if valid_until < draft.date {
            errors.push(ValidationError::error(
                "valid_until",
                format!(
                    "validity date {valid_until} is before quotation date {}",
                    draft.date
                ),
            ));
        }
    }

    if draft.lines.is_empty() {
        errors.push(ValidationError::warning(
            "lines",
            "quotation has no line items",
        ));
    }

    for (i, line) in draft.lines.iter().enumerate() {
        validate_line(line, i, &mut errors);
    }

    for (i, charge) in draft.charges.iter().enumerate() {
        validate_charge(charge, i, &mut errors);
    }

    if let Some(discount) = &draft.overall_discount {
        validate_overall_discount(discount, draft, &mut errors);
    }

    if let RoundOff::Manual(amount) = draft.round_off {
        if amount.abs() > MAX_AMOUNT {
            errors.push(ValidationError::error(
                "round_off",
                format!("manual round-off exceeds maximum allowed ({MAX_AMOUNT})"),
            ));
        } else if amount.abs() >= Decimal::ONE {
            errors.push(ValidationError::warning(
                "round_off",
                format!("manual round-off {amount} is one rupee or more"),
            ));
        }
    }

    errors
}

fn validate_line(line: &LineItem, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("lines[{index}]");

    if line.quantity == 0 {
        errors.push(ValidationError::warning(
            format!("{prefix}.quantity"),
            "quantity is zero",
        ));
    }

    if line.unit_price < Decimal::ZERO {
        errors.push(ValidationError::error(
            format!("{prefix}.unit_price"),
            "unit price must not be negative",
        ));
    } else if line.unit_price > MAX_AMOUNT {
        errors.push(ValidationError::error(
            format!("{prefix}.unit_price"),
            format!("unit price exceeds maximum allowed ({MAX_AMOUNT})"),
        ));
    }

    if line.discount_percent < Decimal::ZERO || line.discount_percent > dec!(100) {
        errors.push(ValidationError::error(
            format!("{prefix}.discount_percent"),
            format!(
                "discount must be between 0 and 100, got {}",
                line.discount_percent
            ),
        ));
    }

    if line.tax_percent < Decimal::ZERO {
        errors.push(ValidationError::error(
            format!("{prefix}.tax_percent"),
            "tax rate must not be negative",
        ));
    } else if line.tax_percent > dec!(100) {
        errors.push(ValidationError::error(
            format!("{prefix}.tax_percent"),
            format!("tax rate must not exceed 100, got {}", line.tax_percent),
        ));
    } else if !GstRate::is_standard_slab(line.tax_percent) {
        errors.push(ValidationError::warning(
            format!("{prefix}.tax_percent"),
            format!("{}% is not a standard GST slab", line.tax_percent),
        ));
    }
}

fn validate_charge(charge: &AdditionalCharge, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("charges[{index}]");

    if charge.name.trim().is_empty() {
        errors.push(ValidationError::error(
            format!("{prefix}.name"),
            "charge name must not be empty",
        ));
    }

    if charge.amount <= Decimal::ZERO {
        errors.push(ValidationError::error(
            format!("{prefix}.amount"),
            format!("charge amount must be positive, got {}", charge.amount),
        ));
    } else if charge.amount > MAX_AMOUNT {
        errors.push(ValidationError::error(
            format!("{prefix}.amount"),
            format!("charge amount exceeds maximum allowed ({MAX_AMOUNT})"),
        ));
    }
}

fn validate_overall_discount(
    discount: &OverallDiscount,
    draft: &QuotationDraft,
    errors: &mut Vec<ValidationError>,
) {
    let value = discount.value();
    if value < Decimal::ZERO {
        errors.push(ValidationError::error(
            "overall_discount",
            "overall discount must not be negative",
        ));
        return;
    }

    match discount {
        OverallDiscount::Percentage(p) if *p > dec!(100) => {
            errors.push(ValidationError::error(
                "overall_discount",
                format!("overall discount percentage must not exceed 100, got {p}"),
            ));
            return;
        }
        OverallDiscount::Amount(a) if *a > MAX_AMOUNT => {
            errors.push(ValidationError::error(
                "overall_discount",
                format!("overall discount exceeds maximum allowed ({MAX_AMOUNT})"),
            ));
            return;
        }
        _ => {}
    }

    // Totals are only meaningful once lines and charges are in range.
    if errors.iter().any(ValidationError::is_error) {
        return;
    }
    let subtotal = draft.totals().subtotal;
    let amount = discount.amount_on(subtotal);
    if amount > subtotal {
        errors.push(ValidationError::warning(
            "overall_discount",
            format!("overall discount {amount} exceeds subtotal {subtotal}"),
        ));
    }
}

/// Check a totals record against the draft it claims to describe.
///
/// Used when totals come from outside (a stored payload, a client) rather
/// than from [`QuotationDraft::totals`].
pub fn validate_totals(draft: &QuotationDraft, totals: &QuotationTotals) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let expected = compute_totals(
        &draft.lines,
        draft.overall_discount.as_ref(),
        &draft.charges,
        draft.round_off,
    );

    let checks = [
        ("totals.subtotal", totals.subtotal, expected.subtotal),
        (
            "totals.line_discount_total",
            totals.line_discount_total,
            expected.line_discount_total,
        ),
        (
            "totals.line_tax_total",
            totals.line_tax_total,
            expected.line_tax_total,
        ),
        (
            "totals.overall_discount_amount",
            totals.overall_discount_amount,
            expected.overall_discount_amount,
        ),
        (
            "totals.additional_charges_total",
            totals.additional_charges_total,
            expected.additional_charges_total,
        ),
        (
            "totals.total_before_round_off",
            totals.total_before_round_off,
            expected.total_before_round_off,
        ),
    ];
    for (field, actual, expected) in checks {
        if actual != expected {
            errors.push(ValidationError::error(
                field,
                format!("{actual} does not match calculated {expected}"),
            ));
        }
    }

    let rounded = totals
        .total_before_round_off
        .checked_add(totals.round_off_amount);
    if rounded != Some(totals.final_total) {
        errors.push(ValidationError::error(
            "totals.final_total",
            format!(
                "final total {} does not match {} + round-off {}",
                totals.final_total, totals.total_before_round_off, totals.round_off_amount
            ),
        ));
    }

    if draft.round_off.is_auto() && !totals.final_total.fract().is_zero() {
        errors.push(ValidationError::error(
            "totals.final_total",
            format!(
                "auto round-off requires a whole-rupee total, got {}",
                totals.final_total
            ),
        ));
    }

    errors
}
