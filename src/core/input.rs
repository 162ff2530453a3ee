//! Conversion of floating-point UI input into engine values.
//!
//! Two policies are offered. The lenient one mirrors the form behavior of
//! treating anything unparseable as 0. The strict one reports
//! [`QuotationError::InvalidInput`] instead. Both bound magnitudes by
//! [`MAX_AMOUNT`] and quantities by `u32::MAX`.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use super::error::QuotationError;
use super::types::LineItem;
use super::validation::MAX_AMOUNT;

/// Convert an `f64` to a `Decimal`, falling back to 0 for NaN, infinities,
/// and magnitudes above [`MAX_AMOUNT`].
pub fn coerce_decimal(value: f64) -> Decimal {
    match Decimal::from_f64(value) {
        Some(d) if d.abs() <= MAX_AMOUNT => d,
        _ => {
            tracing::warn!(value, "non-finite or out-of-range number coerced to 0");
            Decimal::ZERO
        }
    }
}

/// Convert an `f64` to a `Decimal`, rejecting non-finite values and
/// magnitudes above [`MAX_AMOUNT`].
pub fn try_decimal(value: f64, field: &str) -> Result<Decimal, QuotationError> {
    if !value.is_finite() {
        return Err(QuotationError::InvalidInput(format!(
            "{field} must be a finite number, got {value}"
        )));
    }
    match Decimal::from_f64(value) {
        Some(d) if d.abs() <= MAX_AMOUNT => Ok(d),
        _ => Err(QuotationError::InvalidInput(format!(
            "{field} exceeds maximum allowed ({MAX_AMOUNT}), got {value}"
        ))),
    }
}

/// Convert an `f64` to a quantity. Fractions are truncated; NaN, negative
/// values and values above `u32::MAX` become 0.
pub fn coerce_quantity(value: f64) -> u32 {
    if !value.is_finite() || value < 0.0 || value.trunc() > f64::from(u32::MAX) {
        tracing::warn!(value, "invalid quantity coerced to 0");
        return 0;
    }
    value.trunc() as u32
}

/// Convert an `f64` to a quantity, rejecting anything but a whole number in
/// `0..=u32::MAX`.
pub fn try_quantity(value: f64) -> Result<u32, QuotationError> {
    if !value.is_finite() {
        return Err(QuotationError::InvalidInput(format!(
            "quantity must be a finite number, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(QuotationError::InvalidInput(format!(
            "quantity must not be negative, got {value}"
        )));
    }
    if value.fract() != 0.0 {
        return Err(QuotationError::InvalidInput(format!(
            "quantity must be a whole number, got {value}"
        )));
    }
    if value > f64::from(u32::MAX) {
        return Err(QuotationError::InvalidInput(format!(
            "quantity exceeds maximum allowed ({}), got {value}",
            u32::MAX
        )));
    }
    Ok(value as u32)
}

impl LineItem {
    /// Build a line from raw form values, coercing anything invalid to 0.
    ///
    /// Fractional quantities are truncated.
    pub fn from_f64_lossy(
        name: impl Into<String>,
        quantity: f64,
        unit_price: f64,
        discount_percent: f64,
        tax_percent: f64,
    ) -> Self {
        Self {
            item_id: None,
            name: name.into(),
            quantity: coerce_quantity(quantity),
            unit_price: coerce_decimal(unit_price),
            discount_percent: coerce_decimal(discount_percent),
            tax_percent: coerce_decimal(tax_percent),
        }
    }

    /// Build a line from raw form values, rejecting non-finite numbers and
    /// negative or fractional quantities.
    pub fn try_from_f64(
        name: impl Into<String>,
        quantity: f64,
        unit_price: f64,
        discount_percent: f64,
        tax_percent: f64,
    ) -> Result<Self, QuotationError> {
        Ok(Self {
            item_id: None,
            name: name.into(),
            quantity: try_quantity(quantity)?,
            unit_price: try_decimal(unit_price, "unit_price")?,
            discount_percent: try_decimal(discount_percent, "discount_percent")?,
            tax_percent: try_decimal(tax_percent, "tax_percent")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn coerce_finite_values() {
        assert_eq!(coerce_decimal(200.0), dec!(200));
        assert_eq!(coerce_decimal(10.25), dec!(10.25));
        assert_eq!(coerce_decimal(-0.5), dec!(-0.5));
    }

    #[test]
    fn coerce_non_finite_to_zero() {
        assert_eq!(coerce_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(coerce_decimal(f64::INFINITY), Decimal::ZERO);
        assert_eq!(coerce_decimal(f64::NEG_INFINITY), Decimal::ZERO);
        assert_eq!(coerce_decimal(1e300), Decimal::ZERO);
    }

    #[test]
    fn coerce_out_of_range_to_zero() {
        assert_eq!(coerce_decimal(1.0e20), Decimal::ZERO);
        assert_eq!(coerce_decimal(-1.0e13), Decimal::ZERO);
        assert_eq!(coerce_decimal(1.0e12), MAX_AMOUNT);

        assert_eq!(coerce_quantity(4.0e9), 4_000_000_000);
        assert_eq!(coerce_quantity(5.0e9), 0);
        assert_eq!(coerce_quantity(f64::MAX), 0);
    }

    #[test]
    fn strict_rejects_out_of_range() {
        let err = try_decimal(1.0e20, "unit_price").unwrap_err();
        assert!(matches!(err, QuotationError::InvalidInput(_)));
        assert!(err.to_string().contains("maximum"));
        assert_eq!(try_decimal(-1.0e12, "round_off").unwrap(), -MAX_AMOUNT);

        assert!(try_quantity(5.0e9).is_err());
        assert_eq!(try_quantity(4.0e9).unwrap(), 4_000_000_000);
    }

    #[test]
    fn lossy_line_with_huge_values_stays_computable() {
        let line = LineItem::from_f64_lossy("Bulk", 4.0e9, 1.0e20, 0.0, 18.0);
        assert_eq!(line.quantity, 4_000_000_000);
        assert_eq!(line.unit_price, Decimal::ZERO);
        assert_eq!(line.amount(), Decimal::ZERO);

        let line = LineItem::from_f64_lossy("Bulk", 4.0e9, 1.0e12, 1.0e12, 1.0e12);
        assert_eq!(line.amount(), Decimal::ZERO);
    }

    #[test]
    fn strict_rejects_non_finite() {
        let err = try_decimal(f64::NAN, "unit_price").unwrap_err();
        assert!(matches!(err, QuotationError::InvalidInput(_)));
        assert!(err.to_string().contains("unit_price"));
        assert!(try_decimal(f64::INFINITY, "tax_percent").is_err());
    }

    #[test]
    fn lossy_line_coerces_everything() {
        let line = LineItem::from_f64_lossy("Cable", 2.9, f64::NAN, 10.0, 18.0);
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price, Decimal::ZERO);
        assert_eq!(line.discount_percent, dec!(10));
        assert_eq!(line.tax_percent, dec!(18));
        assert_eq!(line.amount(), Decimal::ZERO);

        let negative = LineItem::from_f64_lossy("Cable", -3.0, 5.0, 0.0, 0.0);
        assert_eq!(negative.quantity, 0);
    }

    #[test]
    fn strict_line() {
        let line = LineItem::try_from_f64("Cable", 2.0, 200.0, 10.0, 18.0).unwrap();
        assert_eq!(line.amount(), dec!(424.80));

        assert!(LineItem::try_from_f64("Cable", 1.5, 200.0, 0.0, 0.0).is_err());
        assert!(LineItem::try_from_f64("Cable", -1.0, 200.0, 0.0, 0.0).is_err());
        assert!(LineItem::try_from_f64("Cable", 1.0, f64::NAN, 0.0, 0.0).is_err());
    }
}
