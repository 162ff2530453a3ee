use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::calc;

/// One row of a quotation: a product or service with quantity, price,
/// discount, and tax.
///
/// The line amount is never stored; [`LineItem::amount`] derives it from the
/// four pricing inputs every time it is asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Backend item identifier, if the line was picked from inventory.
    pub item_id: Option<String>,
    /// Item name as shown on the quotation.
    pub name: String,
    /// Units quoted.
    pub quantity: u32,
    /// Price per unit before discount and tax.
    pub unit_price: Decimal,
    /// Line discount percentage. Expected in [0, 100]; not clamped here.
    pub discount_percent: Decimal,
    /// GST percentage applied to the discounted amount.
    pub tax_percent: Decimal,
}

impl LineItem {
    /// Line amount after discount and tax, rounded once to 2 dp.
    pub fn amount(&self) -> Decimal {
        calc::compute_line_amount(
            self.quantity,
            self.unit_price,
            self.discount_percent,
            self.tax_percent,
        )
    }
}

/// Standard GST slabs offered by the item and quotation forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GstRate {
    /// 0%: exempt or nil rated.
    Exempt,
    /// 5%
    Five,
    /// 12%
    Twelve,
    /// 18%
    Eighteen,
    /// 28%
    TwentyEight,
}

impl GstRate {
    /// All slabs in ascending order.
    pub const ALL: [GstRate; 5] = [
        Self::Exempt,
        Self::Five,
        Self::Twelve,
        Self::Eighteen,
        Self::TwentyEight,
    ];

    /// Rate as a percentage.
    pub fn percent(&self) -> Decimal {
        match self {
            Self::Exempt => dec!(0),
            Self::Five => dec!(5),
            Self::Twelve => dec!(12),
            Self::Eighteen => dec!(18),
            Self::TwentyEight => dec!(28),
        }
    }

    /// Match a percentage to a slab (scale-insensitive, so `18.00` is 18%).
    pub fn from_percent(percent: Decimal) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.percent() == percent)
    }

    /// Whether `percent` is one of the standard slabs.
    pub fn is_standard_slab(percent: Decimal) -> bool {
        Self::from_percent(percent).is_some()
    }
}

/// A named charge added on top of the line items (packing, freight, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalCharge {
    pub name: String,
    pub amount: Decimal,
}

impl AdditionalCharge {
    pub fn new(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// Document-level discount applied once to the subtotal, independent of
/// line discounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum OverallDiscount {
    /// Percentage of the subtotal.
    Percentage(Decimal),
    /// Fixed amount.
    Amount(Decimal),
}

impl OverallDiscount {
    /// The configured value (percentage or amount).
    pub fn value(&self) -> Decimal {
        match self {
            Self::Percentage(v) | Self::Amount(v) => *v,
        }
    }

    /// Discount amount for a given subtotal.
    ///
    /// A percentage whose product leaves the `Decimal` range yields 0.
    pub fn amount_on(&self, subtotal: Decimal) -> Decimal {
        self.checked_amount_on(subtotal).unwrap_or(Decimal::ZERO)
    }

    pub(crate) fn checked_amount_on(&self, subtotal: Decimal) -> Option<Decimal> {
        match self {
            Self::Percentage(p) => subtotal
                .checked_mul(*p)?
                .checked_div(dec!(100))
                .map(calc::round2),
            Self::Amount(a) => Some(*a),
        }
    }
}

/// Round-off policy for the final total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "amount", rename_all = "lowercase")]
pub enum RoundOff {
    /// Round the total to the nearest whole rupee; the adjustment is derived.
    Auto,
    /// User-entered adjustment added to the total as-is.
    Manual(Decimal),
}

impl Default for RoundOff {
    fn default() -> Self {
        Self::Manual(Decimal::ZERO)
    }
}

impl RoundOff {
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

/// A quotation being edited.
///
/// Drafts are immutable values: edits such as [`QuotationDraft::with_charge`]
/// return a new draft, and [`QuotationDraft::totals`] is recomputed from the
/// draft every time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationDraft {
    /// Quotation number (e.g. "QT/2024-25/001").
    pub number: String,
    /// Quotation date.
    pub date: NaiveDate,
    /// Date until which the quoted prices hold.
    pub valid_until: Option<NaiveDate>,
    /// Customer display name.
    pub customer: Option<String>,
    pub lines: Vec<LineItem>,
    /// Additional charges in entry order.
    pub charges: Vec<AdditionalCharge>,
    pub overall_discount: Option<OverallDiscount>,
    pub round_off: RoundOff,
    /// Free-text notes / terms.
    pub notes: Vec<String>,
}

/// Derived totals of a quotation. Nothing in here is user input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationTotals {
    /// Sum of rounded `quantity * unit_price` per line.
    pub subtotal: Decimal,
    /// Sum of rounded line discounts.
    pub line_discount_total: Decimal,
    /// Sum of rounded line taxes (undivided GST).
    pub line_tax_total: Decimal,
    /// Overall discount resolved against `subtotal`.
    pub overall_discount_amount: Decimal,
    pub additional_charges_total: Decimal,
    /// subtotal - line discounts - overall discount + tax + charges.
    pub total_before_round_off: Decimal,
    /// Adjustment applied to reach `final_total`.
    pub round_off_amount: Decimal,
    pub final_total: Decimal,
}

/// Per-column values of one line for a table row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineBreakdown {
    /// Rounded `quantity * unit_price`.
    pub gross: Decimal,
    /// Rounded discount amount.
    pub discount: Decimal,
    /// Unrounded amount after discount, the tax base.
    pub taxable: Decimal,
    /// Rounded tax on `taxable`.
    pub tax: Decimal,
    /// Line amount (single rounding, see [`compute_line_amount`](crate::core::compute_line_amount)).
    pub amount: Decimal,
}

/// CGST / SGST halves of the total GST, for intra-state presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSplit {
    pub cgst: Decimal,
    pub sgst: Decimal,
}
