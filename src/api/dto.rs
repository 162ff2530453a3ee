//! Wire shapes of the backend's item, quotation, and invoice records.
//!
//! Numeric fields are lenient on the way in: a missing or `null` value reads
//! as 0, identifiers may arrive as strings or numbers, and quantities may be
//! integers, floats or numeric strings.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::coerce_quantity;

/// Inventory item as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    pub item_name: String,
    #[serde(default)]
    pub sales_price: Option<Decimal>,
    /// GST percentage configured on the item.
    #[serde(default)]
    pub gst_tax_rate: Option<Decimal>,
}

/// One quotation or invoice row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationItemRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub item_id: Option<String>,
    #[serde(default)]
    pub item_name: String,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub discount_percentage: Option<Decimal>,
    #[serde(default)]
    pub tax_percentage: Option<Decimal>,
    /// Line amount as computed when the record was saved.
    #[serde(default)]
    pub amount: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeRecord {
    pub name: String,
    #[serde(default)]
    pub amount: Option<Decimal>,
}

/// `overall_discount_type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    Percentage,
    Amount,
}

/// Fields shared by quotation and invoice payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentBody {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub items: Vec<QuotationItemRecord>,
    #[serde(default)]
    pub additional_charges: Vec<ChargeRecord>,
    #[serde(default)]
    pub overall_discount_type: Option<DiscountKind>,
    #[serde(default)]
    pub overall_discount_value: Option<Decimal>,
    #[serde(default)]
    pub auto_round_off: bool,
    /// Round-off adjustment; user-entered unless `auto_round_off` is set.
    #[serde(default)]
    pub round_off: Decimal,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub subtotal: Decimal,
    /// Line discounts plus overall discount.
    #[serde(default)]
    pub total_discount: Decimal,
    #[serde(default)]
    pub total_tax: Decimal,
    #[serde(default)]
    pub cgst: Decimal,
    #[serde(default)]
    pub sgst: Decimal,
    #[serde(default)]
    pub additional_charges_total: Decimal,
    #[serde(default)]
    pub total_amount: Decimal,
    #[serde(default)]
    pub amount_in_words: Option<String>,
}

/// Quotation create/update request and detail response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationPayload {
    pub quotation_number: String,
    pub quotation_date: NaiveDate,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    #[serde(flatten)]
    pub body: DocumentBody,
}

/// Invoice created from a quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicePayload {
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    /// Quotation this invoice was converted from.
    #[serde(default)]
    pub quotation_number: Option<String>,
    #[serde(flatten)]
    pub body: DocumentBody,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Int(i64),
    Uint(u64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.map(|v| match v {
            StringOrNumber::String(s) => s,
            StringOrNumber::Int(n) => n.to_string(),
            StringOrNumber::Uint(n) => n.to_string(),
        }),
    )
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuantityValue {
    Number(f64),
    Text(String),
}

/// Quantity from a number or numeric string. Fractions are truncated;
/// anything unparseable, negative or above `u32::MAX` reads as 0.
fn lenient_quantity<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<QuantityValue>::deserialize(deserializer)?.map(|v| match v {
            QuantityValue::Number(n) => coerce_quantity(n),
            QuantityValue::Text(s) => coerce_quantity(s.trim().parse().unwrap_or(f64::NAN)),
        }),
    )
}
