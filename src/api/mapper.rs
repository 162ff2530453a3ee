use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::dto::*;
use crate::core::{
    AdditionalCharge, LineItem, OverallDiscount, QuotationDraft, QuotationDraftBuilder,
    MAX_AMOUNT, QuotationError, QuotationTotals, RoundOff, ValidationError, validate_draft,
    validate_totals,
};

/// New quotation line for an inventory item: quantity 1, no discount, the
/// item's GST rate.
pub fn line_from_item(item: &ItemRecord) -> LineItem {
    LineItem {
        item_id: item.id.clone(),
        name: item.item_name.clone(),
        quantity: 1,
        unit_price: item.sales_price.unwrap_or_default(),
        discount_percent: Decimal::ZERO,
        tax_percent: item.gst_tax_rate.unwrap_or_default(),
    }
}

/// Engine line from a stored row. Missing numbers read as 0; the stored
/// `amount` is ignored and recomputed.
pub fn line_from_record(record: &QuotationItemRecord) -> LineItem {
    LineItem {
        item_id: record.item_id.clone(),
        name: record.item_name.clone(),
        quantity: record.quantity.unwrap_or_default(),
        unit_price: record.unit_price.unwrap_or_default(),
        discount_percent: record.discount_percentage.unwrap_or_default(),
        tax_percent: record.tax_percentage.unwrap_or_default(),
    }
}

pub fn record_from_line(line: &LineItem) -> QuotationItemRecord {
    QuotationItemRecord {
        item_id: line.item_id.clone(),
        item_name: line.name.clone(),
        quantity: Some(line.quantity),
        unit_price: Some(line.unit_price),
        discount_percentage: Some(line.discount_percent),
        tax_percentage: Some(line.tax_percent),
        amount: Some(line.amount()),
    }
}

/// Request body for saving a draft, with freshly computed totals.
pub fn payload_from_draft(draft: &QuotationDraft) -> QuotationPayload {
    QuotationPayload {
        quotation_number: draft.number.clone(),
        quotation_date: draft.date,
        valid_until: draft.valid_until,
        body: body_from_draft(draft),
    }
}

/// Rebuild an editable draft from a stored quotation.
///
/// Validation is not run; stored quotations are loaded as they are, except
/// that any price, percentage or amount above [`MAX_AMOUNT`] in magnitude
/// is rejected with [`QuotationError::InvalidInput`].
pub fn draft_from_payload(payload: &QuotationPayload) -> Result<QuotationDraft, QuotationError> {
    let body = &payload.body;
    check_magnitudes(body)?;
    let mut builder = QuotationDraftBuilder::new(&payload.quotation_number, payload.quotation_date);

    if let Some(date) = payload.valid_until {
        builder = builder.valid_until(date);
    }
    if let Some(customer) = &body.customer_name {
        builder = builder.customer(customer);
    }
    for note in &body.notes {
        builder = builder.note(note);
    }
    for item in &body.items {
        builder = builder.add_line(line_from_record(item));
    }
    for charge in &body.additional_charges {
        builder = builder.add_charge(AdditionalCharge::new(
            &charge.name,
            charge.amount.unwrap_or_default(),
        ));
    }

    let value = body.overall_discount_value.unwrap_or_default();
    match body.overall_discount_type {
        Some(DiscountKind::Percentage) => {
            builder = builder.overall_discount(OverallDiscount::Percentage(value));
        }
        Some(DiscountKind::Amount) => {
            builder = builder.overall_discount(OverallDiscount::Amount(value));
        }
        None => {}
    }

    builder = builder.round_off(if body.auto_round_off {
        RoundOff::Auto
    } else {
        RoundOff::Manual(body.round_off)
    });

    builder.build_unchecked()
}

fn check_magnitudes(body: &DocumentBody) -> Result<(), QuotationError> {
    let check = |field: String, value: Option<Decimal>| match value {
        Some(v) if v.abs() > MAX_AMOUNT => Err(QuotationError::InvalidInput(format!(
            "{field} exceeds maximum allowed ({MAX_AMOUNT}), got {v}"
        ))),
        _ => Ok(()),
    };

    for (i, item) in body.items.iter().enumerate() {
        check(format!("items[{i}].unit_price"), item.unit_price)?;
        check(
            format!("items[{i}].discount_percentage"),
            item.discount_percentage,
        )?;
        check(format!("items[{i}].tax_percentage"), item.tax_percentage)?;
    }
    for (i, charge) in body.additional_charges.iter().enumerate() {
        check(format!("additional_charges[{i}].amount"), charge.amount)?;
    }
    check(
        "overall_discount_value".to_string(),
        body.overall_discount_value,
    )?;
    check("round_off".to_string(), Some(body.round_off))
}

/// Check the totals stored in a payload against its own items.
///
/// Draft-level errors are returned on their own; stored totals are only
/// compared once the items themselves are well-formed.
pub fn verify_payload(payload: &QuotationPayload) -> Result<Vec<ValidationError>, QuotationError> {
    let draft = draft_from_payload(payload)?;
    let errors: Vec<ValidationError> = validate_draft(&draft)
        .into_iter()
        .filter(ValidationError::is_error)
        .collect();
    if !errors.is_empty() {
        return Ok(errors);
    }

    let body = &payload.body;
    let overflow = || QuotationError::InvalidInput("stored totals out of range".into());

    // The payload stores one combined discount; split it back using the
    // overall discount recomputed from the draft.
    let computed = draft.totals();
    let stored = QuotationTotals {
        subtotal: body.subtotal,
        line_discount_total: body
            .total_discount
            .checked_sub(computed.overall_discount_amount)
            .ok_or_else(overflow)?,
        line_tax_total: body.total_tax,
        overall_discount_amount: computed.overall_discount_amount,
        additional_charges_total: body.additional_charges_total,
        total_before_round_off: body
            .total_amount
            .checked_sub(body.round_off)
            .ok_or_else(overflow)?,
        round_off_amount: body.round_off,
        final_total: body.total_amount,
    };

    Ok(validate_totals(&draft, &stored))
}

/// Convert a quotation into an invoice. Totals are recomputed from the
/// quotation's items rather than copied.
///
/// Fails with [`QuotationError::Validation`] if the quotation has errors.
pub fn invoice_from_quotation(
    quotation: &QuotationPayload,
    invoice_number: impl Into<String>,
    invoice_date: NaiveDate,
) -> Result<InvoicePayload, QuotationError> {
    let draft = draft_from_payload(quotation)?;
    let errors: Vec<String> = validate_draft(&draft)
        .iter()
        .filter(|e| e.is_error())
        .map(ToString::to_string)
        .collect();
    if !errors.is_empty() {
        return Err(QuotationError::Validation(errors.join("; ")));
    }
    tracing::info!(
        quotation = %quotation.quotation_number,
        lines = draft.lines.len(),
        "converting quotation to invoice"
    );

    Ok(InvoicePayload {
        invoice_number: invoice_number.into(),
        invoice_date,
        quotation_number: Some(quotation.quotation_number.clone()),
        body: body_from_draft(&draft),
    })
}

/// Serialize a payload to JSON.
pub fn to_json<T: Serialize>(payload: &T) -> Result<String, QuotationError> {
    serde_json::to_string(payload).map_err(|e| QuotationError::Payload(e.to_string()))
}

/// Deserialize a payload from JSON.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, QuotationError> {
    serde_json::from_str(json).map_err(|e| QuotationError::Payload(e.to_string()))
}

fn body_from_draft(draft: &QuotationDraft) -> DocumentBody {
    let totals = draft.totals();
    let split = totals.tax_split();

    let (overall_discount_type, overall_discount_value) = match draft.overall_discount {
        Some(OverallDiscount::Percentage(p)) => (Some(DiscountKind::Percentage), Some(p)),
        Some(OverallDiscount::Amount(a)) => (Some(DiscountKind::Amount), Some(a)),
        None => (None, None),
    };

    DocumentBody {
        customer_name: draft.customer.clone(),
        items: draft.lines.iter().map(record_from_line).collect(),
        additional_charges: draft
            .charges
            .iter()
            .map(|c| ChargeRecord {
                name: c.name.clone(),
                amount: Some(c.amount),
            })
            .collect(),
        overall_discount_type,
        overall_discount_value,
        auto_round_off: draft.round_off.is_auto(),
        round_off: totals.round_off_amount,
        notes: draft.notes.clone(),
        subtotal: totals.subtotal,
        total_discount: totals.total_discount(),
        total_tax: totals.line_tax_total,
        cgst: split.cgst,
        sgst: split.sgst,
        additional_charges_total: totals.additional_charges_total,
        total_amount: totals.final_total,
        amount_in_words: amount_in_words(&totals),
    }
}

#[cfg(feature = "words")]
fn amount_in_words(totals: &QuotationTotals) -> Option<String> {
    Some(totals.amount_in_words())
}

#[cfg(not(feature = "words"))]
fn amount_in_words(_totals: &QuotationTotals) -> Option<String> {
    None
}
