#![cfg(feature = "api")]

use chrono::NaiveDate;
use hisaab::api::*;
use hisaab::core::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn draft() -> QuotationDraft {
    QuotationDraftBuilder::new("QT/2024-25/014", date(2024, 6, 15))
        .valid_until(date(2024, 7, 15))
        .customer("Sharma Traders")
        .note("Prices inclusive of installation")
        .add_line(
            LineItemBuilder::new("Steel rack", 2, dec!(200))
                .item_id("17")
                .discount(dec!(10))
                .gst(GstRate::Eighteen)
                .build(),
        )
        .add_line(LineItemBuilder::new("Installation", 1, dec!(100)).build())
        .add_charge(AdditionalCharge::new("Packing", dec!(25)))
        .overall_discount(OverallDiscount::Percentage(dec!(5)))
        .round_off(RoundOff::Auto)
        .build()
        .unwrap()
}

// --- Inbound records ---

#[test]
fn item_record_with_numeric_id_and_missing_rate() {
    let item: ItemRecord =
        from_json(r#"{"id": 17, "item_name": "Steel rack", "sales_price": 200}"#).unwrap();
    assert_eq!(item.id.as_deref(), Some("17"));

    let line = line_from_item(&item);
    assert_eq!(line.quantity, 1);
    assert_eq!(line.unit_price, dec!(200));
    assert_eq!(line.discount_percent, dec!(0));
    assert_eq!(line.tax_percent, dec!(0));
}

#[test]
fn item_record_with_string_numbers() {
    let item: ItemRecord = from_json(
        r#"{"id": "ITM-9", "item_name": "Cable", "sales_price": "49.90", "gst_tax_rate": "18"}"#,
    )
    .unwrap();
    let line = line_from_item(&item);
    assert_eq!(line.item_id.as_deref(), Some("ITM-9"));
    assert_eq!(line.unit_price, dec!(49.90));
    assert_eq!(line.tax_percent, dec!(18));
}

#[test]
fn null_numbers_read_as_zero() {
    let record: QuotationItemRecord = from_json(
        r#"{"item_name": "Cable", "quantity": null, "unit_price": null, "tax_percentage": 5}"#,
    )
    .unwrap();
    let line = line_from_record(&record);
    assert_eq!(line.quantity, 0);
    assert_eq!(line.unit_price, dec!(0));
    assert_eq!(line.tax_percent, dec!(5));
}

#[test]
fn quantity_accepts_strings_and_floats() {
    let quantity = |raw: &str| {
        let json = format!(r#"{{"item_name": "Cable", "quantity": {raw}}}"#);
        from_json::<QuotationItemRecord>(&json).unwrap().quantity
    };
    assert_eq!(quantity("2"), Some(2));
    assert_eq!(quantity(r#""2""#), Some(2));
    assert_eq!(quantity("2.0"), Some(2));
    assert_eq!(quantity(r#"" 7 ""#), Some(7));
    // Truncated like the form input
    assert_eq!(quantity("2.9"), Some(2));
    assert_eq!(quantity("null"), None);
    // Unusable values read as 0
    assert_eq!(quantity(r#""two""#), Some(0));
    assert_eq!(quantity("-3"), Some(0));
    assert_eq!(quantity("5000000000"), Some(0));
}

#[test]
fn stored_amount_is_recomputed() {
    let record: QuotationItemRecord = from_json(
        r#"{"item_name": "Rack", "quantity": 2, "unit_price": 200,
            "discount_percentage": 10, "tax_percentage": 18, "amount": 999}"#,
    )
    .unwrap();
    assert_eq!(line_from_record(&record).amount(), dec!(424.80));
}

#[test]
fn malformed_json_is_a_payload_error() {
    let result: Result<QuotationPayload, _> = from_json("{not json");
    assert!(matches!(result, Err(QuotationError::Payload(_))));
}

#[test]
fn oversized_stored_price_is_rejected() {
    let json = r#"{"quotation_number": "QT-9", "quotation_date": "2024-06-15",
        "items": [{"item_name": "Bulk", "quantity": 4000000000,
                   "unit_price": "100000000000000000000"}]}"#;
    let payload: QuotationPayload = from_json(json).unwrap();

    let err = draft_from_payload(&payload).unwrap_err();
    assert!(matches!(err, QuotationError::InvalidInput(_)));
    assert!(err.to_string().contains("items[0].unit_price"));
    assert!(verify_payload(&payload).is_err());
    assert!(invoice_from_quotation(&payload, "INV-1", date(2024, 6, 20)).is_err());
}

#[test]
fn largest_stored_values_still_compute() {
    let json = r#"{"quotation_number": "QT-9", "quotation_date": "2024-06-15",
        "items": [{"item_name": "Bulk", "quantity": 4294967295,
                   "unit_price": "1000000000000", "discount_percentage": "1000000000000",
                   "tax_percentage": "1000000000000"},
                  {"item_name": "Bolt", "quantity": 4294967295,
                   "unit_price": "1000000000000", "tax_percentage": 28}],
        "additional_charges": [{"name": "Freight", "amount": "1000000000000"}],
        "overall_discount_type": "percentage", "overall_discount_value": "1000000000000",
        "auto_round_off": true}"#;
    let payload: QuotationPayload = from_json(json).unwrap();
    let draft = draft_from_payload(&payload).unwrap();

    // The first line overflows and counts as 0; nothing panics
    assert_eq!(draft.lines[0].amount(), dec!(0));
    let saved = payload_from_draft(&draft);
    assert_eq!(saved.body.items.len(), 2);
    assert!(!verify_payload(&saved).unwrap().is_empty());
}

// --- Outbound payload ---

#[test]
fn payload_carries_computed_totals() {
    let payload = payload_from_draft(&draft());
    let body = &payload.body;

    assert_eq!(payload.quotation_number, "QT/2024-25/014");
    assert_eq!(body.items.len(), 2);
    assert_eq!(body.items[0].amount, Some(dec!(424.80)));
    assert_eq!(body.subtotal, dec!(500));
    // 40 line discount + 25 overall
    assert_eq!(body.total_discount, dec!(65));
    assert_eq!(body.total_tax, dec!(64.80));
    assert_eq!(body.cgst, dec!(32.40));
    assert_eq!(body.sgst, dec!(32.40));
    assert_eq!(body.additional_charges_total, dec!(25));
    assert!(body.auto_round_off);
    assert_eq!(body.round_off, dec!(0.20));
    assert_eq!(body.total_amount, dec!(525));
    assert_eq!(body.overall_discount_type, Some(DiscountKind::Percentage));
}

#[cfg(feature = "words")]
#[test]
fn payload_includes_amount_in_words() {
    let payload = payload_from_draft(&draft());
    assert_eq!(
        payload.body.amount_in_words.as_deref(),
        Some("Five Hundred Twenty Five Rupees")
    );
}

#[test]
fn payload_json_uses_backend_field_names() {
    let json = to_json(&payload_from_draft(&draft())).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["quotation_number"], "QT/2024-25/014");
    assert_eq!(value["quotation_date"], "2024-06-15");
    assert_eq!(value["overall_discount_type"], "percentage");
    assert_eq!(value["items"][0]["item_name"], "Steel rack");
    assert!(value["items"][0].get("tax_percentage").is_some());
    assert!(value.get("total_amount").is_some());
    // Flattened, not nested
    assert!(value.get("body").is_none());
}

#[test]
fn json_round_trip_rebuilds_the_same_draft() {
    let original = draft();
    let json = to_json(&payload_from_draft(&original)).unwrap();
    let payload: QuotationPayload = from_json(&json).unwrap();
    let rebuilt = draft_from_payload(&payload).unwrap();

    assert_eq!(rebuilt, original);
    assert_eq!(rebuilt.totals(), original.totals());
}

#[test]
fn manual_round_off_survives_round_trip() {
    let original = draft().with_round_off(RoundOff::Manual(dec!(-0.30)));
    let payload = payload_from_draft(&original);
    assert!(!payload.body.auto_round_off);
    assert_eq!(payload.body.round_off, dec!(-0.30));

    let rebuilt = draft_from_payload(&payload).unwrap();
    assert_eq!(rebuilt.round_off, RoundOff::Manual(dec!(-0.30)));
    assert_eq!(rebuilt.totals().final_total, dec!(524.50));
}

// --- Verification ---

#[test]
fn consistent_payload_verifies() {
    let payload = payload_from_draft(&draft());
    assert!(verify_payload(&payload).unwrap().is_empty());
}

#[test]
fn tampered_payload_is_reported() {
    let mut payload = payload_from_draft(&draft());
    payload.body.total_tax = dec!(50);
    payload.body.total_amount = dec!(510.20);

    let errors = verify_payload(&payload).unwrap();
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert!(fields.contains(&"totals.line_tax_total"));
    assert!(fields.contains(&"totals.total_before_round_off"));
}

// --- Quotation → invoice ---

#[test]
fn quotation_converts_to_invoice() {
    let quotation = payload_from_draft(&draft());
    let invoice = invoice_from_quotation(&quotation, "INV/2024-25/003", date(2024, 6, 20)).unwrap();

    assert_eq!(invoice.invoice_number, "INV/2024-25/003");
    assert_eq!(invoice.invoice_date, date(2024, 6, 20));
    assert_eq!(invoice.quotation_number.as_deref(), Some("QT/2024-25/014"));
    assert_eq!(invoice.body, quotation.body);
}

#[test]
fn invoice_recomputes_stale_quotation_totals() {
    let mut quotation = payload_from_draft(&draft());
    quotation.body.total_amount = dec!(1);

    let invoice = invoice_from_quotation(&quotation, "INV-1", date(2024, 6, 20)).unwrap();
    assert_eq!(invoice.body.total_amount, dec!(525));
}

#[test]
fn invoice_json_has_back_reference() {
    let quotation = payload_from_draft(&draft());
    let invoice = invoice_from_quotation(&quotation, "INV-1", date(2024, 6, 20)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&to_json(&invoice).unwrap()).unwrap();
    assert_eq!(value["quotation_number"], "QT/2024-25/014");
    assert_eq!(value["invoice_date"], "2024-06-20");
}

// --- Core types on the wire ---

#[test]
fn overall_discount_and_round_off_shapes() {
    let discount = serde_json::to_value(OverallDiscount::Amount(dec!(10))).unwrap();
    assert_eq!(discount["type"], "amount");
    assert!(discount.get("value").is_some());

    let auto = serde_json::to_value(RoundOff::Auto).unwrap();
    assert_eq!(auto["mode"], "auto");
}
