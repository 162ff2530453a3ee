use chrono::NaiveDate;
use hisaab::core::*;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG=hisaab=debug shows the aggregator's trace
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let draft = QuotationDraftBuilder::new(
        "QT/2024-25/001",
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
    )
    .valid_until(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
    .customer("Sharma Traders")
    .add_line(
        LineItemBuilder::new("Steel rack", 2, dec!(200))
            .item_id("ITM-7")
            .discount(dec!(10))
            .gst(GstRate::Eighteen)
            .build(),
    )
    .add_line(LineItemBuilder::new("Installation", 1, dec!(100)).build())
    .add_charge(AdditionalCharge::new("Packing", dec!(25)))
    .overall_discount(OverallDiscount::Percentage(dec!(5)))
    .round_off(RoundOff::Auto)
    .note("Prices valid for 30 days")
    .build()
    .expect("quotation should be valid");

    let totals = draft.totals();
    let split = totals.tax_split();

    println!("Quotation: {}", draft.number);
    println!("Date:      {}", draft.date);
    println!("Customer:  {}", draft.customer.as_deref().unwrap_or("-"));
    println!("---");
    for line in &draft.lines {
        println!(
            "  {} x {} @ {} (-{}%, +{}% GST) = {}",
            line.quantity,
            line.name,
            line.unit_price,
            line.discount_percent,
            line.tax_percent,
            line.amount()
        );
    }
    for charge in &draft.charges {
        println!("  + {} {}", charge.name, charge.amount);
    }
    println!("---");
    println!("Subtotal:  {}", totals.subtotal);
    println!("Discount:  {}", totals.total_discount());
    println!("CGST:      {}", split.cgst);
    println!("SGST:      {}", split.sgst);
    println!("Charges:   {}", totals.additional_charges_total);
    println!("Round off: {}", totals.round_off_amount);
    println!("Total:     {}", totals.final_total);
    println!("In words:  {}", totals.amount_in_words());

    for warning in validate_draft(&draft) {
        println!("{warning}");
    }
}
