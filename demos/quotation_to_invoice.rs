use chrono::NaiveDate;
use hisaab::api::*;
use hisaab::core::*;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let quoted_on = NaiveDate::from_ymd_opt(2025, 3, 28).unwrap();
    let mut quotations = DocumentNumberSequence::starting_at(
        DocumentKind::Quotation,
        FinancialYear::containing(quoted_on),
        41,
    );

    let draft = QuotationDraftBuilder::new(quotations.next_number(), quoted_on)
        .customer("Patel Hardware")
        .add_line(
            LineItemBuilder::new("PVC pipe 2in", 40, dec!(115.50))
                .discount(dec!(5))
                .gst(GstRate::Eighteen)
                .build(),
        )
        .add_line(
            LineItemBuilder::new("Elbow joint", 120, dec!(12.25))
                .gst(GstRate::Twelve)
                .build(),
        )
        .add_charge(AdditionalCharge::new("Freight", dec!(350)))
        .round_off(RoundOff::Auto)
        .build()
        .expect("quotation should be valid");

    let quotation = payload_from_draft(&draft);
    println!("Saved quotation:");
    println!("{}", to_json(&quotation).expect("payload serializes"));

    // Accepted after the financial year rolled over
    let invoiced_on = NaiveDate::from_ymd_opt(2025, 4, 3).unwrap();
    let mut invoices =
        DocumentNumberSequence::new(DocumentKind::Invoice, FinancialYear::containing(quoted_on));
    invoices.auto_advance(invoiced_on);

    match invoice_from_quotation(&quotation, invoices.next_number(), invoiced_on) {
        Ok(invoice) => {
            println!("---");
            println!("Invoice {} for {}", invoice.invoice_number, quotation.quotation_number);
            println!("Total:    {}", invoice.body.total_amount);
            println!(
                "In words: {}",
                invoice.body.amount_in_words.as_deref().unwrap_or("-")
            );
        }
        Err(e) => eprintln!("conversion failed: {e}"),
    }
}
