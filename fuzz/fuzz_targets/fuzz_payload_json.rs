#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Decode → rebuild → re-save → verify must not panic; errors are fine.
        if let Ok(payload) = hisaab::api::from_json::<hisaab::api::QuotationPayload>(s) {
            let _ = hisaab::api::verify_payload(&payload);
            if let Ok(draft) = hisaab::api::draft_from_payload(&payload) {
                let _ = hisaab::validate_draft(&draft);
                let saved = hisaab::api::payload_from_draft(&draft);
                let _ = hisaab::api::to_json(&saved);
                let _ = hisaab::api::invoice_from_quotation(&saved, "INV-FUZZ", saved.quotation_date);
            }
        }
    }
});
