#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any bit pattern, including NaN and infinities, must produce words.
    if let Ok(bytes) = <[u8; 8]>::try_from(data) {
        let words = hisaab::words::amount_to_words_f64(f64::from_le_bytes(bytes));
        assert!(words.ends_with("Rupees") || words.ends_with("Paise"));
    }
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(amount) = s.parse::<rust_decimal::Decimal>() {
            let _ = hisaab::words::amount_to_words(amount);
        }
    }
});
