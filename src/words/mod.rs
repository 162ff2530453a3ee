//! Amount in words, Indian numbering system.
//!
//! Groups are crore (10^7), lakh (10^5), thousand (10^3), then hundreds.
//! Amounts of 100 crore and more repeat the grouping on the crore count,
//! e.g. 1,00,00,00,000 is "One Hundred Crore".
//!
//! ```
//! use hisaab::words::amount_to_words;
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(amount_to_words(dec!(150000)), "One Lakh Fifty Thousand Rupees");
//! assert_eq!(amount_to_words(dec!(100.50)), "One Hundred Rupees and Fifty Paise");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::core::{QuotationTotals, coerce_decimal};

const ZERO_RUPEES: &str = "Zero Rupees";

const CRORE: u128 = 10_000_000;
const LAKH: u128 = 100_000;
const THOUSAND: u128 = 1_000;

static ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

static TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Render an amount as `"<words> Rupees[ and <words> Paise]"`.
///
/// The amount is rounded to whole paise (half away from zero). The sign is
/// dropped. Zero renders as `"Zero Rupees"`, as does an amount too large to
/// express in paise. Never panics.
pub fn amount_to_words(amount: Decimal) -> String {
    let paise = amount
        .abs()
        .checked_mul(dec!(100))
        .map(|p| p.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|p| p.to_u128());

    let Some(paise) = paise else {
        return ZERO_RUPEES.to_string();
    };
    if paise == 0 {
        return ZERO_RUPEES.to_string();
    }

    let rupees = paise / 100;
    let paise = paise % 100;

    let mut words = if rupees == 0 {
        ZERO_RUPEES.to_string()
    } else {
        format!("{} Rupees", integer_to_words(rupees))
    };
    if paise > 0 {
        words.push_str(" and ");
        words.push_str(&below_hundred(paise));
        words.push_str(" Paise");
    }
    words
}

/// [`amount_to_words`] for raw floating-point input. NaN and infinities
/// render as `"Zero Rupees"`.
pub fn amount_to_words_f64(amount: f64) -> String {
    if !amount.is_finite() {
        return ZERO_RUPEES.to_string();
    }
    amount_to_words(coerce_decimal(amount))
}

impl QuotationTotals {
    /// The final total in words.
    pub fn amount_in_words(&self) -> String {
        amount_to_words(self.final_total)
    }
}

/// Words for a positive integer; empty for 0.
fn integer_to_words(n: u128) -> String {
    let mut parts: Vec<String> = Vec::new();

    let crore = n / CRORE;
    if crore > 0 {
        parts.push(format!("{} Crore", integer_to_words(crore)));
    }

    let lakh = (n / LAKH) % 100;
    if lakh > 0 {
        parts.push(format!("{} Lakh", below_hundred(lakh)));
    }

    let thousand = (n / THOUSAND) % 100;
    if thousand > 0 {
        parts.push(format!("{} Thousand", below_hundred(thousand)));
    }

    let rest = n % THOUSAND;
    if rest > 0 {
        parts.push(below_thousand(rest));
    }

    parts.join(" ")
}

// n < 1000
fn below_thousand(n: u128) -> String {
    let hundreds = n / 100;
    let rest = n % 100;
    match (hundreds, rest) {
        (0, _) => below_hundred(rest),
        (h, 0) => format!("{} Hundred", ONES[h as usize]),
        (h, r) => format!("{} Hundred {}", ONES[h as usize], below_hundred(r)),
    }
}

// n < 100
fn below_hundred(n: u128) -> String {
    let n = n as usize;
    if n < 20 {
        return ONES[n].to_string();
    }
    match n % 10 {
        0 => TENS[n / 10].to_string(),
        units => format!("{} {}", TENS[n / 10], ONES[units]),
    }
}
