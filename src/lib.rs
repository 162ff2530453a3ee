//! # hisaab
//!
//! Quotation pricing engine for GST-style business documents: per-line
//! discount and tax, document totals with overall discount, additional
//! charges and round-off, and amount-in-words in the Indian numbering system.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Every calculation is a pure function of its inputs.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use hisaab::core::*;
//! use rust_decimal_macros::dec;
//!
//! let draft = QuotationDraftBuilder::new("QT/2024-25/001", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .customer("Sharma Traders")
//!     .add_line(LineItemBuilder::new("Steel rack", 2, dec!(200))
//!         .discount(dec!(10))
//!         .gst(GstRate::Eighteen)
//!         .build())
//!     .add_line(LineItemBuilder::new("Installation", 1, dec!(100)).build())
//!     .build()
//!     .unwrap();
//!
//! let totals = draft.totals();
//! assert_eq!(totals.subtotal, dec!(500));
//! assert_eq!(totals.line_tax_total, dec!(64.80));
//! assert_eq!(totals.final_total, dec!(524.80));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Line calculator, document totals, draft builder, validation, numbering |
//! | `words` (default) | Amount in words (crore / lakh / thousand, with paise) |
//! | `api` | Backend DTOs, payload mapping, quotation → invoice conversion |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "words")]
pub mod words;

#[cfg(feature = "api")]
pub mod api;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
