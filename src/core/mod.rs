//! Core quotation types, calculators, validation, and numbering.
//!
//! The aggregator is a pure reducer over an immutable [`QuotationDraft`]:
//! every edit produces a new draft and totals are recomputed from scratch.

mod builder;
pub mod calc;
mod error;
pub mod input;
mod numbering;
mod totals;
mod types;
mod validation;

pub use builder::*;
pub use calc::{compute_line_amount, line_breakdown, round2};
pub use error::*;
pub use input::{coerce_decimal, coerce_quantity, try_decimal, try_quantity};
pub use numbering::*;
pub use totals::*;
pub use types::*;
pub use validation::*;
