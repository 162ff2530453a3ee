//! Backend payload DTOs and the mapper between them and the engine types.
//!
//! The pricing engine never sees wire field names; everything that knows
//! about `sales_price`, `tax_percentage`, `total_amount` and friends lives
//! here.

mod dto;
mod mapper;

pub use dto::*;
pub use mapper::*;
