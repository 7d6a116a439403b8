//! APIs and models related to Direct Debit: card binding, charges and refunds.

mod api;
mod model;

pub use api::DirectDebitApi;
pub use model::*;
