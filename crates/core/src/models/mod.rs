pub mod account;
pub mod instrument;
pub mod quote;
pub mod snapshot;
pub mod valuation;
