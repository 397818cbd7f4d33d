//! Checkout flow

pub mod errors;
pub mod flow;
pub mod service;

pub use errors::CheckoutError;
pub use flow::{CheckoutFlow, CheckoutOutcome};
pub use service::*;
