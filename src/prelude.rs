//! Vitrine prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartItem},
    checkout::CheckoutDetails,
    order::{OrderError, OrderLine, OrderSubmission, PlacedOrder},
    payment::{PaymentIntent, PaymentMethod, PaymentMethodError},
    session::{SessionContext, StoredUser},
};
