//! Application layer containing the cart pricing orchestration.
//!
//! `Cart` decides when each coupon fires and keeps the running total.
//! `Checkout` drives many carts from a stream of scripted events.

pub mod cart;
pub mod checkout;
