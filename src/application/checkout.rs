use crate::application::cart::{Cart, CouponOutcome};
use crate::domain::event::{CartCommand, CartEvent};
use crate::domain::price::Price;
use crate::error::{CartError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Final state of one cart after all of its events were processed.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct CartSummary {
    pub cart: u16,
    pub total: Price,
    pub products: usize,
    pub pending_coupons: usize,
}

impl CartSummary {
    fn from_cart(id: u16, cart: &Cart) -> Self {
        Self {
            cart: id,
            total: cart.cart_price().normalize(),
            products: cart.products().len(),
            pending_coupons: cart.active_coupon_count(),
        }
    }
}

/// Routes scripted cart events to their carts.
///
/// Carts are created on first use and processed strictly in event order,
/// so each cart sees its adds and coupons exactly as they appear in the input.
#[derive(Debug, Default)]
pub struct Checkout {
    carts: BTreeMap<u16, Cart>,
}

impl Checkout {
    /// Creates a new `Checkout` with no carts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a single event to its cart.
    ///
    /// Fails when the event cannot be turned into a cart command, or when its
    /// amounts overflow the cart's arithmetic. The cart itself is left
    /// untouched in both cases.
    pub fn process_event(&mut self, event: CartEvent) -> Result<()> {
        let id = event.cart;
        let command = CartCommand::try_from(event)?;
        let cart = self.carts.entry(id).or_default();

        match command {
            CartCommand::AddProduct(product) => {
                debug!(cart = id, product = %product.name, price = %product.price, "adding product");
                let name = product.name.clone();
                if cart.add_product(product).is_none() {
                    return Err(CartError::Validation(format!(
                        "Product '{name}' overflows cart {id}"
                    )));
                }
            }
            CartCommand::ApplyCoupon(coupon) => {
                let outcome = cart.apply_coupon(coupon);
                debug!(cart = id, ?outcome, "coupon submitted");
                if outcome == CouponOutcome::Overflowed {
                    return Err(CartError::Validation(format!(
                        "Coupon discount overflows cart {id}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Consumes the checkout and returns one summary per cart, ordered by id.
    pub fn into_results(self) -> Vec<CartSummary> {
        self.carts
            .iter()
            .map(|(&id, cart)| CartSummary::from_cart(id, cart))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coupon::CouponType;
    use crate::domain::event::EventAction;
    use rust_decimal_macros::dec;

    fn add(cart: u16, name: &str, price: rust_decimal::Decimal) -> CartEvent {
        CartEvent {
            cart,
            action: EventAction::Add,
            name: Some(name.to_string()),
            amount: Some(price),
            coupon: None,
            index: None,
        }
    }

    fn coupon(cart: u16, r#type: CouponType, discount: rust_decimal::Decimal) -> CartEvent {
        CartEvent {
            cart,
            action: EventAction::Coupon,
            name: None,
            amount: Some(discount),
            coupon: Some(r#type),
            index: None,
        }
    }

    #[test]
    fn test_events_are_routed_per_cart() {
        let mut checkout = Checkout::new();
        checkout.process_event(coupon(1, CouponType::ApplyNext, dec!(10))).unwrap();
        checkout.process_event(add(2, "Business cards", dec!(10))).unwrap();
        checkout.process_event(add(1, "Business cards", dec!(10))).unwrap();
        checkout.process_event(add(1, "T-shirt", dec!(20))).unwrap();
        checkout.process_event(coupon(2, CouponType::ApplyNext, dec!(10))).unwrap();
        checkout.process_event(add(2, "T-shirt", dec!(20))).unwrap();

        let results = checkout.into_results();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].cart, 1);
        assert_eq!(results[0].total, Price::new(dec!(29)));
        assert_eq!(results[1].cart, 2);
        assert_eq!(results[1].total, Price::new(dec!(28)));
        assert_eq!(results[1].products, 2);
        assert_eq!(results[1].pending_coupons, 0);
    }

    #[test]
    fn test_pending_coupons_are_counted() {
        let mut checkout = Checkout::new();
        let mut event = coupon(7, CouponType::ApplyOnIndex, dec!(2));
        event.name = Some("Mug".to_string());
        event.index = Some(3);
        checkout.process_event(event).unwrap();
        checkout.process_event(add(7, "Mug", dec!(10))).unwrap();

        let results = checkout.into_results();
        assert_eq!(results[0].pending_coupons, 1);
        assert_eq!(results[0].total, Price::new(dec!(10)));
    }

    #[test]
    fn test_invalid_event_leaves_cart_untouched() {
        let mut checkout = Checkout::new();
        checkout.process_event(add(1, "Mug", dec!(10))).unwrap();

        let mut invalid = add(1, "Poster", dec!(5));
        invalid.amount = None;
        let result = checkout.process_event(invalid);
        assert!(matches!(result, Err(CartError::Validation(_))));

        let cart = &checkout.carts[&1];
        assert_eq!(cart.products().len(), 1);
        assert_eq!(cart.cart_price(), Price::new(dec!(10)));
    }

    #[test]
    fn test_summary_total_is_normalized() {
        let mut checkout = Checkout::new();
        checkout.process_event(add(1, "Mug", dec!(10.00))).unwrap();
        checkout.process_event(coupon(1, CouponType::ApplyToAll, dec!(25))).unwrap();

        let results = checkout.into_results();
        assert_eq!(results[0].total.to_string(), "7.5");
    }

    #[test]
    fn test_overflowing_events_are_rejected() {
        let mut checkout = Checkout::new();
        let huge = dec!(50000000000000000000000000000);
        checkout.process_event(add(1, "Mug", huge)).unwrap();
        assert!(matches!(
            checkout.process_event(add(1, "Mug", huge)),
            Err(CartError::Validation(_))
        ));
        assert!(matches!(
            checkout.process_event(coupon(1, CouponType::ApplyToAll, dec!(200))),
            Err(CartError::Validation(_))
        ));
        checkout.process_event(add(2, "Pen", dec!(2))).unwrap();

        let results = checkout.into_results();
        assert_eq!(results[0].total, Price::new(huge));
        assert_eq!(results[0].products, 1);
        assert_eq!(results[1].total, Price::new(dec!(2)));
    }
}
