use super::coupon::{Coupon, CouponType};
use super::price::Price;
use super::product::Product;
use crate::error::CartError;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    Add,
    Coupon,
}

/// One row of a checkout script.
///
/// `amount` is the product price for `add` rows and the coupon discount for
/// `coupon` rows.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CartEvent {
    pub cart: u16,
    pub action: EventAction,
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub coupon: Option<CouponType>,
    pub index: Option<usize>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum CartCommand {
    AddProduct(Product),
    ApplyCoupon(Coupon),
}

impl TryFrom<CartEvent> for CartCommand {
    type Error = CartError;

    fn try_from(event: CartEvent) -> Result<Self, Self::Error> {
        match event.action {
            EventAction::Add => {
                let name = event.name.ok_or_else(|| {
                    CartError::Validation("Product is missing a name".to_string())
                })?;
                let price = event.amount.ok_or_else(|| {
                    CartError::Validation(format!("Product '{name}' is missing a price"))
                })?;
                Ok(CartCommand::AddProduct(Product::new(name, Price::new(price))))
            }
            EventAction::Coupon => {
                let r#type = event.coupon.ok_or_else(|| {
                    CartError::Validation("Coupon is missing a type".to_string())
                })?;
                // A coupon without a discount is forwarded; the cart ignores it.
                Ok(CartCommand::ApplyCoupon(Coupon::new(
                    r#type,
                    event.amount,
                    event.name,
                    event.index,
                )))
            }
        }
    }
}
