use super::coupon::CouponType;
use super::price::Price;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct Product {
    pub name: String,
    pub price: Price,
}

impl Product {
    /// Creates a new `Product` with its undiscounted price.
    pub fn new(name: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Lowers the price in place and returns the amount taken off.
    ///
    /// `value` is a percentage of the current price for `ApplyToAll` and
    /// `ApplyNext`, and a literal amount for `ApplyOnIndex`. The price is not
    /// clamped, so it can drop below zero. Returns `None`, leaving the price
    /// untouched, if the arithmetic overflows.
    pub fn apply_discount(&mut self, value: Decimal, r#type: CouponType) -> Option<Price> {
        let (price, discount) = self.discounted(value, r#type)?;
        self.price = price;
        Some(discount)
    }

    /// The price after the discount together with the discount itself,
    /// without changing the product.
    pub fn discounted(&self, value: Decimal, r#type: CouponType) -> Option<(Price, Price)> {
        let discount = match r#type {
            CouponType::ApplyToAll | CouponType::ApplyNext => self.price.checked_percent(value)?,
            CouponType::ApplyOnIndex => Price::new(value),
        };
        Some((self.price.checked_sub(discount)?, discount))
    }
}
