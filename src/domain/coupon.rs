use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a coupon picks the products it discounts.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum CouponType {
    /// Percentage off every product already in the cart.
    ApplyToAll,
    /// Percentage off the next product added.
    ApplyNext,
    /// Fixed amount off the Nth occurrence of a named product.
    ApplyOnIndex,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Coupon {
    pub r#type: CouponType,
    /// Percentage for `ApplyToAll`/`ApplyNext`, absolute amount for `ApplyOnIndex`.
    pub discount: Option<Decimal>,
    pub product_name: Option<String>,
    /// Zero-based occurrence index among products named `product_name`.
    pub product_index: Option<usize>,
    active: bool,
}

impl Coupon {
    /// Creates a new, active `Coupon`.
    pub fn new(
        r#type: CouponType,
        discount: Option<Decimal>,
        product_name: Option<String>,
        product_index: Option<usize>,
    ) -> Self {
        Self {
            r#type,
            discount,
            product_name,
            product_index,
            active: true,
        }
    }

    pub fn all(percentage: Decimal) -> Self {
        Self::new(CouponType::ApplyToAll, Some(percentage), None, None)
    }

    pub fn next(percentage: Decimal) -> Self {
        Self::new(CouponType::ApplyNext, Some(percentage), None, None)
    }

    pub fn on_index(amount: Decimal, product_name: impl Into<String>, index: usize) -> Self {
        Self::new(
            CouponType::ApplyOnIndex,
            Some(amount),
            Some(product_name.into()),
            Some(index),
        )
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}
