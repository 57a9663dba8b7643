use crate::domain::coupon::{Coupon, CouponType};
use crate::domain::price::Price;
use crate::domain::product::Product;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, warn};

/// What `Cart::apply_coupon` did with a coupon.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CouponOutcome {
    /// The discount was taken off products already in the cart.
    Applied,
    /// The coupon waits in the pending list for a future product.
    Queued,
    /// The coupon was incomplete and had no effect.
    Ignored,
    /// The discount did not fit in a `Decimal`; the cart is unchanged.
    Overflowed,
}

/// A shopping cart that keeps a running total while coupons fire.
///
/// The total is maintained incrementally: immediately applied coupons subtract
/// their discount from it, while pending coupons lower a product's price before
/// that price is added. Either way it always equals the sum of the current
/// product prices.
///
/// Every mutation is computed with checked arithmetic first and only committed
/// when nothing overflowed, so an oversized amount leaves the cart as it was.
#[derive(Debug, Default, Clone)]
pub struct Cart {
    products: Vec<Product>,
    coupons: Vec<Coupon>,
    cart_price: Price,
    product_indices_by_name: HashMap<String, Vec<usize>>,
}

impl Cart {
    /// Creates a new, empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product, first replaying every active pending coupon against it.
    ///
    /// An `ApplyOnIndex` coupon fires when its index equals the number of
    /// products already recorded under the coupon's own name. The incoming
    /// product's name is not compared.
    ///
    /// Returns the price the product was added at, or `None` if a discount or
    /// the new total overflowed. In that case neither the product nor any
    /// coupon state is recorded.
    pub fn add_product(&mut self, mut product: Product) -> Option<Price> {
        let mut fired = Vec::new();
        for (slot, coupon) in self.coupons.iter().enumerate() {
            if !coupon.is_active() {
                continue;
            }
            let Some(discount) = coupon.discount else {
                continue;
            };
            let consumed = match coupon.r#type {
                CouponType::ApplyToAll => false,
                CouponType::ApplyNext => true,
                CouponType::ApplyOnIndex if self.is_index_matching(coupon) => true,
                CouponType::ApplyOnIndex => continue,
            };
            if product.apply_discount(discount, coupon.r#type).is_none() {
                warn!(product = %product.name, %discount, "discount overflowed, product not added");
                return None;
            }
            if consumed {
                fired.push(slot);
            }
            debug!(product = %product.name, coupon = ?coupon.r#type, %discount, "pending coupon fired");
        }

        let Some(cart_price) = self.cart_price.checked_add(product.price) else {
            warn!(product = %product.name, price = %product.price, "cart total overflowed, product not added");
            return None;
        };

        for slot in fired {
            self.coupons[slot].deactivate();
        }
        let price = product.price;
        self.products.push(product);
        let position = self.products.len() - 1;
        self.product_indices_by_name
            .entry(self.products[position].name.clone())
            .or_default()
            .push(position);
        self.cart_price = cart_price;
        Some(price)
    }

    /// Applies a coupon to the products already present, or queues it.
    ///
    /// Coupons without a discount, and index coupons without a product name,
    /// are silently ignored. An index coupon whose occurrence does not exist
    /// yet is queued rather than rejected.
    pub fn apply_coupon(&mut self, coupon: Coupon) -> CouponOutcome {
        let Some(discount) = coupon.discount else {
            debug!(coupon = ?coupon.r#type, "ignoring coupon without a discount");
            return CouponOutcome::Ignored;
        };
        if coupon.r#type == CouponType::ApplyOnIndex && coupon.product_name.is_none() {
            debug!("ignoring index coupon without a product name");
            return CouponOutcome::Ignored;
        }

        match coupon.r#type {
            CouponType::ApplyToAll => {
                let Some((prices, cart_price)) = self.discount_all(discount) else {
                    warn!(%discount, "discount overflowed, coupon not applied");
                    return CouponOutcome::Overflowed;
                };
                for (product, price) in self.products.iter_mut().zip(prices) {
                    product.price = price;
                }
                self.cart_price = cart_price;
                debug!(%discount, products = self.products.len(), "coupon applied to all products");
                CouponOutcome::Applied
            }
            CouponType::ApplyOnIndex => match self.target_position(&coupon) {
                Some(position) => {
                    let Some((price, cart_price)) = self.discount_one(position, discount) else {
                        warn!(%discount, position, "discount overflowed, coupon not applied");
                        return CouponOutcome::Overflowed;
                    };
                    self.products[position].price = price;
                    self.cart_price = cart_price;
                    debug!(%discount, position, "coupon applied to indexed product");
                    CouponOutcome::Applied
                }
                None => self.queue(coupon),
            },
            CouponType::ApplyNext => self.queue(coupon),
        }
    }

    /// The running total.
    pub fn cart_price(&self) -> Price {
        self.cart_price
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Pending coupons in queue order, including ones that already fired.
    pub fn pending_coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    pub fn active_coupon_count(&self) -> usize {
        self.coupons.iter().filter(|coupon| coupon.is_active()).count()
    }

    /// Positions in `products()` at which `name` was added, in order.
    pub fn occurrences(&self, name: &str) -> &[usize] {
        self.product_indices_by_name
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The `index`-th (zero-based) product added under `name`.
    pub fn product_at(&self, name: &str, index: usize) -> Option<&Product> {
        self.occurrences(name)
            .get(index)
            .map(|&position| &self.products[position])
    }

    fn queue(&mut self, coupon: Coupon) -> CouponOutcome {
        debug!(coupon = ?coupon.r#type, pending = self.coupons.len() + 1, "coupon queued");
        self.coupons.push(coupon);
        CouponOutcome::Queued
    }

    /// New prices for every product and the new total after a percentage
    /// discount on all of them.
    fn discount_all(&self, discount: Decimal) -> Option<(Vec<Price>, Price)> {
        let mut prices = Vec::with_capacity(self.products.len());
        let mut cart_price = self.cart_price;
        for product in &self.products {
            let (price, amount) = product.discounted(discount, CouponType::ApplyToAll)?;
            cart_price = cart_price.checked_sub(amount)?;
            prices.push(price);
        }
        Some((prices, cart_price))
    }

    fn discount_one(&self, position: usize, discount: Decimal) -> Option<(Price, Price)> {
        let (price, amount) =
            self.products[position].discounted(discount, CouponType::ApplyOnIndex)?;
        Some((price, self.cart_price.checked_sub(amount)?))
    }

    // An empty name counts as no name: such a coupon never resolves or fires.
    fn target_name(coupon: &Coupon) -> Option<&str> {
        coupon.product_name.as_deref().filter(|name| !name.is_empty())
    }

    fn is_index_matching(&self, coupon: &Coupon) -> bool {
        Self::target_name(coupon).is_some_and(|name| {
            coupon.product_index == Some(self.occurrences(name).len())
        })
    }

    fn target_position(&self, coupon: &Coupon) -> Option<usize> {
        let name = Self::target_name(coupon)?;
        let index = coupon.product_index?;
        self.occurrences(name).get(index).copied()
    }
}
