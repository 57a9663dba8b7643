pub mod coupon;
pub mod event;
pub mod price;
pub mod product;
