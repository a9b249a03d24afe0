//! HTTP handlers: argument extraction and status translation only.

pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;
pub use pizza::*;
pub use restaurant::*;
pub use restaurant_pizza::*;
