pub mod cart_service;
pub mod checkout_service;
pub mod coupon_service;
pub mod renderer;

pub use cart_service::*;
pub use checkout_service::*;
pub use coupon_service::*;
pub use renderer::*;
