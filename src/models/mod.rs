pub mod cart;
pub mod checkout;

pub use cart::*;
pub use checkout::*;
