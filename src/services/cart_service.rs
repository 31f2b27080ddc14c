use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    errors::CartError,
    models::cart::{Cart, CartItem},
    storage::repositories::{CartRepository, Hydration},
};

lazy_static! {
    static ref QUANTITY_PREFIX: Regex = Regex::new(r"^\s*([+-]?\d+)").unwrap();
}

/// Reads the leading integer of a quantity field: `"3abc"` is 3, `"1.9"` is 1,
/// `"abc"` is `None`. Out-of-range values saturate.
pub fn parse_quantity(raw: &str) -> Option<i64> {
    let digits = QUANTITY_PREFIX.captures(raw)?.get(1)?.as_str();
    Some(digits.parse::<i64>().unwrap_or(if digits.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}

/// Growth that would push a subtotal or the total out of [`Money`] range is
/// refused, so a stored cart can always be rendered.
fn ensure_priced(next: &Cart) -> Result<(), CartError> {
    match next.total() {
        Some(_) => Ok(()),
        None => Err(CartError::invalid_argument(
            "Cart total would exceed the representable amount",
        )),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The raw value was not a number; nothing changed.
    Unparsed,
    Updated(u32),
    Removed,
}

/// Owns the in-memory cart and writes every change through to the repository.
pub struct CartService {
    repository: Arc<dyn CartRepository>,
    cart: Cart,
}

impl CartService {
    pub fn new(repository: Arc<dyn CartRepository>) -> Self {
        Self {
            repository,
            cart: Cart::new(),
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Hydrate from storage, replacing whatever is held in memory.
    pub fn load(&mut self) -> Result<Hydration, CartError> {
        let loaded = self.repository.load()?;
        debug!("Cart hydrated ({:?}): {:?}", loaded.hydration, loaded.cart);
        self.cart = loaded.cart;
        Ok(loaded.hydration)
    }

    pub fn save(&self) -> Result<(), CartError> {
        self.repository.save(&self.cart)
    }

    /// Persist `next` and only then adopt it, so a failed write leaves
    /// memory matching what is stored.
    fn commit(&mut self, next: Cart) -> Result<(), CartError> {
        self.repository.save(&next)?;
        self.cart = next;
        Ok(())
    }

    /// Add one unit of `name`; returns the resulting quantity.
    pub fn add_item(&mut self, name: &str, price: f64, image: &str) -> Result<u32, CartError> {
        if !CartItem::new(name, price, image).is_well_formed() {
            return Err(CartError::invalid_argument(format!(
                "Invalid arguments for addItem (name: {:?}, price: {}, image: {:?})",
                name, price, image
            )));
        }
        info!("Attempting to add: {}, {}, {}", name, price, image);

        let mut next = self.cart.clone();
        let quantity = next.add(name, price, image);
        ensure_priced(&next)?;
        self.commit(next)?;

        if quantity == 1 {
            info!("Added new item: {}", name);
        } else {
            info!("Incremented quantity for {}: {}", name, quantity);
        }
        Ok(quantity)
    }

    /// Remove every line named `name`; returns how many were removed.
    pub fn remove_item(&mut self, name: &str) -> Result<usize, CartError> {
        if name.is_empty() {
            return Err(CartError::invalid_argument(
                "Product name is required for removeItem",
            ));
        }
        info!("Removing item: {}", name);

        let mut next = self.cart.clone();
        let removed = next.remove_all(name);
        self.commit(next)?;

        if removed == 0 {
            debug!("No item named {} in cart", name);
        }
        Ok(removed)
    }

    pub fn set_quantity(
        &mut self,
        name: &str,
        raw_quantity: Option<&str>,
    ) -> Result<QuantityChange, CartError> {
        let raw = match raw_quantity {
            Some(raw) if !name.is_empty() => raw,
            _ => {
                return Err(CartError::invalid_argument(
                    "Product name and quantity are required for setQuantity",
                ))
            }
        };
        info!("Updating quantity for {} to {:?}", name, raw);

        let Some(quantity) = parse_quantity(raw) else {
            warn!("Invalid quantity for {}: {:?}", name, raw);
            return Ok(QuantityChange::Unparsed);
        };

        if self.cart.find(name).is_none() {
            return Err(CartError::not_found(format!(
                "Item not found in cart: {}",
                name
            )));
        }

        if quantity < 1 {
            info!("Quantity less than 1, removing {}", name);
            self.remove_item(name)?;
            return Ok(QuantityChange::Removed);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let mut next = self.cart.clone();
        next.set_quantity(name, quantity);
        ensure_priced(&next)?;
        self.commit(next)?;

        info!("Quantity updated for {}: {}", name, quantity);
        Ok(QuantityChange::Updated(quantity))
    }

    /// Empty the cart and persist the reset.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.commit(Cart::new())?;
        info!("Cart cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quantity_reads_leading_integer() {
        assert_eq!(parse_quantity("3"), Some(3));
        assert_eq!(parse_quantity("  12"), Some(12));
        assert_eq!(parse_quantity("3abc"), Some(3));
        assert_eq!(parse_quantity("1.9"), Some(1));
        assert_eq!(parse_quantity("-2"), Some(-2));
        assert_eq!(parse_quantity("+4"), Some(4));
        assert_eq!(parse_quantity("0"), Some(0));
    }

    #[test]
    fn parse_quantity_rejects_non_numeric() {
        assert_eq!(parse_quantity("abc"), None);
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("   "), None);
        assert_eq!(parse_quantity("- 3"), None);
    }

    #[test]
    fn parse_quantity_saturates_huge_values() {
        assert_eq!(parse_quantity("99999999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_quantity("-99999999999999999999999"), Some(i64::MIN));
    }
}
