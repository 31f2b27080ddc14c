use std::sync::Arc;

use crate::errors::CartError;
use crate::models::cart::{Cart, CartItem, RepairReport};
use crate::storage::KeyValueStore;

pub const CART_KEY: &str = "cart";

/// How a [`CartRepository::load`] obtained its cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydration {
    /// Nothing was stored; an empty cart was written.
    Initialized,
    Restored,
    /// Stored records broke the item schema and were dropped or merged.
    Repaired(RepairReport),
    /// Stored data did not parse; an empty cart was written over it.
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCart {
    pub cart: Cart,
    pub hydration: Hydration,
}

/// Cart persistence operations
pub trait CartRepository: Send + Sync {
    fn load(&self) -> Result<LoadedCart, CartError>;
    fn save(&self, cart: &Cart) -> Result<(), CartError>;
}

/// Stores the cart as a JSON array under the `cart` key.
pub struct LocalCartRepository {
    storage: Arc<dyn KeyValueStore>,
}

impl LocalCartRepository {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    fn reset(&self) -> Result<LoadedCart, CartError> {
        let cart = Cart::new();
        self.save(&cart)?;
        Ok(LoadedCart {
            cart,
            hydration: Hydration::Reset,
        })
    }
}

impl CartRepository for LocalCartRepository {
    fn load(&self) -> Result<LoadedCart, CartError> {
        let Some(raw) = self.storage.get_item(CART_KEY)? else {
            tracing::info!("No cart data in storage, starting with empty cart");
            let cart = Cart::new();
            self.save(&cart)?;
            return Ok(LoadedCart {
                cart,
                hydration: Hydration::Initialized,
            });
        };

        let records: Vec<CartItem> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                let error = CartError::CorruptPersistedState(e);
                tracing::error!("{}; resetting cart", error);
                return self.reset();
            }
        };

        let (cart, report) = Cart::repaired(records);
        if report.is_clean() {
            tracing::info!("Cart loaded from storage: {} item(s)", cart.len());
            return Ok(LoadedCart {
                cart,
                hydration: Hydration::Restored,
            });
        }

        tracing::warn!(
            "Stored cart repaired: {} record(s) dropped, {} merged",
            report.dropped,
            report.merged
        );
        self.save(&cart)?;
        Ok(LoadedCart {
            cart,
            hydration: Hydration::Repaired(report),
        })
    }

    fn save(&self, cart: &Cart) -> Result<(), CartError> {
        let raw = serde_json::to_string(cart).map_err(CartError::Serialization)?;
        self.storage.set_item(CART_KEY, &raw)?;
        tracing::debug!("Cart saved to storage: {}", raw);
        Ok(())
    }
}
