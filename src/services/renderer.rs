use serde::Serialize;
use tracing::debug;

use crate::{
    errors::CartError,
    models::cart::{Cart, CartItem, Money},
};

pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartRow {
    pub name: String,
    pub image: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub subtotal: Money,
}

/// Editable cart listing shown on the cart page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CartView {
    pub rows: Vec<CartRow>,
    pub total: Money,
}

impl CartView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub name: String,
    pub quantity: u32,
    pub subtotal: Money,
}

/// Read-only listing shown on the checkout page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderSummaryView {
    pub rows: Vec<SummaryRow>,
    pub total: Money,
}

fn checked(item: &CartItem) -> Result<Money, CartError> {
    item.check_integrity()
        .map_err(|details| CartError::integrity(format!("Invalid cart item: {}", details)))
}

fn add_to_total(total: Money, subtotal: Money) -> Result<Money, CartError> {
    total
        .checked_add(subtotal)
        .ok_or_else(|| CartError::integrity("Cart total exceeds the representable amount"))
}

pub fn render_cart_view(cart: &Cart) -> Result<CartView, CartError> {
    let mut view = CartView::default();

    for item in cart.items() {
        let subtotal = checked(item)?;
        debug!(
            "Rendering item: {}, Quantity: {}, Subtotal: {}",
            item.name, item.quantity, subtotal
        );
        view.rows.push(CartRow {
            name: item.name.clone(),
            image: item.image.clone(),
            unit_price: Money::from_price(item.price).unwrap_or(subtotal),
            quantity: item.quantity,
            subtotal,
        });
        view.total = add_to_total(view.total, subtotal)?;
    }

    debug!("Cart total calculated: {}", view.total);
    Ok(view)
}

pub fn render_order_summary(cart: &Cart) -> Result<OrderSummaryView, CartError> {
    let mut view = OrderSummaryView::default();

    for item in cart.items() {
        let subtotal = checked(item)?;
        debug!("Order summary item: {}, Subtotal: {}", item.name, subtotal);
        view.rows.push(SummaryRow {
            name: item.name.clone(),
            quantity: item.quantity,
            subtotal,
        });
        view.total = add_to_total(view.total, subtotal)?;
    }

    debug!("Order total: {}", view.total);
    Ok(view)
}
