use std::fmt;

use crate::models::checkout::{FormField, OrderReceipt};
use crate::services::renderer::{CartView, OrderSummaryView};

/// Named element a page may or may not provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    CartItems,
    CartTotal,
    OrderSummary,
    OrderTotal,
    CouponCode,
    FullName,
    MobileNumber,
    ShippingAddress,
    DeliveryTime,
}

impl Surface {
    pub fn id(self) -> &'static str {
        match self {
            Surface::CartItems => "cart-items",
            Surface::CartTotal => "cart-total",
            Surface::OrderSummary => "order-summary",
            Surface::OrderTotal => "order-total",
            Surface::CouponCode => "coupon-code",
            Surface::FullName => "full-name",
            Surface::MobileNumber => "mobile-number",
            Surface::ShippingAddress => "shipping-address",
            Surface::DeliveryTime => "delivery-time",
        }
    }

    pub fn for_field(field: FormField) -> Self {
        match field {
            FormField::FullName => Surface::FullName,
            FormField::MobileNumber => Surface::MobileNumber,
            FormField::ShippingAddress => Surface::ShippingAddress,
            FormField::DeliveryTime => Surface::DeliveryTime,
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Cart,
    Checkout,
}

impl PageKind {
    pub fn path(self) -> &'static str {
        match self {
            PageKind::Cart => "cart.html",
            PageKind::Checkout => "checkout.html",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A blocking message shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// What the cart core needs from the page it runs in.
pub trait PresentationPort {
    fn has_surface(&self, surface: Surface) -> bool;

    /// Current value of an input surface, `None` if the page lacks it.
    fn read_value(&self, surface: Surface) -> Option<String>;

    fn show_cart(&mut self, view: &CartView);
    fn show_order_summary(&mut self, view: &OrderSummaryView);
    fn notify(&mut self, notice: Notice);
    fn navigate(&mut self, page: PageKind);

    /// Called once an order is finalized, before navigating away.
    fn order_placed(&mut self, _receipt: &OrderReceipt) {}
}
