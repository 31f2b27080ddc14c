use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, info, warn};

use super::port::{Notice, PageKind, PresentationPort, Surface};
use crate::{
    errors::CartError,
    models::checkout::CheckoutState,
    services::{
        apply_coupon, render_cart_view, render_order_summary, CartService, CheckoutFinalizer,
        CheckoutOutcome,
    },
    storage::repositories::Hydration,
};

pub const CORRUPT_CART_NOTICE: &str =
    "Cart data was corrupted and has been reset. Please try adding items again.";
pub const EMPTY_CART_NOTICE: &str = "Your cart is empty!";
pub const BLANK_FIELDS_NOTICE: &str = "Please fill in all required fields.";
pub const ORDER_PLACED_NOTICE: &str =
    "Order placed successfully! Payment details will be sent via WhatsApp or Email.";
pub const CART_UPDATED_NOTICE: &str = "Cart updated!";

/// A user interaction or page lifecycle event.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Load,
    AddToCart {
        name: String,
        price: f64,
        image: String,
    },
    RemoveFromCart {
        name: String,
    },
    UpdateQuantity {
        name: String,
        quantity: Option<String>,
    },
    RefreshCart,
    ApplyCoupon,
    CompletePurchase,
}

/// Event-handling boundary between the cart core and a page. Every handler
/// logs its failures and turns them into exactly one notice.
pub struct CartPage<P: PresentationPort> {
    carts: CartService,
    checkout: CheckoutFinalizer,
    port: P,
}

impl<P: PresentationPort> CartPage<P> {
    pub fn new(carts: CartService, checkout: CheckoutFinalizer, port: P) -> Self {
        Self {
            carts,
            checkout,
            port,
        }
    }

    pub fn carts(&self) -> &CartService {
        &self.carts
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn checkout_state(&self) -> CheckoutState {
        self.checkout.state()
    }

    pub fn into_port(self) -> P {
        self.port
    }

    /// Runs one event, converting a panic in any handler into a generic
    /// diagnostic notice.
    pub fn dispatch(&mut self, event: PageEvent) {
        debug!("Dispatching {:?}", event);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.handle(event)));
        if let Err(payload) = outcome {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown error".to_string());
            error!("Unhandled error: {}", message);
            self.port.notify(Notice::error(format!(
                "An unexpected error occurred: {}. Please check the log for details.",
                message
            )));
        }
    }

    fn handle(&mut self, event: PageEvent) {
        match event {
            PageEvent::Load => self.hydrate(),
            PageEvent::AddToCart { name, price, image } => self.add_to_cart(&name, price, &image),
            PageEvent::RemoveFromCart { name } => self.remove_from_cart(&name),
            PageEvent::UpdateQuantity { name, quantity } => {
                self.update_quantity(&name, quantity.as_deref())
            }
            PageEvent::RefreshCart => self.refresh_cart(),
            PageEvent::ApplyCoupon => self.apply_coupon(),
            PageEvent::CompletePurchase => self.complete_purchase(),
        }
    }

    fn fail(&mut self, context: &str, summary: String, e: &CartError) {
        error!("Error in {}: {:?}", context, e);
        self.port.notify(Notice::error(summary));
    }

    /// Page load: rehydrate, then render whichever views the page has.
    pub fn hydrate(&mut self) {
        info!("Page loaded");
        match self.carts.load() {
            Ok(Hydration::Initialized) | Ok(Hydration::Restored) => {}
            Ok(Hydration::Reset) => self.port.notify(Notice::error(CORRUPT_CART_NOTICE)),
            Ok(Hydration::Repaired(report)) => self.port.notify(Notice::error(format!(
                "{} invalid cart entr{} removed or merged.",
                report.dropped + report.merged,
                if report.dropped + report.merged == 1 { "y was" } else { "ies were" }
            ))),
            Err(e) => {
                let summary = format!("Initialization failed: {}. Please refresh the page.", e);
                return self.fail("hydrate", summary, &e);
            }
        }

        if self.port.has_surface(Surface::CartItems) {
            debug!("Initializing cart rendering");
            self.render_cart();
        }
        if self.port.has_surface(Surface::OrderSummary) {
            debug!("Initializing order summary rendering");
            self.render_order_summary();
        }
    }

    pub fn add_to_cart(&mut self, name: &str, price: f64, image: &str) {
        match self.carts.add_item(name, price, image) {
            Ok(_) => {
                self.port.notify(Notice::info(format!("{} added to cart!", name)));
                self.render_cart();
            }
            Err(e) => {
                let summary = format!("Failed to add item to cart: {}. Please try again.", e);
                self.fail("add_to_cart", summary, &e);
            }
        }
    }

    pub fn remove_from_cart(&mut self, name: &str) {
        match self.carts.remove_item(name) {
            Ok(_) => self.render_cart(),
            Err(e) => {
                let summary = format!("Failed to remove item: {}. Please try again.", e);
                self.fail("remove_from_cart", summary, &e);
            }
        }
    }

    /// `quantity` is the raw field text; `None` when the field sent nothing.
    pub fn update_quantity(&mut self, name: &str, quantity: Option<&str>) {
        match self.carts.set_quantity(name, quantity) {
            Ok(change) => {
                debug!("Quantity change for {}: {:?}", name, change);
                self.render_cart();
            }
            Err(e) => {
                let summary = format!("Failed to update quantity: {}. Please try again.", e);
                self.fail("update_quantity", summary, &e);
            }
        }
    }

    pub fn refresh_cart(&mut self) {
        info!("Updating cart");
        self.render_cart();
        self.port.notify(Notice::info(CART_UPDATED_NOTICE));
    }

    pub fn apply_coupon(&mut self) {
        let code = self.port.read_value(Surface::CouponCode);
        match apply_coupon(code.as_deref()) {
            Ok(message) => self.port.notify(Notice::info(message)),
            Err(e) => {
                let summary = format!("Failed to apply coupon: {}. Please try again.", e);
                self.fail("apply_coupon", summary, &e);
            }
        }
    }

    pub fn complete_purchase(&mut self) {
        let port = &self.port;
        let outcome = self
            .checkout
            .finalize(&mut self.carts, |field| port.read_value(Surface::for_field(field)));

        match outcome {
            Ok(CheckoutOutcome::EmptyCart) => self.port.notify(Notice::error(EMPTY_CART_NOTICE)),
            Ok(CheckoutOutcome::BlankFields(_)) => {
                self.port.notify(Notice::error(BLANK_FIELDS_NOTICE))
            }
            Ok(CheckoutOutcome::Completed(receipt)) => {
                info!("Order receipt: {:?}", receipt);
                self.port.notify(Notice::info(ORDER_PLACED_NOTICE));
                self.port.order_placed(&receipt);
                self.port.navigate(PageKind::Cart);
            }
            Err(e) => {
                let summary = format!("Failed to complete purchase: {}. Please try again.", e);
                self.fail("complete_purchase", summary, &e);
            }
        }
    }

    pub fn render_cart(&mut self) {
        if !self.port.has_surface(Surface::CartItems) || !self.port.has_surface(Surface::CartTotal) {
            warn!("Cart elements not found on this page. Skipping render_cart.");
            return;
        }
        match render_cart_view(self.carts.cart()) {
            Ok(view) => self.port.show_cart(&view),
            Err(e) => {
                let summary = format!("Failed to render cart: {}. Please refresh the page.", e);
                self.fail("render_cart", summary, &e);
            }
        }
    }

    pub fn render_order_summary(&mut self) {
        if !self.port.has_surface(Surface::OrderSummary)
            || !self.port.has_surface(Surface::OrderTotal)
        {
            warn!("Order summary elements not found on this page. Skipping render_order_summary.");
            return;
        }
        match render_order_summary(self.carts.cart()) {
            Ok(view) => self.port.show_order_summary(&view),
            Err(e) => {
                let summary = format!(
                    "Failed to render order summary: {}. Please refresh the page.",
                    e
                );
                self.fail("render_order_summary", summary, &e);
            }
        }
    }
}
