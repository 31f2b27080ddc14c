use console::style;
use std::collections::HashMap;

use crate::{
    models::checkout::OrderReceipt,
    page::{Notice, PageKind, PresentationPort, Surface},
    services::renderer::{CartView, OrderSummaryView},
    utils::formatting::{format_cart_table, format_notice, format_order_summary, format_receipt},
};

/// Terminal stand-in for a browser page. Notices print immediately; the
/// latest rendered view prints on [`TerminalPage::flush`].
pub struct TerminalPage {
    kind: PageKind,
    currency: String,
    inputs: HashMap<Surface, String>,
    cart: Option<CartView>,
    summary: Option<OrderSummaryView>,
}

impl TerminalPage {
    pub fn new(kind: PageKind, currency: &str) -> Self {
        Self {
            kind,
            currency: currency.to_string(),
            inputs: HashMap::new(),
            cart: None,
            summary: None,
        }
    }

    pub fn with_input(mut self, surface: Surface, value: &str) -> Self {
        self.inputs.insert(surface, value.to_string());
        self
    }

    pub fn flush(&mut self) {
        if let Some(view) = self.cart.take() {
            println!("{}", format_cart_table(&view, &self.currency));
        }
        if let Some(view) = self.summary.take() {
            println!("{}", format_order_summary(&view, &self.currency));
        }
    }
}

impl PresentationPort for TerminalPage {
    fn has_surface(&self, surface: Surface) -> bool {
        match self.kind {
            PageKind::Cart => matches!(
                surface,
                Surface::CartItems | Surface::CartTotal | Surface::CouponCode
            ),
            PageKind::Checkout => matches!(
                surface,
                Surface::OrderSummary
                    | Surface::OrderTotal
                    | Surface::FullName
                    | Surface::MobileNumber
                    | Surface::ShippingAddress
                    | Surface::DeliveryTime
            ),
        }
    }

    fn read_value(&self, surface: Surface) -> Option<String> {
        if !self.has_surface(surface) {
            return None;
        }
        Some(self.inputs.get(&surface).cloned().unwrap_or_default())
    }

    fn show_cart(&mut self, view: &CartView) {
        self.cart = Some(view.clone());
    }

    fn show_order_summary(&mut self, view: &OrderSummaryView) {
        self.summary = Some(view.clone());
    }

    fn notify(&mut self, notice: Notice) {
        println!("{}", format_notice(&notice));
    }

    fn navigate(&mut self, page: PageKind) {
        println!("{} {}", style("→").cyan(), page.path());
    }

    fn order_placed(&mut self, receipt: &OrderReceipt) {
        print!("{}", format_receipt(receipt, &self.currency));
    }
}
