use std::collections::HashMap;

use super::markup;
use super::port::{Notice, PageKind, PresentationPort, Surface};
use crate::services::renderer::{CartView, OrderSummaryView};

/// In-memory page: surfaces are entries in an element map holding either the
/// rendered markup or the input's current value.
#[derive(Debug, Clone)]
pub struct HeadlessPage {
    currency: String,
    elements: HashMap<Surface, String>,
    notices: Vec<Notice>,
    navigations: Vec<PageKind>,
}

impl HeadlessPage {
    /// A page with no surfaces at all.
    pub fn blank(currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
            elements: HashMap::new(),
            notices: Vec::new(),
            navigations: Vec::new(),
        }
    }

    pub fn cart_page(currency: &str) -> Self {
        Self::blank(currency)
            .with_surface(Surface::CartItems)
            .with_surface(Surface::CartTotal)
            .with_surface(Surface::CouponCode)
    }

    pub fn checkout_page(currency: &str) -> Self {
        Self::blank(currency)
            .with_surface(Surface::OrderSummary)
            .with_surface(Surface::OrderTotal)
            .with_surface(Surface::FullName)
            .with_surface(Surface::MobileNumber)
            .with_surface(Surface::ShippingAddress)
            .with_surface(Surface::DeliveryTime)
    }

    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.elements.entry(surface).or_default();
        self
    }

    pub fn without_surface(mut self, surface: Surface) -> Self {
        self.elements.remove(&surface);
        self
    }

    /// Types into an input; ignored if the page lacks it.
    pub fn set_value(&mut self, surface: Surface, value: &str) {
        if let Some(slot) = self.elements.get_mut(&surface) {
            *slot = value.to_string();
        }
    }

    pub fn content(&self, surface: Surface) -> Option<&str> {
        self.elements.get(&surface).map(String::as_str)
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn navigations(&self) -> &[PageKind] {
        &self.navigations
    }

    pub fn clear_notices(&mut self) {
        self.notices.clear();
    }

    fn write(&mut self, surface: Surface, content: String) {
        if let Some(slot) = self.elements.get_mut(&surface) {
            *slot = content;
        }
    }
}

impl PresentationPort for HeadlessPage {
    fn has_surface(&self, surface: Surface) -> bool {
        self.elements.contains_key(&surface)
    }

    fn read_value(&self, surface: Surface) -> Option<String> {
        self.elements.get(&surface).cloned()
    }

    fn show_cart(&mut self, view: &CartView) {
        let items = markup::cart_items(view, &self.currency);
        let total = markup::total_text(view.total, &self.currency);
        self.write(Surface::CartItems, items);
        self.write(Surface::CartTotal, total);
    }

    fn show_order_summary(&mut self, view: &OrderSummaryView) {
        let summary = markup::order_summary(view, &self.currency);
        let total = markup::total_text(view.total, &self.currency);
        self.write(Surface::OrderSummary, summary);
        self.write(Surface::OrderTotal, total);
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn navigate(&mut self, page: PageKind) {
        self.navigations.push(page);
    }
}
