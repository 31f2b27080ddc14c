use std::sync::Arc;

use cart_manager::page::{
    CartPage, HeadlessPage, NoticeLevel, PageEvent, PresentationPort, Surface, CART_UPDATED_NOTICE,
    CORRUPT_CART_NOTICE,
};
use cart_manager::services::{CartService, CheckoutFinalizer, COUPON_NOT_IMPLEMENTED, EMPTY_CART_MESSAGE};
use cart_manager::storage::repositories::{LocalCartRepository, CART_KEY};
use cart_manager::storage::{KeyValueStore, MemoryStorage};
use chrono::FixedOffset;

fn open_page(storage: &Arc<MemoryStorage>, port: HeadlessPage) -> CartPage<HeadlessPage> {
    let repo = Arc::new(LocalCartRepository::new(storage.clone()));
    let offset = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
    let mut page = CartPage::new(CartService::new(repo), CheckoutFinalizer::new(offset), port);
    page.dispatch(PageEvent::Load);
    page
}

fn add(page: &mut CartPage<HeadlessPage>, name: &str, price: f64) {
    page.dispatch(PageEvent::AddToCart {
        name: name.to_string(),
        price,
        image: format!("{}.png", name.to_lowercase()),
    });
}

#[test]
fn test_load_renders_empty_cart() {
    let storage = Arc::new(MemoryStorage::new());
    let page = open_page(&storage, HeadlessPage::cart_page("₹"));

    let items = page.port().content(Surface::CartItems).unwrap();
    assert!(items.contains(EMPTY_CART_MESSAGE));
    assert_eq!(page.port().content(Surface::CartTotal), Some("₹0.00"));
    assert!(page.port().notices().is_empty());
    assert_eq!(storage.get_item(CART_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_load_with_corrupt_data_notifies_and_resets() {
    let storage = Arc::new(MemoryStorage::with_item(CART_KEY, "definitely not json"));
    let page = open_page(&storage, HeadlessPage::cart_page("₹"));

    let notice = page.port().last_notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, CORRUPT_CART_NOTICE);
    assert_eq!(storage.get_item(CART_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_load_with_invalid_entries_notifies_repair() {
    let raw = r#"[{"name":"Mug","price":9.99,"quantity":1,"image":"mug.png"},{"name":"Bad","price":-1,"quantity":1,"image":"bad.png"}]"#;
    let storage = Arc::new(MemoryStorage::with_item(CART_KEY, raw));
    let page = open_page(&storage, HeadlessPage::cart_page("₹"));

    let notice = page.port().last_notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "1 invalid cart entry was removed or merged.");
    assert_eq!(page.port().content(Surface::CartTotal), Some("₹9.99"));
    assert_eq!(
        storage.get_item(CART_KEY).unwrap().as_deref(),
        Some(r#"[{"name":"Mug","price":9.99,"quantity":1,"image":"mug.png"}]"#)
    );

    let raw = r#"[{"name":"Mug","price":9.99,"quantity":1,"image":"mug.png"},{"name":"Bad","price":0,"quantity":1,"image":"bad.png"},{"name":"Mug","price":9.99,"quantity":2,"image":"mug.png"}]"#;
    let storage = Arc::new(MemoryStorage::with_item(CART_KEY, raw));
    let page = open_page(&storage, HeadlessPage::cart_page("₹"));

    let notice = page.port().last_notice().unwrap();
    assert_eq!(notice.message, "2 invalid cart entries were removed or merged.");
    assert_eq!(page.port().content(Surface::CartTotal), Some("₹29.97"));
}

#[test]
fn test_load_renders_order_summary_on_checkout_page() {
    let raw = r#"[{"name":"Shirt","price":19.99,"quantity":3,"image":"shirt.png"},{"name":"Pen","price":5.005,"quantity":2,"image":"pen.png"}]"#;
    let storage = Arc::new(MemoryStorage::with_item(CART_KEY, raw));
    let page = open_page(&storage, HeadlessPage::checkout_page("₹"));

    let summary = page.port().content(Surface::OrderSummary).unwrap();
    assert!(summary.contains("Shirt (x3)"));
    assert!(summary.contains("₹59.97"));
    assert!(summary.contains("₹10.01"));
    assert_eq!(page.port().content(Surface::OrderTotal), Some("₹69.98"));
    assert!(page.port().content(Surface::CartItems).is_none());
}

#[test]
fn test_add_notifies_and_rerenders() {
    let storage = Arc::new(MemoryStorage::new());
    let mut page = open_page(&storage, HeadlessPage::cart_page("₹"));

    add(&mut page, "Mug", 9.99);
    add(&mut page, "Mug", 9.99);

    let notice = page.port().last_notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(notice.message, "Mug added to cart!");
    assert_eq!(page.port().content(Surface::CartTotal), Some("₹19.98"));
    assert!(page
        .port()
        .content(Surface::CartItems)
        .unwrap()
        .contains(r#"value="2" min="1""#));
}

#[test]
fn test_add_with_invalid_price_reports_failure() {
    let storage = Arc::new(MemoryStorage::new());
    let mut page = open_page(&storage, HeadlessPage::cart_page("₹"));

    add(&mut page, "Mug", -1.0);

    let notice = page.port().last_notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.starts_with("Failed to add item to cart:"));
    assert!(page.carts().cart().is_empty());
}

#[test]
fn test_oversized_price_is_rejected_and_cart_stays_renderable() {
    let storage = Arc::new(MemoryStorage::new());
    let mut page = open_page(&storage, HeadlessPage::cart_page("$"));

    add(&mut page, "Yacht", 1e17);
    add(&mut page, "Yacht", 1e17);

    let notices = page.port().notices();
    assert_eq!(notices.len(), 2);
    assert!(notices
        .iter()
        .all(|n| n.message.starts_with("Failed to add item to cart:")));
    assert!(page.carts().cart().is_empty());
    assert_eq!(page.port().content(Surface::CartTotal), Some("$0.00"));

    add(&mut page, "Mug", 9.99);
    assert_eq!(page.port().content(Surface::CartTotal), Some("$9.99"));
}

#[test]
fn test_add_on_page_without_cart_view_only_notifies() {
    let storage = Arc::new(MemoryStorage::new());
    let mut page = open_page(&storage, HeadlessPage::blank("₹"));

    add(&mut page, "Mug", 9.99);

    assert_eq!(page.port().notices().len(), 1);
    assert!(!page.port().has_surface(Surface::CartItems));
    assert_eq!(page.carts().cart().len(), 1);
}

#[test]
fn test_quantity_edits() {
    let storage = Arc::new(MemoryStorage::new());
    let mut page = open_page(&storage, HeadlessPage::cart_page("₹"));
    add(&mut page, "Mug", 9.99);
    page.port_mut().clear_notices();

    page.dispatch(PageEvent::UpdateQuantity {
        name: "Mug".to_string(),
        quantity: Some("3".to_string()),
    });
    assert_eq!(page.port().content(Surface::CartTotal), Some("₹29.97"));

    page.dispatch(PageEvent::UpdateQuantity {
        name: "Mug".to_string(),
        quantity: Some("abc".to_string()),
    });
    assert_eq!(page.port().content(Surface::CartTotal), Some("₹29.97"));
    assert!(page.port().notices().is_empty());

    page.dispatch(PageEvent::UpdateQuantity {
        name: "Ghost".to_string(),
        quantity: Some("2".to_string()),
    });
    let notice = page.port().last_notice().unwrap();
    assert_eq!(
        notice.message,
        "Failed to update quantity: Item not found in cart: Ghost. Please try again."
    );

    page.dispatch(PageEvent::UpdateQuantity {
        name: "Mug".to_string(),
        quantity: Some("0".to_string()),
    });
    assert!(page
        .port()
        .content(Surface::CartItems)
        .unwrap()
        .contains(EMPTY_CART_MESSAGE));
}

#[test]
fn test_remove_rerenders() {
    let storage = Arc::new(MemoryStorage::new());
    let mut page = open_page(&storage, HeadlessPage::cart_page("₹"));
    add(&mut page, "Mug", 9.99);
    add(&mut page, "Tea", 4.5);

    page.dispatch(PageEvent::RemoveFromCart {
        name: "Mug".to_string(),
    });

    let items = page.port().content(Surface::CartItems).unwrap();
    assert!(!items.contains("Mug"));
    assert!(items.contains("Tea"));
    assert_eq!(page.port().content(Surface::CartTotal), Some("₹4.50"));
}

#[test]
fn test_refresh_cart_notifies() {
    let storage = Arc::new(MemoryStorage::new());
    let mut page = open_page(&storage, HeadlessPage::cart_page("₹"));

    page.dispatch(PageEvent::RefreshCart);

    assert_eq!(page.port().last_notice().unwrap().message, CART_UPDATED_NOTICE);
}

#[test]
fn test_coupon_placeholder() {
    let storage = Arc::new(MemoryStorage::new());
    let mut page = open_page(&storage, HeadlessPage::cart_page("₹"));
    page.port_mut().set_value(Surface::CouponCode, "SAVE10");

    page.dispatch(PageEvent::ApplyCoupon);
    assert_eq!(page.port().last_notice().unwrap().message, COUPON_NOT_IMPLEMENTED);

    let mut page = open_page(&storage, HeadlessPage::blank("₹"));
    page.dispatch(PageEvent::ApplyCoupon);
    let notice = page.port().last_notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(
        notice.message,
        "Failed to apply coupon: Coupon code input not found. Please try again."
    );
}

#[test]
fn test_state_survives_page_reload() {
    let storage = Arc::new(MemoryStorage::new());
    let mut page = open_page(&storage, HeadlessPage::blank("₹"));
    add(&mut page, "Mug", 9.99);

    let reloaded = open_page(&storage, HeadlessPage::cart_page("$"));

    assert_eq!(reloaded.port().content(Surface::CartTotal), Some("$9.99"));
}

struct FaultyPage {
    notices: Vec<cart_manager::page::Notice>,
}

impl PresentationPort for FaultyPage {
    fn has_surface(&self, _surface: Surface) -> bool {
        true
    }

    fn read_value(&self, _surface: Surface) -> Option<String> {
        Some(String::new())
    }

    fn show_cart(&mut self, _view: &cart_manager::services::CartView) {
        panic!("cart element detached");
    }

    fn show_order_summary(&mut self, _view: &cart_manager::services::OrderSummaryView) {}

    fn notify(&mut self, notice: cart_manager::page::Notice) {
        self.notices.push(notice);
    }

    fn navigate(&mut self, _page: cart_manager::page::PageKind) {}
}

#[test]
fn test_dispatch_turns_panics_into_a_notice() {
    let storage = Arc::new(MemoryStorage::new());
    let repo = Arc::new(LocalCartRepository::new(storage.clone()));
    let offset = FixedOffset::east_opt(0).unwrap();
    let mut page = CartPage::new(
        CartService::new(repo),
        CheckoutFinalizer::new(offset),
        FaultyPage { notices: Vec::new() },
    );

    page.dispatch(PageEvent::Load);
    page.dispatch(PageEvent::RefreshCart);

    let notices = &page.port().notices;
    assert_eq!(notices.len(), 2);
    assert!(notices
        .iter()
        .all(|n| n.level == NoticeLevel::Error && n.message.contains("cart element detached")));
}
