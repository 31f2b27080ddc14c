//! HTML fragments for hosts that write into real page elements.

use crate::models::cart::Money;
use crate::services::renderer::{CartView, OrderSummaryView, EMPTY_CART_MESSAGE};

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn total_text(total: Money, currency: &str) -> String {
    total.display_with(currency)
}

/// Contents of `#cart-items`.
pub fn cart_items(view: &CartView, currency: &str) -> String {
    if view.is_empty() {
        return format!(
            r#"<p class="text-center text-gray-600 col-span-4">{}</p>"#,
            EMPTY_CART_MESSAGE
        );
    }

    let mut html = String::new();
    for row in &view.rows {
        let name = escape(&row.name);
        html.push_str(&format!(
            concat!(
                r#"<div class="grid grid-cols-4 gap-4 items-center">"#,
                r#"<div class="flex items-center"><img src="{image}" alt="{name}" class="w-12 h-12 object-cover rounded mr-4"><span>{name}</span></div>"#,
                r#"<div>{price}</div>"#,
                r#"<div class="flex items-center space-x-2">"#,
                r#"<input type="number" value="{quantity}" min="1" class="w-16 p-2 border rounded" data-item="{name}">"#,
                r#"<button class="text-red-500 hover:text-red-700 text-xl" data-remove="{name}">×</button>"#,
                r#"</div>"#,
                r#"<div>{subtotal}</div>"#,
                r#"</div>"#,
            ),
            image = escape(&row.image),
            name = name,
            price = row.unit_price.display_with(currency),
            quantity = row.quantity,
            subtotal = row.subtotal.display_with(currency),
        ));
    }
    html
}

/// Contents of `#order-summary`.
pub fn order_summary(view: &OrderSummaryView, currency: &str) -> String {
    view.rows
        .iter()
        .map(|row| {
            format!(
                r#"<div class="flex justify-between"><p>{} (x{})</p><p>{}</p></div>"#,
                escape(&row.name),
                row.quantity,
                row.subtotal.display_with(currency)
            )
        })
        .collect()
}
