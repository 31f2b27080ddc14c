use console::style;
use tabled::{
    settings::{Alignment, Style},
    Table, Tabled,
};

use crate::models::checkout::OrderReceipt;
use crate::page::{Notice, NoticeLevel};
use crate::services::renderer::{CartView, OrderSummaryView, EMPTY_CART_MESSAGE};

#[derive(Tabled)]
struct CartTableRow {
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Subtotal")]
    subtotal: String,
}

#[derive(Tabled)]
struct SummaryTableRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Subtotal")]
    subtotal: String,
}

pub fn format_cart_table(view: &CartView, currency: &str) -> String {
    if view.is_empty() {
        return style(EMPTY_CART_MESSAGE).dim().to_string();
    }

    let rows: Vec<CartTableRow> = view
        .rows
        .iter()
        .map(|row| CartTableRow {
            name: if row.name.chars().count() > 30 {
                format!("{}...", row.name.chars().take(27).collect::<String>())
            } else {
                row.name.clone()
            },
            price: row.unit_price.display_with(currency),
            quantity: row.quantity,
            subtotal: row.subtotal.display_with(currency),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded()).with(Alignment::left());

    format!(
        "{}\n{}: {}",
        table,
        style("Total").bold(),
        style(view.total.display_with(currency)).green()
    )
}

pub fn format_order_summary(view: &OrderSummaryView, currency: &str) -> String {
    let rows: Vec<SummaryTableRow> = view
        .rows
        .iter()
        .map(|row| SummaryTableRow {
            item: format!("{} (x{})", row.name, row.quantity),
            subtotal: row.subtotal.display_with(currency),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded()).with(Alignment::left());

    format!(
        "{}\n{}: {}",
        table,
        style("Order total").bold(),
        style(view.total.display_with(currency)).green()
    )
}

pub fn format_notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Info => format!("✅ {}", style(&notice.message).green()),
        NoticeLevel::Error => format!("❌ {}", style(&notice.message).red()),
    }
}

pub fn format_receipt(receipt: &OrderReceipt, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}: {}\n", style("Order").bold(), style(receipt.reference).cyan()));
    output.push_str(&format!(
        "{}: {}\n",
        style("Placed").bold(),
        style(receipt.placed_at.format("%Y-%m-%d %H:%M:%S %:z")).dim()
    ));
    output.push_str(&format!(
        "{}: {} line(s), {} unit(s)\n",
        style("Items").bold(),
        receipt.line_count,
        receipt.unit_count
    ));
    output.push_str(&format!(
        "{}: {}\n",
        style("Total").bold(),
        style(receipt.total.display_with(currency)).green()
    ));
    output.push_str(&format!(
        "{}: {}, {}\n",
        style("Ship to").bold(),
        receipt.customer.full_name,
        receipt.customer.shipping_address
    ));

    output
}
