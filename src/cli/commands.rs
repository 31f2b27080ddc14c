use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::{
    cli::{args::Commands, terminal::TerminalPage},
    models::checkout::FormField,
    page::{CartPage, PageEvent, PageKind, Surface},
    services::{CartService, CheckoutFinalizer},
    storage::{repositories::LocalCartRepository, FileStorage},
    utils::Config,
};

pub struct CliApp {
    config: Config,
    storage: Arc<FileStorage>,
}

impl CliApp {
    pub fn new(config: Config, storage_dir: Option<PathBuf>) -> Result<Self> {
        let dir = storage_dir.unwrap_or_else(|| config.storage_dir.clone());
        let storage = FileStorage::open(&dir)
            .with_context(|| format!("Failed to open cart storage at {}", dir.display()))?;
        info!("Cart storage at {}", storage.root().display());

        Ok(Self {
            config,
            storage: Arc::new(storage),
        })
    }

    fn open_page(&self, page: TerminalPage) -> Result<CartPage<TerminalPage>> {
        let repository = Arc::new(LocalCartRepository::new(self.storage.clone()));
        let carts = CartService::new(repository);
        let checkout = CheckoutFinalizer::new(self.config.offset()?);
        let mut page = CartPage::new(carts, checkout, page);
        page.dispatch(PageEvent::Load);
        Ok(page)
    }

    pub fn run(&self, command: Commands) -> Result<()> {
        let currency = self.config.currency.as_str();

        let (page, event) = match command {
            Commands::Add { name, price, image } => (
                TerminalPage::new(PageKind::Cart, currency),
                Some(PageEvent::AddToCart { name, price, image }),
            ),
            Commands::Remove { name } => (
                TerminalPage::new(PageKind::Cart, currency),
                Some(PageEvent::RemoveFromCart { name }),
            ),
            Commands::SetQty { name, quantity } => (
                TerminalPage::new(PageKind::Cart, currency),
                Some(PageEvent::UpdateQuantity {
                    name,
                    quantity: Some(quantity),
                }),
            ),
            Commands::Show => (TerminalPage::new(PageKind::Cart, currency), None),
            Commands::Refresh => (
                TerminalPage::new(PageKind::Cart, currency),
                Some(PageEvent::RefreshCart),
            ),
            Commands::Summary => (TerminalPage::new(PageKind::Checkout, currency), None),
            Commands::Coupon { code } => (
                TerminalPage::new(PageKind::Cart, currency).with_input(Surface::CouponCode, &code),
                Some(PageEvent::ApplyCoupon),
            ),
            Commands::Checkout {
                full_name,
                mobile_number,
                shipping_address,
                delivery_time,
                no_prompt,
            } => {
                let prompt = !no_prompt && console::user_attended();
                let mut page = TerminalPage::new(PageKind::Checkout, currency);
                for (field, given) in [
                    (FormField::FullName, full_name),
                    (FormField::MobileNumber, mobile_number),
                    (FormField::ShippingAddress, shipping_address),
                    (FormField::DeliveryTime, delivery_time),
                ] {
                    let value = match given {
                        Some(value) => value,
                        None if prompt => ask(field)?,
                        None => String::new(),
                    };
                    page = page.with_input(Surface::for_field(field), &value);
                }
                (page, Some(PageEvent::CompletePurchase))
            }
        };

        let mut page = self.open_page(page)?;
        if let Some(event) = event {
            page.dispatch(event);
        }
        page.port_mut().flush();
        Ok(())
    }
}

fn ask(field: FormField) -> Result<String> {
    let value = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(field.label())
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}
