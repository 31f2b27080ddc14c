use chrono::{FixedOffset, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    errors::CartError,
    models::checkout::{CheckoutForm, CheckoutState, FormField, OrderReceipt},
    services::cart_service::CartService,
};

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// Nothing to buy; state untouched.
    EmptyCart,
    /// Required fields were empty after trimming; state untouched.
    BlankFields(Vec<FormField>),
    Completed(OrderReceipt),
}

/// Validates the checkout form and finalizes the order locally.
pub struct CheckoutFinalizer {
    state: CheckoutState,
    offset: FixedOffset,
}

impl CheckoutFinalizer {
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            state: CheckoutState::AwaitingInput,
            offset,
        }
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// `read_field` yields the raw input value, or `None` when the page has
    /// no input for that field.
    pub fn finalize<F>(
        &mut self,
        carts: &mut CartService,
        read_field: F,
    ) -> Result<CheckoutOutcome, CartError>
    where
        F: Fn(FormField) -> Option<String>,
    {
        if carts.cart().is_empty() {
            info!("Attempted purchase with empty cart");
            return Ok(CheckoutOutcome::EmptyCart);
        }

        if self.state == CheckoutState::Completed {
            debug!("Starting a new checkout cycle");
            self.state = CheckoutState::AwaitingInput;
        }

        let values: Vec<(FormField, Option<String>)> = FormField::ALL
            .into_iter()
            .map(|field| (field, read_field(field)))
            .collect();
        let missing: Vec<&str> = values
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(field, _)| field.label())
            .collect();
        if !missing.is_empty() {
            return Err(CartError::integrity(format!(
                "One or more checkout form fields are missing: {}",
                missing.join(", ")
            )));
        }

        let value_of = |wanted: FormField| {
            values
                .iter()
                .find(|(field, _)| *field == wanted)
                .and_then(|(_, value)| value.as_deref())
                .unwrap_or_default()
        };
        let form = CheckoutForm::new(
            value_of(FormField::FullName),
            value_of(FormField::MobileNumber),
            value_of(FormField::ShippingAddress),
            value_of(FormField::DeliveryTime),
        );

        let blank = form.blank_fields();
        if !blank.is_empty() {
            warn!("Form validation failed: missing required fields {:?}", blank);
            return Ok(CheckoutOutcome::BlankFields(blank));
        }

        info!("Completing purchase with details: {:?}", form);
        let cart = carts.cart();
        let total = cart
            .total()
            .ok_or_else(|| CartError::integrity("Cart total exceeds the representable amount"))?;
        let receipt = OrderReceipt {
            reference: Uuid::new_v4(),
            line_count: cart.len(),
            unit_count: cart.unit_count(),
            total,
            placed_at: Utc::now().with_timezone(&self.offset),
            customer: form,
        };

        carts.clear()?;
        self.state = CheckoutState::Completed;

        info!(
            "Order {} placed: {} line(s), total {}",
            receipt.reference, receipt.line_count, receipt.total
        );
        Ok(CheckoutOutcome::Completed(receipt))
    }
}
