use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

use super::cart::{validate_not_blank, Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormField {
    FullName,
    MobileNumber,
    ShippingAddress,
    DeliveryTime,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::FullName,
        FormField::MobileNumber,
        FormField::ShippingAddress,
        FormField::DeliveryTime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::FullName => "Full name",
            FormField::MobileNumber => "Mobile number",
            FormField::ShippingAddress => "Shipping address",
            FormField::DeliveryTime => "Delivery time",
        }
    }

    fn from_field_name(name: &str) -> Option<Self> {
        match name {
            "full_name" => Some(FormField::FullName),
            "mobile_number" => Some(FormField::MobileNumber),
            "shipping_address" => Some(FormField::ShippingAddress),
            "delivery_time" => Some(FormField::DeliveryTime),
            _ => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The four checkout inputs, already trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CheckoutForm {
    #[validate(custom = "validate_not_blank")]
    pub full_name: String,

    #[validate(custom = "validate_not_blank")]
    pub mobile_number: String,

    #[validate(custom = "validate_not_blank")]
    pub shipping_address: String,

    #[validate(custom = "validate_not_blank")]
    pub delivery_time: String,
}

impl CheckoutForm {
    pub fn new(
        full_name: &str,
        mobile_number: &str,
        shipping_address: &str,
        delivery_time: &str,
    ) -> Self {
        Self {
            full_name: full_name.trim().to_string(),
            mobile_number: mobile_number.trim().to_string(),
            shipping_address: shipping_address.trim().to_string(),
            delivery_time: delivery_time.trim().to_string(),
        }
    }

    /// Fields left empty, in form order.
    pub fn blank_fields(&self) -> Vec<FormField> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => {
                let failed = errors.field_errors();
                FormField::ALL
                    .into_iter()
                    .filter(|field| {
                        failed
                            .keys()
                            .any(|name| FormField::from_field_name(name) == Some(*field))
                    })
                    .collect()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutState {
    #[default]
    AwaitingInput,
    Completed,
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutState::AwaitingInput => write!(f, "awaiting input"),
            CheckoutState::Completed => write!(f, "completed"),
        }
    }
}

/// Local acknowledgment of a finalized order. Nothing is sent anywhere.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderReceipt {
    pub reference: Uuid,
    pub line_count: usize,
    pub unit_count: u64,
    pub total: Money,
    pub placed_at: DateTime<FixedOffset>,
    pub customer: CheckoutForm,
}
