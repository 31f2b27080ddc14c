use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use validator::{Validate, ValidationError};

/// An amount in minor currency units (cents, paise).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    pub fn minor(self) -> i64 {
        self.0
    }

    /// `price * quantity` rounded to two decimals, or `None` when the result
    /// does not fit in an `i64` of minor units.
    pub fn subtotal(price: f64, quantity: u32) -> Option<Self> {
        let minor = (price * f64::from(quantity) * 100.0).round();
        // 2^63 is exact as an f64; anything at or past it would saturate.
        if !minor.is_finite() || minor.abs() >= 9_223_372_036_854_775_808.0 {
            return None;
        }
        Some(Money(minor as i64))
    }

    pub fn from_price(price: f64) -> Option<Self> {
        Self::subtotal(price, 1)
    }

    pub fn checked_add(self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn display_with(self, currency: &str) -> String {
        format!("{}{}", currency, self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CartItem {
    #[validate(custom = "validate_not_blank")]
    pub name: String,

    #[serde(serialize_with = "serialize_price")]
    pub price: f64,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,

    #[validate(custom = "validate_not_blank")]
    pub image: String,
}

pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Whole prices are written as JSON integers (`10`, not `10.0`) so that a
/// stored cart survives a load and save byte for byte.
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if price.fract() == 0.0 && price.abs() < 9_007_199_254_740_992.0 {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

/// Positive, finite, and small enough that one unit fits in [`Money`].
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0 && Money::from_price(price).is_some()
}

impl CartItem {
    pub fn new(name: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            quantity: 1,
            image: image.into(),
        }
    }

    pub fn subtotal(&self) -> Option<Money> {
        Money::subtotal(self.price, self.quantity)
    }

    /// Checks the fields a view needs to price this line and returns its subtotal.
    pub fn check_integrity(&self) -> Result<Money, String> {
        if !is_valid_price(self.price) || self.quantity < 1 {
            return Err(self.describe());
        }
        self.subtotal()
            .ok_or_else(|| format!("subtotal out of range for {}", self.describe()))
    }

    /// Full schema check applied to records read back from storage.
    pub fn is_well_formed(&self) -> bool {
        self.validate().is_ok() && is_valid_price(self.price)
    }

    pub fn describe(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

/// What [`Cart::repaired`] had to fix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub dropped: usize,
    pub merged: usize,
}

impl RepairReport {
    pub fn is_clean(&self) -> bool {
        self.dropped == 0 && self.merged == 0
    }
}

/// Ordered cart lines keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps `items` as-is, without checking the schema or name uniqueness.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// Builds a cart from untrusted records: malformed records are dropped
    /// and records sharing a name are folded into the first occurrence.
    pub fn repaired(records: Vec<CartItem>) -> (Self, RepairReport) {
        let mut report = RepairReport::default();
        let mut cart = Cart::new();

        for record in records {
            if !record.is_well_formed() {
                report.dropped += 1;
                continue;
            }
            match cart.find_mut(&record.name) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(record.quantity);
                    report.merged += 1;
                }
                None => cart.items.push(record),
            }
        }

        (cart, report)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.name == name)
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.name == name)
    }

    /// Increments `name` if present, appends it otherwise. Returns the new quantity.
    pub fn add(&mut self, name: &str, price: f64, image: &str) -> u32 {
        if let Some(existing) = self.find_mut(name) {
            existing.quantity = existing.quantity.saturating_add(1);
            return existing.quantity;
        }
        self.items.push(CartItem::new(name, price, image));
        1
    }

    /// Removes every line named `name`, returning how many went.
    pub fn remove_all(&mut self, name: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.name != name);
        before - self.items.len()
    }

    /// Returns `false` when no line is named `name`.
    pub fn set_quantity(&mut self, name: &str, quantity: u32) -> bool {
        match self.find_mut(name) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of the line subtotals; `None` if any line or the sum overflows.
    pub fn total(&self) -> Option<Money> {
        self.items
            .iter()
            .try_fold(Money::ZERO, |acc, item| acc.checked_add(item.subtotal()?))
    }

    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
