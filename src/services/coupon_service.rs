use tracing::info;

use crate::errors::CartError;

pub const COUPON_NOT_IMPLEMENTED: &str = "Coupon functionality not implemented yet.";

/// Placeholder: accepts the coupon input and applies nothing.
///
/// `code` is `None` when the page has no coupon input.
pub fn apply_coupon(code: Option<&str>) -> Result<&'static str, CartError> {
    let code = code.ok_or_else(|| CartError::not_found("Coupon code input not found"))?;
    info!("Applying coupon: {:?}", code);
    Ok(COUPON_NOT_IMPLEMENTED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_is_not_found() {
        assert!(matches!(
            apply_coupon(None),
            Err(CartError::NotFound { .. })
        ));
    }

    #[test]
    fn any_code_reports_not_implemented() {
        assert_eq!(apply_coupon(Some("SAVE10")).unwrap(), COUPON_NOT_IMPLEMENTED);
        assert_eq!(apply_coupon(Some("")).unwrap(), COUPON_NOT_IMPLEMENTED);
    }
}
