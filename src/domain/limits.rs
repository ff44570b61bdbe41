//! Bounds of the storage columns, checked before any write so that values
//! are never rounded or truncated by the database.

use bigdecimal::BigDecimal;

use super::errors::DomainError;

/// `NUMERIC(12, 2)`: two decimals, ten integer digits.
pub const MONEY_SCALE: i64 = 2;
pub const MONEY_INTEGER_DIGITS: u32 = 10;

pub const NAME_MAX: usize = 255;
pub const CATEGORY_NAME_MAX: usize = 100;
pub const PHONE_MAX: usize = 50;
pub const PAYMENT_METHOD_MAX: usize = 50;
pub const SIZE_MAX: usize = 20;
pub const CUSTOM_NAME_MAX: usize = 50;
pub const CUSTOM_NUMBER_MAX: usize = 10;

pub fn check_amount(amount: &BigDecimal) -> Result<(), DomainError> {
    let (_, scale) = amount.normalized().as_bigint_and_exponent();
    let ceiling = BigDecimal::from(10_i64.pow(MONEY_INTEGER_DIGITS));
    if scale > MONEY_SCALE || amount.abs() >= ceiling {
        return Err(DomainError::InvalidInput("InvalidAmount"));
    }
    Ok(())
}

/// Lengths count characters, as `VARCHAR(n)` does.
pub fn check_len(value: &str, max: usize) -> Result<(), DomainError> {
    if value.chars().count() > max {
        return Err(DomainError::InvalidInput("FieldTooLong"));
    }
    Ok(())
}
