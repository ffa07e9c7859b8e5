//! Custom checks shared by request DTOs.

use rust_decimal::Decimal;
use uuid::Uuid;
use validator::ValidationError;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("blank", "must not be blank"));
    }
    Ok(())
}

pub fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(error("negative", "must not be negative"));
    }
    Ok(())
}

pub fn positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(error("not_positive", "must be greater than zero"));
    }
    Ok(())
}

pub fn not_nil(value: &Uuid) -> Result<(), ValidationError> {
    if value.is_nil() {
        return Err(error("nil", "must be a valid id"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn checks() {
        assert!(not_blank(" x ").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(non_negative(&dec!(0)).is_ok());
        assert!(non_negative(&dec!(-0.01)).is_err());
        assert!(positive(&dec!(0)).is_err());
        assert!(positive(&dec!(0.01)).is_ok());
        assert!(not_nil(&Uuid::nil()).is_err());
        assert!(not_nil(&Uuid::new_v4()).is_ok());
    }
}
