//! Exact conversion of a whole-token supply into base units
//!
//! The mint instruction takes a `u64` count of base units, so the requested
//! supply is scaled by `10^decimals` in decimal arithmetic and only converted
//! once the result is known to be an integer inside the `u64` range.

use rust_decimal::{prelude::ToPrimitive, Decimal};

use crate::core::{AmountError, MAX_DECIMALS};

/// Scale factor for `decimals`
pub fn scale_factor(decimals: u8) -> Result<u64, AmountError> {
    if decimals > MAX_DECIMALS {
        return Err(AmountError::DecimalsOutOfRange {
            decimals,
            max: MAX_DECIMALS,
        });
    }
    Ok(10u64.pow(decimals as u32))
}

/// Number of base units minted for `supply` whole tokens
pub fn raw_amount(supply: &Decimal, decimals: u8) -> Result<u64, AmountError> {
    if supply.is_sign_negative() || supply.is_zero() {
        return Err(AmountError::NonPositive);
    }

    let factor = Decimal::from(scale_factor(decimals)?);
    let scaled = supply.checked_mul(factor).ok_or(AmountError::Overflow)?;

    if !scaled.fract().is_zero() {
        return Err(AmountError::FractionalRemainder { decimals });
    }

    scaled.trunc().to_u64().ok_or(AmountError::Overflow)
}
