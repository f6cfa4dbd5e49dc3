use ethers_core::types::U256;

/// Numerator of the multiplier applied to every gas estimate (1.2 = 12 / 10)
pub const GAS_MULTIPLIER_NUMERATOR: u64 = 12;
/// Denominator of the gas estimate multiplier
pub const GAS_MULTIPLIER_DENOMINATOR: u64 = 10;

/// Pads a node's gas estimate by 20%, rounding to the nearest gas unit with ties going away
/// from zero. An estimate too large to scale is returned unpadded, so the result is never below
/// the estimate.
pub fn pad_gas_estimate(estimate: U256) -> U256 {
    let denominator = U256::from(GAS_MULTIPLIER_DENOMINATOR);
    let Some(scaled) = estimate.checked_mul(U256::from(GAS_MULTIPLIER_NUMERATOR)) else {
        return estimate;
    };
    let (quotient, remainder) = scaled.div_mod(denominator);
    if remainder * U256::from(2u64) >= denominator {
        quotient + U256::one()
    } else {
        quotient
    }
}
