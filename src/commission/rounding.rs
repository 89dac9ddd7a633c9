use super::Amount;
use rust_decimal::RoundingStrategy;

/// Round a currency amount to `decimal_places`, halves going away from zero
/// (0.125 -> 0.13, -0.125 -> -0.13).
pub fn round_currency(value: Amount, decimal_places: u32) -> Amount {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
}
