//! Random alphanumeric token generation.

use rand::{Rng, distr::Alphanumeric};

/// Length of a payment ID.
pub const PAYMENT_ID_LEN: usize = 16;

/// Length of a payment token.
pub const PAYMENT_TOKEN_LEN: usize = 32;

/// Length of a shipment identifier.
pub const SHIPMENT_ID_LEN: usize = 32;

/// Generates a random token of uppercase, lowercase, and digit
/// characters, drawn from the thread-local CSPRNG.
pub fn alphanumeric_token(length: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
