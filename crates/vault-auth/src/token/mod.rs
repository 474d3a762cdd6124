//! Token minting, wire encoding, and claim validation.

pub mod claims;
pub mod codec;
pub mod validator;

pub use claims::{Claims, RawClaims};
pub use codec::TokenCodec;
pub use validator::{ClaimValidator, ClaimViolation};
