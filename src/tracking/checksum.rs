//! Tracking-number format and checksum arithmetic.
//!
//! A tracking number is exactly 10 ASCII digits: a 2-digit carrier prefix,
//! a 7-digit zero-padded body, and one check digit. The check digit is a
//! weighted sum over the first 9 digits: the digit at 0-indexed position `i`
//! (from the left) counts three times when `i` is odd, once when `i` is even,
//! and the check digit is `(10 - (sum mod 10)) mod 10`.
//!
//! [`validate`] is a pure function; verifying a number received from a
//! carrier webhook or a user-entered lookup needs no store round trip.

use super::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Carrier prefix stamped on every generated number.
pub const CARRIER_PREFIX: &str = "94";

/// Total length of a tracking number, check digit included.
pub const TRACKING_LEN: usize = 10;

/// Number of distinct 7-digit bodies a number can carry.
pub const BODY_SPACE: u32 = 10_000_000;

/// A checksum-valid shipment identifier.
///
/// Construct one with [`TrackingNumber::parse`] (validating) or receive one
/// from the generator. The inner string is guaranteed to satisfy [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackingNumber(String);

impl TrackingNumber {
    /// Validates `s` and wraps it.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        validate(s)?;
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the number for a random body in `[0, 10_000_000)`:
    /// prefix + zero-padded body + computed check digit.
    pub(crate) fn compose(body: u32) -> Self {
        let mut payload = format!("{}{:07}", CARRIER_PREFIX, body);
        let check = check_digit(&payload);
        payload.push((b'0' + check) as char);
        Self(payload)
    }
}

impl fmt::Display for TrackingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TrackingNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Checks that `s` is a well-formed, checksum-valid tracking number.
///
/// Strings that are not exactly 10 ASCII digits fail with
/// [`ValidationError::InvalidFormat`] before any arithmetic is attempted;
/// well-formed strings with a wrong final digit fail with
/// [`ValidationError::ChecksumMismatch`].
pub fn validate(s: &str) -> Result<(), ValidationError> {
    if s.len() != TRACKING_LEN || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat);
    }
    let (payload, check) = s.split_at(TRACKING_LEN - 1);
    if check.as_bytes()[0] - b'0' != check_digit(payload) {
        return Err(ValidationError::ChecksumMismatch);
    }
    Ok(())
}

/// Weighted-sum check digit over a 9-digit payload.
/// The payload must already be ASCII digits.
fn check_digit(payload: &str) -> u8 {
    let sum: u32 = payload
        .bytes()
        .map(|b| u32::from(b - b'0'))
        .enumerate()
        .map(|(i, d)| if i % 2 == 1 { d * 3 } else { d })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    // Worked example: payload 001234567 has weighted sum
    // 0+0+1+6+3+12+5+18+7 = 52, so the check digit is (10 - 2) % 10 = 8.
    #[test]
    fn test_check_digit_worked_example() {
        assert_eq!(check_digit("001234567"), 8);
        assert!(validate("0012345678").is_ok());
    }

    #[test]
    fn test_check_digit_wraps_to_zero() {
        // Weighted sum 9+3+9+3+9+3+9+3+9... pick a payload summing to a
        // multiple of 10: 000000000 sums to 0, check digit is 0.
        assert_eq!(check_digit("000000000"), 0);
        assert!(validate("0000000000").is_ok());
    }

    #[test]
    fn test_compose_carries_prefix_and_checksum() {
        let number = TrackingNumber::compose(1234567);
        assert_eq!(number.as_str().len(), TRACKING_LEN);
        assert!(number.as_str().starts_with(CARRIER_PREFIX));
        assert_eq!(number.as_str(), "9412345677");
        assert!(validate(number.as_str()).is_ok());
    }

    #[test]
    fn test_compose_zero_pads_short_bodies() {
        let number = TrackingNumber::compose(42);
        assert!(number.as_str().starts_with("940000042"));
        assert!(validate(number.as_str()).is_ok());
    }

    #[test]
    fn test_validate_rejects_corrupted_check_digit() {
        // Flip the valid check digit by one in each direction.
        assert_eq!(validate("0012345679"), Err(ValidationError::ChecksumMismatch));
        assert_eq!(validate("0012345677"), Err(ValidationError::ChecksumMismatch));
    }

    #[test]
    fn test_validate_rejects_malformed_input() {
        assert_eq!(validate(""), Err(ValidationError::InvalidFormat));
        assert_eq!(validate("001234567"), Err(ValidationError::InvalidFormat));
        assert_eq!(validate("00123456789"), Err(ValidationError::InvalidFormat));
        assert_eq!(validate("00123456 8"), Err(ValidationError::InvalidFormat));
        assert_eq!(validate("00l2345678"), Err(ValidationError::InvalidFormat));
    }

    #[test]
    fn test_parse_round_trip() {
        let number = TrackingNumber::parse("0012345678").unwrap();
        assert_eq!(number.to_string(), "0012345678");
        assert_eq!("0012345678".parse::<TrackingNumber>().unwrap(), number);
        assert!("0012345670".parse::<TrackingNumber>().is_err());
    }
}
