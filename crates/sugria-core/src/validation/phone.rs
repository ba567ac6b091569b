//! Nigerian phone number validation and E.164 normalization.
//!
//! Accepted inputs, after stripping every non-digit character:
//!
//! | Digits | Prefix  | Example          | Normalized        |
//! |--------|---------|------------------|-------------------|
//! | 10     | 7, 8, 9 | `8012345678`     | `+2348012345678`  |
//! | 11     | `0`     | `08012345678`    | `+2348012345678`  |
//! | 13     | `234`   | `2348012345678`  | `+2348012345678`  |
//! | 14     | `2340`  | `23408012345678` | `+2348012345678`  |

use thiserror::Error;

/// Country calling code prepended to every normalized number.
pub const COUNTRY_CODE: &str = "234";

/// Why a phone number was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    #[error("Invalid phone number: expected 10, 11, 13 or 14 digits, got {digits}")]
    Length { digits: usize },
    #[error("Invalid phone number: {digits}-digit numbers must start with {expected}")]
    Prefix { digits: usize, expected: &'static str },
}

fn digits_only(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Extract the 10-digit subscriber number from an accepted input.
fn subscriber(digits: &str) -> Result<&str, PhoneError> {
    match digits.len() {
        10 if digits.starts_with(['7', '8', '9']) => Ok(digits),
        10 => Err(PhoneError::Prefix {
            digits: 10,
            expected: "7, 8 or 9",
        }),
        11 if digits.starts_with('0') => Ok(&digits[1..]),
        11 => Err(PhoneError::Prefix {
            digits: 11,
            expected: "0",
        }),
        13 if digits.starts_with(COUNTRY_CODE) => Ok(&digits[3..]),
        13 => Err(PhoneError::Prefix {
            digits: 13,
            expected: "234",
        }),
        14 if digits.starts_with("2340") => Ok(&digits[4..]),
        14 => Err(PhoneError::Prefix {
            digits: 14,
            expected: "2340",
        }),
        n => Err(PhoneError::Length { digits: n }),
    }
}

/// Whether `phone` is an accepted Nigerian number in any supported format.
pub fn validate_phone_number(phone: &str) -> bool {
    subscriber(&digits_only(phone)).is_ok()
}

/// Normalize an accepted phone number to `+234XXXXXXXXXX`.
///
/// # Errors
///
/// Returns [`PhoneError`] when the digit count or prefix is not one of the
/// accepted formats.
///
/// # Examples
///
/// ```rust
/// use sugria_core::validation::format_phone_number;
///
/// assert_eq!(format_phone_number("0801 234 5678")?, "+2348012345678");
/// assert_eq!(format_phone_number("+234 801 234 5678")?, "+2348012345678");
/// assert!(format_phone_number("12345").is_err());
/// # Ok::<(), sugria_core::validation::PhoneError>(())
/// ```
pub fn format_phone_number(phone: &str) -> Result<String, PhoneError> {
    let digits = digits_only(phone);
    let subscriber = subscriber(&digits)?;
    Ok(format!("+{COUNTRY_CODE}{subscriber}"))
}
