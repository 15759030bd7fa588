//! RUC check-digit validation.

/// Number of digits in a RUC.
pub const RUC_LENGTH: usize = 11;

/// Weights applied to the first ten digits.
const WEIGHTS: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

/// Returns true if `tax_id` is exactly 11 ASCII digits with a correct check digit.
///
/// The check digit is `11 - (weighted sum mod 11)`, where 11 maps to 0 and 10
/// maps to 1.
///
/// ```
/// use tourdesk_core::documents::validate_tax_id;
///
/// assert!(validate_tax_id("20131312955"));
/// assert!(!validate_tax_id("20131312954"));
/// assert!(!validate_tax_id("2013131295"));
/// ```
#[must_use]
pub fn validate_tax_id(tax_id: &str) -> bool {
    let bytes = tax_id.as_bytes();
    if bytes.len() != RUC_LENGTH || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }

    let digit = |b: u8| u32::from(b - b'0');
    let sum: u32 = bytes
        .iter()
        .zip(WEIGHTS)
        .map(|(&b, weight)| digit(b) * weight)
        .sum();

    let check = match 11 - sum % 11 {
        11 => 0,
        10 => 1,
        other => other,
    };

    digit(bytes[RUC_LENGTH - 1]) == check
}
