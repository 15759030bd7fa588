//! Formatting helpers for reference codes, phone numbers and file names.

/// Default number of digits in a reference code's sequence part.
pub const DEFAULT_CODE_WIDTH: usize = 6;

/// Builds a reference code such as `GRP-000123`.
///
/// The sequence is zero-padded to `width` digits; longer sequences are kept
/// whole.
///
/// ```
/// use tourdesk_core::formatting::generate_code;
///
/// assert_eq!(generate_code("GRP", 123, 6), "GRP-000123");
/// assert_eq!(generate_code("INV", 1_234_567, 6), "INV-1234567");
/// ```
#[must_use]
pub fn generate_code(prefix: &str, sequence: u64, width: usize) -> String {
    format!("{}-{sequence:0width$}", prefix.trim())
}

/// Formats a Peruvian phone number.
///
/// Non-digits are dropped. Nine digits (mobile) become `XXX XXX XXX`, seven
/// digits (landline) become `XXX XXXX`, and any other length is returned as
/// bare digits. Returns `None` when there are no digits at all.
#[must_use]
pub fn format_phone_number(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        0 => None,
        9 => Some(format!("{} {} {}", &digits[..3], &digits[3..6], &digits[6..])),
        7 => Some(format!("{} {}", &digits[..3], &digits[3..])),
        _ => Some(digits),
    }
}

/// Makes a file name safe for storage.
///
/// The stem is lower-cased, stripped of anything but word characters,
/// whitespace and hyphens, and runs of whitespace or hyphens collapse to a
/// single `-`. The extension after the last dot is kept as is.
///
/// ```
/// use tourdesk_core::formatting::slugify_filename;
///
/// assert_eq!(slugify_filename("Voucher Hotel (Cusco).PDF"), "voucher-hotel-cusco.PDF");
/// ```
#[must_use]
pub fn slugify_filename(filename: &str) -> String {
    let (stem, extension) = match filename.rsplit_once('.') {
        Some((stem, extension)) => (stem, Some(extension)),
        None => (filename, None),
    };

    let mut slug = String::with_capacity(stem.len());
    let mut pending_separator = false;
    for c in stem.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() || c == '-' {
            pending_separator = true;
        } else if c.is_alphanumeric() || c == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        }
    }

    match extension {
        Some(extension) if !extension.is_empty() => format!("{slug}.{extension}"),
        _ => slug,
    }
}
