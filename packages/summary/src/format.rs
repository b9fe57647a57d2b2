//! Human-readable sizes and counts.

/// Binary unit prefixes used by [`get_size`].
const SIZE_UNITS: [&str; 6] = ["", "K", "M", "G", "T", "P"];

/// Decimal suffixes used by [`get_amount`].
const AMOUNT_UNITS: [&str; 5] = ["", "k", "m", "b", "tr"];

/// Format a byte count with a binary unit prefix and two decimals.
///
/// # Examples
/// ```
/// use github_summary::format::get_size;
///
/// assert_eq!(get_size(0), "0.00B");
/// assert_eq!(get_size(1536), "1.50KB");
/// ```
pub fn get_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = SIZE_UNITS[0];
    for (i, candidate) in SIZE_UNITS.iter().enumerate() {
        unit = candidate;
        if value < 1024.0 || i == SIZE_UNITS.len() - 1 {
            break;
        }
        value /= 1024.0;
    }
    format!("{value:.2}{unit}B")
}

/// Format a count with a decimal suffix.
///
/// Counts below 1000 print as plain integers.
///
/// # Examples
/// ```
/// use github_summary::format::get_amount;
///
/// assert_eq!(get_amount(500), "500");
/// assert_eq!(get_amount(1500), "1.50k");
/// ```
pub fn get_amount(amount: u64) -> String {
    if amount < 1000 {
        return amount.to_string();
    }

    let mut value = amount as f64;
    let mut unit = AMOUNT_UNITS[0];
    for (i, candidate) in AMOUNT_UNITS.iter().enumerate() {
        unit = candidate;
        if value < 1000.0 || i == AMOUNT_UNITS.len() - 1 {
            break;
        }
        value /= 1000.0;
    }
    format!("{value:.2}{unit}")
}
