//! Canonicalization of category labels and sequence numbers
//!
//! Both functions are total: unrecognized input is returned unchanged so
//! callers can surface it for review instead of failing.

/// Normalize a shot category label to its canonical token
///
/// Recognized spellings (case-insensitive):
/// - "3points", "3pts", "3pt" -> "3pt"
/// - "freethrow" -> "freethrow"
///
/// Anything else passes through unchanged.
pub fn normalize_category(label: &str) -> String {
    match label.to_lowercase().as_str() {
        "3points" | "3pts" | "3pt" => "3pt".to_string(),
        "freethrow" => "freethrow".to_string(),
        _ => label.to_string(),
    }
}

/// Format a sequence number as a zero-padded decimal string
///
/// Pads to 3 digits; wider numbers keep all their digits. Non-numeric
/// input passes through unchanged.
pub fn format_sequence(raw: &str) -> String {
    match raw.parse::<u64>() {
        Ok(n) => format!("{:03}", n),
        Err(_) => raw.to_string(),
    }
}
