//! # Shared Utility Functions
//!
//! Helpers used by both the relay server and the session client.
//!
//! - [`strip_data_url`] - Take the base64 payload out of a `data:` URL
//! - [`format_size`] - Format a byte count for display
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{format_size, strip_data_url};
//!
//! assert_eq!(strip_data_url("data:application/pdf;base64,JVBER"), "JVBER");
//! assert_eq!(format_size(2048), "2.0 KB");
//! ```

/// Return the payload of a `data:<mime>;base64,<payload>` URL.
///
/// Strings without a data URL prefix are returned unchanged.
pub fn strip_data_url(value: &str) -> &str {
    if !value.starts_with("data:") {
        return value;
    }
    match value.split_once(',') {
        Some((_, payload)) => payload,
        None => value,
    }
}

/// Format a byte count using binary units with one decimal.
///
/// ```rust
/// use shared::utils::format_size;
///
/// assert_eq!(format_size(512), "512 B");
/// assert_eq!(format_size(1536), "1.5 KB");
/// assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let value = bytes as f64;
    if value < KB {
        format!("{} B", bytes)
    } else if value < MB {
        format!("{:.1} KB", value / KB)
    } else {
        format!("{:.1} MB", value / MB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_data_url_leaves_plain_payload() {
        assert_eq!(strip_data_url("AAAA"), "AAAA");
        assert_eq!(strip_data_url("data:image/jpeg;base64,/9j/"), "/9j/");
        assert_eq!(strip_data_url("data:broken"), "data:broken");
    }
}
