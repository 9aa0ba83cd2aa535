//! Helpers for sanitizing data before it enters tracing span attributes.
//!
//! Uploaded file names often carry identity numbers (e.g. an Aadhaar
//! number typed into the name). These functions keep them out of logs.

use std::path::Path;

/// Masks every run of four or more digits with `#`.
///
/// - `aadhaar_1234 5678 9012.jpg` → `aadhaar_#### #### ####.jpg`
/// - `photo_2024.jpg` → `photo_####.jpg`
/// - `sign_01.png` → `sign_01.png` (no change)
pub fn redact_name(name: &str) -> String {
    let mut output = String::with_capacity(name.len());
    let mut digits = String::new();

    for c in name.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        flush_digits(&mut output, &mut digits);
        output.push(c);
    }
    flush_digits(&mut output, &mut digits);

    output
}

fn flush_digits(output: &mut String, digits: &mut String) {
    if digits.len() >= 4 {
        output.extend(std::iter::repeat('#').take(digits.len()));
    } else {
        output.push_str(digits);
    }
    digits.clear();
}

/// Returns only the redacted filename component of a path.
pub fn redact_path(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(redact_name)
        .unwrap_or_else(|| "<unknown>".to_string())
}
