//! TEXT value escaping.

use std::borrow::Cow;

/// Prefix every `,` and `;` with a backslash.
///
/// Nothing else is touched: backslashes and newlines pass through as-is.
/// Not idempotent, so never feed it text that was already escaped.
pub fn escape_text(value: &str) -> Cow<'_, str> {
    if !value.contains([',', ';']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        if c == ',' || c == ';' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}
