//! Common-name extraction from classification model output.
//!
//! Species labels come out of the model as `"<index> <scientific> (<common>)"`,
//! and the same shape is embedded in free-text device messages.

/// Parse the human-readable common name out of a raw label.
///
/// 1. If the string contains a space, drop everything up to and including the
///    first space (removes the leading numeric class index).
/// 2. If the remainder contains `(`, take the substring strictly between the
///    first `(` and the first `)`; an unterminated `(` yields everything
///    after it.
/// 3. Otherwise the remainder is returned unchanged. A string with neither a
///    space nor parentheses comes back as-is; that is the intended fallback,
///    not an error.
pub fn common_name(label: &str) -> String {
    let rest = match label.find(' ') {
        Some(pos) => &label[pos + 1..],
        None => label,
    };

    match rest.find('(') {
        Some(open) => {
            let inner = &rest[open + 1..];
            match inner.find(')') {
                Some(close) => inner[..close].to_string(),
                None => inner.to_string(),
            }
        }
        None => rest.to_string(),
    }
}
