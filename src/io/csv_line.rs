//! Single-line CSV tokenizer.
//!
//! World Bank exports quote every field and never embed escaped quotes, so a
//! toggle-on-`"` scanner is enough. Malformed quoting never errors: an
//! unbalanced quote simply leaves the rest of the line in quoted mode.

/// Split one line into trimmed fields.
///
/// - commas inside a `"..."` span are kept as data
/// - quote characters are dropped
/// - the final field is always emitted, even without a trailing delimiter
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}
