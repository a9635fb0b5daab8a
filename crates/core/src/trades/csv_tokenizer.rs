//! Line tokenizer and header normalizer for broker ledgers.
//!
//! Lines are split before tokenizing, so quoted fields cannot span lines.

/// Splits one CSV line into trimmed field values.
///
/// A `"` toggles quoting, except that `""` inside a quoted section emits a
/// literal quote. Commas outside quotes end the current field. Each field is
/// then trimmed, loses one leading and one trailing quote character, and has
/// any remaining `""` collapsed to `"`.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());

    fields.iter().map(|field| clean_field(field)).collect()
}

fn clean_field(field: &str) -> String {
    let field = field.strip_prefix(['"', '\'']).unwrap_or(field);
    let field = field.strip_suffix(['"', '\'']).unwrap_or(field);
    field.replace("\"\"", "\"").trim().to_string()
}

/// Canonical form of a header token: trimmed, without line breaks or quotes,
/// `&amp;` decoded and lower-cased.
pub fn normalize_header(token: &str) -> String {
    token
        .trim()
        .replace(['\r', '\n', '"'], "")
        .replace("&amp;", "&")
        .to_lowercase()
}

/// Normalizes every header token, keeping order and duplicates.
pub fn normalize_headers(tokens: &[String]) -> Vec<String> {
    tokens.iter().map(|t| normalize_header(t)).collect()
}
