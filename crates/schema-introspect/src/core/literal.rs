//! SQL string literal handling for reported default values.

/// Unescape a quoted SQL string literal.
///
/// Strips one leading and one trailing `quote` when both are present, then
/// collapses every doubled quote into a single one. Input that is not a
/// well-formed literal is handled best-effort and never rejected:
/// unbalanced or lone quotes are left as they are.
///
/// ```
/// use schema_introspect::core::literal::unescape_quoted;
///
/// assert_eq!(unescape_quoted("'it''s'", '\''), "it's");
/// assert_eq!(unescape_quoted("plain", '\''), "plain");
/// ```
pub fn unescape_quoted(value: &str, quote: char) -> String {
    let inner = value
        .strip_prefix(quote)
        .and_then(|rest| rest.strip_suffix(quote))
        .unwrap_or(value);

    let mut doubled = String::with_capacity(quote.len_utf8() * 2);
    doubled.push(quote);
    doubled.push(quote);

    inner.replace(&doubled, quote.encode_utf8(&mut [0; 4]))
}
