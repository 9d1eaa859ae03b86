// src/view/escape.rs
//! Escaping for text and attribute interpolation

/// Neutralizes `& < > " '` for insertion into element content.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Attribute variant: also neutralizes the backtick.
pub fn escape_attr(input: &str) -> String {
    escape_html(input).replace('`', "&#96;")
}
