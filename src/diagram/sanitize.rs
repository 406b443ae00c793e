/// Characters that survive into Mermaid label text. Control characters
/// other than tab are dropped; newlines become spaces at the call site.
fn is_label_char(c: char) -> bool {
    c == '\t' || !c.is_control()
}

/// Escape free text for use inside a quoted Mermaid label.
/// Mermaid resolves `#quot;`-style entities inside `"..."` labels, which
/// keeps quotes and angle brackets from being read as node syntax or HTML.
pub fn escape_label(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\n' || c == '\r' {
            escaped.push(' ');
            continue;
        }
        if !is_label_char(c) {
            continue;
        }
        match c {
            '"' => escaped.push_str("#quot;"),
            '<' => escaped.push_str("#lt;"),
            '>' => escaped.push_str("#gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Normalize an arbitrary name into a syntax-legal Mermaid node identifier:
/// lower-case alphanumerics and underscores, no leading digit, never empty.
pub fn normalize_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    let mut last_underscore = false;
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            id.push(c.to_ascii_lowercase());
            last_underscore = false;
        } else if !last_underscore && !id.is_empty() {
            id.push('_');
            last_underscore = true;
        }
    }
    while id.ends_with('_') {
        id.pop();
    }
    if id.is_empty() {
        return "node".to_string();
    }
    if id.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("n{}", id);
    }
    id
}

/// Reduce a name to a class-diagram type identifier, keeping case.
/// Mermaid class names cannot contain spaces or punctuation.
pub fn type_ident(name: &str) -> String {
    let ident: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if ident.is_empty() {
        return "Entity".to_string();
    }
    ident
}

/// Strip characters that would break a class-diagram member line
pub fn sanitize_member(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|&c| is_label_char(c) && !matches!(c, '{' | '}' | '(' | ')' | '"'))
        .collect();
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::{escape_label, normalize_id, sanitize_member, type_ident};

    #[test]
    fn remove_invalid_control_chars() {
        let s = "A\u{0007}B\u{000C}C";
        assert_eq!(escape_label(s), "ABC");
    }

    #[test]
    fn escape_special_label_chars() {
        let s = r#"a "quoted" <tag>"#;
        assert_eq!(escape_label(s), "a #quot;quoted#quot; #lt;tag#gt;");
    }

    #[test]
    fn newlines_become_spaces() {
        assert_eq!(escape_label("line one\nline two"), "line one line two");
    }

    #[test]
    fn normalize_collapses_punctuation_runs() {
        assert_eq!(normalize_id("Payment - Provider!"), "payment_provider");
        assert_eq!(normalize_id("  Order  DB  "), "order_db");
    }

    #[test]
    fn normalize_never_yields_illegal_ids() {
        assert_eq!(normalize_id(""), "node");
        assert_eq!(normalize_id("!!!"), "node");
        assert_eq!(normalize_id("3rd party"), "n3rd_party");
    }

    #[test]
    fn type_ident_drops_spaces_keeps_case() {
        assert_eq!(type_ident("Order Item"), "OrderItem");
        assert_eq!(type_ident("***"), "Entity");
    }

    #[test]
    fn member_lines_lose_block_syntax() {
        assert_eq!(sanitize_member("total (gross) {EUR}"), "total gross EUR");
    }
}
