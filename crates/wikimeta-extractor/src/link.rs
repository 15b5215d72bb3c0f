//! Cross-reference path construction

/// Characters that may not appear in a document path
pub const ILLEGAL_PATH_CHARS: [char; 8] = ['*', '/', ':', '#', '?', '<', '>', '"'];

/// Replacement used for illegal characters in labels
pub const LABEL_REPLACEMENT: &str = "_";

/// Placeholder for the sanitized label
pub const LABEL_PLACEHOLDER: &str = "${label}";

/// Placeholder for the identifier digits
pub const ID_PLACEHOLDER: &str = "${id}";

/// Replace illegal path characters positionally
///
/// The Nth illegal character found is replaced with the Nth character of
/// `replacement`, clamped to its last character once exhausted. An empty
/// replacement removes illegal characters.
pub fn sanitize_with(label: &str, replacement: &str) -> String {
    let replacement: Vec<char> = replacement.chars().collect();
    let mut found = 0usize;
    let mut out = String::with_capacity(label.len());

    for c in label.chars() {
        if ILLEGAL_PATH_CHARS.contains(&c) {
            if let Some(last) = replacement.len().checked_sub(1) {
                out.push(replacement[found.min(last)]);
            }
            found += 1;
        } else {
            out.push(c);
        }
    }

    out
}

/// Sanitize a label for use in a path
pub fn sanitize_label(label: &str) -> String {
    sanitize_with(label, LABEL_REPLACEMENT)
}

/// Build a cross-reference path from a template
///
/// Every `${label}` in the template is replaced with the sanitized label and
/// every `${id}` with `id` as given, in a single pass: placeholders appearing
/// inside the substituted text are left alone. Nothing else is altered.
///
/// # Examples
///
/// ```
/// use wikimeta_extractor::build_link;
///
/// assert_eq!(build_link("db/${label}-${id}.md", "A/B:C", "42"), "db/A_B_C-42.md");
/// ```
pub fn build_link(template: &str, label: &str, id: &str) -> String {
    let label = sanitize_label(label);
    let mut out = String::with_capacity(template.len() + label.len());
    let mut rest = template;

    while let Some(pos) = rest.find("${") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix(LABEL_PLACEHOLDER) {
            out.push_str(&label);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(ID_PLACEHOLDER) {
            out.push_str(id);
            rest = after;
        } else {
            out.push_str("${");
            rest = &tail[2..];
        }
    }
    out.push_str(rest);

    out
}
