use miette::{LabeledSpan, SourceSpan};

/// Turns a garde report into labels pointing at the offending TOML values.
pub fn to_labels(content: &str, report: &garde::Report) -> Vec<LabeledSpan> {
    report
        .iter()
        .map(|(path, error)| {
            let path_str = path.to_string();
            let span = find_span(content, &path_str).unwrap_or(SourceSpan::new(0.into(), 0));
            LabeledSpan::new_with_span(Some(error.to_string()), span)
        })
        .collect()
}

fn find_span(content: &str, path: &str) -> Option<SourceSpan> {
    // Array indices carry no name in TOML, so label the owning key.
    let key = path
        .split(|c| c == '.' || c == '[' || c == ']')
        .filter(|s| !s.is_empty() && !s.chars().all(|c| c.is_ascii_digit()))
        .last()?;

    let pos = find_key(content, key)?;
    let rest = &content[pos + key.len()..];
    if let Some(eq_pos) = rest.find('=') {
        let after_eq = &rest[eq_pos + 1..];
        if let Some(val_start) = after_eq.find(|c: char| !c.is_whitespace()) {
            let val_content = &after_eq[val_start..];
            let val_len = val_content.find(['\n', '\r']).unwrap_or(val_content.len());
            return Some(SourceSpan::new(
                (pos + key.len() + eq_pos + 1 + val_start).into(),
                val_len,
            ));
        }
    }

    Some(SourceSpan::new(pos.into(), key.len()))
}

/// Finds `key` at the start of a line, so `name` does not match inside `legal_name`.
fn find_key(content: &str, key: &str) -> Option<usize> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();
        if let Some(after) = trimmed.strip_prefix(key) {
            if after.trim_start().starts_with('=') {
                return Some(offset + indent);
            }
        }
        offset += line.len();
    }

    content.find(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_points_at_value() {
        let content = "legal_name = \"x\"\nname = \"Acme\"\n";
        let span = find_span(content, "name").unwrap();
        assert_eq!(&content[span.offset()..span.offset() + span.len()], "\"Acme\"");
    }

    #[test]
    fn test_span_skips_indices() {
        let content = "same_as = [\"nope\"]\n";
        let span = find_span(content, "organization.same_as[0]").unwrap();
        assert_eq!(span.offset(), "same_as = ".len());
    }

    #[test]
    fn test_unknown_key() {
        assert!(find_span("a = 1\n", "missing").is_none());
    }
}
