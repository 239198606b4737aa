//! Splits zone text into entries that can be parsed one at a time.
//!
//! Parsing record by record keeps the original order and keeps duplicate
//! lines as separate records, which a whole-text parse into record sets
//! would not. The splitter only tracks what must survive the split:
//! `$ORIGIN`/`$TTL` directives and parenthesised groups spanning lines.

use dnstest_domain::FixtureError;
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EntryKind {
    Origin,
    Ttl,
    Record { owner_omitted: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ZoneEntry {
    /// 1-based line the entry starts on
    pub line: usize,
    pub kind: EntryKind,
    pub text: String,
}

pub(crate) fn split(text: &str) -> Result<Vec<ZoneEntry>, FixtureError> {
    let mut entries = Vec::new();
    let mut current: Option<ZoneEntry> = None;
    let mut depth = 0usize;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;

        if let Some(entry) = current.as_mut() {
            entry.text.push('\n');
            entry.text.push_str(line);
            depth = track_parens(line, depth);
            if depth == 0 {
                entries.extend(current.take());
            }
            continue;
        }

        if strip_comment(line).trim().is_empty() {
            continue;
        }

        let kind = if line.starts_with('$') {
            directive_kind(line, line_no)?
        } else {
            EntryKind::Record {
                owner_omitted: line.starts_with([' ', '\t']),
            }
        };

        let entry = ZoneEntry {
            line: line_no,
            kind,
            text: line.to_string(),
        };

        depth = track_parens(line, 0);
        if depth == 0 {
            entries.push(entry);
        } else {
            current = Some(entry);
        }
    }

    if let Some(entry) = current {
        return Err(FixtureError::InvalidZone {
            line: entry.line,
            message: "unterminated '(' group".to_string(),
        });
    }

    Ok(entries)
}

fn directive_kind(line: &str, line_no: usize) -> Result<EntryKind, FixtureError> {
    let directive = line.split_whitespace().next().unwrap_or_default();
    match directive.to_ascii_uppercase().as_str() {
        "$ORIGIN" => Ok(EntryKind::Origin),
        "$TTL" => Ok(EntryKind::Ttl),
        _ => Err(FixtureError::InvalidZone {
            line: line_no,
            message: format!("unsupported directive {}", directive),
        }),
    }
}

/// Returns the part of `line` before an unquoted `;`.
fn strip_comment(line: &str) -> &str {
    let mut in_quote = false;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => in_quote = !in_quote,
            ';' if !in_quote => return &line[..i],
            _ => {}
        }
    }
    line
}

fn track_parens(line: &str, mut depth: usize) -> usize {
    let mut in_quote = false;
    let mut escaped = false;
    for c in strip_comment(line).chars() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => in_quote = !in_quote,
            '(' if !in_quote => depth += 1,
            ')' if !in_quote => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    depth
}

/// Inserts `IN` before the record type when the first line names no class.
///
/// Expects an owner as the first token. Only the tokens between the owner
/// and the type are looked at, which is where TTL and class live.
pub(crate) fn with_default_class(record: &str) -> Cow<'_, str> {
    let first_line = record.lines().next().unwrap_or_default();
    let spans = token_spans(strip_comment(first_line));

    for &(start, end) in spans.iter().skip(1).take(2) {
        let token = &first_line[start..end];
        if is_class(token) {
            return Cow::Borrowed(record);
        }
        if !is_ttl(token) {
            let mut out = String::with_capacity(record.len() + 3);
            out.push_str(&record[..start]);
            out.push_str("IN ");
            out.push_str(&record[start..]);
            return Cow::Owned(out);
        }
    }

    Cow::Borrowed(record)
}

/// Spells an `SPF` record as `TXT` for the text parser.
///
/// SPF shares TXT's presentation and wire format; hickory only knows the
/// latter. Returns `None` when the record type is anything else.
pub(crate) fn spf_as_txt(record: &str) -> Option<String> {
    let first_line = record.lines().next().unwrap_or_default();
    let spans = token_spans(strip_comment(first_line));

    let &(start, end) = spans
        .iter()
        .skip(1)
        .take(3)
        .find(|&&(start, end)| {
            let token = &first_line[start..end];
            !is_ttl(token) && !is_class(token)
        })?;

    if !first_line[start..end].eq_ignore_ascii_case("SPF") {
        return None;
    }

    let mut out = String::with_capacity(record.len());
    out.push_str(&record[..start]);
    out.push_str("TXT");
    out.push_str(&record[end..]);
    Some(out)
}

fn token_spans(line: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in line.char_indices() {
        match (c.is_ascii_whitespace(), start) {
            (true, Some(s)) => {
                spans.push((s, i));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, line.len()));
    }
    spans
}

fn is_ttl(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_digit())
}

fn is_class(token: &str) -> bool {
    let upper = token.to_ascii_uppercase();
    match upper.as_str() {
        "IN" | "CH" | "CS" | "HS" | "NONE" | "ANY" => true,
        _ => upper
            .strip_prefix("CLASS")
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_entry_per_record_line() {
        let entries =
            split("example.com. 104 A 127.0.0.1\nexample.com. 104 MX 10 mail.example.com.").unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].line, 1);
        assert_eq!(entries[1].line, 2);
        assert_eq!(entries[1].text, "example.com. 104 MX 10 mail.example.com.");
    }

    #[test]
    fn test_blank_and_comment_lines_skipped() {
        let entries = split("\n; fixture\n\nexample.com. 60 A 10.0.0.1 ; web\n   \n").unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].line, 4);
    }

    #[test]
    fn test_parenthesised_group_spans_lines() {
        let text = "example.com. 3600 SOA ns1.example.com. admin.example.com. (\n\
                    2024010101 ; serial\n\
                    7200 3600 1209600 300 )\n\
                    example.com. 60 A 10.0.0.1";
        let entries = split(text).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].line, 1);
        assert_eq!(entries[0].text.lines().count(), 3);
        assert_eq!(entries[1].line, 4);
    }

    #[test]
    fn test_parens_inside_quotes_and_comments_ignored() {
        let text = "example.com. 60 TXT \"smile (\"\nexample.com. 60 A 10.0.0.1 ; (";
        let entries = split(text).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_unterminated_group_is_rejected() {
        let err = split("example.com. 60 IN SOA a. b. (\n1 2 3 4 5").unwrap_err();
        assert!(matches!(err, FixtureError::InvalidZone { line: 1, .. }));
    }

    #[test]
    fn test_directives_and_omitted_owner() {
        let text = "$ORIGIN example.com.\n$TTL 300\n@ A 10.0.0.1\n  MX 10 mail";
        let entries = split(text).unwrap();

        assert_eq!(entries[0].kind, EntryKind::Origin);
        assert_eq!(entries[1].kind, EntryKind::Ttl);
        assert_eq!(
            entries[2].kind,
            EntryKind::Record {
                owner_omitted: false
            }
        );
        assert_eq!(
            entries[3].kind,
            EntryKind::Record {
                owner_omitted: true
            }
        );
    }

    #[test]
    fn test_unsupported_directive() {
        let err = split("example.com. 60 A 10.0.0.1\n$INCLUDE other.zone").unwrap_err();
        match err {
            FixtureError::InvalidZone { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("$INCLUDE"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_default_class_inserted_before_type() {
        assert_eq!(
            with_default_class("example.com. 104 A 127.0.0.1"),
            "example.com. 104 IN A 127.0.0.1"
        );
        assert_eq!(
            with_default_class("example.com. MX 10 mail.example.com."),
            "example.com. IN MX 10 mail.example.com."
        );
    }

    #[test]
    fn test_explicit_class_left_alone() {
        let record = "example.com. 104 IN A 127.0.0.1";
        assert!(matches!(with_default_class(record), Cow::Borrowed(_)));

        let record = "example.com. CH 104 TXT \"x\"";
        assert!(matches!(with_default_class(record), Cow::Borrowed(_)));
    }

    #[test]
    fn test_default_class_only_touches_first_line() {
        let record = "example.com. 3600 SOA ns1.example.com. admin.example.com. (\n1 2 3 4 5 )";
        assert_eq!(
            with_default_class(record),
            "example.com. 3600 IN SOA ns1.example.com. admin.example.com. (\n1 2 3 4 5 )"
        );
    }

    #[test]
    fn test_spf_type_spelled_as_txt() {
        assert_eq!(
            spf_as_txt("example.com. 60 IN SPF \"v=spf1 -all\"").as_deref(),
            Some("example.com. 60 IN TXT \"v=spf1 -all\"")
        );
        assert_eq!(
            spf_as_txt("example.com. IN spf \"v=spf1 -all\"").as_deref(),
            Some("example.com. IN TXT \"v=spf1 -all\"")
        );
    }

    #[test]
    fn test_spf_only_matched_in_type_position() {
        assert_eq!(spf_as_txt("example.com. 60 IN TXT \"SPF\""), None);
        assert_eq!(spf_as_txt("spf.example.com. 60 IN A 10.0.0.1"), None);
        assert_eq!(spf_as_txt("spf 60 IN A 10.0.0.1"), None);
    }
}
