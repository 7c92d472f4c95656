//! Zone-file parsing.
//!
//! Supports the line-per-record subset of the master-file format:
//!
//! ```text
//! $ORIGIN example.com.
//! $TTL 3600
//! @    300 IN SOA ns1.example.com. hostmaster.example.com. 1 7200 900 1209600 300
//! www      IN A   203.0.113.9
//! shop 300 IN CNAME shops.vendor.example.net.
//! ```
//!
//! The first non-blank line carries the origin as its second token. Every
//! later non-blank line is a record, except `$` directives. A `;` starts a
//! comment running to the end of the line, and a parenthesised group may
//! span several lines:
//!
//! ```text
//! @ 3600 IN SOA ns1.example.com. hostmaster.example.com. (
//!         2024010101 ; serial
//!         7200 900 1209600 300 )
//! ```
//!
//! A record's TTL may be omitted when its class is written instead; it then
//! takes the last `$TTL` value (0 if none). Quoted strings are not
//! tokenized specially.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{OrbitError, Result};
use crate::input::read_lines;
use crate::types::{ZoneFile, ZoneRecord};

/// Default extension marking zone files inside a directory.
pub const ZONE_EXTENSION: &str = "zone";

/// Class mnemonics recognised in place of a TTL.
const CLASSES: &[&str] = &["IN", "CH", "HS", "CS"];

/// Parse a zone file, or every zone file in a directory.
///
/// # Errors
///
/// Fails on a missing path, a path that is neither file nor directory, a
/// malformed single file, or a directory yielding no zones.
pub fn parse(path: &Path) -> Result<Vec<ZoneFile>> {
    parse_with_extension(path, ZONE_EXTENSION)
}

/// [`parse`] with a custom zone-file extension for directory scans.
pub fn parse_with_extension(path: &Path, extension: &str) -> Result<Vec<ZoneFile>> {
    let meta = std::fs::metadata(path).map_err(|e| OrbitError::io(path, e))?;

    if meta.is_file() {
        Ok(vec![parse_file(path)?])
    } else if meta.is_dir() {
        parse_directory(path, extension)
    } else {
        Err(OrbitError::InvalidPath(path.display().to_string()))
    }
}

/// Parse a single zone file.
pub fn parse_file(path: &Path) -> Result<ZoneFile> {
    let lines = read_lines(path)?;
    parse_lines(&path.display().to_string(), &lines)
}

/// Parse every zone file directly inside `dir`, skipping files that fail.
fn parse_directory(dir: &Path, extension: &str) -> Result<Vec<ZoneFile>> {
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| is_zone_file(p, extension))
        .collect();
    paths.sort();

    let mut zones = Vec::with_capacity(paths.len());
    for path in paths {
        match parse_file(&path) {
            Ok(zone) => {
                debug!(path = %path.display(), records = zone.records.len(), "parsed zone");
                zones.push(zone);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping zone file");
            }
        }
    }

    if zones.is_empty() {
        return Err(OrbitError::NoZoneFiles(dir.display().to_string()));
    }
    Ok(zones)
}

fn is_zone_file(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

/// Parse zone text already split into lines. `source` names it in errors.
///
/// # Errors
///
/// Fails if there is no origin line, no data line, or any record line is
/// malformed.
pub fn parse_lines(source: &str, lines: &[String]) -> Result<ZoneFile> {
    let mut logical = logical_lines(lines).into_iter();

    let (origin_line, origin_tokens) = logical
        .next()
        .ok_or_else(|| OrbitError::EmptyInput(source.to_string()))?;
    let origin = origin_tokens
        .get(1)
        .ok_or_else(|| OrbitError::MissingOrigin {
            path: source.to_string(),
            line: origin_line,
        })?
        .to_string();

    let mut default_ttl = 0;
    let mut records = Vec::new();

    for (line, tokens) in logical {
        if let Some(directive) = tokens[0].strip_prefix('$') {
            if directive.eq_ignore_ascii_case("TTL") {
                default_ttl = parse_ttl(source, line, tokens.get(1).copied().unwrap_or(""))?;
            } else {
                debug!(source, line, directive, "ignoring directive");
            }
            continue;
        }
        records.push(parse_record(source, line, &tokens, default_ttl)?);
    }

    if records.is_empty() {
        return Err(OrbitError::EmptyInput(source.to_string()));
    }

    Ok(ZoneFile { origin, records })
}

/// Split on runs of spaces and tabs, stopping at a `;` comment.
fn tokenize(line: &str) -> impl Iterator<Item = &str> {
    line.split_whitespace().take_while(|t| !t.starts_with(';'))
}

/// Non-empty logical lines with their 1-based starting line number.
///
/// A `(` left open folds the following lines into the one that opened it
/// until the matching `)`. The parentheses themselves are dropped.
fn logical_lines(lines: &[String]) -> Vec<(usize, Vec<&str>)> {
    let mut logical = Vec::new();
    let mut pending: Option<(usize, Vec<&str>)> = None;
    let mut depth = 0usize;

    for (index, line) in lines.iter().enumerate() {
        for token in tokenize(line) {
            depth += token.matches('(').count();
            depth = depth.saturating_sub(token.matches(')').count());
            let bare = token.trim_matches(|c| c == '(' || c == ')');
            if !bare.is_empty() {
                pending
                    .get_or_insert_with(|| (index + 1, Vec::new()))
                    .1
                    .push(bare);
            }
        }
        if depth == 0 {
            logical.extend(pending.take());
        }
    }
    logical.extend(pending);
    logical
}

fn parse_record(
    source: &str,
    line: usize,
    tokens: &[&str],
    default_ttl: u32,
) -> Result<ZoneRecord> {
    let malformed = |reason: &str| OrbitError::MalformedRecord {
        path: source.to_string(),
        line,
        reason: reason.to_string(),
    };

    let name = tokens[0];
    let second = tokens.get(1).ok_or_else(|| malformed("missing TTL"))?;

    let (ttl, rest) = if is_class(second) {
        (default_ttl, &tokens[1..])
    } else {
        (parse_ttl(source, line, second)?, &tokens[2..])
    };

    match rest {
        [class, record_type, content @ ..] if !content.is_empty() => Ok(ZoneRecord {
            record_type: record_type.to_ascii_uppercase(),
            class: class.to_ascii_uppercase(),
            name: name.to_string(),
            content: content.join(" "),
            ttl,
        }),
        [] => Err(malformed("missing class")),
        [_] => Err(malformed("missing type")),
        _ => Err(malformed("missing content")),
    }
}

fn parse_ttl(source: &str, line: usize, value: &str) -> Result<u32> {
    value.parse().map_err(|_| OrbitError::InvalidTtl {
        path: source.to_string(),
        line,
        value: value.to_string(),
    })
}

fn is_class(token: &str) -> bool {
    CLASSES.iter().any(|c| c.eq_ignore_ascii_case(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_owned).collect()
    }

    const ZONE: &str = "$ORIGIN example.com.
@\t3600\tIN\tSOA\tns1.example.com. hostmaster.example.com. 2024010101 7200 900 1209600 300
www   300  IN   A     203.0.113.9

mail  300  IN   MX    10 mx.example.com.
shop  300  IN   CNAME shops.vendor.example.net.
";

    #[test]
    fn test_parse_records() {
        let zone = parse_lines("example.zone", &lines(ZONE)).unwrap();
        assert_eq!(zone.origin, "example.com.");
        assert_eq!(zone.records.len(), 4);

        let www = &zone.records[1];
        assert_eq!(www.name, "www");
        assert_eq!(www.ttl, 300);
        assert_eq!(www.class, "IN");
        assert_eq!(www.record_type, "A");
        assert_eq!(www.content, "203.0.113.9");

        assert_eq!(
            zone.records[0].content,
            "ns1.example.com. hostmaster.example.com. 2024010101 7200 900 1209600 300"
        );
        assert_eq!(zone.records[2].content, "10 mx.example.com.");
    }

    #[test]
    fn test_record_count_is_non_blank_lines_minus_origin() {
        let text = "\n$ORIGIN example.org.\na 60 IN A 192.0.2.1\n\n\nb 60 IN A 192.0.2.2\nc 60 IN AAAA 2001:db8::3\n";
        let zone = parse_lines("t", &lines(text)).unwrap();
        assert_eq!(zone.origin, "example.org.");
        assert_eq!(zone.records.len(), 3);
    }

    #[test]
    fn test_invalid_ttl_aborts_file() {
        let text = "$ORIGIN example.com.\nwww abc IN A 203.0.113.9\n";
        let err = parse_lines("bad.zone", &lines(text)).unwrap_err();
        assert!(matches!(err, OrbitError::InvalidTtl { line: 2, .. }));

        let negative = "$ORIGIN example.com.\nwww -1 IN A 203.0.113.9\n";
        assert!(parse_lines("bad.zone", &lines(negative)).is_err());
    }

    #[test]
    fn test_ttl_may_be_omitted_after_ttl_directive() {
        let text = "$ORIGIN example.com.\n$TTL 900\n; comment line\nwww IN A 203.0.113.9\napi 60 IN A 203.0.113.10\n";
        let zone = parse_lines("t", &lines(text)).unwrap();
        assert_eq!(zone.records.len(), 2);
        assert_eq!(zone.records[0].ttl, 900);
        assert_eq!(zone.records[1].ttl, 60);
    }

    #[test]
    fn test_omitted_ttl_defaults_to_zero() {
        let zone = parse_lines("t", &lines("$ORIGIN example.com.\nwww IN A 203.0.113.9")).unwrap();
        assert_eq!(zone.records[0].ttl, 0);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(matches!(
            parse_lines("empty", &[]).unwrap_err(),
            OrbitError::EmptyInput(_)
        ));
        assert!(matches!(
            parse_lines("origin-only", &lines("$ORIGIN example.com.\n\n")).unwrap_err(),
            OrbitError::EmptyInput(_)
        ));
        assert!(matches!(
            parse_lines("no-origin", &lines("$ORIGIN\nwww 1 IN A 192.0.2.1")).unwrap_err(),
            OrbitError::MissingOrigin { line: 1, .. }
        ));
    }

    #[test]
    fn test_trailing_comments_are_dropped() {
        let text = "$ORIGIN example.com. ; apex
www  300 IN A     203.0.113.9 ; web
shop 300 IN CNAME shops.vendor.example.net. ; storefront
";
        let zone = parse_lines("t", &lines(text)).unwrap();
        assert_eq!(zone.origin, "example.com.");
        assert_eq!(zone.records[0].content, "203.0.113.9");
        assert_eq!(zone.records[1].content, "shops.vendor.example.net.");
        assert!(zone
            .address_targets()
            .contains("203.0.113.9".parse().unwrap()));
    }

    #[test]
    fn test_parenthesised_soa_spans_lines() {
        let text = "$ORIGIN example.com.
@ 3600 IN SOA ns1.example.com. hostmaster.example.com. (
        2024010101 ; serial
        7200       ; refresh
        900 1209600 300 )
www 300 IN A 203.0.113.9
";
        let zone = parse_lines("t", &lines(text)).unwrap();
        assert_eq!(zone.records.len(), 2);
        assert_eq!(zone.records[0].record_type, "SOA");
        assert_eq!(
            zone.records[0].content,
            "ns1.example.com. hostmaster.example.com. 2024010101 7200 900 1209600 300"
        );
        assert_eq!(zone.records[1].name, "www");
    }

    #[test]
    fn test_error_lines_point_at_record_start() {
        let text = "$ORIGIN example.com.\n@ 3600 IN SOA ns1 host (\n 1 2 3 4 5 )\nwww soon IN A 192.0.2.1\n";
        let err = parse_lines("t", &lines(text)).unwrap_err();
        assert!(matches!(err, OrbitError::InvalidTtl { line: 4, .. }));
    }

    #[test]
    fn test_malformed_record() {
        let err = parse_lines("t", &lines("$ORIGIN example.com.\nwww 300 IN A")).unwrap_err();
        assert!(matches!(err, OrbitError::MalformedRecord { .. }));
    }

    #[test]
    fn test_parse_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("example.com.zone");
        fs::write(&path, ZONE).unwrap();
        let zones = parse(&path).unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].records.len(), 4);
    }

    #[test]
    fn test_parse_directory_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.zone"), ZONE).unwrap();
        fs::write(
            dir.path().join("b.zone"),
            "$ORIGIN example.net.\nwww nope IN A 192.0.2.1\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("c.zone"),
            "$ORIGIN example.org.\nwww 60 IN A 192.0.2.2\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "not a zone").unwrap();

        let zones = parse(dir.path()).unwrap();
        let origins: Vec<&str> = zones.iter().map(|z| z.origin.as_str()).collect();
        assert_eq!(origins, vec!["example.com.", "example.org."]);
    }

    #[test]
    fn test_directory_without_zones_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            parse(dir.path()).unwrap_err(),
            OrbitError::NoZoneFiles(_)
        ));

        fs::write(dir.path().join("bad.zone"), "$ORIGIN example.net.\n").unwrap();
        assert!(matches!(
            parse(dir.path()).unwrap_err(),
            OrbitError::NoZoneFiles(_)
        ));
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let err = parse(Path::new("/nonexistent/zones")).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_custom_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("example.db"), ZONE).unwrap();
        assert!(parse(dir.path()).is_err());
        assert_eq!(parse_with_extension(dir.path(), "db").unwrap().len(), 1);
    }
}
