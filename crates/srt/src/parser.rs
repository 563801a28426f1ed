//! Block segmentation and field extraction for SubRip content.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::entry::SubtitleEntry;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Errors that can occur when reading SubRip content.
#[derive(Debug, thiserror::Error)]
pub enum SrtError {
    #[error("Invalid sequence number {line:?} in block {block}")]
    InvalidSequence { block: usize, line: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8: {source}")]
    Encoding {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },
}

/// `HH:MM:SS,mmm --> HH:MM:SS,mmm` anchored at the start of the line.
fn timing_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3}) --> ([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3})")
            .expect("timing pattern is valid")
    })
}

/// Extract `(start, end)` from a timing line.
///
/// Only the prefix has to match; anything after the end timestamp
/// (position hints and the like) is ignored.
pub fn parse_timing_line(line: &str) -> Option<(&str, &str)> {
    let caps = timing_regex().captures(line)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Sequence number from the first line of a block, surrounding whitespace
/// ignored.
pub fn parse_sequence(line: &str) -> Option<u64> {
    line.trim().parse().ok()
}

/// Whether a block has the shape of an entry: a sequence line, a timing
/// line and at least one line of text.
pub fn is_acceptable(block: &[&str]) -> bool {
    block.len() >= 3 && parse_timing_line(block[1]).is_some()
}

/// Split content into blocks of lines at runs of blank lines.
///
/// A blank line holds only whitespace. The first line of each block is
/// left-trimmed and the last right-trimmed, so block edges never carry
/// stray whitespace.
pub fn split_blocks(content: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    for block in &mut blocks {
        if let Some(first) = block.first_mut() {
            *first = first.trim_start();
        }
        if let Some(last) = block.last_mut() {
            *last = last.trim_end();
        }
    }

    blocks
}

/// Parse SubRip content into entries, preserving source order.
///
/// Any block of three or more lines must start with an integer sequence
/// number, otherwise the whole parse fails. Blocks that are shorter, or whose
/// second line is not a timing line, are skipped.
pub fn parse(content: &str) -> Result<Vec<SubtitleEntry>, SrtError> {
    let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);
    let mut entries = Vec::new();

    for (index, block) in split_blocks(content).iter().enumerate() {
        let block_number = index + 1;
        if block.len() < 3 {
            tracing::debug!(
                block = block_number,
                lines = block.len(),
                "skipping short subtitle block"
            );
            continue;
        }

        let sequence = parse_sequence(block[0]).ok_or_else(|| SrtError::InvalidSequence {
            block: block_number,
            line: block[0].to_string(),
        })?;

        if !is_acceptable(block) {
            tracing::debug!(
                block = block_number,
                sequence,
                "skipping subtitle block without a timing line"
            );
            continue;
        }

        // is_acceptable already matched this line.
        let Some((start, end)) = parse_timing_line(block[1]) else {
            continue;
        };

        entries.push(SubtitleEntry::new(sequence, start, end, block[2..].join("\n")));
    }

    tracing::debug!(entries = entries.len(), "parsed subtitle content");
    Ok(entries)
}

/// Read and parse a SubRip file. The file must be UTF-8.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<SubtitleEntry>, SrtError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| SrtError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let content = String::from_utf8(bytes).map_err(|e| SrtError::Encoding {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TWO_ENTRIES: &str = "1\n00:00:01,000 --> 00:00:02,500\nHello world\n\n2\n00:00:03,000 --> 00:00:04,000\nSecond line\n";

    #[test]
    fn test_parse_two_entries_in_order() {
        let entries = parse(TWO_ENTRIES).unwrap();
        assert_eq!(
            entries,
            vec![
                SubtitleEntry::new(1, "00:00:01,000", "00:00:02,500", "Hello world"),
                SubtitleEntry::new(2, "00:00:03,000", "00:00:04,000", "Second line"),
            ]
        );
    }

    #[test]
    fn test_multiline_text_is_preserved() {
        let content = "5\n00:01:00,000 --> 00:01:02,000\nfirst\nsecond\nthird\n";
        let entries = parse(content).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "first\nsecond\nthird");
    }

    #[test]
    fn test_missing_timing_line_is_skipped() {
        let content = "1\nnot a timing line\nHello\n\n2\n00:00:03,000 --> 00:00:04,000\nKept\n";
        let entries = parse(content).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].sequence, 2);
        assert_eq!(entries[0].text, "Kept");
    }

    #[test]
    fn test_two_line_block_is_dropped() {
        let content = "1\n00:00:01,000 --> 00:00:02,000\n\n2\n00:00:03,000 --> 00:00:04,000\nText\n";
        let entries = parse(content).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].sequence, 2);
    }

    #[test]
    fn test_timing_without_milliseconds_is_dropped() {
        let content = "1\n00:00:01 --> 00:00:02\nNo millis\n";
        assert!(parse(content).unwrap().is_empty());
    }

    #[test]
    fn test_non_numeric_sequence_fails() {
        let content = "X\n00:00:01,000 --> 00:00:02,500\nHello world\n";
        let err = parse(content).unwrap_err();
        match err {
            SrtError::InvalidSequence { block, line } => {
                assert_eq!(block, 1);
                assert_eq!(line, "X");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_sequence_after_valid_block_fails_whole_parse() {
        let content = "1\n00:00:01,000 --> 00:00:02,000\nOk\n\nabc\n00:00:03,000 --> 00:00:04,000\nBad\n";
        assert!(matches!(
            parse(content),
            Err(SrtError::InvalidSequence { block: 2, .. })
        ));
    }

    #[test]
    fn test_multiple_blank_lines_and_whitespace_separators() {
        let content = "\n\n1\n00:00:01,000 --> 00:00:02,000\nA\n\n \t \n\n2\n00:00:03,000 --> 00:00:04,000\nB\n\n\n";
        let entries = parse(content).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].text, "B");
    }

    #[test]
    fn test_crlf_and_byte_order_mark() {
        let content = "\u{feff}1\r\n00:00:01,000 --> 00:00:02,000\r\nWindows\r\n\r\n2\r\n00:00:03,000 --> 00:00:04,000\r\nLine\r\n";
        let entries = parse(content).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].sequence, 1);
        assert_eq!(entries[0].text, "Windows");
    }

    #[test]
    fn test_blank_looking_text_line_stays_in_block() {
        // U+200B is not whitespace, so this line does not separate blocks.
        let content = "1\n00:00:01,000 --> 00:00:02,000\nabove\n\u{200b}\nbelow\n";
        let entries = parse(content).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "above\n\u{200b}\nbelow");
    }

    #[test]
    fn test_timing_line_trailing_content_is_ignored() {
        let line = "00:00:01,000 --> 00:00:02,000 X1:100 X2:200";
        assert_eq!(
            parse_timing_line(line),
            Some(("00:00:01,000", "00:00:02,000"))
        );
        assert_eq!(parse_timing_line(" 00:00:01,000 --> 00:00:02,000"), None);
        assert_eq!(parse_timing_line("00:00:01,000->00:00:02,000"), None);
    }

    #[test]
    fn test_start_after_end_is_not_checked() {
        let content = "3\n00:00:09,000 --> 00:00:01,000\nBackwards\n";
        let entries = parse(content).unwrap();
        assert_eq!(entries[0].start_time, "00:00:09,000");
        assert_eq!(entries[0].end_time, "00:00:01,000");
    }

    #[test]
    fn test_is_acceptable() {
        assert!(is_acceptable(&["1", "00:00:01,000 --> 00:00:02,000", "text"]));
        assert!(!is_acceptable(&["1", "00:00:01,000 --> 00:00:02,000"]));
        assert!(!is_acceptable(&["1", "00:00:01.000 --> 00:00:02.000", "text"]));
        assert!(!is_acceptable(&["1", "0:00:01,000 --> 00:00:02,000", "text"]));
        // Shape only; the sequence line is checked by parse_sequence.
        assert!(is_acceptable(&["X", "00:00:01,000 --> 00:00:02,000", "text"]));
    }

    #[test]
    fn test_non_numeric_sequence_fails_even_without_timing_line() {
        let content = "X\nnot a timing line\ntext\n";
        assert!(matches!(
            parse(content),
            Err(SrtError::InvalidSequence { block: 1, .. })
        ));
    }

    #[test]
    fn test_short_block_with_non_numeric_first_line_is_skipped() {
        let content = "X\n00:00:01,000 --> 00:00:02,000\n\n2\n00:00:03,000 --> 00:00:04,000\nKept\n";
        let entries = parse(content).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].sequence, 2);
    }

    #[test]
    fn test_sequence_numbers_beyond_u32() {
        let content = "4294967296\n00:00:01,000 --> 00:00:02,000\nBig\n";
        assert_eq!(parse(content).unwrap()[0].sequence, 4_294_967_296);
        assert_eq!(parse_sequence(" 0 "), Some(0));
        assert_eq!(parse_sequence("-1"), None);
        assert_eq!(parse_sequence("18446744073709551616"), None);
    }

    #[test]
    fn test_empty_content() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("  \n\n \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_file_reports_path_on_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.srt");
        match parse_file(&path) {
            Err(SrtError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_parse_file_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.srt");
        std::fs::write(&path, b"1\n00:00:01,000 --> 00:00:02,000\ncaf\xe9\n").unwrap();
        assert!(matches!(parse_file(&path), Err(SrtError::Encoding { .. })));
    }

    fn timestamp() -> impl Strategy<Value = String> {
        (0u32..100, 0u32..60, 0u32..60, 0u32..1000)
            .prop_map(|(h, m, s, ms)| format!("{h:02}:{m:02}:{s:02},{ms:03}"))
    }

    fn text_line() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z,.!?']{0,12}( [A-Za-z,.!?']{1,8}){0,3}"
    }

    fn entry() -> impl Strategy<Value = SubtitleEntry> {
        (
            1u64..100_000,
            timestamp(),
            timestamp(),
            prop::collection::vec(text_line(), 1..4),
        )
            .prop_map(|(seq, start, end, lines)| {
                SubtitleEntry::new(seq, start, end, lines.join("\n"))
            })
    }

    proptest! {
        #[test]
        fn prop_written_block_parses_back(e in entry()) {
            let parsed = parse(&e.to_block()).unwrap();
            prop_assert_eq!(parsed, vec![e]);
        }

        #[test]
        fn prop_entries_keep_source_order(
            entries in prop::collection::vec(entry(), 0..12),
            separator in prop::sample::select(vec!["\n", "\n\n", "\n \n\t\n"]),
        ) {
            let content = entries
                .iter()
                .map(SubtitleEntry::to_block)
                .collect::<Vec<_>>()
                .join(separator);
            let parsed = parse(&content).unwrap();
            prop_assert_eq!(parsed, entries);
        }

        #[test]
        fn prop_malformed_blocks_are_dropped(
            entries in prop::collection::vec(entry(), 1..8),
            broken in prop::collection::vec(any::<bool>(), 8),
        ) {
            let mut content = String::new();
            let mut expected = Vec::new();
            for (e, &is_broken) in entries.iter().zip(&broken) {
                if is_broken {
                    content.push_str(&format!("{}\n{}\n", e.sequence, e.text));
                } else {
                    content.push_str(&e.to_block());
                    expected.push(e.clone());
                }
                content.push('\n');
            }
            prop_assert_eq!(parse(&content).unwrap(), expected);
        }
    }
}
