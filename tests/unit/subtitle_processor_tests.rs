/*!
 * Tests for subtitle loading, shifting and rendering
 */

use anyhow::Result;
use std::path::PathBuf;

use subshift::app_config::OverflowPolicy;
use subshift::delay::Delay;
use subshift::errors::SubtitleError;
use subshift::file_utils::TextEncoding;
use subshift::subtitle_processor::{SubtitleCollection, SubtitleEntry, Timestamp};
use crate::common;

fn ts(token: &str) -> Timestamp {
    Timestamp::parse(token).unwrap()
}

/// Test that N well-formed blocks load into N entries in file order
#[test]
fn test_parse_srt_string_withThreeBlocks_shouldKeepFileOrder() -> Result<()> {
    let entries = SubtitleCollection::parse_srt_string(common::THREE_ENTRIES)?;

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].text(), "This is a test subtitle.");
    assert_eq!(entries[1].text(), "It contains multiple entries.");
    assert_eq!(entries[2].text(), "For testing purposes.");
    assert_eq!(entries[1].start(), ts("00:00:05,000"));
    assert_eq!(entries[1].end(), ts("00:00:09,000"));
    assert!(entries.iter().all(|e| !e.text().is_empty()));

    Ok(())
}

/// Test that a missing trailing blank line still closes the last block
#[test]
fn test_parse_srt_string_withoutTrailingBlank_shouldLoadLastEntry() -> Result<()> {
    let entries = SubtitleCollection::parse_srt_string(
        "1\n00:00:01,000 --> 00:00:02,000\nonly entry",
    )?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].text(), "only entry");
    Ok(())
}

/// Test that multi-line text is joined with single newlines
#[test]
fn test_parse_srt_string_withMultilineText_shouldJoinLines() -> Result<()> {
    let entries = SubtitleCollection::parse_srt_string(
        "1\n00:00:01,000 --> 00:00:02,000\nfirst line\nsecond line\n\n",
    )?;
    assert_eq!(entries[0].text(), "first line\nsecond line");
    Ok(())
}

/// Test that a wrong second index names the expected value and the raw line
#[test]
fn test_parse_srt_string_withSkippedIndex_shouldFailWithSequenceError() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nA\n\n3\n00:00:03,000 --> 00:00:04,000\nB\n";
    let err = SubtitleCollection::parse_srt_string(content).unwrap_err();

    match err {
        SubtitleError::IndexSequence { expected, ref line } => {
            assert_eq!(expected, 2);
            assert_eq!(line, "3");
        }
        ref other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("expected entry 2, got 3"));
}

/// Test that a non-numeric index is a format error
#[test]
fn test_parse_srt_string_withTextIndex_shouldFailWithFormatError() {
    let err = SubtitleCollection::parse_srt_string("one\n00:00:01,000 --> 00:00:02,000\nA\n")
        .unwrap_err();
    assert!(matches!(err, SubtitleError::IndexFormat { .. }));
    assert!(err.to_string().contains("got one"));
}

/// Test that a block with no text names its position
#[test]
fn test_parse_srt_string_withMissingText_shouldFailWithEmptyText() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nA\n\n2\n00:00:03,000 --> 00:00:04,000\n\n";
    let err = SubtitleCollection::parse_srt_string(content).unwrap_err();
    assert!(matches!(err, SubtitleError::EmptyText { entry: 2 }));
}

/// Test that a time range without the separator includes the delimiter and line
#[test]
fn test_parse_srt_string_withMissingSeparator_shouldFailWithTimeRangeFormat() {
    let err = SubtitleCollection::parse_srt_string("1\n00:04:05,704 00:04:07,039\nA\n")
        .unwrap_err();
    assert!(matches!(err, SubtitleError::TimeRangeFormat { .. }));
    let message = err.to_string();
    assert!(message.contains(" --> "));
    assert!(message.contains("00:04:05,704 00:04:07,039"));
}

/// Test that a malformed time token names the entry position
#[test]
fn test_parse_srt_string_withBadTime_shouldFailWithTimeValue() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nA\n\n2\n00:00:03,000 --> 00:61:00,000\nB\n";
    let err = SubtitleCollection::parse_srt_string(content).unwrap_err();
    match err {
        SubtitleError::TimeValue { entry, token } => {
            assert_eq!(entry, 2);
            assert_eq!(token, "00:61:00,000");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Test that leading blank lines and a byte order mark are tolerated
#[test]
fn test_parse_srt_string_withBomAndLeadingBlanks_shouldLoad() -> Result<()> {
    let entries =
        SubtitleCollection::parse_srt_string("\u{feff}\n\n1\n00:00:01,000 --> 00:00:02,000\nA\n")?;
    assert_eq!(entries.len(), 1);
    Ok(())
}

/// Test the one-block scenario shifted by one minute
#[test]
fn test_load_and_shift_withOneMinute_shouldMoveBothEndpoints() -> Result<()> {
    let path = common::test_resource_path("1entry.srt");
    let collection = SubtitleCollection::load(&path, TextEncoding::Utf8)?;
    let shifted = collection.shift(Delay::parse("+1", "minute")?, OverflowPolicy::Wrap)?;

    assert_eq!(shifted.entries.len(), 1);
    let entry = &shifted.entries[0];
    assert_eq!(entry.start().to_string(), "00:06:05,704");
    assert_eq!(entry.end().to_string(), "00:06:07,039");
    assert_eq!(entry.text(), "Se me dás licença, sobrinho,");

    Ok(())
}

/// Test that rendering a zero-shifted canonical file reproduces it byte for byte
#[test]
fn test_render_withZeroDelay_shouldRoundTrip() -> Result<()> {
    let entries = SubtitleCollection::parse_srt_string(common::THREE_ENTRIES)?;
    let collection = SubtitleCollection {
        source_file: PathBuf::from("in-memory.srt"),
        entries,
    };
    let shifted = collection.shift(Delay::ZERO, OverflowPolicy::Wrap)?;

    let mut out = Vec::new();
    shifted.render(&mut out)?;
    assert_eq!(String::from_utf8(out)?, common::THREE_ENTRIES);

    Ok(())
}

/// Test that shifting composes and preserves order
#[test]
fn test_shift_twice_shouldEqualShiftBySum() -> Result<()> {
    let entries = SubtitleCollection::parse_srt_string(common::THREE_ENTRIES)?;
    let collection = SubtitleCollection {
        source_file: PathBuf::from("in-memory.srt"),
        entries,
    };
    let d1 = Delay::parse("-90", "s")?;
    let d2 = Delay::parse("+2500", "ms")?;

    let twice = collection
        .shift(d1, OverflowPolicy::Wrap)?
        .shift(d2, OverflowPolicy::Wrap)?;
    let once = collection.shift(d1.checked_add(d2).unwrap(), OverflowPolicy::Wrap)?;

    assert_eq!(twice.entries, once.entries);
    assert_eq!(once.entries[0].text(), "This is a test subtitle.");
    Ok(())
}

/// Test subtitle entry accessors
#[test]
fn test_subtitle_entry_properties_withValidEntry_shouldHaveCorrectValues() {
    let entry = SubtitleEntry::new(ts("00:01:01,234"), ts("00:01:05,432"), "Hello\nWorld".to_string());

    assert_eq!(entry.start().as_millis(), 61_234);
    assert_eq!(entry.end().as_millis(), 65_432);
    assert_eq!(entry.duration_ms(), 4_198);
    assert_eq!(entry.text(), "Hello\nWorld");
}

/// Test collection summary display
#[test]
fn test_collection_display_shouldSummarize() -> Result<()> {
    let collection = SubtitleCollection {
        source_file: PathBuf::from("movie.srt"),
        entries: SubtitleCollection::parse_srt_string(common::THREE_ENTRIES)?,
    };
    let summary = collection.to_string();
    assert!(summary.contains("movie.srt"));
    assert!(summary.contains("Entries: 3"));
    Ok(())
}
